//! Vellum CLI - inspect resolved design tokens
//!
//! Builds the light and dark token maps from the built-in token set (or from
//! the sources listed in a `vellum.toml`) and prints them, or resolves
//! individual references for debugging token documents.

mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use config::VellumConfig;
use output::Format;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vellum_tokens::{bg_token, spacing_token, Normalizer, Resolver, ThemeVariant, TokenValue};

/// Design token resolver
#[derive(Parser, Debug)]
#[command(name = "vellum")]
#[command(about = "Resolve design tokens into light and dark theme maps")]
#[command(version)]
struct Cli {
    /// Config file or directory containing vellum.toml (built-in tokens if omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print resolved theme maps
    Build {
        /// Theme to print
        #[arg(short, long, value_enum, default_value_t = ThemeArg::All)]
        theme: ThemeArg,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Resolve and normalize one dotted token path through the source registry
    Resolve {
        /// Token path, e.g. `neutral.0` (surrounding braces are accepted)
        path: String,
    },

    /// Look up one published token
    Get {
        /// Category, e.g. `bg`
        category: String,

        /// Key within the category, e.g. `default` or `input.error`
        key: String,

        #[arg(short, long, value_enum, default_value_t = ThemeArg::Light)]
        theme: ThemeArg,
    },

    /// List token sources in priority order
    Sources,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
    All,
}

impl ThemeArg {
    fn variants(self) -> &'static [ThemeVariant] {
        match self {
            ThemeArg::Light => &[ThemeVariant::Light],
            ThemeArg::Dark => &[ThemeVariant::Dark],
            ThemeArg::All => ThemeVariant::all(),
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => VellumConfig::load(path)?,
        None => VellumConfig::default(),
    };
    let registry = config.registry()?;

    match cli.command {
        Commands::Build { theme, format } => {
            let tokens = config.theme_tokens(&registry)?;
            let themes: Vec<_> = theme
                .variants()
                .iter()
                .map(|variant| (*variant, tokens.for_variant(*variant)))
                .collect();
            for (variant, map) in &themes {
                for name in map.undefined() {
                    tracing::warn!("{} theme: token {} is undefined", variant, name);
                }
            }
            println!("{}", output::render(&themes, format)?);
        }
        Commands::Resolve { path } => {
            let path = vellum_tokens::reference_path(&path).unwrap_or(&path);
            let resolver = Resolver::new(&registry);
            // normalized like a published token: nested references and shadows included
            let reference = TokenValue::String(format!("{{{path}}}"));
            match Normalizer::new(&resolver).normalize(&reference) {
                Some(value) => println!("{}", output::render_value(&value)?),
                None => anyhow::bail!("`{path}` is undefined"),
            }
        }
        Commands::Get {
            category,
            key,
            theme,
        } => {
            let tokens = config.theme_tokens(&registry)?;
            for variant in theme.variants() {
                let map = tokens.for_variant(*variant);
                // bg and spacing lookups fall back like the runtime helpers
                let value = match category.as_str() {
                    "bg" => bg_token(map, &key).map(TokenValue::from),
                    "spacing" => spacing_token(map, &key).map(TokenValue::from),
                    _ => map.get(&category, &key).cloned(),
                };
                match value {
                    Some(value) => println!("{}: {}", variant, output::render_value(&value)?),
                    None => anyhow::bail!("`{category}.{key}` is undefined in the {variant} theme"),
                }
            }
        }
        Commands::Sources => {
            for (priority, name) in registry.names().enumerate() {
                println!("{}. {}", priority + 1, name);
            }
        }
    }

    Ok(())
}
