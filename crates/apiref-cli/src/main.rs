//! apiref CLI - generate the decoders API reference pages

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use apiref_core::config::CONFIG_FILE;
use apiref_core::Config;

mod generate;
mod normalize;

#[derive(Parser)]
#[command(name = "apiref")]
#[command(version = apiref_core::VERSION)]
#[command(about = "Generate API reference markdown from decoder reference data", long_about = None)]
struct Cli {
    /// Path to apiref.toml (defaults to ./apiref.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the registry and write the decoders and methods pages
    Build {
        #[command(flatten)]
        source: generate::SourceArgs,

        /// Output directory for the generated pages
        #[arg(short, long, default_value = "docs")]
        out: PathBuf,
    },

    /// Build the registry and report integrity errors without writing pages
    Check {
        #[command(flatten)]
        source: generate::SourceArgs,
    },

    /// Print the normalized form of a text block
    Normalize {
        /// File to read (reads stdin if omitted)
        file: Option<PathBuf>,

        /// Also cross-link code spans against this reference data
        #[arg(long, value_name = "DATA")]
        link: Option<PathBuf>,

        /// Source report for decoders, used with --link and --methods-report
        #[arg(long, requires = "link", requires = "methods_report")]
        decoders_report: Option<PathBuf>,

        /// Source report for methods, used with --link and --decoders-report
        #[arg(long, requires = "link", requires = "decoders_report")]
        methods_report: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Build { source, out } => {
            let registry = generate::load_registry(&source, &config)?;
            let written = generate::write_pages(&registry, &config.site, &out)?;
            for path in &written {
                println!("Generated: {}", path.display());
            }
        }

        Commands::Check { source } => {
            let registry = generate::load_registry(&source, &config)?;
            println!(
                "OK: {} decoders, {} methods",
                registry.decoders().len(),
                registry.methods().len()
            );
        }

        Commands::Normalize {
            file,
            link,
            decoders_report,
            methods_report,
        } => {
            let options = normalize::NormalizeOptions {
                file,
                link: link.map(|data| generate::SourceArgs {
                    data,
                    decoders_report,
                    methods_report,
                }),
            };
            print!("{}", normalize::run(&options, &config)?);
        }
    }

    Ok(())
}

/// Install the fmt subscriber; RUST_LOG overrides the verbosity flag
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load the explicit config, or ./apiref.toml if it exists, or defaults
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("Failed to load config '{}'", path.display())),
        None if Path::new(CONFIG_FILE).exists() => {
            Config::from_path(CONFIG_FILE).context("Failed to load apiref.toml")
        }
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_reports_come_in_pairs() {
        let lone = Cli::try_parse_from([
            "apiref",
            "normalize",
            "--link",
            "d.toml",
            "--decoders-report",
            "x.json",
        ]);
        assert!(lone.is_err());

        let lone = Cli::try_parse_from([
            "apiref",
            "normalize",
            "--link",
            "d.toml",
            "--methods-report",
            "y.json",
        ]);
        assert!(lone.is_err());

        let cli = Cli::try_parse_from([
            "apiref",
            "normalize",
            "--link",
            "d.toml",
            "--decoders-report",
            "x.json",
            "--methods-report",
            "y.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Normalize {
                link,
                decoders_report,
                methods_report,
                ..
            } => {
                assert_eq!(link, Some(PathBuf::from("d.toml")));
                assert_eq!(decoders_report, Some(PathBuf::from("x.json")));
                assert_eq!(methods_report, Some(PathBuf::from("y.json")));
            }
            _ => panic!("expected normalize"),
        }
    }

    #[test]
    fn test_reports_without_link_rejected() {
        let result = Cli::try_parse_from([
            "apiref",
            "normalize",
            "--decoders-report",
            "x.json",
            "--methods-report",
            "y.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_reports_come_in_pairs() {
        let result = Cli::try_parse_from(["apiref", "build", "--decoders-report", "x.json"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from(["apiref", "build", "--data", "api.toml", "--out", "site"]).unwrap();
        match cli.command {
            Commands::Build { source, out } => {
                assert_eq!(source.data, PathBuf::from("api.toml"));
                assert!(source.decoders_report.is_none());
                assert_eq!(out, PathBuf::from("site"));
            }
            _ => panic!("expected build"),
        }
    }
}
