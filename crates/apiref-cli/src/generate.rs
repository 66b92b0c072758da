//! Implementation of the `apiref build` and `apiref check` commands.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::info;

use apiref_core::doc::MarkdownGenerator;
use apiref_core::{CommandMiner, Config, FileMiner, ReferenceData, Registry, SiteConfig, SourceMiner};

/// File name of the generated decoders page.
pub const DECODERS_PAGE: &str = "api.md";

/// File name of the generated methods page.
pub const METHODS_PAGE: &str = "Decoder.md";

/// Where the reference data and the source reports come from.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Reference data file (TOML)
    #[arg(long, default_value = "docs/decoders.toml")]
    pub data: PathBuf,

    /// Read the decoders source report from a file instead of running the miner
    #[arg(long, requires = "methods_report")]
    pub decoders_report: Option<PathBuf>,

    /// Read the methods source report from a file instead of running the miner
    #[arg(long, requires = "decoders_report")]
    pub methods_report: Option<PathBuf>,
}

impl SourceArgs {
    fn miner(&self, config: &Config) -> Result<Box<dyn SourceMiner>> {
        match (&self.decoders_report, &self.methods_report) {
            (Some(decoders), Some(methods)) => Ok(Box::new(FileMiner::new(decoders, methods))),
            (None, None) => Ok(Box::new(CommandMiner::new(&config.mining))),
            _ => bail!("--decoders-report and --methods-report must be given together"),
        }
    }
}

/// Load reference data, mine sources and build the registry.
///
/// Any integrity or mining failure aborts the whole build.
pub fn load_registry(source: &SourceArgs, config: &Config) -> Result<Registry> {
    let data = ReferenceData::from_path(&source.data)
        .with_context(|| format!("Failed to load reference data '{}'", source.data.display()))?;

    let miner = source.miner(config)?;
    Registry::build(&data, miner.as_ref()).context("Failed to build the reference registry")
}

/// Write both pages into `out_dir`, returning the written paths.
pub fn write_pages(registry: &Registry, site: &SiteConfig, out_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory '{}'", out_dir.display()))?;

    let generator = MarkdownGenerator::new(registry, site);
    let pages = [
        (DECODERS_PAGE, generator.decoders_page()),
        (METHODS_PAGE, generator.methods_page()),
    ];

    let mut written = Vec::with_capacity(pages.len());
    for (name, content) in pages {
        let path = out_dir.join(name);
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        info!(path = %path.display(), "page written");
        written.push(path);
    }

    Ok(written)
}
