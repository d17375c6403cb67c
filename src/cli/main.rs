//! unifi-codegen CLI entry point
//!
//! Builds the resource model from a fields directory and writes it, with
//! the client surface, as JSON or YAML.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use unifi_codegen::cli::{GeneratedModel, OutputFormat};
use unifi_codegen::client::ClientSurfaceBuilder;
use unifi_codegen::config::GeneratorConfig;
use unifi_codegen::loader::ResourceLoader;

/// Infer typed resources from UniFi controller field definitions.
#[derive(Parser, Debug)]
#[command(name = "unifi-codegen", version, about)]
struct Cli {
    /// Directory of extracted `<Resource>.json` field definitions
    #[arg(long, default_value = "fields")]
    fields_dir: PathBuf,

    /// User customization document layered over the defaults
    #[arg(long)]
    customizations: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Output file (stdout if not provided)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Enable trace logging
    #[arg(long)]
    trace: bool,
}

impl Cli {
    fn default_directive(&self) -> &'static str {
        if self.trace {
            "trace"
        } else if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.default_directive())),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = GeneratorConfig::default();
    config.customizations_path = cli.customizations.clone();

    let loader = ResourceLoader::new(config).context("failed to load customizations")?;
    let resources = loader
        .load_dir(&cli.fields_dir)
        .with_context(|| format!("failed to build resources from {}", cli.fields_dir.display()))?;

    let client = ClientSurfaceBuilder::from_resources(&resources, loader.customizer()).build();
    let model = GeneratedModel::new(resources, client);
    eprint!("{}", model.summary());

    let rendered = model.render(cli.format)?;
    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote model to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
