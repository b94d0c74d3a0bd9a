//! panforge CLI — compile node manifests into build artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{info, warn};

use panforge::emit::render_header;
use panforge::manifest::NodeManifest;
use panforge::resolver::ResolvedConfig;

#[derive(Parser)]
#[command(name = "panforge")]
#[command(about = "Node configuration compiler for nRF24 sensor-node PANs")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a node manifest and report the outcome.
    Check {
        /// Path to the node manifest (JSON).
        manifest: PathBuf,
    },
    /// Compile a manifest into the node configuration header.
    Emit {
        manifest: PathBuf,
        /// Output path; defaults to `<manifest stem>.h`.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compile a manifest into the binary provisioning blob.
    Pack {
        manifest: PathBuf,
        /// Output path; defaults to `<manifest stem>.bin`.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match args.command {
        Command::Check { manifest } => {
            let (m, resolved) = load_and_resolve(&manifest)?;
            report_warnings(&resolved);
            info!(
                "{}: OK (channel {}, {:?}, node ID {})",
                m.name.as_deref().unwrap_or("node"),
                resolved.radio.channel,
                resolved.features.sensor_mode,
                resolved
                    .features
                    .node_id
                    .map_or_else(|| "auto".to_string(), |id| id.to_string()),
            );
        }
        Command::Emit { manifest, output } => {
            let (m, resolved) = load_and_resolve(&manifest)?;
            report_warnings(&resolved);
            let header = render_header(&resolved, m.name.as_deref());
            let path = output.unwrap_or_else(|| manifest.with_extension("h"));
            fs::write(&path, header)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        Command::Pack { manifest, output } => {
            let (_, resolved) = load_and_resolve(&manifest)?;
            report_warnings(&resolved);
            let blob = resolved.to_bytes().context("encoding provisioning blob")?;
            let path = output.unwrap_or_else(|| manifest.with_extension("bin"));
            fs::write(&path, &blob)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {} ({} bytes)", path.display(), blob.len());
        }
    }

    Ok(())
}

fn load_and_resolve(path: &Path) -> anyhow::Result<(NodeManifest, ResolvedConfig)> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let manifest = NodeManifest::from_json(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    let resolved = manifest
        .resolve()
        .with_context(|| format!("resolving {}", path.display()))?;
    Ok((manifest, resolved))
}

fn report_warnings(resolved: &ResolvedConfig) {
    for w in &resolved.warnings {
        warn!("{w}");
    }
}
