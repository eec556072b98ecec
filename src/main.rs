use clap::{Parser, Subcommand};
use photostrip::cache::{self, Artifact, ArtifactStore};
use photostrip::config::{self, BoothConfig, Geometry};
use photostrip::imaging::JpegCodec;
use photostrip::{gallery, output, process, scan};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "photostrip")]
#[command(about = "Photobooth strip generator")]
#[command(long_about = "\
Photobooth strip generator

Source photos are taken four at a time, in natural filename order, and
composed into a grayscale strip with white borders. Each strip is named
after the MD5 of its four source filenames and is only built once.

Site structure:

  site/
  ├── config.toml        # Optional, see 'photostrip gen-config'
  ├── input/             # Source photos (any file with .jpg in its name)
  ├── output/            # Strips, <md5>.jpg
  ├── thumbs/            # Thumbnails, same names as strips
  └── index.html         # Written by 'photostrip gallery'

Leftover photos that don't fill a batch of four are listed but not built.
Set RUST_LOG=debug for per-panel diagnostics.")]
#[command(version)]
struct Cli {
    /// Site root holding config.toml and the store directories
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a strip for every full batch of four source photos
    Build,
    /// Show the batches that would be built, without building
    Check,
    /// Generate missing thumbnails and write index.html
    Gallery,
    /// Fetch a stored strip by name
    Strip(FetchArgs),
    /// Fetch a strip's thumbnail by name, generating it if needed
    Thumbnail(FetchArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct FetchArgs {
    /// Artifact name, <32 lowercase hex>.jpg
    name: String,

    /// Write to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let geometry = Geometry::STANDARD;
    let codec = JpegCodec::new();

    match cli.command {
        Command::Build => {
            let (_, store) = open_site(&cli.root)?;
            println!("==> Building strips from {}", store.input_dir.display());
            let report = process::build_all(&codec, &geometry, &store)?;
            output::print_build_output(&report);
            if report.has_failures() {
                return Err(format!("{} batch(es) failed", report.stats.failures).into());
            }
        }
        Command::Check => {
            let (_, store) = open_site(&cli.root)?;
            println!("==> Checking {}", store.input_dir.display());
            let plan = scan::scan(&store.input_dir, geometry.batch_size)?;
            output::print_plan(&plan);
        }
        Command::Gallery => {
            let (config, store) = open_site(&cli.root)?;
            let report = gallery::write_gallery(&codec, &geometry, &store, &cli.root, &config)?;
            output::print_gallery_output(&report, &cli.root);
        }
        Command::Strip(args) => {
            let (_, store) = open_site(&cli.root)?;
            let artifact = cache::retrieve_strip(&store, &args.name)?;
            deliver(&artifact, args.out.as_deref())?;
        }
        Command::Thumbnail(args) => {
            let (_, store) = open_site(&cli.root)?;
            let artifact = cache::retrieve_thumbnail(&codec, &geometry, &store, &args.name)?;
            deliver(&artifact, args.out.as_deref())?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the site config and resolve its store directories.
fn open_site(root: &Path) -> Result<(BoothConfig, ArtifactStore), config::ConfigError> {
    let config = config::load_config(root)?;
    let store = ArtifactStore::from_config(root, &config);
    Ok((config, store))
}

/// Write artifact bytes to `out`, or raw to stdout.
fn deliver(artifact: &Artifact, out: Option<&Path>) -> std::io::Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, &artifact.bytes)?;
            eprintln!(
                "{} ({}, {} bytes)",
                path.display(),
                artifact.content_type,
                artifact.bytes.len()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&artifact.bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
