use clap::{Parser, Subcommand};
use picshelf::config::{self, GalleryConfig};
use picshelf::gallery::{Gallery, GallerySettings};
use picshelf::imaging::{Dimensions, RustBackend, is_supported_image, parse_dimensions};
use picshelf::output;
use picshelf::store::SnapshotStore;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "picshelf")]
#[command(about = "Organize photos into albums and preview color filters")]
#[command(long_about = "\
Organize photos into albums and preview color filters

Albums are named, ordered lists of image paths. Each image can carry one
filter (none, grayscale, sepia, invert) which is remembered across runs.
Everything is stored in a single gallery.json, rewritten after each change.

Storage:
  Config:    <config dir>/picshelf/config.toml   (--config-dir to override)
  Gallery:   <data dir>/picshelf/gallery.json    (--store or [storage] path)

Run 'picshelf gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory holding config.toml
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Gallery snapshot file (overrides the configured location)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List albums in creation order
    Albums,
    /// Create an album if it does not exist yet
    CreateAlbum { name: String },
    /// Delete an album (its images stay in other albums)
    DeleteAlbum { name: String },
    /// Add an image path to an album, creating the album when needed
    Add { album: String, path: String },
    /// Remove an image from every album and forget its filter
    Delete { path: String },
    /// List the images of an album (default: the current album)
    Images { album: Option<String> },
    /// Apply a named filter: none, grayscale, sepia, invert
    Filter {
        path: String,
        name: String,
        /// Write the filtered image here
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Resize the displayed image to WIDTHxHEIGHT
    Resize {
        path: String,
        #[arg(value_parser = parse_dimensions)]
        size: Dimensions,
        /// Write the resized image here
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = load_config(cli.config_dir.as_deref())?;
    let snapshot_path = cli
        .store
        .or_else(|| config.snapshot_path())
        .ok_or("cannot determine a data directory; pass --store")?;
    debug!(store = %snapshot_path.display(), "using snapshot");

    let mut gallery = Gallery::initialize(
        SnapshotStore::new(snapshot_path),
        RustBackend::new(),
        GallerySettings::from_config(&config),
    );

    match cli.command {
        Command::Albums => {
            output::print_album_list(gallery.registry(), gallery.current_album());
        }
        Command::CreateAlbum { name } => {
            if name.trim().is_empty() {
                return Err("album name must not be blank".into());
            }
            if gallery.create_album_if_not_exists(&name) {
                println!("Created album {}", name);
            } else {
                println!("Album {} already exists", name);
            }
        }
        Command::DeleteAlbum { name } => {
            if gallery.delete_album(&name) {
                println!("Deleted album {}", name);
            } else {
                println!("No album named {}", name);
            }
        }
        Command::Add { album, path } => {
            if album.trim().is_empty() || path.trim().is_empty() {
                return Err("album and path must not be blank".into());
            }
            if !is_supported_image(Path::new(&path)) {
                warn!(image = %path, "not a recognized image extension");
            }
            gallery.add_image(&album, &path);
            output::print_album_images(gallery.registry(), &album);
        }
        Command::Delete { path } => {
            if gallery.delete_image(&path) {
                println!("Removed {}", path);
            } else {
                println!("{} is not in any album", path);
            }
        }
        Command::Images { album } => {
            let album = album.unwrap_or_else(|| gallery.current_album().to_string());
            output::print_album_images(gallery.registry(), &album);
        }
        Command::Filter { path, name, output } => {
            let size = Dimensions::of(gallery.apply_filter_to(&path, &name)?);
            if let Some(out) = &output {
                gallery.export_displayed(&path, out)?;
            }
            output::print_transform_result(
                &path,
                size,
                gallery.filter_for(&path),
                output.as_deref(),
            );
        }
        Command::Resize { path, size, output } => {
            gallery.resize_displayed_image(&path, size.width, size.height)?;
            if let Some(out) = &output {
                gallery.export_displayed(&path, out)?;
            }
            output::print_transform_result(
                &path,
                size,
                gallery.filter_for(&path),
                output.as_deref(),
            );
        }
        Command::GenConfig => {}
    }

    if let Some(e) = gallery.last_save_error() {
        return Err(format!("changes were not saved: {e}").into());
    }
    Ok(())
}

/// Install the fmt subscriber on stderr. `RUST_LOG` wins over the flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Config from `--config-dir`, else the per-user directory, else defaults.
fn load_config(dir: Option<&Path>) -> Result<GalleryConfig, config::ConfigError> {
    match dir.map(Path::to_path_buf).or_else(config::default_config_dir) {
        Some(dir) => config::load_config(&dir),
        None => Ok(GalleryConfig::default()),
    }
}
