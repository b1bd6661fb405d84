use std::path::PathBuf;

use colmap_db::{ColmapDb, OpenMode};
use colmap_ingest::{load_cameras, load_images};
use log::info;

mod config;
mod error;

use config::Config;
use error::CliError;

const USAGE: &str = "Usage: colmap-inject --input_path <dir>

Imports the cameras.txt / images.txt calibration dumps beneath <dir> into
the COLMAP database at <dir>/colmap/database.db, adapting to whichever
pose-prior schema the database carries.

Options:
  -i, --input_path <dir>   Project directory containing the colmap/ layout
  -h, --help               Show this help";

fn main() -> Result<(), CliError> {
    // Initialize logger
    env_logger::init();

    let input_path = match parse_args(std::env::args().skip(1))? {
        Some(path) => path,
        None => {
            println!("{USAGE}");
            return Ok(());
        }
    };

    // Load configuration
    let config = match std::env::var("COLMAP_INJECT_CONFIG") {
        Ok(path) => Config::from_file(&PathBuf::from(path))?,
        Err(_) => Config::default(),
    };

    let cameras_file = input_path.join(&config.cameras_file);
    let images_file = input_path.join(&config.images_file);
    let database_path = input_path.join(&config.database_path);

    info!("Injecting into {}", database_path.display());

    let db = ColmapDb::open(&database_path, OpenMode::Create)?;
    db.create_schema()?;

    let cameras = load_cameras(&db, &cameras_file)?;
    info!("Camera pass complete: {cameras} cameras");

    let images = load_images(&db, &images_file)?;
    info!("Image pass complete: {images} poses");

    Ok(())
}

/// Parse command-line arguments; `Ok(None)` means help was requested.
fn parse_args<I>(mut args: I) -> Result<Option<PathBuf>, CliError>
where
    I: Iterator<Item = String>,
{
    let mut input_path = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input_path" | "-i" => {
                let value = args
                    .next()
                    .ok_or_else(|| CliError::usage(format!("{arg} requires a value")))?;
                input_path = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Ok(None),
            other => {
                return Err(CliError::usage(format!(
                    "unknown argument '{other}'\n\n{USAGE}"
                )));
            }
        }
    }
    match input_path {
        Some(path) => Ok(Some(path)),
        None => Err(CliError::usage(format!(
            "missing required --input_path\n\n{USAGE}"
        ))),
    }
}
