//! svg-lbrn CLI
//!
//! Usage:
//!   svg-lbrn <svg_file> [lbrn_file] [cut_index] [OPTIONS]
//!   svg-lbrn --shapes <shapes.toml> [--thumbnail <png>] [-o <out.lbrn>]
//!
//! With a single SVG file the `BackupPath` fragment is written to stdout.
//! With a project file the path is merged into it, creating it if needed.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use log::LevelFilter;

use svg_lbrn::config::DEFAULT_CONFIG;
use svg_lbrn::renderer::canvas::{shapes_from_file, thumbnail_data_uri};
use svg_lbrn::{export_canvas, svg_file_to_backup_path, update_project_file, ConvertConfig};

const USAGE: &str = "Usage: svg-lbrn <svg_file> [lbrn_file] [cut_index]";

#[derive(Parser)]
#[command(name = "svg-lbrn")]
#[command(about = "Convert an SVG path into LightBurn BackupPath geometry")]
struct Cli {
    /// SVG file whose first path is converted
    svg_file: Option<PathBuf>,

    /// LightBurn project to update (created if missing)
    lbrn_file: Option<PathBuf>,

    /// Cut layer index for the generated path
    cut_index: Option<u32>,

    /// Converter configuration (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Export canvas shapes from a TOML file instead of converting an SVG
    #[arg(long, conflicts_with = "svg_file")]
    shapes: Option<PathBuf>,

    /// PNG thumbnail embedded in the exported project
    #[arg(long, requires = "shapes")]
    thumbnail: Option<PathBuf>,

    /// Output file for the exported project (stdout if not provided)
    #[arg(short, long, requires = "shapes")]
    output: Option<PathBuf>,

    /// Print the built-in configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.print_config {
        print!("{}", DEFAULT_CONFIG);
        return;
    }

    let config = match &cli.config {
        Some(path) => match ConvertConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ConvertConfig::default(),
    };

    if let Some(shapes) = &cli.shapes {
        run_export(
            shapes,
            cli.thumbnail.as_deref(),
            cli.output.as_deref(),
            &config,
        );
        return;
    }

    let Some(svg_file) = &cli.svg_file else {
        println!("{}", USAGE);
        std::process::exit(1);
    };

    let cut_index = cli.cut_index.unwrap_or(0);

    match &cli.lbrn_file {
        None => match svg_file_to_backup_path(svg_file, cut_index, &config) {
            Ok(xml) => println!("{}", xml),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Some(lbrn_file) => {
            if update_project_file(svg_file, lbrn_file, cut_index, &config) {
                println!(
                    "Successfully updated {} with path from {}",
                    lbrn_file.display(),
                    svg_file.display()
                );
            } else {
                eprintln!("Failed to update LBRN file");
                std::process::exit(1);
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run_export(
    shapes_file: &Path,
    thumbnail: Option<&Path>,
    output: Option<&Path>,
    config: &ConvertConfig,
) {
    let shapes = match shapes_from_file(shapes_file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading shapes '{}': {}", shapes_file.display(), e);
            std::process::exit(1);
        }
    };

    let thumbnail = match thumbnail {
        Some(path) => match fs::read(path) {
            Ok(png) => Some(thumbnail_data_uri(&png)),
            Err(e) => {
                eprintln!("Error reading thumbnail '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let project = export_canvas(&shapes, thumbnail.as_deref(), config);

    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, project) {
                eprintln!("Error writing '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => print!("{}", project),
    }
}
