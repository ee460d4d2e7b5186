use log::info;
use plate_grid::config::{load_config, RuntimeConfig};
use plate_grid::image::io::load_grayscale_image;
use plate_grid::report::{write_plate_outputs, PlateOutput};
use plate_grid::{Error, PlateSegmenter};
use rayon::prelude::*;
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage(program: &str) -> String {
    format!("Usage: {program} <config.json>")
}

fn run() -> Result<(), String> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "plate_grid".to_string());
    let config_path = match args.next() {
        Some(arg) if arg == "-h" || arg == "--help" => {
            println!("{}", usage(&program));
            return Ok(());
        }
        Some(arg) => PathBuf::from(arg),
        None => return Err(usage(&program)),
    };

    let config = load_config(&config_path).map_err(|e| e.to_string())?;
    let segmenter = PlateSegmenter::new(config.settings.clone());

    let outcomes: Vec<(PathBuf, Result<bool, Error>)> = config
        .inputs
        .par_iter()
        .map(|input| (input.clone(), process_plate(&segmenter, &config, input)))
        .collect();

    let mut failed = 0usize;
    let mut flagged = 0usize;
    for (input, outcome) in &outcomes {
        match outcome {
            Ok(true) => println!("{}: ok", input.display()),
            Ok(false) => {
                flagged += 1;
                println!("{}: flagged", input.display());
            }
            Err(err) => {
                failed += 1;
                eprintln!("{}: {err}", input.display());
            }
        }
    }
    println!(
        "{} plates processed, {} flagged, {} failed",
        outcomes.len(),
        flagged,
        failed
    );

    if failed > 0 {
        return Err(format!("{failed} plate(s) could not be processed"));
    }
    Ok(())
}

/// Returns whether the plate's grid is trustworthy.
fn process_plate(
    segmenter: &PlateSegmenter,
    config: &RuntimeConfig,
    input: &Path,
) -> Result<bool, Error> {
    let gray = load_grayscale_image(input)?;
    let report = segmenter.process(gray.as_view(), &config.reader);

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "plate".to_string());

    match write_plate_outputs(&report, gray.as_view(), &stem, &config.output)? {
        PlateOutput::Numeric { tsv, .. } => {
            info!(
                "{}: {}x{} grid in {:.1} ms -> {}",
                input.display(),
                report.result.grid.rows(),
                report.result.grid.columns(),
                report.trace.timings.total_ms,
                tsv.display()
            );
            Ok(true)
        }
        PlateOutput::Overlay(path) => {
            info!("{}: overlay -> {}", input.display(), path.display());
            Ok(false)
        }
    }
}
