//! Per-plate outputs: tab-separated tile report, JSON report, or the grid
//! overlay of a flagged plate.
use crate::config::OutputConfig;
use crate::diagnostics::{render_grid_overlay, PlateReport, TileReading};
use crate::error::Error;
use crate::image::io::{ensure_parent_dir, save_grayscale_u8, write_json_file};
use crate::image::ImageU8;
use log::warn;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const TILE_REPORT_HEADER: &str = "row\tcolumn\tx\ty\twidth\theight\tarea\tempty";

/// Write one line per tile reading to `out`.
pub fn write_tile_rows<W: Write>(out: &mut W, readings: &[TileReading]) -> std::io::Result<()> {
    writeln!(out, "{TILE_REPORT_HEADER}")?;
    for r in readings {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            r.row,
            r.column,
            r.tile.x,
            r.tile.y,
            r.tile.width,
            r.tile.height,
            r.colony.area,
            u8::from(r.colony.is_empty())
        )?;
    }
    Ok(())
}

/// Write the TSV report to `path`, creating parent directories.
pub fn write_tile_report(path: &Path, readings: &[TileReading]) -> Result<(), Error> {
    ensure_parent_dir(path)?;
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut w = BufWriter::new(file);
    write_tile_rows(&mut w, readings).map_err(io_err)?;
    w.flush().map_err(io_err)
}

/// Files written for one plate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlateOutput {
    /// Trustworthy plate: tile report and, when requested, the JSON report.
    Numeric { tsv: PathBuf, json: Option<PathBuf> },
    /// Flagged plate: the grid overlay replaces every numeric output.
    Overlay(PathBuf),
}

/// Write the outputs of one processed plate named `stem`.
///
/// Overlays go to `overlay_dir`, or to `report_dir` when none is set.
pub fn write_plate_outputs(
    report: &PlateReport,
    image: ImageU8<'_>,
    stem: &str,
    output: &OutputConfig,
) -> Result<PlateOutput, Error> {
    if !report.is_trustworthy() {
        warn!("{stem}: flags {:?}, writing overlay only", report.result.flags);
        let dir = output.overlay_dir.as_ref().unwrap_or(&output.report_dir);
        let path = dir.join(format!("{stem}_grid.png"));
        let overlay = render_grid_overlay(image, &report.result.grid, 255);
        save_grayscale_u8(&overlay, &path)?;
        return Ok(PlateOutput::Overlay(path));
    }

    let tsv = output.report_dir.join(format!("{stem}.tsv"));
    write_tile_report(&tsv, &report.readings)?;
    let json = if output.json {
        let path = output.report_dir.join(format!("{stem}.json"));
        write_json_file(&path, report)?;
        Some(path)
    } else {
        None
    };
    Ok(PlateOutput::Numeric { tsv, json })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{PipelineTrace, Strategy};
    use crate::grid::{build_grid, OccupancyReport};
    use crate::reader::ColonyReading;
    use crate::types::{SegmentationFlags, SegmentationResult, TileRoi};
    use std::fs;

    fn plate_report(flags: SegmentationFlags) -> PlateReport {
        let grid = build_grid(&[0, 10, 20], &[0, 15, 30]);
        let readings = grid
            .iter()
            .map(|(row, column, tile)| TileReading {
                row,
                column,
                tile: *tile,
                colony: ColonyReading {
                    area: 12,
                    bounds: None,
                },
            })
            .collect();
        PlateReport {
            result: SegmentationResult { grid, flags },
            readings,
            occupancy: OccupancyReport::default(),
            trace: PipelineTrace::new(30, 20, Strategy::Calibrated),
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("plate_grid_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn flagged_plate_gets_overlay_instead_of_numbers() {
        let dir = scratch_dir("flagged");
        let output = OutputConfig {
            report_dir: dir.clone(),
            overlay_dir: None,
            json: true,
        };
        let data = vec![90u8; 30 * 20];
        let image = ImageU8::new(30, 20, &data);
        let report = plate_report(SegmentationFlags {
            error_occurred: true,
            ..Default::default()
        });

        let written = write_plate_outputs(&report, image, "plate", &output).unwrap();

        assert_eq!(written, PlateOutput::Overlay(dir.join("plate_grid.png")));
        assert!(dir.join("plate_grid.png").exists());
        assert!(!dir.join("plate.tsv").exists());
        assert!(!dir.join("plate.json").exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn trustworthy_plate_gets_tile_report() {
        let dir = scratch_dir("trusted");
        let output = OutputConfig {
            report_dir: dir.clone(),
            overlay_dir: Some(dir.join("overlays")),
            json: false,
        };
        let data = vec![90u8; 30 * 20];
        let image = ImageU8::new(30, 20, &data);

        let written =
            write_plate_outputs(&plate_report(SegmentationFlags::default()), image, "plate", &output)
                .unwrap();

        assert_eq!(
            written,
            PlateOutput::Numeric {
                tsv: dir.join("plate.tsv"),
                json: None
            }
        );
        let text = fs::read_to_string(dir.join("plate.tsv")).unwrap();
        assert_eq!(text.lines().count(), 5);
        assert!(!dir.join("overlays").exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn writes_header_and_rows() {
        let readings = vec![
            TileReading {
                row: 0,
                column: 1,
                tile: TileRoi::new(10, 0, 10, 12),
                colony: ColonyReading {
                    area: 42,
                    bounds: None,
                },
            },
            TileReading {
                row: 1,
                column: 0,
                tile: TileRoi::new(0, 12, 10, 12),
                colony: ColonyReading::default(),
            },
        ];
        let mut buf = Vec::new();
        write_tile_rows(&mut buf, &readings).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], TILE_REPORT_HEADER);
        assert_eq!(lines[1], "0\t1\t10\t0\t10\t12\t42\t0");
        assert_eq!(lines[2], "1\t0\t0\t12\t10\t12\t0\t1");
    }
}
