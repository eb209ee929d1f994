//! Tabular export of a trajectory, one row per step.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::ExportError;
use crate::simulation::states::Trajectory;

pub const CSV_HEADER: [&str; 8] = [
    "step",
    "t",
    "primary_x",
    "primary_y",
    "primary_z",
    "secondary_x",
    "secondary_y",
    "secondary_z",
];

/// Write the header plus one row per snapshot. Returns the number of rows.
pub fn write_csv<W: Write>(trajectory: &Trajectory, writer: W) -> Result<usize, ExportError> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(CSV_HEADER)?;

    for (step, s) in trajectory.iter().enumerate() {
        w.write_record(&[
            step.to_string(),
            s.t.to_string(),
            s.primary.x.to_string(), s.primary.y.to_string(), s.primary.z.to_string(),
            s.secondary.x.to_string(), s.secondary.y.to_string(), s.secondary.z.to_string(),
        ])?;
    }
    w.flush()?;

    Ok(trajectory.len())
}

pub fn write_csv_to_path(trajectory: &Trajectory, path: &Path) -> Result<usize, ExportError> {
    let rows = write_csv(trajectory, std::fs::File::create(path)?)?;
    info!(rows, path = %path.display(), "CSV written");
    Ok(rows)
}
