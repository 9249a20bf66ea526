//! CSV point input.

use anyhow::{bail, Context, Result};
use nnloc::Point;
use polars::prelude::*;
use std::path::Path;

/// Read the `x` and `y` columns of a CSV file as points.
pub fn read_points(path: &Path) -> Result<Vec<Point>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x/y columns of {}", path.display()))?;
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    let mut out = Vec::with_capacity(df.height());
    for (row, (x, y)) in xs.into_iter().zip(ys.into_iter()).enumerate() {
        match (x, y) {
            (Some(x), Some(y)) => out.push(Point::new(x, y)),
            _ => bail!("{}: row {row} has a missing coordinate", path.display()),
        }
    }
    tracing::info!(path = %path.display(), rows = out.len(), "points_read");
    Ok(out)
}
