use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nnloc::{Point, PointIndex, VERSION};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod output;
mod points;

#[derive(Parser)]
#[command(name = "nnloc-cli")]
#[command(about = "Nearest-anchor lookups and Voronoi dumps over CSV point files")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Find the nearest anchor for every query point
    Locate {
        /// CSV with x,y columns
        #[arg(long)]
        anchors: PathBuf,
        /// CSV with x,y columns
        #[arg(long)]
        queries: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Write the Voronoi borders of the anchors as finite segments
    Diagram {
        #[arg(long)]
        anchors: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Unbounded ends are cut this many direction lengths from the origin
        #[arg(long, default_value_t = 1000.0)]
        max_steps: f64,
    },
    /// Print version and git revision as JSON
    Report,
}

#[derive(Serialize)]
struct Located {
    x: f64,
    y: f64,
    nearest_index: usize,
    nearest: [f64; 2],
}

#[derive(Serialize)]
struct BorderRow {
    pair: (usize, usize),
    start: [f64; 2],
    end: [f64; 2],
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Locate {
            anchors,
            queries,
            out,
            seed,
        } => locate(&anchors, &queries, &out, seed),
        Action::Diagram {
            anchors,
            out,
            max_steps,
        } => diagram(&anchors, &out, max_steps),
        Action::Report => report(),
    }
}

fn locate(anchors: &Path, queries: &Path, out: &Path, seed: u64) -> Result<()> {
    tracing::info!(anchors = %anchors.display(), queries = %queries.display(), out = %out.display(), seed, "locate");
    let anchor_pts = points::read_points(anchors)?;
    let query_pts = points::read_points(queries)?;
    let index = PointIndex::build(&anchor_pts, &mut StdRng::seed_from_u64(seed))
        .context("building point index")?;
    let rows: Vec<Located> = query_pts
        .iter()
        .map(|&q| {
            let i = index.nearest_index(q);
            let a = index.anchors()[i];
            Located {
                x: q.x,
                y: q.y,
                nearest_index: i,
                nearest: [a.x, a.y],
            }
        })
        .collect();
    output::write_json(out, &rows)
}

fn diagram(anchors: &Path, out: &Path, max_steps: f64) -> Result<()> {
    tracing::info!(anchors = %anchors.display(), out = %out.display(), max_steps, "diagram");
    let pts = points::read_points(anchors)?;
    // Collapse repeated anchors onto their first row, as `locate` does.
    let mut seen = HashSet::with_capacity(pts.len());
    let (rows_of, sites): (Vec<usize>, Vec<Point>) = pts
        .iter()
        .enumerate()
        .filter(|(_, p)| seen.insert(**p))
        .map(|(i, p)| (i, *p))
        .unzip();
    let d = nnloc::voronoi::build_voronoi_diagram(&sites).context("building voronoi diagram")?;
    let rows: Vec<BorderRow> = d
        .borders()
        .iter()
        .map(|b| {
            let s = b.edge.to_bounded_segment(max_steps);
            // A bounded segment always carries both ends.
            let (start, end) = (s.start.unwrap_or(s.origin), s.end.unwrap_or(s.origin));
            BorderRow {
                pair: (rows_of[b.pair.0], rows_of[b.pair.1]),
                start: [start.x, start.y],
                end: [end.x, end.y],
            }
        })
        .collect();
    tracing::info!(borders = rows.len(), vertices = d.vertices().len(), "diagram_built");
    output::write_json(out, &rows)
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "version": VERSION,
        "code_rev": output::current_git_rev(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
