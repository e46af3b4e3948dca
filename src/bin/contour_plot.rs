use std::fs;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use nozzle_visualizer::catalog;
use nozzle_visualizer::contour::Viewport;
use nozzle_visualizer::logging::{LoggingConfig, init_logging};
use nozzle_visualizer::session::{FrameStatus, Session};
use nozzle_visualizer::vector::Point2;
use plotters::prelude::*;

const WALL_COLOR: RGBColor = RGBColor(210, 100, 20);

#[derive(Parser, Debug)]
#[command(author, version, about = "Render an engine cross-section outline to PNG")]
struct Cli {
    /// Engine catalog: a directory of TOML files, a single TOML file, or a YAML list
    #[arg(long, default_value = "configs/engines")]
    config: PathBuf,

    /// Engine name (case-insensitive, defaults to the first catalog entry)
    #[arg(long)]
    engine: Option<String>,

    /// Parameter override as key=value, angles in degrees (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    #[arg(long, default_value = "artifacts/contour.png")]
    output: PathBuf,

    #[arg(long, default_value_t = 1200)]
    width: u32,

    #[arg(long, default_value_t = 900)]
    height: u32,

    #[arg(long, default_value_t = 40.0)]
    margin: f64,

    /// Skip the centerline between injector face and exit plane
    #[arg(long, default_value_t = false)]
    no_centerline: bool,
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());
    let cli = Cli::parse();

    let selection = catalog::select(&cli.config, cli.engine.as_deref(), &cli.overrides)?;
    let viewport = Viewport::new(f64::from(cli.width), f64::from(cli.height), cli.margin);
    let mut session = Session::new(selection.configuration, viewport);
    if let FrameStatus::Stale(err) = session.refresh() {
        return Err(anyhow!("engine '{}': {err}", selection.name));
    }
    let frame = session
        .frame()
        .ok_or_else(|| anyhow!("no contour was generated"))?;

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let root = BitMapBackend::new(&cli.output, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    if !cli.no_centerline {
        root.draw(&PathElement::new(
            to_pixels(&frame.centerline),
            ShapeStyle::from(&BLACK.mix(0.4)).stroke_width(1),
        ))?;
    }

    let wall = ShapeStyle::from(&WALL_COLOR).stroke_width(2);
    root.draw(&PathElement::new(to_pixels(&frame.upper), wall.clone()))?;
    root.draw(&PathElement::new(to_pixels(&frame.lower), wall.clone()))?;
    if let (Some(top), Some(bottom)) = (frame.upper.first(), frame.lower.first()) {
        // Injector face closes the chamber.
        root.draw(&PathElement::new(to_pixels(&[*top, *bottom]), wall))?;
    }

    root.present()?;
    println!(
        "[rendered] {} ({} points per side, {:.2} px/m)",
        cli.output.display(),
        frame.upper.len(),
        frame.transform.scale
    );
    Ok(())
}

fn to_pixels(points: &[Point2]) -> Vec<(i32, i32)> {
    points
        .iter()
        .map(|p| (p.x.round() as i32, p.y.round() as i32))
        .collect()
}
