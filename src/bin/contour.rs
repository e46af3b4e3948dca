use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use chrono::Utc;
use clap::Parser;
use nozzle_visualizer::catalog;
use nozzle_visualizer::contour::{ContourOptions, Viewport};
use nozzle_visualizer::engine::Parameter;
use nozzle_visualizer::export::contour as export_contour;
use nozzle_visualizer::export::summary::{Metadata, write_summary};
use nozzle_visualizer::logging::{LoggingConfig, init_logging};
use nozzle_visualizer::session::{FrameStatus, Session};

/// Generate the engine outline for one catalog entry and export it as CSV polylines.
#[derive(Parser, Debug)]
#[command(author, version, about = "Engine contour CSV exporter")]
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

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1600.0)]
    width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 900.0)]
    height: f64,

    /// Empty border kept around the outline, in pixels
    #[arg(long, default_value_t = 40.0)]
    margin: f64,

    /// Points strictly inside the convergent arc
    #[arg(long, default_value_t = 20)]
    arc_samples: usize,

    /// Points along the divergent bell after the throat
    #[arg(long, default_value_t = 50)]
    parabola_samples: usize,

    /// Output CSV file (use '-' for stdout)
    #[arg(long, default_value = "artifacts/contour.csv")]
    output: PathBuf,

    /// Optional JSON summary written alongside the CSV
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());
    let cli = Cli::parse();

    let selection = catalog::select(&cli.config, cli.engine.as_deref(), &cli.overrides)?;
    let viewport = Viewport::new(cli.width, cli.height, cli.margin);
    let options = ContourOptions {
        arc_interior_samples: cli.arc_samples,
        parabola_samples: cli.parabola_samples,
    };

    let mut session = Session::new(selection.configuration, viewport).with_options(options);
    if let FrameStatus::Stale(err) = session.refresh() {
        return Err(anyhow!("engine '{}': {err}", selection.name));
    }
    let frame = session
        .frame()
        .ok_or_else(|| anyhow!("no contour was generated"))?;

    let mut writer = export_contour::writer_for_path(&cli.output)?;
    export_contour::write_csv(&mut writer, session.configuration(), frame)?;
    writer.flush()?;

    if let Some(path) = &cli.summary {
        let generated_utc = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let viewport = session.viewport();
        let meta = Metadata {
            engine: &selection.name,
            generated_utc: &generated_utc,
            viewport_width_px: viewport.width_px,
            viewport_height_px: viewport.height_px,
            margin_px: viewport.margin_px,
        };
        write_summary(path, &meta, session.configuration(), frame)?;
    }

    if cli.output == Path::new("-") {
        return Ok(());
    }

    let config = session.configuration();
    println!("=== Engine Contour ===");
    println!("Engine          : {}", selection.name);
    println!("Propellant      : {}", config.propellant.name);
    println!("Expansion ratio : {:.3}", config.expansion_ratio());
    println!("Chamber volume  : {:.4} m³", config.chamber_volume());
    println!("Points per side : {}", frame.upper.len());
    println!("Scale           : {:.2} px/m", frame.transform.scale);
    println!("CSV             : {}", cli.output.display());
    if let Some(path) = &cli.summary {
        println!("Summary         : {}", path.display());
    }
    println!("--- Parameters ---");
    for parameter in Parameter::ALL {
        println!(
            "{:<28}: {:.3}",
            parameter.label(),
            parameter.to_display(config.get(parameter))
        );
    }
    for warning in &frame.warnings {
        println!("Warning         : {warning}");
    }

    Ok(())
}
