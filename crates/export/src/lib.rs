//! Export helpers for CSV polylines and JSON summaries.

pub mod contour {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    use nozzle_contour::ContourFrame;
    use nozzle_engine::EngineConfiguration;
    use serde::Serialize;

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// CSV row emitted by the contour exporter.
    #[derive(Debug, Clone, Serialize)]
    pub struct Record<'a> {
        pub side: &'a str,
        pub index: usize,
        pub segment: &'a str,
        pub x_m: f64,
        pub y_m: f64,
        pub screen_x_px: f64,
        pub screen_y_px: f64,
    }

    /// Write upper rows, lower rows, then the two centerline endpoints.
    ///
    /// `frame` must have been generated from `config`.
    pub fn write_csv<W: Write>(
        writer: W,
        config: &EngineConfiguration,
        frame: &ContourFrame,
    ) -> io::Result<()> {
        let mut out = csv::Writer::from_writer(writer);
        let sides = [
            ("upper", frame.local_upper(), &frame.upper),
            ("lower", frame.local_lower.as_slice(), &frame.lower),
        ];
        for (side, local, screen) in sides {
            for (index, (p, s)) in local.iter().zip(screen.iter()).enumerate() {
                out.serialize(Record {
                    side,
                    index,
                    segment: frame.profile.segment_of(index).as_str(),
                    x_m: p.x,
                    y_m: p.y,
                    screen_x_px: s.x,
                    screen_y_px: s.y,
                })?;
            }
        }

        let ends = [-config.chamber_length_m, config.nozzle_length_m];
        for (index, (x, s)) in ends.into_iter().zip(frame.centerline).enumerate() {
            out.serialize(Record {
                side: "centerline",
                index,
                segment: "axis",
                x_m: x,
                y_m: 0.0,
                screen_x_px: s.x,
                screen_y_px: s.y,
            })?;
        }
        out.flush()
    }
}

pub mod summary {
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    use nozzle_contour::ContourFrame;
    use nozzle_engine::EngineConfiguration;
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    /// Caller-supplied labels for the summary sidecar.
    #[derive(Debug)]
    pub struct Metadata<'a> {
        pub engine: &'a str,
        pub generated_utc: &'a str,
        pub viewport_width_px: f64,
        pub viewport_height_px: f64,
        pub margin_px: f64,
    }

    #[derive(Serialize)]
    struct Sidecar<'a> {
        engine: &'a str,
        generated_utc: &'a str,
        propellant: PropellantSummary<'a>,
        dimensions: Dimensions,
        derived: Derived,
        transform: TransformSummary,
        points_per_side: usize,
        warnings: Vec<String>,
    }

    #[derive(Serialize)]
    struct PropellantSummary<'a> {
        id: &'a str,
        name: &'a str,
        density_kg_m3: f64,
        ideal_temp_k: f64,
    }

    #[derive(Serialize)]
    struct Dimensions {
        throat_diameter_m: f64,
        nozzle_diameter_m: f64,
        nozzle_length_m: f64,
        chamber_diameter_m: f64,
        chamber_length_m: f64,
        entrance_radius: f64,
        throat_radius: f64,
        divergent_radius: f64,
        inflection_angle_deg: f64,
        exit_angle_deg: f64,
    }

    #[derive(Serialize)]
    struct Derived {
        expansion_ratio: f64,
        chamber_volume_m3: f64,
        convergent_length_m: f64,
        bell_exit_radius_m: f64,
    }

    #[derive(Serialize)]
    struct TransformSummary {
        viewport_width_px: f64,
        viewport_height_px: f64,
        margin_px: f64,
        scale_px_per_m: f64,
        origin_px: [f64; 2],
        centerline_px: [[f64; 2]; 2],
    }

    /// Write a pretty-printed JSON summary of the configuration and generated frame.
    pub fn write_summary(
        output: &Path,
        meta: &Metadata<'_>,
        config: &EngineConfiguration,
        frame: &ContourFrame,
    ) -> io::Result<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let propellant = &config.propellant;
        let [start, end] = frame.centerline;
        let sidecar = Sidecar {
            engine: meta.engine,
            generated_utc: meta.generated_utc,
            propellant: PropellantSummary {
                id: propellant.id.key(),
                name: propellant.name,
                density_kg_m3: propellant.density_kg_m3,
                ideal_temp_k: propellant.ideal_temp_k,
            },
            dimensions: Dimensions {
                throat_diameter_m: config.throat_diameter_m,
                nozzle_diameter_m: config.nozzle_diameter_m,
                nozzle_length_m: config.nozzle_length_m,
                chamber_diameter_m: config.chamber_diameter_m,
                chamber_length_m: config.chamber_length_m,
                entrance_radius: config.nozzle.entrance_radius,
                throat_radius: config.nozzle.throat_radius,
                divergent_radius: config.nozzle.divergent_radius,
                inflection_angle_deg: config.nozzle.inflection_angle_rad.to_degrees(),
                exit_angle_deg: config.nozzle.exit_angle_rad.to_degrees(),
            },
            derived: Derived {
                expansion_ratio: config.expansion_ratio(),
                chamber_volume_m3: config.chamber_volume(),
                convergent_length_m: frame.profile.arc.half_length_m,
                bell_exit_radius_m: frame.profile.parabola.exit_radius_m(),
            },
            transform: TransformSummary {
                viewport_width_px: meta.viewport_width_px,
                viewport_height_px: meta.viewport_height_px,
                margin_px: meta.margin_px,
                scale_px_per_m: frame.transform.scale,
                origin_px: [frame.transform.origin.x, frame.transform.origin.y],
                centerline_px: [[start.x, start.y], [end.x, end.y]],
            },
            points_per_side: frame.upper.len(),
            warnings: frame.warnings.iter().map(ToString::to_string).collect(),
        };

        to_writer_pretty(File::create(output)?, &sidecar)?;
        Ok(())
    }
}
