use nozzle_visualizer::contour::{Viewport, generate};
use nozzle_visualizer::engine::EngineConfiguration;
use nozzle_visualizer::export::contour::write_csv;

#[test]
fn centerline_rows_span_injector_face_to_exit_plane() {
    let mut config = EngineConfiguration::optimal_rao();
    config.chamber_length_m = 1.25;
    config.nozzle_length_m = 0.8;
    let frame = generate(&config, Viewport::new(800.0, 600.0, 20.0)).expect("contour");

    let mut buffer = Vec::new();
    write_csv(&mut buffer, &config, &frame).expect("csv");

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    let axis: Vec<_> = rows.iter().filter(|r| &r[0] == "centerline").collect();
    assert_eq!(axis.len(), 2);

    let x_m = |row: &csv::StringRecord| row[3].parse::<f64>().unwrap();
    let screen_x = |row: &csv::StringRecord| row[5].parse::<f64>().unwrap();
    assert_eq!(x_m(axis[0]), -1.25);
    assert_eq!(x_m(axis[1]), 0.8);
    assert_eq!(screen_x(axis[0]), frame.centerline[0].x);
    assert_eq!(screen_x(axis[1]), frame.centerline[1].x);
    assert!(axis.iter().all(|r| &r[2] == "axis" && r[4].parse::<f64>().unwrap() == 0.0));
}
