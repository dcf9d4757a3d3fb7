use approx::assert_relative_eq;
use chart_scale::api::{
    AxisLayoutOptions, EstimatedLabelMetrics, ScaleAlignment, ScaleDraw, ScaleDrawConfig,
    resolve_axis_layout,
};
use chart_scale::core::{Interval, LinearScaleEngine, LogScaleEngine, Point, TickType, Transform};
use chart_scale::error::ScaleError;

#[test]
fn wide_axis_reserves_label_overhang() {
    let engine = LinearScaleEngine::default();
    let mut draw = ScaleDraw::new();
    let layout = resolve_axis_layout(
        &engine,
        Interval::new(0.0, 97.3),
        500.0,
        &mut draw,
        &EstimatedLabelMetrics::default(),
        AxisLayoutOptions::default(),
    )
    .expect("layout");

    assert!(layout.converged);
    assert_eq!(layout.passes.len(), 2);
    assert_eq!(layout.passes[0].max_major_steps, 8);
    assert_eq!(layout.passes[0].backbone_length, 500.0);
    assert_eq!(
        layout.division.ticks(TickType::Major),
        &[0.0, 20.0, 40.0, 60.0, 80.0, 100.0]
    );
    assert_relative_eq!(layout.extent, 27.4, epsilon = 1e-9);

    // "0" overhangs by half a font size, "100" by half its width
    assert_relative_eq!(layout.border_dist.0, 6.0, epsilon = 1e-9);
    assert_relative_eq!(layout.border_dist.1, 11.16, epsilon = 1e-9);
    assert_relative_eq!(layout.map.p1(), 6.0, epsilon = 1e-9);
    assert_relative_eq!(layout.map.p2(), 488.84, epsilon = 1e-9);
    assert_relative_eq!(draw.pos().x, 6.0, epsilon = 1e-9);
    assert_eq!(draw.scale_division(), &layout.division);
}

#[test]
fn narrow_axis_drops_major_steps_until_labels_fit() {
    let engine = LinearScaleEngine::default();
    let mut draw = ScaleDraw::new();
    let layout = resolve_axis_layout(
        &engine,
        Interval::new(0.0, 97.3),
        60.0,
        &mut draw,
        &EstimatedLabelMetrics::default(),
        AxisLayoutOptions::default(),
    )
    .expect("layout");

    assert!(layout.converged);
    let budgets: Vec<u32> = layout.passes.iter().map(|p| p.max_major_steps).collect();
    assert_eq!(budgets, vec![8, 2, 1]);
    assert!(layout.passes[0].min_length > 60.0);
    assert!(layout.passes[2].min_length <= 60.0);
    assert_relative_eq!(layout.passes[1].backbone_length, 42.84, epsilon = 1e-9);
    assert_eq!(layout.division.ticks(TickType::Major), &[0.0, 100.0]);
}

#[test]
fn pass_limit_reports_non_convergence() {
    let engine = LinearScaleEngine::default();
    let mut draw = ScaleDraw::new();
    let options = AxisLayoutOptions {
        max_passes: 2,
        ..AxisLayoutOptions::default()
    };
    let layout = resolve_axis_layout(
        &engine,
        Interval::new(0.0, 97.3),
        60.0,
        &mut draw,
        &EstimatedLabelMetrics::default(),
        options,
    )
    .expect("layout");

    assert!(!layout.converged);
    assert_eq!(layout.passes.len(), 2);
    assert!(layout.passes[1].min_length > 60.0);
}

#[test]
fn overhang_wider_than_axis_stops_early() {
    let engine = LinearScaleEngine::default();
    let mut draw = ScaleDraw::new();
    let layout = resolve_axis_layout(
        &engine,
        Interval::new(0.0, 97.3),
        10.0,
        &mut draw,
        &EstimatedLabelMetrics::default(),
        AxisLayoutOptions::default(),
    )
    .expect("layout");

    assert!(!layout.converged);
    assert_eq!(layout.passes.len(), 1);
    assert_eq!(layout.map.p2(), 10.0);
}

#[test]
fn vertical_axis_shifts_along_y() {
    let engine = LinearScaleEngine::default();
    let mut draw = ScaleDraw::with_config(
        ScaleDrawConfig::default().with_alignment(ScaleAlignment::Left),
    )
    .expect("config");
    draw.move_to(Point::new(40.0, 10.0), 400.0);

    let layout = resolve_axis_layout(
        &engine,
        Interval::new(0.0, 97.3),
        400.0,
        &mut draw,
        &EstimatedLabelMetrics::default(),
        AxisLayoutOptions::default(),
    )
    .expect("layout");

    assert!(layout.converged);
    assert_eq!(draw.pos().x, 40.0);
    assert_relative_eq!(draw.pos().y, 10.0 + layout.border_dist.0, epsilon = 1e-9);
    assert_relative_eq!(
        draw.length(),
        400.0 - layout.border_dist.0 - layout.border_dist.1,
        epsilon = 1e-9
    );
}

#[test]
fn disabled_auto_scale_keeps_data_bounds() {
    let engine = LinearScaleEngine::default();
    let mut draw = ScaleDraw::new();
    let options = AxisLayoutOptions {
        auto_scale: false,
        ..AxisLayoutOptions::default()
    };
    let layout = resolve_axis_layout(
        &engine,
        Interval::new(3.0, 97.0),
        500.0,
        &mut draw,
        &EstimatedLabelMetrics::default(),
        options,
    )
    .expect("layout");

    assert_eq!(layout.division.lower_bound(), 3.0);
    assert_eq!(layout.division.upper_bound(), 97.0);
    assert_eq!(
        layout.division.ticks(TickType::Major),
        &[20.0, 40.0, 60.0, 80.0]
    );
}

#[test]
fn log_axis_layout_installs_log_map() {
    let engine = LogScaleEngine::default();
    let mut draw = ScaleDraw::new();
    let layout = resolve_axis_layout(
        &engine,
        Interval::new(1.0, 1000.0),
        300.0,
        &mut draw,
        &EstimatedLabelMetrics::default(),
        AxisLayoutOptions::default(),
    )
    .expect("layout");

    assert!(layout.converged);
    assert_eq!(layout.map.transformation(), Transform::Log);
    let decade = (layout.map.p2() - layout.map.p1()) / 3.0;
    assert_relative_eq!(
        layout.map.transform(10.0) - layout.map.p1(),
        decade,
        epsilon = 1e-9
    );
    assert_eq!(layout.division.ticks(TickType::Major).len(), 4);

    let frame = draw.build_frame().expect("frame");
    let labels: Vec<&str> = frame.texts.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(labels, vec!["1", "10", "100", "1000"]);
}

#[test]
fn invalid_inputs_are_rejected() {
    let engine = LinearScaleEngine::default();
    let metrics = EstimatedLabelMetrics::default();
    let mut draw = ScaleDraw::new();

    let err = resolve_axis_layout(
        &engine,
        Interval::new(0.0, 1.0),
        0.0,
        &mut draw,
        &metrics,
        AxisLayoutOptions::default(),
    )
    .expect_err("zero length");
    assert!(matches!(err, ScaleError::InvalidData(_)));

    let err = resolve_axis_layout(
        &engine,
        Interval::new(f64::NAN, 1.0),
        100.0,
        &mut draw,
        &metrics,
        AxisLayoutOptions::default(),
    )
    .expect_err("nan range");
    assert!(matches!(err, ScaleError::InvalidData(_)));

    let options = AxisLayoutOptions {
        max_passes: 0,
        ..AxisLayoutOptions::default()
    };
    let err = resolve_axis_layout(
        &engine,
        Interval::new(0.0, 1.0),
        100.0,
        &mut draw,
        &metrics,
        options,
    )
    .expect_err("no passes");
    assert!(matches!(err, ScaleError::InvalidConfig(_)));
}
