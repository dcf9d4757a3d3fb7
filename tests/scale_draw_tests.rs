use std::sync::Arc;

use approx::assert_relative_eq;
use chart_scale::api::{
    EstimatedLabelMetrics, LabelMetrics, ScaleAlignment, ScaleComponents, ScaleDraw,
    ScaleDrawConfig,
};
use chart_scale::core::{LinearScaleEngine, Point, ScaleEngine, TickType, Transform};
use chart_scale::render::{NullRenderer, Renderer, TextHAlign, TextVAlign};

struct FixedMetrics;

impl LabelMetrics for FixedMetrics {
    fn label_size(&self, text: &str, _font_size_px: f64) -> (f64, f64) {
        (10.0 * text.chars().count() as f64, 10.0)
    }
}

fn draw_for(alignment: ScaleAlignment, pos: Point, length: f64) -> ScaleDraw {
    let engine = LinearScaleEngine::default();
    let config = ScaleDrawConfig::default().with_alignment(alignment);
    let mut draw = ScaleDraw::with_config(config).expect("valid config");
    draw.set_scale_division(
        engine.divide_scale(0.0, 100.0, 10, 5, 0.0),
        engine.transformation(),
    );
    draw.move_to(pos, length);
    draw
}

#[test]
fn bottom_axis_frame_has_ticks_backbone_and_labels() {
    let mut draw = draw_for(ScaleAlignment::Bottom, Point::new(10.0, 200.0), 500.0);
    let frame = draw.build_frame().expect("frame");

    // 40 minor + 11 major ticks + backbone
    assert_eq!(frame.lines.len(), 52);
    assert_eq!(frame.texts.len(), 11);

    let first = &frame.texts[0];
    assert_eq!(first.text, "0");
    assert_eq!((first.x, first.y), (10.0, 213.0));
    assert_eq!(first.h_align, TextHAlign::Center);
    assert_eq!(first.v_align, TextVAlign::Top);
    assert_eq!(frame.texts[10].text, "100");
    assert_eq!(frame.texts[10].x, 510.0);

    let backbone = frame.lines.last().expect("backbone");
    assert_eq!((backbone.x1, backbone.y1, backbone.x2, backbone.y2), (10.0, 200.0, 510.0, 200.0));

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("render");
}

#[test]
fn tick_marks_point_away_from_canvas() {
    let mut draw = draw_for(ScaleAlignment::Bottom, Point::new(0.0, 100.0), 100.0);
    let frame = draw.build_frame().expect("frame");
    let major = frame
        .lines
        .iter()
        .find(|line| line.x1 == 50.0 && line.y2 - line.y1 == 8.0);
    assert!(major.is_some());

    let mut draw = draw_for(ScaleAlignment::Top, Point::new(0.0, 100.0), 100.0);
    let frame = draw.build_frame().expect("frame");
    assert!(frame.lines.iter().any(|line| line.x1 == 50.0 && line.y2 == 92.0));
    assert_eq!(frame.texts[0].v_align, TextVAlign::Bottom);
}

#[test]
fn vertical_axis_runs_bottom_to_top() {
    let mut draw = draw_for(ScaleAlignment::Left, Point::new(50.0, 10.0), 400.0);

    assert_eq!(draw.scale_map().transform(0.0), 410.0);
    assert_eq!(draw.scale_map().transform(100.0), 10.0);
    assert_eq!(draw.label_position(0.0), Point::new(37.0, 410.0));

    let frame = draw.build_frame().expect("frame");
    let label = &frame.texts[0];
    assert_eq!(label.h_align, TextHAlign::Right);
    assert_eq!(label.v_align, TextVAlign::Center);
    assert!(frame.lines.iter().any(|line| line.y1 == 210.0 && line.x2 == 42.0));

    draw.set_alignment(ScaleAlignment::Right);
    assert_eq!(draw.label_position(100.0), Point::new(63.0, 10.0));
}

#[test]
fn negative_length_moves_the_origin() {
    let mut draw = ScaleDraw::new();
    draw.move_to(Point::new(100.0, 0.0), -40.0);
    assert_eq!(draw.pos(), Point::new(60.0, 0.0));
    assert_eq!(draw.length(), 40.0);
}

#[test]
fn extent_sums_labels_spacing_ticks_and_backbone() {
    let metrics = EstimatedLabelMetrics::default();

    let mut bottom = draw_for(ScaleAlignment::Bottom, Point::new(0.0, 0.0), 500.0);
    assert_relative_eq!(bottom.extent(&metrics), 14.4 + 4.0 + 8.0 + 1.0, epsilon = 1e-9);

    let mut left = draw_for(ScaleAlignment::Left, Point::new(0.0, 0.0), 500.0);
    assert_relative_eq!(left.extent(&metrics), 22.32 + 4.0 + 8.0 + 1.0, epsilon = 1e-9);
}

#[test]
fn extent_respects_components_and_minimum() {
    let mut draw = draw_for(ScaleAlignment::Bottom, Point::new(0.0, 0.0), 500.0);
    draw.enable_component(ScaleComponents::LABELS, false);
    draw.enable_component(ScaleComponents::TICKS, false);
    assert_eq!(draw.extent(&FixedMetrics), 1.0);

    let frame = draw.build_frame().expect("frame");
    assert_eq!(frame.lines.len(), 1);
    assert!(frame.texts.is_empty());

    let config = ScaleDrawConfig {
        minimum_extent_px: 40.0,
        ..ScaleDrawConfig::default()
    };
    let mut draw = ScaleDraw::with_config(config).expect("valid config");
    assert_eq!(draw.extent(&FixedMetrics), 40.0);
}

#[test]
fn label_distances_follow_metrics() {
    let mut draw = draw_for(ScaleAlignment::Bottom, Point::new(0.0, 0.0), 500.0);

    assert_eq!(draw.min_label_dist(&FixedMetrics), 30.0);
    assert_eq!(draw.border_dist(&FixedMetrics), (5.0, 15.0));
    // 10 label gaps of 30 px beat 51 ticks at 2 px each
    assert_eq!(draw.min_length(&FixedMetrics), 5.0 + 15.0 + 300.0);
}

#[test]
fn border_dist_is_zero_when_labels_fit_inside() {
    let engine = LinearScaleEngine::default();
    let mut draw = ScaleDraw::new();
    draw.set_scale_division(
        engine.divide_scale(-5.0, 105.0, 10, 0, 0.0),
        Transform::Identity,
    );
    draw.move_to(Point::new(0.0, 0.0), 1100.0);

    assert_eq!(draw.border_dist(&FixedMetrics), (0.0, 0.0));
}

#[test]
fn custom_formatter_replaces_and_hides_labels() {
    let mut draw = draw_for(ScaleAlignment::Bottom, Point::new(0.0, 0.0), 500.0);
    assert_eq!(draw.label(50.0), "50");

    draw.set_label_formatter(Arc::new(|value: f64| {
        if value == 50.0 {
            String::new()
        } else {
            format!("{value:.1} u")
        }
    }));

    let frame = draw.build_frame().expect("frame");
    assert_eq!(frame.texts.len(), 10);
    assert_eq!(frame.texts[0].text, "0.0 u");
}

#[test]
fn repeated_frames_reuse_cached_labels() {
    let mut draw = draw_for(ScaleAlignment::Bottom, Point::new(0.0, 0.0), 500.0);
    draw.build_frame().expect("frame");
    let first = draw.label_cache_stats();
    assert_eq!(first.misses, 11);
    assert_eq!(first.hits, 0);

    draw.build_frame().expect("frame");
    let second = draw.label_cache_stats();
    assert_eq!(second.misses, 11);
    assert_eq!(second.hits, 11);
    assert_eq!(second.size, 11);
}

#[test]
fn tick_lengths_are_clamped() {
    let mut draw = ScaleDraw::new();
    draw.set_tick_length(TickType::Major, 5000.0);
    assert_eq!(draw.tick_length(TickType::Major), 1000.0);
    draw.set_tick_length(TickType::Minor, -3.0);
    assert_eq!(draw.tick_length(TickType::Minor), 0.0);
}

#[test]
fn draw_config_validation_and_json() {
    let bad = ScaleDrawConfig::default().with_tick_length(TickType::Medium, -1.0);
    assert!(ScaleDraw::with_config(bad).is_err());

    let config = ScaleDrawConfig::default()
        .with_alignment(ScaleAlignment::Right)
        .with_components(ScaleComponents::BACKBONE | ScaleComponents::TICKS);
    let json = config.to_json_pretty().expect("serialize");
    let restored = ScaleDrawConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
    assert!(!restored.components.contains(ScaleComponents::LABELS));

    let partial = ScaleDrawConfig::from_json_str(r#"{"alignment":"Left"}"#).expect("parse");
    assert_eq!(partial.alignment, ScaleAlignment::Left);
    assert_eq!(partial.major_tick_length_px, 8.0);
}
