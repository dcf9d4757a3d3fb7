use std::fmt;

use tracing::trace;

use crate::core::{Point, ScaleDivision, ScaleMap, TickType, Transform};
use crate::error::ScaleResult;
use crate::render::{AxisFrame, LinePrimitive, TextHAlign, TextPrimitive, TextVAlign};

use super::label_cache::{LabelCache, LabelCacheStats};
use super::label_format::{LabelFormatterFn, default_label_formatter};
use super::scale_draw_config::{MAX_TICK_LENGTH_PX, ScaleAlignment, ScaleComponents, ScaleDrawConfig};

/// Measures label text for layout.
///
/// Returns `(width, height)` in pixels.
pub trait LabelMetrics {
    fn label_size(&self, text: &str, font_size_px: f64) -> (f64, f64);
}

/// Backend-independent label metrics based on per-glyph width estimates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatedLabelMetrics {
    pub line_height_factor: f64,
}

impl Default for EstimatedLabelMetrics {
    fn default() -> Self {
        Self {
            line_height_factor: 1.2,
        }
    }
}

impl LabelMetrics for EstimatedLabelMetrics {
    fn label_size(&self, text: &str, font_size_px: f64) -> (f64, f64) {
        (
            estimate_label_text_width_px(text, font_size_px),
            font_size_px * self.line_height_factor,
        )
    }
}

/// Width of `text` at `font_size_px`, from fixed per-character advances.
#[must_use]
pub fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' => 0.42,
            'e' => 0.56,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

/// Draws one axis: backbone, tick marks and major tick labels.
///
/// The draw owns its division and a scale map whose paint interval follows
/// the backbone set with [`ScaleDraw::move_to`]. Horizontal axes run left to
/// right, vertical axes bottom to top.
pub struct ScaleDraw {
    config: ScaleDrawConfig,
    division: ScaleDivision,
    map: ScaleMap,
    pos: Point,
    length: f64,
    formatter: LabelFormatterFn,
    labels: LabelCache,
}

impl fmt::Debug for ScaleDraw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaleDraw")
            .field("config", &self.config)
            .field("division", &self.division)
            .field("map", &self.map)
            .field("pos", &self.pos)
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

impl Default for ScaleDraw {
    fn default() -> Self {
        Self::from_valid_config(ScaleDrawConfig::default())
    }
}

impl ScaleDraw {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScaleDrawConfig) -> ScaleResult<Self> {
        Ok(Self::from_valid_config(config.validate()?))
    }

    fn from_valid_config(config: ScaleDrawConfig) -> Self {
        let mut draw = Self {
            config,
            division: ScaleDivision::default(),
            map: ScaleMap::default(),
            pos: Point::default(),
            length: 0.0,
            formatter: default_label_formatter(),
            labels: LabelCache::default(),
        };
        draw.update_map();
        draw
    }

    #[must_use]
    pub fn config(&self) -> &ScaleDrawConfig {
        &self.config
    }

    #[must_use]
    pub fn alignment(&self) -> ScaleAlignment {
        self.config.alignment
    }

    /// Changes the side of the canvas, keeping position and length.
    pub fn set_alignment(&mut self, alignment: ScaleAlignment) {
        self.config.alignment = alignment;
        self.update_map();
    }

    #[must_use]
    pub fn has_component(&self, component: ScaleComponents) -> bool {
        self.config.components.contains(component)
    }

    pub fn enable_component(&mut self, component: ScaleComponents, on: bool) {
        self.config.components = self.config.components.with(component, on);
    }

    /// Sets a tick length, clamped into `[0, 1000]` pixels.
    pub fn set_tick_length(&mut self, tick_type: TickType, length_px: f64) {
        let length_px = if length_px.is_finite() {
            length_px.clamp(0.0, MAX_TICK_LENGTH_PX)
        } else {
            0.0
        };
        *self.config.tick_length_mut(tick_type) = length_px;
    }

    #[must_use]
    pub fn tick_length(&self, tick_type: TickType) -> f64 {
        self.config.tick_length(tick_type)
    }

    /// Installs a new division and the transform its engine recommends.
    pub fn set_scale_division(&mut self, division: ScaleDivision, transform: Transform) {
        self.map.set_transformation(transform);
        self.map
            .set_scale_interval(division.lower_bound(), division.upper_bound());
        self.division = division;
    }

    #[must_use]
    pub fn scale_division(&self) -> &ScaleDivision {
        &self.division
    }

    #[must_use]
    pub fn scale_map(&self) -> &ScaleMap {
        &self.map
    }

    /// Places the backbone at `pos` with `length` pixels.
    ///
    /// For horizontal axes `pos` is the left end, for vertical axes the top
    /// end. A negative length moves `pos` to the other end.
    pub fn move_to(&mut self, mut pos: Point, mut length: f64) {
        if length < 0.0 {
            if self.config.alignment.is_horizontal() {
                pos.x += length;
            } else {
                pos.y += length;
            }
            length = -length;
        }
        self.pos = pos;
        self.length = length;
        self.update_map();
    }

    #[must_use]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Replaces the label formatter and drops cached label text.
    pub fn set_label_formatter(&mut self, formatter: LabelFormatterFn) {
        self.formatter = formatter;
        self.labels.clear();
    }

    /// Label text for a tick value.
    pub fn label(&mut self, value: f64) -> String {
        let formatter = &self.formatter;
        self.labels.get_or_insert_with(value, |v| formatter(v))
    }

    #[must_use]
    pub fn label_cache_stats(&self) -> LabelCacheStats {
        self.labels.stats()
    }

    /// Anchor of the label for `value`, outside the tick marks.
    #[must_use]
    pub fn label_position(&self, value: f64) -> Point {
        let tval = self.map.transform(value);
        let mut dist = self.config.spacing_px;
        if self.has_component(ScaleComponents::BACKBONE) {
            dist += self.config.pen_width_px;
        }
        if self.has_component(ScaleComponents::TICKS) {
            dist += self.tick_length(TickType::Major);
        }

        match self.config.alignment {
            ScaleAlignment::Bottom => Point::new(tval, self.pos.y + dist),
            ScaleAlignment::Top => Point::new(tval, self.pos.y - dist),
            ScaleAlignment::Left => Point::new(self.pos.x - dist, tval),
            ScaleAlignment::Right => Point::new(self.pos.x + dist, tval),
        }
    }

    /// Space the axis needs perpendicular to its backbone.
    pub fn extent(&mut self, metrics: &impl LabelMetrics) -> f64 {
        let mut d = 0.0;

        if self.has_component(ScaleComponents::LABELS) {
            d += self.max_label_across(metrics);
            if d > 0.0 {
                d += self.config.spacing_px;
            }
        }
        if self.has_component(ScaleComponents::TICKS) {
            d += self.config.max_tick_length();
        }
        if self.has_component(ScaleComponents::BACKBONE) {
            d += self.config.pen_width_px.max(1.0);
        }

        d.max(self.config.minimum_extent_px)
    }

    /// Minimum distance between two major ticks so their labels don't overlap.
    pub fn min_label_dist(&mut self, metrics: &impl LabelMetrics) -> f64 {
        if !self.has_component(ScaleComponents::LABELS) {
            return 0.0;
        }
        self.major_label_sizes(metrics)
            .into_iter()
            .map(|(_, along, _)| along)
            .fold(0.0, f64::max)
    }

    /// How far the outermost labels stick out beyond both backbone ends.
    ///
    /// Returns `(start, end)` in paint order, both `>= 0`.
    pub fn border_dist(&mut self, metrics: &impl LabelMetrics) -> (f64, f64) {
        if !self.has_component(ScaleComponents::LABELS) {
            return (0.0, 0.0);
        }

        let p_min = self.map.p1().min(self.map.p2());
        let p_max = self.map.p1().max(self.map.p2());

        let mut start: f64 = 0.0;
        let mut end: f64 = 0.0;
        for (value, along, _) in self.major_label_sizes(metrics) {
            let p = self.map.transform(value);
            let half = 0.5 * along;
            start = start.max(p_min - (p - half));
            end = end.max((p + half) - p_max);
        }
        (start, end)
    }

    /// Shortest backbone that fits all labels and ticks without overlap.
    pub fn min_length(&mut self, metrics: &impl LabelMetrics) -> f64 {
        let (start_dist, end_dist) = self.border_dist(metrics);

        let major_count = self.visible_ticks(TickType::Major).count();
        let minor_count = self.visible_ticks(TickType::Minor).count()
            + self.visible_ticks(TickType::Medium).count();

        let mut length_for_labels = 0.0;
        if major_count > 1 {
            length_for_labels = self.min_label_dist(metrics) * (major_count - 1) as f64;
        }

        let mut length_for_ticks = 0.0;
        if self.has_component(ScaleComponents::TICKS) {
            length_for_ticks =
                ((major_count + minor_count) as f64 * (self.config.pen_width_px + 1.0)).ceil();
        }

        start_dist + end_dist + f64::max(length_for_labels, length_for_ticks)
    }

    /// Materializes the axis into draw commands.
    pub fn build_frame(&mut self) -> ScaleResult<AxisFrame> {
        let mut frame = AxisFrame::new();
        let pen = self.config.pen_width_px;
        let color = self.config.color;

        if self.has_component(ScaleComponents::TICKS) {
            for tick_type in TickType::ALL {
                let tick_length = self.tick_length(tick_type);
                if tick_length <= 0.0 {
                    continue;
                }
                let positions: Vec<f64> = self
                    .visible_ticks(tick_type)
                    .map(|value| self.map.transform(value))
                    .collect();
                for p in positions {
                    let (x1, y1, x2, y2) = self.tick_segment(p, tick_length);
                    frame.lines.push(LinePrimitive::new(x1, y1, x2, y2, pen, color));
                }
            }
        }

        if self.has_component(ScaleComponents::BACKBONE) {
            let (x1, y1, x2, y2) = if self.config.alignment.is_horizontal() {
                (self.pos.x, self.pos.y, self.pos.x + self.length, self.pos.y)
            } else {
                (self.pos.x, self.pos.y, self.pos.x, self.pos.y + self.length)
            };
            frame.lines.push(LinePrimitive::new(x1, y1, x2, y2, pen, color));
        }

        if self.has_component(ScaleComponents::LABELS) {
            let (h_align, v_align) = match self.config.alignment {
                ScaleAlignment::Bottom => (TextHAlign::Center, TextVAlign::Top),
                ScaleAlignment::Top => (TextHAlign::Center, TextVAlign::Bottom),
                ScaleAlignment::Left => (TextHAlign::Right, TextVAlign::Center),
                ScaleAlignment::Right => (TextHAlign::Left, TextVAlign::Center),
            };
            let values: Vec<f64> = self.visible_ticks(TickType::Major).collect();
            for value in values {
                let text = self.label(value);
                if text.is_empty() {
                    continue;
                }
                let anchor = self.label_position(value);
                frame.texts.push(TextPrimitive::new(
                    text,
                    anchor.x,
                    anchor.y,
                    self.config.font_size_px,
                    color,
                    h_align,
                    v_align,
                ));
            }
        }

        frame.validate()?;
        trace!(
            lines = frame.lines.len(),
            texts = frame.texts.len(),
            "scale draw frame built"
        );
        Ok(frame)
    }

    fn update_map(&mut self) {
        if self.config.alignment.is_horizontal() {
            self.map
                .set_paint_interval(self.pos.x, self.pos.x + self.length);
        } else {
            self.map
                .set_paint_interval(self.pos.y + self.length, self.pos.y);
        }
    }

    fn visible_ticks(&self, tick_type: TickType) -> impl Iterator<Item = f64> + '_ {
        let division = &self.division;
        division
            .ticks(tick_type)
            .iter()
            .copied()
            .filter(move |value| division.contains(*value))
    }

    fn tick_segment(&self, p: f64, tick_length: f64) -> (f64, f64, f64, f64) {
        let (x, y) = (self.pos.x, self.pos.y);
        match self.config.alignment {
            ScaleAlignment::Bottom => (p, y, p, y + tick_length),
            ScaleAlignment::Top => (p, y, p, y - tick_length),
            ScaleAlignment::Left => (x, p, x - tick_length, p),
            ScaleAlignment::Right => (x, p, x + tick_length, p),
        }
    }

    // (value, size along the backbone, size across it) per major label
    fn major_label_sizes(&mut self, metrics: &impl LabelMetrics) -> Vec<(f64, f64, f64)> {
        let horizontal = self.config.alignment.is_horizontal();
        let font_size_px = self.config.font_size_px;
        let values: Vec<f64> = self.visible_ticks(TickType::Major).collect();

        values
            .into_iter()
            .filter_map(|value| {
                let text = self.label(value);
                if text.is_empty() {
                    return None;
                }
                let (width, height) = metrics.label_size(&text, font_size_px);
                Some(if horizontal {
                    (value, width, height)
                } else {
                    (value, height, width)
                })
            })
            .collect()
    }

    fn max_label_across(&mut self, metrics: &impl LabelMetrics) -> f64 {
        self.major_label_sizes(metrics)
            .into_iter()
            .map(|(_, _, across)| across)
            .fold(0.0, f64::max)
    }
}
