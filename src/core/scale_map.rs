use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::math::fuzzy_compare;
use crate::core::{Point, Rect, Transform};

/// Mapping between a scale interval `[s1, s2]` and a paint interval `[p1, p2]`.
///
/// Scale values are first passed through the map's [`Transform`], then
/// interpolated linearly into paint coordinates. The slope and the
/// transformed `s1` are cached and refreshed whenever an interval or the
/// transform changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleMap {
    s1: f64,
    s2: f64,
    p1: f64,
    p2: f64,
    transform: Transform,
    slope: f64,
    ts1: f64,
}

impl Default for ScaleMap {
    fn default() -> Self {
        Self {
            s1: 0.0,
            s2: 1.0,
            p1: 0.0,
            p2: 1.0,
            transform: Transform::Identity,
            slope: 1.0,
            ts1: 0.0,
        }
    }
}

impl ScaleMap {
    #[must_use]
    pub fn new(s1: f64, s2: f64, p1: f64, p2: f64) -> Self {
        let mut map = Self::default();
        map.set_paint_interval(p1, p2);
        map.set_scale_interval(s1, s2);
        map
    }

    /// Replaces the transform and re-applies the current scale interval.
    pub fn set_transformation(&mut self, transform: Transform) {
        self.transform = transform;
        self.set_scale_interval(self.s1, self.s2);
    }

    #[must_use]
    pub fn transformation(&self) -> Transform {
        self.transform
    }

    /// Sets the scale interval, clamping both bounds into the transform's domain.
    pub fn set_scale_interval(&mut self, s1: f64, s2: f64) {
        self.s1 = self.transform.bounded(s1);
        self.s2 = self.transform.bounded(s2);
        self.update_factor();
    }

    pub fn set_paint_interval(&mut self, p1: f64, p2: f64) {
        self.p1 = p1;
        self.p2 = p2;
        self.update_factor();
    }

    #[must_use]
    pub fn s1(&self) -> f64 {
        self.s1
    }

    #[must_use]
    pub fn s2(&self) -> f64 {
        self.s2
    }

    #[must_use]
    pub fn p1(&self) -> f64 {
        self.p1
    }

    #[must_use]
    pub fn p2(&self) -> f64 {
        self.p2
    }

    #[must_use]
    pub fn p_dist(&self) -> f64 {
        (self.p2 - self.p1).abs()
    }

    #[must_use]
    pub fn s_dist(&self) -> f64 {
        (self.s2 - self.s1).abs()
    }

    /// Maps a scale value to a paint coordinate.
    #[must_use]
    pub fn transform(&self, s: f64) -> f64 {
        self.p1 + (self.transform.transform(s) - self.ts1) * self.slope
    }

    /// Maps a paint coordinate back to a scale value.
    ///
    /// A zero-length paint interval maps every coordinate to `s1`.
    #[must_use]
    pub fn inv_transform(&self, p: f64) -> f64 {
        if self.slope == 0.0 {
            return self.s1;
        }

        self.transform
            .inv_transform(self.ts1 + (p - self.p1) / self.slope)
    }

    /// Whether paint coordinates run against scale values.
    #[must_use]
    pub fn is_inverting(&self) -> bool {
        (self.p1 < self.p2) != (self.s1 < self.s2)
    }

    fn update_factor(&mut self) {
        self.ts1 = self.transform.transform(self.s1);
        let ts2 = self.transform.transform(self.s2);

        self.slope = if self.ts1 != ts2 {
            (self.p2 - self.p1) / (ts2 - self.ts1)
        } else {
            1.0
        };
    }
}

/// Maps a point through an x and a y map.
#[must_use]
pub fn transform_point(x_map: &ScaleMap, y_map: &ScaleMap, point: Point) -> Point {
    Point::new(x_map.transform(point.x), y_map.transform(point.y))
}

/// Maps a paint position back through an x and a y map.
#[must_use]
pub fn inv_transform_point(x_map: &ScaleMap, y_map: &ScaleMap, point: Point) -> Point {
    Point::new(x_map.inv_transform(point.x), y_map.inv_transform(point.y))
}

/// Maps a scale rectangle into paint coordinates.
///
/// The result is normalized and corners within `1e-6` of the rectangle's
/// extent from zero are snapped to exactly `0.0`.
#[must_use]
pub fn transform_rect(x_map: &ScaleMap, y_map: &ScaleMap, rect: Rect) -> Rect {
    let mut x1 = x_map.transform(rect.left());
    let mut x2 = x_map.transform(rect.right());
    let mut y1 = y_map.transform(rect.top());
    let mut y2 = y_map.transform(rect.bottom());

    if x2 < x1 {
        std::mem::swap(&mut x1, &mut x2);
    }
    if y2 < y1 {
        std::mem::swap(&mut y1, &mut y2);
    }

    let (x1, x2) = snap_to_zero(x1, x2);
    let (y1, y2) = snap_to_zero(y1, y2);

    Rect::from_corners(x1, y1, x2, y2)
}

/// Maps a paint rectangle back into scale coordinates.
#[must_use]
pub fn inv_transform_rect(x_map: &ScaleMap, y_map: &ScaleMap, rect: Rect) -> Rect {
    let x1 = x_map.inv_transform(rect.left());
    let x2 = x_map.inv_transform(rect.right());
    let y1 = y_map.inv_transform(rect.top());
    let y2 = y_map.inv_transform(rect.bottom());

    Rect::from_corners(x1, y1, x2, y2).normalized()
}

// The extent is measured again after the first corner snapped.
fn snap_to_zero(mut v1: f64, mut v2: f64) -> (f64, f64) {
    if fuzzy_compare(v1, 0.0, v2 - v1) == Ordering::Equal {
        v1 = 0.0;
    }
    if fuzzy_compare(v2, 0.0, v2 - v1) == Ordering::Equal {
        v2 = 0.0;
    }
    (v1, v2)
}
