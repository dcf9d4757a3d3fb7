//! Floating-point helpers shared by intervals, maps and scale engines.
//!
//! All tick alignment and stripping goes through [`fuzzy_compare`], so the
//! `1e-6 * interval_size` tolerance stays the same everywhere.

use std::cmp::Ordering;

/// Smallest value a logarithmic scale accepts.
pub const LOG_MIN: f64 = 1.0e-150;
/// Largest value a logarithmic scale accepts.
pub const LOG_MAX: f64 = 1.0e150;

const EPS: f64 = 1.0e-6;

/// Compares two values with a tolerance of `1e-6 * interval_size`.
///
/// Values closer than the tolerance compare as `Equal`.
#[must_use]
pub fn fuzzy_compare(value1: f64, value2: f64, interval_size: f64) -> Ordering {
    let eps = (EPS * interval_size).abs();

    if value2 - value1 > eps {
        Ordering::Less
    } else if value1 - value2 > eps {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Relative equality with a 12 significant digit tolerance.
///
/// Never true when exactly one side is zero.
#[must_use]
pub fn relative_eq(lhs: f64, rhs: f64) -> bool {
    (lhs - rhs).abs() * 1.0e12 <= lhs.abs().min(rhs.abs())
}

/// Absolute near-zero check used when aligning bounds.
#[must_use]
pub fn is_near_zero(value: f64) -> bool {
    value.abs() <= 1.0e-12
}

/// Rounds `value` up to a multiple of `interval_size`, ignoring overshoots
/// smaller than `1e-6 * interval_size`.
#[must_use]
pub fn ceil_eps(value: f64, interval_size: f64) -> f64 {
    let eps = EPS * interval_size;
    ((value - eps) / interval_size).ceil() * interval_size
}

/// Rounds `value` down to a multiple of `interval_size`, ignoring undershoots
/// smaller than `1e-6 * interval_size`.
#[must_use]
pub fn floor_eps(value: f64, interval_size: f64) -> f64 {
    let eps = EPS * interval_size;
    ((value + eps) / interval_size).floor() * interval_size
}

/// Divides an interval into steps, shaving a `1e-6` fraction off first so the
/// result never rounds up past the exact quotient.
#[must_use]
pub fn divide_eps(interval_size: f64, num_steps: f64) -> f64 {
    if num_steps == 0.0 || interval_size == 0.0 {
        return 0.0;
    }

    (interval_size - EPS * interval_size) / num_steps
}

/// Finds a "nice" step size that splits `interval_size` into at most
/// `num_steps` parts.
///
/// The result is `n * base^p` where `n` is `base` halved (integer division)
/// zero or more times, e.g. `{1, 2, 5, 10} * 10^p` for base 10. The sign
/// follows `interval_size`. Returns `0.0` when no step can be computed.
#[must_use]
pub fn divide_interval(interval_size: f64, num_steps: u32, base: u32) -> f64 {
    if num_steps == 0 {
        return 0.0;
    }

    let v = divide_eps(interval_size, f64::from(num_steps));
    if v == 0.0 || !v.is_finite() {
        return 0.0;
    }

    let base_f = f64::from(base);
    let lx = log_base(base_f, v.abs());
    let p = lx.floor();

    let fraction = base_f.powf(lx - p);

    let mut n = base;
    while n > 1 && fraction <= f64::from(n / 2) {
        n /= 2;
    }

    let step_size = f64::from(n) * base_f.powf(p);
    if v < 0.0 { -step_size } else { step_size }
}

/// Logarithm of `value` to an arbitrary `base`.
#[must_use]
pub fn log_base(base: f64, value: f64) -> f64 {
    value.ln() / base.ln()
}
