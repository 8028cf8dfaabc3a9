/// Interpolate from `a` to `b` by `t`.
///
/// Written as `a * (1 - t) + b * t` so `t == 0` and `t == 1` reproduce the endpoints exactly.
/// `t` is not clamped: spring progress may leave `[0, 1]`.
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Clamp to `[0, 1]`, mapping NaN to 0.
pub(crate) fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// `a / b` clamped to `[0, 1]`; degenerate divisors read as complete.
pub(crate) fn ratio01(a: f64, b: f64) -> f64 {
    if b <= 0.0 || !b.is_finite() {
        return 1.0;
    }
    clamp01(a / b)
}

/// Format a CSS number with at most three decimals and no trailing zeros.
pub(crate) fn css_num(v: f64) -> String {
    let v = if v.is_finite() { v } else { 0.0 };
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_owned()
    } else {
        s.to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
