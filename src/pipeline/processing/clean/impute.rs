use std::collections::HashMap;

/// Most frequent value; ties go to the lexicographically smallest value.
pub fn mode<'a, I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&'a str, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by(|(a_val, a_n), (b_val, b_n)| a_n.cmp(b_n).then_with(|| b_val.cmp(a_val)))
        .map(|(v, _)| v.to_string())
}

/// Arithmetic mean; `None` when there are no values or the sum overflows.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64).filter(|m| m.is_finite())
}

/// Read a cell as a number. Surrounding whitespace is ignored; non-finite values are rejected.
pub fn coerce_numeric(cell: Option<&str>) -> Option<f64> {
    cell.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Round to `decimals` places, half to even. Values too large to scale are
/// already whole and come back unchanged.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round_ties_even() / factor
}

/// Whether a whole number can be stored as an `i64` without clamping.
pub fn fits_i64(value: f64) -> bool {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range
    value >= i64::MIN as f64 && value < i64::MAX as f64
}
