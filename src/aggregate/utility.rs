use std::cmp::Ordering;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Orders GTFS identifiers the way people read them: a leading run of
/// digits compares numerically (`"2" < "10" < "10e"`), the remainder
/// lexically. Ids without a leading number sort after those with one.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (num_a, rest_a) = split_numeric(a);
    let (num_b, rest_b) = split_numeric(b);

    match (num_a, num_b) {
        (Some(x), Some(y)) => x
            .cmp(&y)
            .then_with(|| rest_a.cmp(rest_b))
            .then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn split_numeric(s: &str) -> (Option<u64>, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    (s[..end].parse().ok(), &s[end..])
}
