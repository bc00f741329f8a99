use std::time::Duration;

use thousands::Separable;

// Helper to split a duration into a integer, decimal, and unit
fn get_value(duration: &Duration) -> (u64, u32, &'static str) {
    match duration {
        n if n >= &Duration::from_secs(1) => (n.as_secs(), n.subsec_millis(), "s"),
        n if n >= &Duration::from_millis(1) => (n.as_millis() as u64, (n.as_micros() % 1000) as u32, "ms"),
        n if n >= &Duration::from_micros(1) => (n.as_micros() as u64, (n.as_nanos() % 1000) as u32, "µs"),
        n => (n.as_nanos() as u64, 0, "ns"),
    }
}

/// Formats a duration with its most readable unit and three decimals, e.g. `16.667ms`.
pub fn format_duration(duration: Duration) -> String {
    let (int, decimal, unit) = get_value(&duration);
    format!("{int}.{decimal:03}{unit}")
}

/// Mean and standard deviation of a set of frame timings, formatted as `mean ± std`.
///
/// Returns `None` when there is nothing to summarize.
pub fn format_timing_summary(timings: impl IntoIterator<Item = Duration>) -> Option<String> {
    let samples: Vec<f64> = timings.into_iter().map(|d| d.as_secs_f64()).collect();
    if samples.is_empty() {
        return None;
    }

    let count = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / count;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count;

    Some(format!(
        "{} ± {}",
        format_duration(Duration::from_secs_f64(mean)),
        format_duration(Duration::from_secs_f64(variance.sqrt()))
    ))
}

/// A count with thousands separators, e.g. `12,345`.
pub fn format_count(value: u64) -> String {
    value.separate_with_commas()
}

/// Elapsed play time as `m:ss`. Minutes are not wrapped into hours.
pub fn format_elapsed(seconds: f32) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Health as `HP current / max`, rounded up so a sliver of health never reads as zero.
pub fn format_health(current: f32, max: f32) -> String {
    format!("HP {} / {}", current.max(0.0).ceil() as u32, max.max(0.0).round() as u32)
}
