use pixeltype::time_series::WpmSeries;

/// Compute X (seconds) and Y (WPM) bounds for the results chart
pub fn compute_chart_params(series: &WpmSeries, time_limit_secs: Option<u32>) -> (f64, f64) {
    let overall_duration = match series.duration() {
        0 => time_limit_secs.unwrap_or(1),
        secs => secs,
    }
    .max(1) as f64;

    // keep a flat line off the top edge
    let highest_wpm = (series.peak_wpm() as f64 * 1.1).round().max(10.0);

    (overall_duration, highest_wpm)
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
