/// Live WPM sampled at an elapsed second of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSeriesPoint {
    pub t: u32,
    pub wpm: u32,
}

impl TimeSeriesPoint {
    pub fn new(t: u32, wpm: u32) -> Self {
        Self { t, wpm }
    }
}

impl From<TimeSeriesPoint> for (f64, f64) {
    fn from(p: TimeSeriesPoint) -> Self {
        (p.t as f64, p.wpm as f64)
    }
}

/// One sample per engine tick while a session is active
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WpmSeries {
    points: Vec<TimeSeriesPoint>,
}

impl WpmSeries {
    pub fn record(&mut self, t: u32, wpm: u32) {
        self.points.push(TimeSeriesPoint::new(t, wpm));
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn peak_wpm(&self) -> u32 {
        self.points.iter().map(|p| p.wpm).max().unwrap_or(0)
    }

    pub fn duration(&self) -> u32 {
        self.points.last().map(|p| p.t).unwrap_or(0)
    }

    pub fn as_tuples(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|&p| p.into()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_series() {
        let series = WpmSeries::default();
        assert!(series.is_empty());
        assert_eq!(series.peak_wpm(), 0);
        assert_eq!(series.duration(), 0);
    }

    #[test]
    fn test_peak_and_duration() {
        let mut series = WpmSeries::default();
        series.record(1, 30);
        series.record(2, 55);
        series.record(3, 42);
        assert_eq!(series.peak_wpm(), 55);
        assert_eq!(series.duration(), 3);
        assert_eq!(series.as_tuples()[1], (2.0, 55.0));
    }
}
