use log::debug;

use crate::config::ChartSettings;

/// Milliseconds since the Unix epoch
pub type EpochMillis = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: EpochMillis,
    pub end: EpochMillis,
}

impl TimeWindow {
    pub fn new(start: EpochMillis, end: EpochMillis) -> Self {
        Self { start, end }
    }

    pub fn len_ms(&self) -> i64 {
        self.end - self.start
    }

    pub fn contains(&self, ts: EpochMillis) -> bool {
        self.start <= ts && ts <= self.end
    }
}

/// Natural extent of a time series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesSpan {
    pub min: EpochMillis,
    pub max: EpochMillis,
}

impl SeriesSpan {
    pub fn new(a: EpochMillis, b: EpochMillis) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Extent of the given timestamps, `None` when there are none
    pub fn of(timestamps: &[EpochMillis]) -> Option<Self> {
        let min = timestamps.iter().copied().min()?;
        let max = timestamps.iter().copied().max()?;
        Some(Self { min, max })
    }

    pub fn clamp(&self, ts: EpochMillis) -> EpochMillis {
        ts.clamp(self.min, self.max)
    }

    pub fn len_ms(&self) -> i64 {
        self.max - self.min
    }

    pub fn full_window(&self) -> TimeWindow {
        TimeWindow::new(self.min, self.max)
    }
}

/// Dragged end of the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

/// Visible sub-range of a time series.
///
/// Always holds `span.min <= window.start <= window.end <= span.max`. A user
/// adjustment narrower than `min_window_ms` snaps the dragged edge back to
/// exactly `min_window_ms` from the other edge; if the whole series is
/// narrower than that, the window is the whole series.
#[derive(Debug, Clone)]
pub struct WindowSelector {
    fallback: SeriesSpan,
    min_window_ms: i64,
    span: SeriesSpan,
    window: TimeWindow,
}

impl WindowSelector {
    pub fn new(settings: &ChartSettings) -> Self {
        let fallback = SeriesSpan::new(settings.default_window_start_ms, settings.default_window_end_ms);
        Self::with_fallback(fallback, settings.min_window_ms)
    }

    pub fn with_fallback(fallback: SeriesSpan, min_window_ms: i64) -> Self {
        Self {
            fallback,
            min_window_ms: min_window_ms.max(0),
            span: fallback,
            window: fallback.full_window(),
        }
    }

    pub fn span(&self) -> SeriesSpan {
        self.span
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// A new series replaced the old one: show all of it
    pub fn load(&mut self, timestamps: &[EpochMillis]) -> TimeWindow {
        self.span = self.span_for(timestamps);
        self.window = self.span.full_window();
        debug!("Window reset to {:?}", self.window);
        self.window
    }

    /// The series' extent changed under the current selection: keep what
    /// still fits, clamping each edge into the new extent.
    pub fn reanchor(&mut self, timestamps: &[EpochMillis]) -> TimeWindow {
        self.span = self.span_for(timestamps);
        self.window = TimeWindow::new(self.span.clamp(self.window.start), self.span.clamp(self.window.end));
        debug!("Window re-anchored to {:?}", self.window);
        self.window
    }

    /// Apply a drag of `edge` that produced `candidate`
    pub fn adjust(&mut self, candidate: TimeWindow, edge: Edge) -> TimeWindow {
        self.window = self.constrain(candidate, edge);
        self.window
    }

    pub fn adjust_start(&mut self, start: EpochMillis) -> TimeWindow {
        self.adjust(TimeWindow::new(start, self.window.end), Edge::Start)
    }

    pub fn adjust_end(&mut self, end: EpochMillis) -> TimeWindow {
        self.adjust(TimeWindow::new(self.window.start, end), Edge::End)
    }

    /// Items whose timestamp falls inside the window, order preserved
    pub fn visible<'a, T, F>(&self, items: &'a [T], timestamp: F) -> Vec<&'a T>
    where
        F: Fn(&T) -> EpochMillis,
    {
        items
            .iter()
            .filter(|item| self.window.contains(timestamp(item)))
            .collect()
    }

    fn span_for(&self, timestamps: &[EpochMillis]) -> SeriesSpan {
        SeriesSpan::of(timestamps).unwrap_or(self.fallback)
    }

    fn constrain(&self, candidate: TimeWindow, edge: Edge) -> TimeWindow {
        let span = self.span;
        if span.len_ms() < self.min_window_ms {
            return span.full_window();
        }

        let start = span.clamp(candidate.start);
        let end = span.clamp(candidate.end);
        if end - start >= self.min_window_ms {
            return TimeWindow::new(start, end);
        }

        match edge {
            Edge::Start => self.snap_start(end),
            Edge::End => self.snap_end(start),
        }
    }

    // Start was dragged too close: anchor at end, sliding right if it hits the floor.
    fn snap_start(&self, end: EpochMillis) -> TimeWindow {
        let start = end - self.min_window_ms;
        if start < self.span.min {
            return TimeWindow::new(self.span.min, self.span.min + self.min_window_ms);
        }
        TimeWindow::new(start, end)
    }

    fn snap_end(&self, start: EpochMillis) -> TimeWindow {
        let end = start + self.min_window_ms;
        if end > self.span.max {
            return TimeWindow::new(self.span.max - self.min_window_ms, self.span.max);
        }
        TimeWindow::new(start, end)
    }
}
