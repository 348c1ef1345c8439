// Chart rendering capability - the drawing backend is opaque to the pipeline

/// One series' render-ready values, aligned 1:1 with the frame's labels.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesFrame<'a> {
    pub name: &'a str,
    pub values: Vec<Option<f64>>,
}

/// A borrowed view of one chart's state, handed to the backend on redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame<'a> {
    pub chart: &'a str,
    pub labels: Vec<&'a str>,
    pub series: Vec<SeriesFrame<'a>>,
    /// Clamped Y-axis maximum; `None` auto-scales from the data.
    pub y_max: Option<f64>,
}

/// Drawing backend for the chart sets. Implementations repaint without
/// animation; the pipeline owns all series state.
pub trait ChartSurface: Send + Sync {
    fn redraw(&self, frame: &ChartFrame<'_>);
}
