use eframe::egui::Color32;

// ---------------------------------------------------------------------------
// Figure – a chart specification, independent of rendering
// ---------------------------------------------------------------------------

/// One output artifact of an update rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Line(LineFigure),
    Box(BoxFigure),
    Histogram(HistFigure),
}

// ---------------------------------------------------------------------------
// Line chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LineFigure {
    pub series: Vec<LineSeries>,
    pub y_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub color: Color32,
    /// `[unix seconds, value]` pairs in time order.
    pub points: Vec<[f64; 2]>,
}

// ---------------------------------------------------------------------------
// Grouped box plot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BoxFigure {
    /// Tick label for integer x position 0, 1, …
    pub x_labels: Vec<String>,
    /// One series per grouping category.
    pub series: Vec<BoxSeries>,
    pub y_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxSeries {
    pub name: String,
    pub color: Color32,
    pub boxes: Vec<BoxStats>,
    /// Horizontal extent of each box.
    pub box_width: f64,
}

/// Five-number summary of one box, with 1.5·IQR whiskers. Values outside
/// the whiskers are carried separately and drawn as points.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    /// Horizontal position (location slot plus category offset).
    pub x: f64,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HistFigure {
    pub x_label: String,
    pub bin_width: f64,
    pub bars: Vec<HistBar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistBar {
    pub center: f64,
    pub count: usize,
}
