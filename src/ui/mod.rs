/// Rendering: the control panel, the statistic tables and the figure
/// plots. Everything here draws from `ViewState`; chart regeneration
/// happens in `view::dispatch`, never while drawing.
pub mod panels;
pub mod plot;
pub mod tables;
