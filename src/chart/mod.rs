/// Chart artifacts and their builders.
///
/// A figure is plain data: an update rule produces one, the renderer in
/// `ui::plot` consumes it every frame. Rebuilding a figure never touches
/// the UI, which keeps the rules pure and trivially comparable.
pub mod build;
pub mod figure;

pub use figure::{
    BoxFigure, BoxSeries, BoxStats, Figure, HistBar, HistFigure, LineFigure, LineSeries,
};
