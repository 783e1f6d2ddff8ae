/// Reactive wiring between controls and charts.
///
/// Instead of implicit framework callbacks, the interactive charts are
/// declared as an explicit update table: each row names one output, the
/// inputs it depends on and a pure function. The dispatcher re-invokes a
/// row exactly when one of its declared inputs changes, always on the UI
/// thread, never retaining state between invocations.
pub mod dispatch;
pub mod rules;
