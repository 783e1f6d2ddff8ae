use std::path::Path;

use anyhow::Result;

use sensordash::app;
use sensordash::config;
use sensordash::state::{DashboardData, DashboardOptions};

/// The compact variant: four-day query window, dark theme, no date
/// filter, and the fetched readings written to a CSV cache after load.
fn main() -> Result<()> {
    env_logger::init();

    let config = config::load_or_default(Path::new(config::DEFAULT_CONFIG_PATH))?;
    let options = DashboardOptions {
        title: "Home climate quick look".to_string(),
        window_days: 4,
        show_date_filter: false,
        dark_theme: true,
    };

    let data = DashboardData::load(&config, options.window_days, true)?;
    app::run(data, options).map_err(|e| anyhow::anyhow!("UI error: {e}"))
}
