use std::path::Path;

use anyhow::Result;

use sensordash::app;
use sensordash::config;
use sensordash::state::{DashboardData, DashboardOptions};

/// The full dashboard: five-day query window, light theme, date-range
/// picker exposed.
fn main() -> Result<()> {
    env_logger::init();

    let config = config::load_or_default(Path::new(config::DEFAULT_CONFIG_PATH))?;
    let options = DashboardOptions {
        title: "Home climate dashboard".to_string(),
        window_days: 5,
        show_date_filter: true,
        dark_theme: false,
    };

    let data = DashboardData::load(&config, options.window_days, false)?;
    app::run(data, options).map_err(|e| anyhow::anyhow!("UI error: {e}"))
}
