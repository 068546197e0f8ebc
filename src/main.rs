use anyhow::{Context, Result};
use flappy_arcade::app::App;
use flappy_arcade::config::{AppPaths, GameConfig};
use flappy_arcade::logging;
use tracing::{error, info};

fn main() -> Result<()> {
    let paths = AppPaths::discover().context("locating the data directory")?;
    logging::init(&paths.log_file).context("opening the log file")?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let result = App::new(GameConfig::default(), &paths).and_then(App::run);
    if let Err(e) = &result {
        error!("fatal: {e:#}");
    }
    result
}
