mod run;
mod ui;

use anyhow::Result;

use finboard::config::Config;
use finboard::logging;
use finboard::store::SqliteStore;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::load()?;
    logging::setup_logging(&config.log_path)?;
    let mut store = SqliteStore::open(&config.db_path)?;

    if args.len() <= 1 {
        run::as_tui(&mut store, &config)
    } else {
        run::as_cli(&args, &mut store, &config)
    }
}
