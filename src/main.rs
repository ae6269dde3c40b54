use std::io;
use std::path::PathBuf;

use anyhow::Result;

use rent_tables::config::AppConfig;
use rent_tables::state::AppState;
use rent_tables::ui::menu::{self, Console};

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::discover(std::env::args_os().nth(1).map(PathBuf::from))?;

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    let Some(settings) = menu::setup(&mut console, &config)? else {
        log::info!("Input closed before setup finished");
        return Ok(());
    };

    let mut state = AppState::new(settings);
    menu::run(&mut console, &mut state)?;
    Ok(())
}
