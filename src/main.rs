mod app;
mod cli;
mod config;
#[cfg(not(tarpaulin_include))]
mod errors;
mod gallery;
#[cfg(not(tarpaulin_include))]
mod logging;

use app::{App, RootState};
use clap::Parser;
use color_eyre::eyre::{Context, Result};
use dotenv::dotenv;
use tui_uikit::tui::Tui;

#[cfg(not(tarpaulin_include))]
async fn run() -> Result<()> {
    let args = cli::Cli::parse();

    let config = config::Config::new(Some(cli::ClapSource::new(&args)))
        .context("Error when loading config")?;

    let state = RootState::new(config);
    let mut app = App::new(
        state,
        Tui::new()?
            .tick_rate(args.tick_rate)
            .frame_rate(args.frame_rate)
            .into(),
    );

    app.run().await
}

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<()> {
    dotenv().ok();
    errors::init()?;
    logging::init()?;

    run().await
}
