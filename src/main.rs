mod api;
mod app;
mod config;
mod error;
mod events;
mod logger;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use clap::{App as ClapApp, Arg};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = ClapApp::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("base-url")
                .short("u")
                .long("base-url")
                .value_name("URL")
                .help("Expense API base URL for this run")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(base_url) = matches.value_of("base-url") {
        config.override_base_url(base_url)?;
    }

    let log = logger::init(config.log_level()?)?;
    App::start(config, log).await?;
    Ok(())
}
