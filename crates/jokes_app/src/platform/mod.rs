mod app;
mod cli;
mod commands;
mod effects;
mod settings;
mod ui;

use clap::Parser;
use jokes_logging::jokes_warn;

use cli::Cli;

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (settings, load_error) = match settings::load(&cli.config) {
        Ok(settings) => (settings, None),
        Err(err) => (settings::AppSettings::default(), Some(err)),
    };

    jokes_logging::initialize(&settings.log.destination(), settings.log.level.filter());
    if let Some(err) = load_error {
        eprintln!("Warning: {err}; using default settings");
        jokes_warn!("{}; using default settings", err);
    }

    app::run(settings)
}
