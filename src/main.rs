mod action;
mod app;
mod cli;
mod components;
mod config;
mod error;
mod logging;
mod pair;

use color_eyre::eyre::{eyre, Result};

use cli::Cli;
use components::voting::VotingProps;
use config::{ConfigManager, Theme};
use pair::SharedPair;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse_args();

    let config_manager = match &cli.config {
        Some(dir) => ConfigManager::with_dir(dir),
        None => ConfigManager::new()?,
    };

    if cli.init_config {
        config_manager.write_default_configs()?;
        println!("Wrote default configuration to {}", config_manager.config_dir().display());
        return Ok(());
    }

    let general = &config_manager.app_config().general;
    let log_level = cli.log_level.as_deref().unwrap_or(&general.log_level);
    let log_path = match cli.log_file.as_ref().or(general.log_file.as_ref()) {
        Some(path) => path.clone(),
        None => logging::default_log_path()?,
    };
    let _log_guard = logging::init(log_level, &log_path)?;

    let theme = match &cli.theme {
        Some(name) => Theme::by_name(name).ok_or_else(|| eyre!("Unknown theme: {}", name))?,
        None => config_manager.theme().clone(),
    };

    let props = initial_props(&cli, &config_manager);

    let mut app = app::App::new(props, theme)?;
    app.run()?;

    Ok(())
}

/// CLI flags override the `[ballot]` section of config.toml field by field.
///
/// Pairs are held as [`SharedPair`] so props re-supplied by the host share a
/// root with the previous ones.
fn initial_props(cli: &Cli, config_manager: &ConfigManager) -> VotingProps {
    let ballot = &config_manager.app_config().ballot;

    let mut props = VotingProps::new();
    props.pair = match cli.pair.as_deref() {
        Some([first, second]) => Some(SharedPair::of(first.as_str(), second.as_str()).into()),
        _ => ballot.pair_input(),
    };
    if let Some(candidate) = cli.has_voted.as_ref().or(ballot.has_voted.as_ref()) {
        props = props.with_has_voted(candidate.as_str());
    }
    if let Some(winner) = cli.winner.as_ref().or(ballot.winner.as_ref()) {
        props = props.with_winner(winner.as_str());
    }
    props
}
