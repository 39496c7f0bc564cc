//! Main app runner for a single hook invocation

use std::ffi::OsString;
use std::process::ExitCode;

use chrono::Local;
use clap::error::ErrorKind;
use clap::Parser;
use tracing::{debug, info_span, Instrument};

use crate::application::ports::ConfigStore;
use crate::application::{NotifyInput, NotifyOutcome, NotifyUseCase};
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::event::EventType;
use crate::infrastructure::logging::init_debug_log;
use crate::infrastructure::{
    AppPaths, CommandPlayer, FileCooldownStore, FsSoundResolver, JsonConfigStore,
};

use super::args::{version_line, Cli};
use super::presenter::Presenter;
use super::stdin::drain_stdin;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_INTERNAL_ERROR: u8 = 2;

/// Parse arguments and run one notification
pub async fn run<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let presenter = Presenter::new();

    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                | ErrorKind::DisplayVersion => ExitCode::from(EXIT_SUCCESS),
                _ => ExitCode::from(EXIT_ERROR),
            };
        }
    };

    if cli.version {
        presenter.output(&version_line());
        return ExitCode::from(EXIT_SUCCESS);
    }

    let event = match cli.event.parse::<EventType>() {
        Ok(event) => event,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    drain_stdin();

    let paths = AppPaths::from_env();
    run_notify(event, &paths, &presenter).await
}

/// Run the notification pipeline for a validated event
pub async fn run_notify(event: EventType, paths: &AppPaths, presenter: &Presenter) -> ExitCode {
    let (config, source, config_error) = load_config(paths, presenter).await;

    if config.debug {
        if let Some(log_file) = paths.log_file() {
            init_debug_log(&log_file);
        }
    }

    let span = info_span!("ccbell", pid = std::process::id());
    async move {
        debug!(%event, version = env!("CARGO_PKG_VERSION"), config = %source, "=== ccbell triggered ===");
        if let Some(e) = config_error {
            debug!(error = %e, "config load error, using defaults");
        }
        match paths.plugin_root {
            Some(ref root) => debug!(plugin_root = %root.display(), "plugin root"),
            None => debug!("plugin root not found, bundled sounds unavailable"),
        }

        let cooldowns = paths
            .state_file()
            .map(FileCooldownStore::with_path)
            .unwrap_or_else(FileCooldownStore::disabled);
        let resolver = FsSoundResolver::new(paths.plugin_root.clone(), paths.packs_dir());
        let use_case = NotifyUseCase::new(cooldowns, resolver, CommandPlayer::new());

        let now = Local::now().time();
        debug!(status = config.quiet_hours_status(now), "quiet hours");

        let input = NotifyInput { event, now };

        match use_case.execute(&config, input).await {
            Ok(NotifyOutcome::Played { path, .. }) => {
                debug!(path = %path.display(), "=== ccbell completed ===");
                ExitCode::from(EXIT_SUCCESS)
            }
            Ok(NotifyOutcome::Suppressed(reason)) => {
                debug!(%reason, "notification suppressed");
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                debug!(error = %e, "notification failed");
                presenter.error(&e.to_string());
                ExitCode::from(EXIT_ERROR)
            }
        }
    }
    .instrument(span)
    .await
}

/// Ensure a config file exists, then load it.
///
/// A broken config is reported to the user and replaced by defaults for
/// this run.
async fn load_config(
    paths: &AppPaths,
    presenter: &Presenter,
) -> (AppConfig, String, Option<ConfigError>) {
    let Some(config_file) = paths.config_file() else {
        return (AppConfig::defaults(), "(default - no home directory)".to_string(), None);
    };

    let store = JsonConfigStore::with_path(config_file);

    if let Err(e) = store.ensure_exists().await {
        presenter.warn(&format!("could not create config: {e}"));
    }

    match store.load().await {
        Ok(loaded) => {
            let source = loaded
                .source
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(default)".to_string());
            (loaded.config, source, None)
        }
        Err(e) => {
            presenter.warn(&format!("config error, using defaults: {e}"));
            (
                AppConfig::defaults(),
                "(default - config load failed)".to_string(),
                Some(e),
            )
        }
    }
}
