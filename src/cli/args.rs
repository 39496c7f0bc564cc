//! CLI argument definitions using Clap

use clap::Parser;

/// Event used when none is given
pub const DEFAULT_EVENT: &str = "stop";

const AFTER_HELP: &str = "\
EVENT TYPES:
    stop              Claude finished responding
    permission_prompt Claude needs your permission
    idle_prompt       Claude is waiting for input
    subagent          A background agent completed

CONFIGURATION:
    Global config:  ~/.claude/ccbell.config.json

SOUND FORMATS:
    bundled:stop              Bundled with plugin
    custom:/path/to.mp3       Custom audio file
    pack:pack_id:sound.wav    Sound from an installed pack

ENVIRONMENT:
    CLAUDE_PLUGIN_ROOT   Plugin installation directory
    CCBELL_LOG           Debug log filter (when debug is enabled)";

/// ccbell - Sound notifications for Claude Code
#[derive(Parser, Debug)]
#[command(name = "ccbell")]
#[command(about = "Sound notifications for Claude Code")]
#[command(long_about = None)]
#[command(disable_version_flag = true)]
#[command(after_help = AFTER_HELP)]
pub struct Cli {
    /// Hook event that fired
    #[arg(value_name = "EVENT_TYPE", default_value = DEFAULT_EVENT)]
    pub event: String,

    /// Show version information
    #[arg(short = 'v', long)]
    pub version: bool,
}

/// Version line printed by `--version`
pub fn version_line() -> String {
    format!("ccbell {}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["ccbell"]);
        assert_eq!(cli.event, "stop");
        assert!(!cli.version);
    }

    #[test]
    fn cli_parses_event() {
        let cli = Cli::parse_from(["ccbell", "permission_prompt"]);
        assert_eq!(cli.event, "permission_prompt");
    }

    #[test]
    fn cli_accepts_unknown_event_for_later_validation() {
        let cli = Cli::parse_from(["ccbell", "launch_missiles"]);
        assert_eq!(cli.event, "launch_missiles");
    }

    #[test]
    fn cli_parses_version_flags() {
        assert!(Cli::parse_from(["ccbell", "-v"]).version);
        assert!(Cli::parse_from(["ccbell", "--version"]).version);
    }

    #[test]
    fn help_is_a_display_error() {
        let err = Cli::try_parse_from(["ccbell", "-h"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn version_line_has_package_version() {
        assert!(version_line().contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
