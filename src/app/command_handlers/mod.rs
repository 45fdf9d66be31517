use crate::app::cli::{help_text, parse_cli_verb, CliVerb};
use crate::config::{load_settings, ConfigError, Settings};
use crate::shared::errors::ConsoleError;
use crate::shared::logging::ConsoleLog;
use chrono_tz::Tz;

pub mod checks;
pub mod merge_requests;
pub mod wizard;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }

    let result = match parse_cli_verb(args[0].as_str()) {
        CliVerb::CheckName => checks::cmd_check_name(&args[1..]),
        CliVerb::CheckCidr => checks::cmd_check_cidr(&args[1..]),
        CliVerb::CronPreview => checks::cmd_cron_preview(&args[1..]),
        CliVerb::Wizard => wizard::cmd_wizard(&args[1..]),
        CliVerb::MergeRequest => merge_requests::cmd_merge_request(&args[1..]),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(ConsoleError::Usage(format!(
            "unknown command `{}`",
            args[0]
        ))),
    };
    result.map_err(|err| err.to_string())
}

/// Settings when a settings file exists. A missing file is not an error for
/// commands that can run offline.
pub(crate) fn optional_settings() -> Result<Option<Settings>, ConsoleError> {
    match load_settings() {
        Ok(settings) => Ok(Some(settings)),
        Err(ConfigError::Read { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

pub(crate) fn timezone_for(settings: Option<&Settings>) -> Result<Tz, ConsoleError> {
    match settings {
        Some(settings) => Ok(settings.timezone()?),
        None => Ok(Tz::UTC),
    }
}

pub(crate) fn log_for(settings: Option<&Settings>) -> Result<ConsoleLog, ConsoleError> {
    match settings {
        Some(settings) => Ok(ConsoleLog::at_state_root(&settings.resolve_state_root()?)),
        None => Ok(ConsoleLog::disabled()),
    }
}
