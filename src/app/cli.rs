use crate::wizard::TabKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    CheckName,
    CheckCidr,
    CronPreview,
    Wizard,
    MergeRequest,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "check-name" => CliVerb::CheckName,
        "check-cidr" => CliVerb::CheckCidr,
        "cron-preview" => CliVerb::CronPreview,
        "wizard" => CliVerb::Wizard,
        "merge-request" => CliVerb::MergeRequest,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

/// One step of a scripted wizard run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Next,
    Prev,
    Select(TabKey),
    Submit,
}

pub fn parse_wizard_steps(raw: &str) -> Result<Vec<WizardStep>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(|step| match step {
            "next" => Ok(WizardStep::Next),
            "prev" => Ok(WizardStep::Prev),
            "submit" => Ok(WizardStep::Submit),
            other => match other.strip_prefix("select:") {
                Some(tab) => TabKey::parse(tab).map(WizardStep::Select),
                None => Err(format!(
                    "unknown wizard step `{other}`; expected next|prev|select:<tab>|submit"
                )),
            },
        })
        .collect()
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  check-name <name> [--edit]           Validate a registry name (create mode asks the backend)"
            .to_string(),
        "  check-cidr <cidr>                    Validate an IPv4 CIDR entry".to_string(),
        "  cron-preview <expr...>               Show the next backup launches for a cron expression"
            .to_string(),
        "  wizard <bootstrap.json> <steps>      Replay next,prev,select:<tab>,submit over a wizard"
            .to_string(),
        "  merge-request <mr.json>              Show the derived name, actions and status"
            .to_string(),
        "  help                                 Show this help".to_string(),
    ]
}

pub fn help_text() -> String {
    cli_help_lines().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wizard_steps() {
        assert_eq!(
            parse_wizard_steps("next, select:dns,prev,submit"),
            Ok(vec![
                WizardStep::Next,
                WizardStep::Select(TabKey::Dns),
                WizardStep::Prev,
                WizardStep::Submit,
            ])
        );
        assert!(parse_wizard_steps("jump").is_err());
        assert!(parse_wizard_steps("select:nowhere").is_err());
    }

    #[test]
    fn unknown_verbs_are_reported() {
        assert_eq!(parse_cli_verb("cron-preview"), CliVerb::CronPreview);
        assert_eq!(parse_cli_verb("deploy"), CliVerb::Unknown);
    }
}
