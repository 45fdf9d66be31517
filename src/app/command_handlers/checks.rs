use super::{log_for, optional_settings, timezone_for};
use crate::backend::{HttpBackend, OfflineBackend, RegistryBackend};
use crate::cron::{format_fire_time, parse_cron_expression, PREVIEW_FIRE_TIMES};
use crate::shared::errors::ConsoleError;
use crate::shared::patterns::is_ipv4_cidr;
use crate::wizard::{TabKey, ValidationOutcome, WizardAction, WizardSession};
use chrono::Utc;

pub fn cmd_check_name(args: &[String]) -> Result<String, ConsoleError> {
    let usage = || ConsoleError::Usage("usage: check-name <name> [--edit]".to_string());
    let name = args.first().ok_or_else(usage)?;
    let action = match args.get(1).map(String::as_str) {
        None => WizardAction::Create,
        Some("--edit") => WizardAction::Edit,
        Some(_) => return Err(usage()),
    };

    let settings = optional_settings()?;
    let backend: Box<dyn RegistryBackend> = match (&settings, action) {
        (Some(settings), WizardAction::Create) => Box::new(HttpBackend::from_settings(settings)),
        _ => Box::new(OfflineBackend),
    };
    let mut session = WizardSession::new(action).with_log(log_for(settings.as_ref())?);
    session.form.general.registry_name = name.clone();

    match session.validate_tab(TabKey::General, backend.as_ref()) {
        ValidationOutcome::Valid => Ok(format!("name={name}\nvalid=true")),
        ValidationOutcome::Invalid(errors) => {
            let mut lines = vec![format!("name={name}"), "valid=false".to_string()];
            lines.extend(errors.iter().map(|flag| format!("error={}", flag.key())));
            Ok(lines.join("\n"))
        }
    }
}

pub fn cmd_check_cidr(args: &[String]) -> Result<String, ConsoleError> {
    let [cidr] = args else {
        return Err(ConsoleError::Usage("usage: check-cidr <cidr>".to_string()));
    };
    Ok(format!("cidr={cidr}\nvalid={}", is_ipv4_cidr(cidr)))
}

pub fn cmd_cron_preview(args: &[String]) -> Result<String, ConsoleError> {
    if args.is_empty() {
        return Err(ConsoleError::Usage(
            "usage: cron-preview <expr...>".to_string(),
        ));
    }
    let expression = args.join(" ");
    let parsed = parse_cron_expression(&expression).map_err(ConsoleError::Usage)?;
    let settings = optional_settings()?;
    let timezone = timezone_for(settings.as_ref())?;

    let mut lines = vec![
        format!("expression={expression}"),
        format!("timezone={}", timezone.name()),
    ];
    lines.extend(
        parsed
            .upcoming(Utc::now().timestamp(), PREVIEW_FIRE_TIMES, &timezone)
            .into_iter()
            .map(|ts| format!("next={}", format_fire_time(ts, &timezone))),
    );
    Ok(lines.join("\n"))
}
