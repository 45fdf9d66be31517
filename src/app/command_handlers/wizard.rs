use super::{log_for, optional_settings, timezone_for};
use crate::app::cli::{parse_wizard_steps, WizardStep};
use crate::backend::{HttpBackend, OfflineBackend, RegistryBackend};
use crate::bootstrap::Bootstrap;
use crate::shared::errors::ConsoleError;
use crate::wizard::{NavEffect, SubmitOutcome, WizardSession};
use std::path::Path;

pub fn cmd_wizard(args: &[String]) -> Result<String, ConsoleError> {
    let [path, steps] = args else {
        return Err(ConsoleError::Usage(
            "usage: wizard <bootstrap.json> <next,prev,select:<tab>,submit>".to_string(),
        ));
    };
    let steps = parse_wizard_steps(steps).map_err(ConsoleError::Usage)?;
    let bootstrap = Bootstrap::from_path(Path::new(path))?;

    let settings = optional_settings()?;
    let backend: Box<dyn RegistryBackend> = match &settings {
        Some(settings) => Box::new(HttpBackend::from_settings(settings)),
        None => Box::new(OfflineBackend),
    };
    let mut session = bootstrap
        .mount(log_for(settings.as_ref())?)?
        .with_timezone(timezone_for(settings.as_ref())?);

    let mut lines = Vec::new();
    for step in steps {
        lines.push(run_step(&mut session, step, backend.as_ref()));
    }
    lines.push(format!("active_tab={}", session.active_tab()));
    lines.extend(render_tabs(&session));
    Ok(lines.join("\n"))
}

fn run_step(session: &mut WizardSession, step: WizardStep, backend: &dyn RegistryBackend) -> String {
    let effect = match step {
        WizardStep::Next => session.advance(backend),
        WizardStep::Prev => session.retreat(backend),
        WizardStep::Select(target) => session.select_tab(target, backend),
        WizardStep::Submit => {
            return match session.submit(backend) {
                SubmitOutcome::Ready(payload) => {
                    format!("submit=ready\npayload={}", payload.to_json())
                }
                SubmitOutcome::Blocked { tab, errors } => {
                    let keys = errors.iter().map(|flag| flag.key()).collect::<Vec<_>>();
                    format!("submit=blocked tab={tab} errors={}", keys.join(","))
                }
                SubmitOutcome::AlreadySubmitted => "submit=already_submitted".to_string(),
            };
        }
    };
    describe_effect(&effect)
}

fn describe_effect(effect: &NavEffect) -> String {
    match effect {
        NavEffect::Moved { from, to } => format!("moved {from} -> {to}"),
        NavEffect::Blocked { tab, errors } => {
            let keys = errors.iter().map(|flag| flag.key()).collect::<Vec<_>>();
            format!("blocked tab={tab} errors={}", keys.join(","))
        }
        NavEffect::Refused { target, missing } => {
            format!("refused target={target} missing={missing}")
        }
        NavEffect::Hidden(target) => format!("hidden target={target}"),
        NavEffect::NoAdjacentTab => "no adjacent tab".to_string(),
    }
}

fn render_tabs(session: &WizardSession) -> Vec<String> {
    session
        .state()
        .tabs()
        .filter(|(_, tab)| tab.visible)
        .map(|(key, tab)| {
            format!(
                "tab={key} disabled={} validated={} errors={}",
                tab.disabled,
                tab.validated,
                tab.errors.len()
            )
        })
        .collect()
}
