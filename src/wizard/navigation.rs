use super::errors::{ErrorSet, ValidationOutcome};
use super::session::WizardSession;
use super::state::WizardAction;
use super::tabs::TabKey;
use crate::backend::RegistryBackend;
use crate::submission::{compose_payload, FormPayload};
use crate::validators::{validate_tab, ValidationContext};

/// What a navigation request did to the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEffect {
    Moved { from: TabKey, to: TabKey },
    /// The tab being left failed validation; its flags are on the tab.
    Blocked { tab: TabKey, errors: ErrorSet },
    /// Create mode only: an earlier tab still needs validating.
    Refused { target: TabKey, missing: TabKey },
    Hidden(TabKey),
    NoAdjacentTab,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ready(FormPayload),
    Blocked { tab: TabKey, errors: ErrorSet },
    AlreadySubmitted,
}

impl WizardSession {
    /// Runs one tab's validator and records the result on that tab.
    pub fn validate_tab(&mut self, key: TabKey, backend: &dyn RegistryBackend) -> ValidationOutcome {
        self.state.update(key, |tab| tab.begin_attempt());

        let validation = {
            let ctx = ValidationContext {
                action: self.state.action(),
                form: &self.form,
                backend,
                log: &self.log,
                now: self.now(),
                timezone: self.timezone,
            };
            validate_tab(key, &ctx)
        };
        for update in validation.updates {
            self.apply(update);
        }

        let outcome = validation.outcome;
        self.state
            .update(key, |tab| tab.finish_attempt(outcome.errors()));
        if let Some(errors) = outcome.errors() {
            let keys = errors.iter().map(|flag| flag.key()).collect::<Vec<_>>();
            self.log.info(
                "validator.rejected",
                &format!("tab `{key}` rejected: {}", keys.join(", ")),
            );
        }
        outcome
    }

    /// Validates the active tab, then moves to the next visible tab and
    /// makes it reachable.
    pub fn advance(&mut self, backend: &dyn RegistryBackend) -> NavEffect {
        let from = self.state.active_tab();
        if let ValidationOutcome::Invalid(errors) = self.validate_tab(from, backend) {
            return NavEffect::Blocked { tab: from, errors };
        }
        let Some(to) = self.state.next_visible(from) else {
            return NavEffect::NoAdjacentTab;
        };
        self.state.activate(to);
        self.log
            .info("wizard.advance", &format!("moved from `{from}` to `{to}`"));
        NavEffect::Moved { from, to }
    }

    /// Moves to the previous visible tab. Create mode validates the tab
    /// being left first; edit mode does not.
    pub fn retreat(&mut self, backend: &dyn RegistryBackend) -> NavEffect {
        let from = self.state.active_tab();
        let Some(to) = self.state.previous_visible(from) else {
            return NavEffect::NoAdjacentTab;
        };
        if self.state.action() == WizardAction::Create {
            if let ValidationOutcome::Invalid(errors) = self.validate_tab(from, backend) {
                return NavEffect::Blocked { tab: from, errors };
            }
        }
        self.state.activate(to);
        self.log
            .info("wizard.retreat", &format!("moved from `{from}` to `{to}`"));
        NavEffect::Moved { from, to }
    }

    /// Jumps to `target` after validating the active tab. In create mode
    /// every visible tab before `target` must already be validated.
    pub fn select_tab(&mut self, target: TabKey, backend: &dyn RegistryBackend) -> NavEffect {
        if !self.state.tab(target).visible {
            return NavEffect::Hidden(target);
        }
        let from = self.state.active_tab();
        if let ValidationOutcome::Invalid(errors) = self.validate_tab(from, backend) {
            return NavEffect::Blocked { tab: from, errors };
        }
        if self.state.action() == WizardAction::Create {
            if let Some(missing) = self.state.first_unvalidated_before(target) {
                self.log.info(
                    "wizard.select",
                    &format!("refused `{target}`: `{missing}` is not validated"),
                );
                return NavEffect::Refused { target, missing };
            }
        }
        self.state.activate(target);
        self.log
            .info("wizard.select", &format!("moved from `{from}` to `{target}`"));
        NavEffect::Moved { from, to: target }
    }

    /// Validates the active tab and composes the submission payload. A
    /// session submits at most once.
    pub fn submit(&mut self, backend: &dyn RegistryBackend) -> SubmitOutcome {
        if self.submitted {
            self.log
                .warn("wizard.submit", "ignored repeated submit of the registry form");
            return SubmitOutcome::AlreadySubmitted;
        }
        let tab = self.state.active_tab();
        if let ValidationOutcome::Invalid(errors) = self.validate_tab(tab, backend) {
            return SubmitOutcome::Blocked { tab, errors };
        }

        let payload = compose_payload(&self.form, self.state.action());
        self.submitted = true;
        self.log.info(
            "wizard.submit",
            &format!(
                "composed {} payload with {} fields",
                self.state.action().as_str(),
                payload.len()
            ),
        );
        SubmitOutcome::Ready(payload)
    }
}
