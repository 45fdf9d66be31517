use super::form::RegistryForm;
use super::state::{WizardAction, WizardState};
use super::tabs::TabKey;
use crate::records::{AdminFormError, AdministratorDraft, CidrError, CidrPortal};
use crate::shared::logging::ConsoleLog;
use crate::validators::FormUpdate;
use chrono::Utc;
use chrono_tz::Tz;

/// One mounted wizard: tab bookkeeping plus the form data behind it.
#[derive(Debug, Clone)]
pub struct WizardSession {
    pub(crate) state: WizardState,
    pub form: RegistryForm,
    pub(crate) timezone: Tz,
    pub(crate) log: ConsoleLog,
    pub(crate) submitted: bool,
    pinned_now: Option<i64>,
}

impl WizardSession {
    pub fn new(action: WizardAction) -> Self {
        Self::with_form(action, RegistryForm::default())
    }

    pub fn with_form(action: WizardAction, form: RegistryForm) -> Self {
        Self {
            state: WizardState::new(action),
            form,
            timezone: Tz::UTC,
            log: ConsoleLog::disabled(),
            submitted: false,
            pinned_now: None,
        }
    }

    pub fn with_log(mut self, log: ConsoleLog) -> Self {
        self.log = log;
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Fixes the clock used for cron previews.
    pub fn pin_clock(&mut self, now: i64) {
        self.pinned_now = Some(now);
    }

    pub(crate) fn now(&self) -> i64 {
        self.pinned_now.unwrap_or_else(|| Utc::now().timestamp())
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn action(&self) -> WizardAction {
        self.state.action()
    }

    pub fn active_tab(&self) -> TabKey {
        self.state.active_tab()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn log(&self) -> &ConsoleLog {
        &self.log
    }

    pub fn set_tab_visible(&mut self, key: TabKey, visible: bool) {
        self.state.set_visible(key, visible);
    }

    /// Appends an administrator. Success clears the administrators tab so
    /// it has to be validated again.
    pub fn create_admin(&mut self, draft: &AdministratorDraft) -> Result<(), AdminFormError> {
        self.form.admins.create(draft)?;
        self.state.update(TabKey::Administrators, |tab| {
            tab.validated = false;
            tab.begin_validation = false;
            tab.errors.clear();
        });
        Ok(())
    }

    pub fn delete_admin(&mut self, email: &str) -> bool {
        let deleted = self.form.admins.delete(email);
        if deleted {
            self.state
                .update(TabKey::Administrators, |tab| tab.validated = false);
        }
        deleted
    }

    pub fn add_cidr(&mut self, portal: CidrPortal, raw: &str) -> Result<(), CidrError> {
        self.form.cidr.add(portal, raw)
    }

    pub fn remove_cidr(&mut self, portal: CidrPortal, raw: &str) -> bool {
        self.form.cidr.remove(portal, raw)
    }

    pub fn select_template(&mut self, template: &str) {
        self.form.template.select_template(template);
        self.state.update(TabKey::Template, |tab| tab.validated = false);
    }

    /// Marks key data as edited so an edit-mode key tab is validated again.
    pub fn mark_key_changed(&mut self) {
        self.form.key.changed = true;
        self.state.update(TabKey::Key, |tab| tab.validated = false);
    }

    pub(crate) fn apply(&mut self, update: FormUpdate) {
        match update {
            FormUpdate::ResourcesPreloaded(defaults) => {
                let skipped = self.form.resources.preload(&defaults);
                if !skipped.is_empty() {
                    self.log.warn(
                        "resources.preload_failed",
                        &format!("skipped unknown resource categories: {}", skipped.join(", ")),
                    );
                }
            }
            FormUpdate::BackupPreview(launches) => self.form.backup.next_launches = launches,
            FormUpdate::HardwareIniPreview(ini) => self.form.key.ini_preview = ini,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(email: &str) -> AdministratorDraft {
        AdministratorDraft {
            email: email.to_string(),
            first_name: "Olena".to_string(),
            last_name: "Koval".to_string(),
            temporary_password: "s3cret!".to_string(),
        }
    }

    #[test]
    fn creating_an_admin_resets_the_administrators_tab() {
        let mut session = WizardSession::new(WizardAction::Create);
        session.state.update(TabKey::Administrators, |tab| {
            tab.validated = true;
            tab.begin_validation = true;
        });

        session.create_admin(&draft("olena@example.org")).expect("create");
        let tab = session.state().tab(TabKey::Administrators);
        assert!(!tab.validated);
        assert!(!tab.begin_validation);
        assert!(session.form.admins.changed());
    }

    #[test]
    fn duplicate_admin_leaves_list_unchanged() {
        let mut session = WizardSession::new(WizardAction::Create);
        session.create_admin(&draft("olena@example.org")).expect("create");
        assert_eq!(
            session.create_admin(&draft("olena@example.org")),
            Err(AdminFormError::AlreadyExists)
        );
        assert_eq!(session.form.admins.records().len(), 1);
    }
}
