//! One validator per wizard tab. Every validator settles synchronously as a
//! `ValidationOutcome`; side effects on the form come back as `FormUpdate`s
//! for the session to apply.

mod administrators;
mod backup;
mod dns;
mod external_system;
mod general;
mod key;
mod mail;
mod supplier_auth;
mod template;

pub use dns::{check_pem_queue, PemCheck, PemQueueReport};
pub use external_system::check_external_system_name;
pub use key::{render_hardware_ini, HARDWARE_INI_TEMPLATE};

use crate::backend::RegistryBackend;
use crate::shared::logging::ConsoleLog;
use crate::wizard::{RegistryForm, TabKey, ValidationOutcome, WizardAction};
use chrono_tz::Tz;
use serde_json::{Map, Value};

/// Read-only view a validator gets of the wizard.
pub struct ValidationContext<'a> {
    pub action: WizardAction,
    pub form: &'a RegistryForm,
    pub backend: &'a dyn RegistryBackend,
    pub log: &'a ConsoleLog,
    pub now: i64,
    pub timezone: Tz,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormUpdate {
    ResourcesPreloaded(Map<String, Value>),
    BackupPreview(Vec<String>),
    HardwareIniPreview(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabValidation {
    pub outcome: ValidationOutcome,
    pub updates: Vec<FormUpdate>,
}

impl TabValidation {
    pub(crate) fn settled(outcome: ValidationOutcome) -> Self {
        Self {
            outcome,
            updates: Vec::new(),
        }
    }

    pub(crate) fn with_update(mut self, update: FormUpdate) -> Self {
        self.updates.push(update);
        self
    }
}

pub fn validate_tab(key: TabKey, ctx: &ValidationContext<'_>) -> TabValidation {
    match key {
        TabKey::General => general::validate(ctx),
        TabKey::Administrators => administrators::validate(ctx),
        TabKey::Template => template::validate(ctx),
        TabKey::Mail => mail::validate(ctx),
        TabKey::Key => key::validate(ctx),
        TabKey::Dns => dns::validate(ctx),
        TabKey::SupplierAuthentication => supplier_auth::validate(ctx),
        TabKey::BackupSchedule => backup::validate(ctx),
        TabKey::Resources | TabKey::Cidr | TabKey::Confirmation => {
            TabValidation::settled(ValidationOutcome::Valid)
        }
    }
}
