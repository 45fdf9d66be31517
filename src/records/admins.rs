use crate::shared::patterns::is_email;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdministratorRecord {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, rename = "tmpPassword")]
    pub temporary_password: String,
}

/// Contents of the "add administrator" popup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdministratorDraft {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub temporary_password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AdminFormError {
    #[error("every administrator field is required")]
    Required,
    #[error("administrator email has an invalid format")]
    EmailFormat,
    #[error("an administrator with this email already exists")]
    AlreadyExists,
}

impl AdminFormError {
    pub fn flag_key(self) -> &'static str {
        match self {
            Self::Required => "requiredError",
            Self::EmailFormat => "emailFormatError",
            Self::AlreadyExists => "adminExistsError",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdministratorList {
    records: Vec<AdministratorRecord>,
    changed: bool,
    loaded: bool,
}

impl AdministratorList {
    /// Loads the server-provided list once; later calls are ignored.
    pub fn load_json(&mut self, raw: &str) -> Result<(), serde_json::Error> {
        if self.loaded || raw.trim().is_empty() {
            return Ok(());
        }
        let records: Option<Vec<AdministratorRecord>> = serde_json::from_str(raw)?;
        self.records = records.unwrap_or_default();
        self.loaded = true;
        self.changed = false;
        Ok(())
    }

    pub fn create(&mut self, draft: &AdministratorDraft) -> Result<(), AdminFormError> {
        let fields = [
            draft.email.as_str(),
            draft.first_name.as_str(),
            draft.last_name.as_str(),
            draft.temporary_password.as_str(),
        ];
        if fields.iter().any(|value| value.is_empty()) {
            return Err(AdminFormError::Required);
        }
        if !is_email(&draft.email) {
            return Err(AdminFormError::EmailFormat);
        }
        let email = draft.email.trim();
        if self.records.iter().any(|record| record.email.trim() == email) {
            return Err(AdminFormError::AlreadyExists);
        }

        self.records.push(AdministratorRecord {
            email: draft.email.clone(),
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            temporary_password: draft.temporary_password.clone(),
        });
        self.changed = true;
        Ok(())
    }

    pub fn delete(&mut self, email: &str) -> bool {
        let Some(index) = self.records.iter().position(|record| record.email == email) else {
            return false;
        };
        self.records.remove(index);
        self.changed = true;
        true
    }

    pub fn records(&self) -> &[AdministratorRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn mark_changed(&mut self, changed: bool) {
        self.changed = changed;
    }

    pub fn to_wire(&self) -> String {
        serde_json::to_string(&self.records).unwrap_or_else(|_| "[]".to_string())
    }
}
