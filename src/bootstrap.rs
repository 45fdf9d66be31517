//! Server-embedded data a wizard is mounted from.

use crate::records::{KeycloakHost, KeycloakHostEditor};
use crate::shared::logging::ConsoleLog;
use crate::wizard::{
    AuthFlow, MailServer, RegistryForm, SmtpOptions, WizardAction, WizardSession,
    DEFAULT_WIDGET_HEIGHT, DSO_DEFAULT_URL, DNS_PORTALS, MASKED_SECRET,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("failed to read bootstrap file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse bootstrap data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to parse bootstrap field `{field}`: {source}")]
    Field {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid wizard action: {0}")]
    Action(String),
    #[error("invalid smtp server type: {0}")]
    MailServer(String),
    #[error("edit wizard requires registry data with a name")]
    MissingRegistryName,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryData {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistryValues {
    pub keycloak: KeycloakValues,
    pub sign_widget: SignWidgetValues,
    pub global: GlobalValues,
    pub portals: BTreeMap<String, PortalValues>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeycloakValues {
    pub realms: RealmValues,
    pub auth_flows: AuthFlowValues,
    pub identity_providers: IdentityProviderValues,
    pub custom_hosts: Option<Vec<KeycloakHost>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RealmValues {
    pub officer_portal: BrowserFlowValues,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowserFlowValues {
    pub browser_flow: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthFlowValues {
    pub officer_auth_flow: OfficerAuthFlowValues,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfficerAuthFlowValues {
    pub widget_height: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentityProviderValues {
    pub id_gov_ua: IdGovUaValues,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdGovUaValues {
    pub url: String,
    pub client_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignWidgetValues {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalValues {
    pub registry_backup: BackupValues,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackupValues {
    pub enabled: bool,
    pub schedule: String,
    pub expires_in_days: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortalValues {
    pub custom_dns: Option<CustomDnsValues>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomDnsValues {
    pub enabled: bool,
    pub host: String,
}

/// JSON blobs embedded in the page. Admins, SMTP and CIDR configs arrive as
/// JSON text, the way the page carries them in hidden inputs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bootstrap {
    pub wizard_action: String,
    pub registry_data: Option<RegistryData>,
    pub registry_values: Option<RegistryValues>,
    pub admins: String,
    pub smtp_server_type: String,
    pub smtp_edit_config: String,
    pub cidr_edit_config: String,
    pub resources_edit_config: Option<Map<String, Value>>,
    pub project_branches: BTreeMap<String, Vec<String>>,
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    }
}

impl Bootstrap {
    pub fn from_json_str(raw: &str) -> Result<Self, BootstrapError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, BootstrapError> {
        let raw = fs::read_to_string(path).map_err(|source| BootstrapError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn action(&self) -> Result<WizardAction, BootstrapError> {
        WizardAction::parse(&self.wizard_action).map_err(BootstrapError::Action)
    }

    pub fn keycloak_hosts(&self) -> KeycloakHostEditor {
        let hosts = self
            .registry_values
            .as_ref()
            .and_then(|values| values.keycloak.custom_hosts.clone())
            .unwrap_or_default();
        KeycloakHostEditor::from_hosts(hosts)
    }

    /// Builds the wizard session this page describes.
    pub fn mount(&self, log: ConsoleLog) -> Result<WizardSession, BootstrapError> {
        let action = self.action()?;
        let mut form = RegistryForm::default();
        let mut notes = Vec::new();

        if action == WizardAction::Edit {
            let name = self
                .registry_data
                .as_ref()
                .map(|data| data.name.trim())
                .filter(|name| !name.is_empty())
                .ok_or(BootstrapError::MissingRegistryName)?;
            form.general.registry_name = name.to_string();
        }

        self.load_mail(&mut form)?;

        form.admins
            .load_json(&self.admins)
            .map_err(|source| BootstrapError::Field {
                field: "admins",
                source,
            })?;
        form.cidr
            .load_json(&self.cidr_edit_config)
            .map_err(|source| BootstrapError::Field {
                field: "cidrEditConfig",
                source,
            })?;
        let starts_changed = action == WizardAction::Create;
        if self.admins.trim().is_empty() {
            form.admins.mark_changed(starts_changed);
        }
        form.cidr.mark_changed(starts_changed);

        if let Some(resources) = &self.resources_edit_config {
            let skipped = form.resources.preload(resources);
            if !skipped.is_empty() {
                notes.push(format!(
                    "skipped unknown resource categories: {}",
                    skipped.join(", ")
                ));
            }
        }

        form.template.project_branches = self.project_branches.clone();

        if let Some(values) = &self.registry_values {
            if let Some(note) = load_supplier_auth(&mut form, values) {
                notes.push(note);
            }
            load_backup(&mut form, values);
            load_dns(&mut form, values);
        }

        let session = WizardSession::with_form(action, form).with_log(log);
        for note in notes {
            session.log().warn("bootstrap.values", &note);
        }
        session.log().info(
            "bootstrap.mounted",
            &format!("mounted {} wizard", action.as_str()),
        );
        Ok(session)
    }

    fn load_mail(&self, form: &mut RegistryForm) -> Result<(), BootstrapError> {
        form.mail.server = MailServer::parse(&self.smtp_server_type).map_err(BootstrapError::MailServer)?;
        if self.smtp_edit_config.trim().is_empty() {
            return Ok(());
        }
        let config: Map<String, Value> =
            serde_json::from_str(&self.smtp_edit_config).map_err(|source| {
                BootstrapError::Field {
                    field: "smtpEditConfig",
                    source,
                }
            })?;
        if config.get("type").and_then(Value::as_str) != Some("external") {
            form.mail.server = MailServer::Platform;
            return Ok(());
        }
        let text = |key: &str| config.get(key).map(scalar_text).unwrap_or_default();
        form.mail.server = MailServer::External;
        form.mail.external = SmtpOptions {
            host: text("host"),
            port: text("port"),
            address: text("address"),
            password: text("password"),
        };
        Ok(())
    }
}

fn load_supplier_auth(form: &mut RegistryForm, values: &RegistryValues) -> Option<String> {
    let auth = &mut form.supplier_auth;
    let mut note = None;
    let flow = values.keycloak.realms.officer_portal.browser_flow.trim();
    if !flow.is_empty() {
        match AuthFlow::parse(flow) {
            Ok(parsed) => auth.auth_type = parsed,
            Err(err) => note = Some(err),
        }
    }

    match auth.auth_type {
        AuthFlow::DsoOfficer => {
            let height = values.keycloak.auth_flows.officer_auth_flow.widget_height;
            auth.widget_height = if height == 0 {
                DEFAULT_WIDGET_HEIGHT.to_string()
            } else {
                height.to_string()
            };
            auth.url = if values.sign_widget.url.is_empty() {
                DSO_DEFAULT_URL.to_string()
            } else {
                values.sign_widget.url.clone()
            };
        }
        AuthFlow::IdGovUa => {
            let provider = &values.keycloak.identity_providers.id_gov_ua;
            auth.url = provider.url.clone();
            auth.client_id = provider.client_id.clone();
            if !provider.client_id.is_empty() {
                auth.secret = MASKED_SECRET.to_string();
            }
        }
    }
    note
}

fn load_backup(form: &mut RegistryForm, values: &RegistryValues) {
    let backup = &values.global.registry_backup;
    form.backup.enabled = backup.enabled;
    form.backup.cron_schedule = backup.schedule.clone();
    form.backup.retention_days = scalar_text(&backup.expires_in_days);
}

fn load_dns(form: &mut RegistryForm, values: &RegistryValues) {
    for portal in DNS_PORTALS {
        let Some(custom) = values
            .portals
            .get(portal.as_str())
            .and_then(|entry| entry.custom_dns.as_ref())
        else {
            continue;
        };
        let state = form.dns.portal_mut(portal);
        state.edit_visible = custom.enabled;
        state.host = custom.host.clone();
        state.preloaded = Some(custom.host.clone());
    }
}

