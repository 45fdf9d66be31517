use crate::records::CidrPortal;
use crate::wizard::{
    AuthFlow, KeyDevice, MailServer, Portal, RegistryForm, WizardAction, MASKED_SECRET,
};
use serde_json::Value;
use std::collections::BTreeMap;

/// Hidden form fields posted with the registry form, by field name.
/// Structured values are JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    fields: BTreeMap<String, String>,
}

impl FormPayload {
    fn set(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(name, value)| (name.clone(), Value::String(value.clone())))
                .collect(),
        )
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        ""
    }
}

fn json_list<'a>(values: impl Iterator<Item = &'a str>) -> String {
    Value::Array(values.map(|value| Value::String(value.to_string())).collect()).to_string()
}

/// Flattens the wizard form into the field set the backend form handler
/// binds. DNS hosts follow the "untouched preloaded host means no change"
/// rule.
pub fn compose_payload(form: &RegistryForm, action: WizardAction) -> FormPayload {
    let mut payload = FormPayload::default();

    payload.set("name", form.general.registry_name.trim());
    payload.set("description", form.general.description.as_str());

    payload.set("admins", form.admins.to_wire());
    payload.set("admins-changed", flag(form.admins.changed()));

    if action == WizardAction::Create {
        payload.set("registry-git-template", form.template.template.as_str());
        payload.set("registry-git-branch", form.template.branch.as_str());
    }

    payload.set("smtp-server-type", form.mail.server.as_str());
    let mail_opts = match form.mail.server {
        MailServer::External => serde_json::to_string(&form.mail.external)
            .unwrap_or_else(|_| "{}".to_string()),
        MailServer::Platform => "{}".to_string(),
    };
    payload.set("mail-server-opts", mail_opts);

    let key = &form.key;
    if action == WizardAction::Create || key.changed {
        payload.set("key-device-type", key.device.as_str());
        match key.device {
            KeyDevice::File => {
                payload.set("sign-key-issuer", key.file.issuer.as_str());
                payload.set("sign-key-pwd", key.file.password.as_str());
            }
            KeyDevice::Hardware => {
                let hardware = &key.hardware;
                payload.set("remote-type", hardware.key_type.as_str());
                payload.set("remote-key-pwd", hardware.password.as_str());
                payload.set("remote-ca-name", hardware.ca_name.as_str());
                payload.set("remote-ca-host", hardware.ca_host.as_str());
                payload.set("remote-ca-port", hardware.ca_port.as_str());
                payload.set("remote-serial-number", hardware.serial_number.as_str());
                payload.set("remote-key-port", hardware.key_port.as_str());
                payload.set("remote-key-host", hardware.key_host.as_str());
                payload.set("remote-key-mask", hardware.key_mask.as_str());
                payload.set("remote-ini-config", key.ini_preview.as_str());
            }
        }
        let allowed = key.allowed_keys.records();
        payload.set(
            "allowed-keys-issuer[]",
            json_list(allowed.iter().map(|record| record.issuer.as_str())),
        );
        payload.set(
            "allowed-keys-serial[]",
            json_list(allowed.iter().map(|record| record.serial_number.as_str())),
        );
    }

    payload.set("resources", form.resources.to_wire());

    for portal in [Portal::Officer, Portal::Citizen] {
        let enabled = form
            .dns
            .portal(portal)
            .map(|state| state.edit_visible || !state.host.trim().is_empty())
            .unwrap_or(false);
        payload.set(&format!("{}-dns", portal.as_str()), form.dns.submitted_host(portal));
        payload.set(&format!("{}-dns-enabled", portal.as_str()), flag(enabled));
    }

    payload.set("citizen-cidr", form.cidr.to_wire(CidrPortal::Citizen));
    payload.set("officer-cidr", form.cidr.to_wire(CidrPortal::Officer));
    payload.set("admin-cidr", form.cidr.to_wire(CidrPortal::Admin));
    payload.set("cidr-changed", flag(form.cidr.changed()));

    let auth = &form.supplier_auth;
    payload.set("sup-auth-browser-flow", auth.auth_type.as_str());
    payload.set("sup-auth-url", auth.url.trim());
    match auth.auth_type {
        AuthFlow::DsoOfficer => {
            payload.set("sup-auth-widget-height", auth.widget_height.trim());
        }
        AuthFlow::IdGovUa => {
            payload.set("sup-auth-client-id", auth.client_id.trim());
            if auth.secret != MASKED_SECRET {
                payload.set("sup-auth-client-secret", auth.secret.as_str());
            }
        }
    }

    let backup = &form.backup;
    payload.set("backup-schedule-enabled", flag(backup.enabled));
    if backup.enabled {
        payload.set("cron-schedule", backup.cron_schedule.trim());
        payload.set("cron-schedule-days", backup.retention_days.trim());
    }

    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{EnvVar, ResourceCategory};

    #[test]
    fn create_payload_carries_template_and_file_key() {
        let mut form = RegistryForm::default();
        form.general.registry_name = " demo-registry ".to_string();
        form.template.template = "basic".to_string();
        form.template.branch = "master".to_string();
        form.key.file.issuer = "Test CA".to_string();

        let payload = compose_payload(&form, WizardAction::Create);
        assert_eq!(payload.get("name"), Some("demo-registry"));
        assert_eq!(payload.get("registry-git-branch"), Some("master"));
        assert_eq!(payload.get("key-device-type"), Some("file"));
        assert_eq!(payload.get("sign-key-issuer"), Some("Test CA"));
        assert_eq!(payload.get("remote-ca-name"), None);
        assert_eq!(payload.get("mail-server-opts"), Some("{}"));
        assert_eq!(payload.get("admin-cidr"), Some("[]"));
        assert_eq!(payload.get("allowed-keys-issuer[]"), Some(r#"[""]"#));
    }

    #[test]
    fn edit_payload_skips_unchanged_key_and_masked_secret() {
        let mut form = RegistryForm::default();
        form.supplier_auth.auth_type = AuthFlow::IdGovUa;
        form.supplier_auth.client_id = "client".to_string();
        form.supplier_auth.secret = MASKED_SECRET.to_string();

        let payload = compose_payload(&form, WizardAction::Edit);
        assert_eq!(payload.get("key-device-type"), None);
        assert_eq!(payload.get("registry-git-template"), None);
        assert_eq!(payload.get("sup-auth-client-id"), Some("client"));
        assert_eq!(payload.get("sup-auth-client-secret"), None);
    }

    #[test]
    fn untouched_preloaded_dns_host_is_blanked() {
        let mut form = RegistryForm::default();
        let officer = form.dns.portal_mut(Portal::Officer);
        officer.host = "officer.example.org".to_string();
        officer.preloaded = Some("officer.example.org".to_string());
        officer.edit_visible = true;
        form.dns.portal_mut(Portal::Citizen).host = "citizen.example.org".to_string();

        let payload = compose_payload(&form, WizardAction::Edit);
        assert_eq!(payload.get("officer-dns"), Some(""));
        assert_eq!(payload.get("officer-dns-enabled"), Some("on"));
        assert_eq!(payload.get("citizen-dns"), Some("citizen.example.org"));
    }

    #[test]
    fn resources_are_encoded_with_env_var_maps() {
        let mut form = RegistryForm::default();
        form.resources.add_category(ResourceCategory::Kong);
        if let Some(kong) = form.resources.get_mut(ResourceCategory::Kong) {
            kong.env_vars = vec![EnvVar::new("LOG_LEVEL", "debug")];
        }
        let payload = compose_payload(&form, WizardAction::Create);
        let resources: Value =
            serde_json::from_str(payload.get("resources").expect("resources")).expect("json");
        assert_eq!(resources["kong"]["container"]["envVars"]["LOG_LEVEL"], "debug");
    }
}
