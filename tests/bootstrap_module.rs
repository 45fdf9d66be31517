use registry_console::bootstrap::{Bootstrap, BootstrapError};
use registry_console::records::{CidrPortal, ResourceCategory};
use registry_console::shared::logging::ConsoleLog;
use registry_console::wizard::{AuthFlow, MailServer, Portal, TabKey, WizardAction, MASKED_SECRET};
use std::fs;

const EDIT_PAGE: &str = r#"{
  "wizardAction": "edit",
  "registryData": {"name": "demo-registry"},
  "admins": "[{\"email\":\"admin@example.org\",\"firstName\":\"Iryna\",\"lastName\":\"Shevchenko\",\"tmpPassword\":\"\"}]",
  "smtpEditConfig": "{\"type\":\"external\",\"host\":\"smtp.example.org\",\"port\":465,\"address\":\"noreply@example.org\",\"password\":\"pw\"}",
  "cidrEditConfig": "{\"citizen\":[\"10.0.0.0/8\"],\"officer\":[],\"admin\":null}",
  "resourcesEditConfig": {"kong": {"container": {"envVars": {"KONG_LOG_LEVEL": "info"}}}},
  "projectBranches": {"basic": ["master", "1.9"]},
  "registryValues": {
    "keycloak": {
      "realms": {"officerPortal": {"browserFlow": "id-gov-ua-officer-redirector"}},
      "authFlows": {"officerAuthFlow": {"widgetHeight": 0}},
      "identityProviders": {"idGovUa": {"url": "https://id.example.org", "clientId": "client-1"}},
      "customHosts": [{"host": "sso.example.org", "certificatePath": "certs/sso.pem"}]
    },
    "signWidget": {"url": ""},
    "global": {"registryBackup": {"enabled": true, "schedule": "0 2 * * *", "expiresInDays": 5}},
    "portals": {"officer": {"customDns": {"enabled": true, "host": "officer.example.org"}}}
  }
}"#;

#[test]
fn edit_page_mounts_with_registry_values() {
    let bootstrap = Bootstrap::from_json_str(EDIT_PAGE).expect("parse bootstrap");
    let session = bootstrap.mount(ConsoleLog::disabled()).expect("mount");
    let form = &session.form;

    assert_eq!(session.action(), WizardAction::Edit);
    assert!(!session.state().tab(TabKey::Confirmation).visible);
    assert_eq!(form.general.registry_name, "demo-registry");

    assert_eq!(form.admins.records().len(), 1);
    assert!(!form.admins.changed());
    assert_eq!(form.cidr.entries(CidrPortal::Citizen), ["10.0.0.0/8"]);
    assert!(!form.cidr.changed());

    assert_eq!(form.mail.server, MailServer::External);
    assert_eq!(form.mail.external.port, "465");

    assert_eq!(form.resources.added()[0].name, ResourceCategory::Kong);
    assert_eq!(form.template.project_branches["basic"].len(), 2);

    assert_eq!(form.supplier_auth.auth_type, AuthFlow::IdGovUa);
    assert_eq!(form.supplier_auth.url, "https://id.example.org");
    assert_eq!(form.supplier_auth.secret, MASKED_SECRET);

    assert!(form.backup.enabled);
    assert_eq!(form.backup.retention_days, "5");

    let officer = form.dns.portal(Portal::Officer).expect("officer portal");
    assert!(officer.edit_visible);
    assert_eq!(officer.preloaded.as_deref(), Some("officer.example.org"));

    assert_eq!(bootstrap.keycloak_hosts().hosts()[0].certificate_path, "certs/sso.pem");
}

#[test]
fn create_page_starts_with_changed_lists() {
    let bootstrap = Bootstrap::from_json_str(r#"{"wizardAction": ""}"#).expect("parse");
    let session = bootstrap.mount(ConsoleLog::disabled()).expect("mount");

    assert_eq!(session.action(), WizardAction::Create);
    assert!(session.form.admins.changed());
    assert!(session.form.cidr.changed());
    assert_eq!(session.form.mail.server, MailServer::Platform);
    assert_eq!(session.form.supplier_auth.auth_type, AuthFlow::DsoOfficer);
}

#[test]
fn edit_page_without_registry_name_is_rejected() {
    let bootstrap = Bootstrap::from_json_str(r#"{"wizardAction": "edit"}"#).expect("parse");
    assert!(matches!(
        bootstrap.mount(ConsoleLog::disabled()),
        Err(BootstrapError::MissingRegistryName)
    ));
}

#[test]
fn unknown_action_and_bad_embedded_json_are_errors() {
    let bootstrap = Bootstrap::from_json_str(r#"{"wizardAction": "clone"}"#).expect("parse");
    assert!(matches!(
        bootstrap.mount(ConsoleLog::disabled()),
        Err(BootstrapError::Action(_))
    ));

    let bootstrap = Bootstrap::from_json_str(r#"{"admins": "[{"}"#).expect("parse");
    assert!(matches!(
        bootstrap.mount(ConsoleLog::disabled()),
        Err(BootstrapError::Field { field: "admins", .. })
    ));
}

#[test]
fn loads_from_file_and_logs_mount() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("page.json");
    fs::write(&path, EDIT_PAGE).expect("write bootstrap");

    let bootstrap = Bootstrap::from_path(&path).expect("read bootstrap");
    let log = ConsoleLog::at_state_root(dir.path());
    bootstrap.mount(log.clone()).expect("mount");

    let raw = fs::read_to_string(log.path().expect("log path")).expect("read log");
    assert!(raw.contains("\"event\":\"bootstrap.mounted\""));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(matches!(
        Bootstrap::from_path(&dir.path().join("missing.json")),
        Err(BootstrapError::Read { .. })
    ));
}

#[test]
fn pending_update_marker_does_not_change_tabs() {
    let plain = Bootstrap::from_json_str(r#"{"wizardAction": "create"}"#)
        .expect("parse")
        .mount(ConsoleLog::disabled())
        .expect("mount");
    let marked = Bootstrap::from_json_str(r#"{"wizardAction": "create", "registryUpdate": true}"#)
        .expect("parse with marker")
        .mount(ConsoleLog::disabled())
        .expect("mount with marker");

    assert_eq!(
        marked.state().visible_tabs().collect::<Vec<_>>(),
        plain.state().visible_tabs().collect::<Vec<_>>()
    );
}
