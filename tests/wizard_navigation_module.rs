use registry_console::backend::{BackendError, CertificateUpload, RegistryBackend};
use registry_console::records::AdministratorDraft;
use registry_console::wizard::{
    ErrorKind, Field, NavEffect, Portal, SubmitOutcome, TabKey, WizardAction, WizardSession,
};
use serde_json::{Map, Value};
use std::cell::RefCell;

#[derive(Default)]
struct FakeBackend {
    taken: Vec<String>,
    unreachable: bool,
    calls: RefCell<Vec<String>>,
}

impl RegistryBackend for FakeBackend {
    fn registry_exists(&self, name: &str) -> Result<bool, BackendError> {
        self.calls.borrow_mut().push(format!("exists:{name}"));
        if self.unreachable {
            return Err(BackendError::Transport {
                endpoint: "admin/registry/check".to_string(),
                reason: "timed out".to_string(),
            });
        }
        Ok(self.taken.iter().any(|taken| taken == name))
    }

    fn check_pem(&self, upload: &CertificateUpload) -> Result<(), BackendError> {
        self.calls.borrow_mut().push(format!("pem:{}", upload.file_name));
        Ok(())
    }

    fn preload_resources(
        &self,
        _template: &str,
        _branch: &str,
    ) -> Result<Map<String, Value>, BackendError> {
        Ok(Map::new())
    }

    fn external_system_exists(&self, _name: &str) -> Result<bool, BackendError> {
        Ok(false)
    }

    fn upload_keycloak_pem(
        &self,
        _hostname: &str,
        _upload: &CertificateUpload,
    ) -> Result<String, BackendError> {
        Ok(String::new())
    }
}

fn create_session(name: &str) -> WizardSession {
    let mut session = WizardSession::new(WizardAction::Create);
    session.form.general.registry_name = name.to_string();
    session
}

fn admin() -> AdministratorDraft {
    AdministratorDraft {
        email: "admin@example.org".to_string(),
        first_name: "Iryna".to_string(),
        last_name: "Shevchenko".to_string(),
        temporary_password: "Temp-pass-1".to_string(),
    }
}

#[test]
fn create_mode_refuses_jump_past_unvalidated_general_tab() {
    let backend = FakeBackend::default();
    let mut session = create_session("");

    let effect = session.select_tab(TabKey::Resources, &backend);

    assert!(matches!(effect, NavEffect::Blocked { tab: TabKey::General, .. }));
    assert_eq!(session.active_tab(), TabKey::General);
    assert!(session.state().tab(TabKey::Resources).disabled);
}

#[test]
fn create_mode_refuses_jump_when_a_middle_tab_is_unvalidated() {
    let backend = FakeBackend::default();
    let mut session = create_session("demo-registry");

    let effect = session.select_tab(TabKey::Resources, &backend);

    assert_eq!(
        effect,
        NavEffect::Refused {
            target: TabKey::Resources,
            missing: TabKey::Administrators,
        }
    );
    assert_eq!(session.active_tab(), TabKey::General);
    assert!(session.state().tab(TabKey::General).validated);
}

#[test]
fn advance_validates_current_tab_then_unlocks_the_next() {
    let backend = FakeBackend::default();
    let mut session = create_session("demo-registry");

    let effect = session.advance(&backend);

    assert_eq!(
        effect,
        NavEffect::Moved {
            from: TabKey::General,
            to: TabKey::Administrators,
        }
    );
    assert!(!session.state().tab(TabKey::Administrators).disabled);
    assert_eq!(backend.calls.borrow().as_slice(), ["exists:demo-registry"]);
}

#[test]
fn advance_is_blocked_without_administrators() {
    let backend = FakeBackend::default();
    let mut session = create_session("demo-registry");
    session.advance(&backend);

    let effect = session.advance(&backend);

    let NavEffect::Blocked { tab, errors } = effect else {
        panic!("expected blocked navigation");
    };
    assert_eq!(tab, TabKey::Administrators);
    assert!(errors.has(ErrorKind::Required, Field::Administrators));
    let state = session.state().tab(TabKey::Administrators);
    assert!(!state.validated);
    assert!(state.begin_validation);
    assert_eq!(session.active_tab(), TabKey::Administrators);
}

#[test]
fn adding_an_administrator_unblocks_the_tab() {
    let backend = FakeBackend::default();
    let mut session = create_session("demo-registry");
    session.advance(&backend);
    session.advance(&backend);

    session.create_admin(&admin()).expect("create admin");
    assert!(session.state().tab(TabKey::Administrators).errors.is_empty());

    assert_eq!(
        session.advance(&backend),
        NavEffect::Moved {
            from: TabKey::Administrators,
            to: TabKey::Template,
        }
    );
}

#[test]
fn taken_name_raises_already_exists_flag() {
    let backend = FakeBackend {
        taken: vec!["demo-registry".to_string()],
        ..FakeBackend::default()
    };
    let mut session = create_session("demo-registry");

    let outcome = session.validate_tab(TabKey::General, &backend);

    let errors = outcome.errors().expect("name is taken");
    assert!(errors.has_key("registryNameAlreadyExists"));
    assert!(!session.state().tab(TabKey::General).validated);
}

#[test]
fn unreachable_backend_settles_name_check_as_unavailable() {
    let backend = FakeBackend {
        unreachable: true,
        ..FakeBackend::default()
    };
    let mut session = create_session("demo-registry");

    let outcome = session.validate_tab(TabKey::General, &backend);

    assert!(outcome
        .errors()
        .expect("backend failure")
        .has_key("unavailableError.registryName"));
}

#[test]
fn malformed_names_fail_locally_without_remote_lookup() {
    let backend = FakeBackend::default();
    for name in ["ab", "Demo", "-demo", "demo_registry"] {
        let mut session = create_session(name);
        let outcome = session.validate_tab(TabKey::General, &backend);
        assert!(
            outcome.errors().expect("invalid name").has(ErrorKind::Format, Field::RegistryName),
            "{name} should be rejected"
        );
    }
    assert!(backend.calls.borrow().is_empty());
}

#[test]
fn edit_mode_skips_remote_name_check() {
    let backend = FakeBackend {
        taken: vec!["demo-registry".to_string()],
        ..FakeBackend::default()
    };
    let mut session = WizardSession::new(WizardAction::Edit);
    session.form.general.registry_name = "demo-registry".to_string();

    assert!(session.validate_tab(TabKey::General, &backend).is_valid());
    assert!(backend.calls.borrow().is_empty());
}

#[test]
fn edit_mode_jumps_freely_and_retreats_without_validation() {
    let backend = FakeBackend::default();
    let mut session = WizardSession::new(WizardAction::Edit);
    session.form.general.registry_name = "demo-registry".to_string();

    assert_eq!(
        session.select_tab(TabKey::Dns, &backend),
        NavEffect::Moved {
            from: TabKey::General,
            to: TabKey::Dns,
        }
    );

    session.form.dns.portal_mut(Portal::Officer).host = "not a host".to_string();
    assert_eq!(
        session.retreat(&backend),
        NavEffect::Moved {
            from: TabKey::Dns,
            to: TabKey::Resources,
        }
    );
}

#[test]
fn edit_mode_cannot_select_hidden_tabs() {
    let backend = FakeBackend::default();
    let mut session = WizardSession::new(WizardAction::Edit);

    assert_eq!(
        session.select_tab(TabKey::Template, &backend),
        NavEffect::Hidden(TabKey::Template)
    );
    assert_eq!(session.active_tab(), TabKey::General);
}

#[test]
fn create_mode_retreat_validates_the_tab_being_left() {
    let backend = FakeBackend::default();
    let mut session = create_session("demo-registry");
    session.advance(&backend);

    let effect = session.retreat(&backend);

    assert!(matches!(
        effect,
        NavEffect::Blocked {
            tab: TabKey::Administrators,
            ..
        }
    ));
    assert_eq!(session.active_tab(), TabKey::Administrators);
}

#[test]
fn first_tab_has_no_previous_tab() {
    let backend = FakeBackend::default();
    let mut session = create_session("demo-registry");
    assert_eq!(session.retreat(&backend), NavEffect::NoAdjacentTab);
}

#[test]
fn submit_composes_payload_once() {
    let backend = FakeBackend::default();
    let mut session = create_session("demo-registry");
    session.create_admin(&admin()).expect("create admin");

    let SubmitOutcome::Ready(payload) = session.submit(&backend) else {
        panic!("expected a payload");
    };
    assert_eq!(payload.get("name"), Some("demo-registry"));
    assert_eq!(payload.get("admins-changed"), Some("on"));
    assert!(payload
        .get("admins")
        .expect("admins field")
        .contains("admin@example.org"));
    assert!(session.is_submitted());

    assert_eq!(session.submit(&backend), SubmitOutcome::AlreadySubmitted);
}

#[test]
fn submit_is_blocked_by_an_invalid_active_tab() {
    let backend = FakeBackend::default();
    let mut session = create_session("x");

    let outcome = session.submit(&backend);

    assert!(matches!(
        outcome,
        SubmitOutcome::Blocked {
            tab: TabKey::General,
            ..
        }
    ));
    assert!(!session.is_submitted());
}
