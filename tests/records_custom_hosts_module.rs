use registry_console::backend::{BackendError, CertificateUpload, RegistryBackend};
use registry_console::records::{HostFormError, KeycloakHostEditor};
use serde_json::{Map, Value};
use std::cell::RefCell;

#[derive(Default)]
struct UploadBackend {
    reject_with: Option<String>,
    uploads: RefCell<Vec<String>>,
}

impl RegistryBackend for UploadBackend {
    fn registry_exists(&self, _name: &str) -> Result<bool, BackendError> {
        Ok(false)
    }

    fn check_pem(&self, _upload: &CertificateUpload) -> Result<(), BackendError> {
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
        hostname: &str,
        upload: &CertificateUpload,
    ) -> Result<String, BackendError> {
        if let Some(message) = &self.reject_with {
            return Err(BackendError::Rejected(message.clone()));
        }
        self.uploads.borrow_mut().push(hostname.to_string());
        Ok(format!("certs/{}", upload.file_name))
    }
}

fn cert(name: &str) -> CertificateUpload {
    CertificateUpload::new(name, "-----BEGIN CERTIFICATE-----")
}

#[test]
fn new_host_needs_valid_unique_name_and_certificate() {
    let backend = UploadBackend::default();
    let mut editor =
        KeycloakHostEditor::load_json(r#"[{"host":"sso.example.org","certificatePath":"a.pem"}]"#)
            .expect("load hosts");

    assert_eq!(
        editor.submit("", None, &backend),
        Err(HostFormError::HostnameRequired)
    );
    assert_eq!(
        editor.submit("bad host", None, &backend),
        Err(HostFormError::HostnameFormat)
    );
    assert_eq!(
        editor.submit("sso.example.org", Some(&cert("b.pem")), &backend),
        Err(HostFormError::HostnameTaken)
    );
    assert_eq!(
        editor.submit("login.example.org", None, &backend),
        Err(HostFormError::CertificateRequired)
    );

    editor
        .submit("login.example.org", Some(&cert("login.pem")), &backend)
        .expect("add host");
    assert_eq!(editor.hosts().len(), 2);
    assert_eq!(editor.hosts()[1].certificate_path, "certs/login.pem");
}

#[test]
fn editing_keeps_stored_certificate_when_none_given() {
    let backend = UploadBackend::default();
    let mut editor =
        KeycloakHostEditor::load_json(r#"[{"host":"sso.example.org","certificatePath":"a.pem"}]"#)
            .expect("load hosts");

    assert!(editor.begin_edit("sso.example.org"));
    editor
        .submit("sso.example.org", None, &backend)
        .expect("same host while editing");
    assert!(editor.begin_edit("sso.example.org"));
    editor
        .submit("auth.example.org", None, &backend)
        .expect("rename host");

    assert_eq!(editor.hosts()[0].host, "auth.example.org");
    assert_eq!(editor.hosts()[0].certificate_path, "a.pem");
    assert!(backend.uploads.borrow().is_empty());
}

#[test]
fn rejected_upload_is_described() {
    let backend = UploadBackend {
        reject_with: Some("x509: certificate has expired or is not yet valid".to_string()),
        ..UploadBackend::default()
    };
    let mut editor = KeycloakHostEditor::default();

    assert_eq!(
        editor.submit("sso.example.org", Some(&cert("old.pem")), &backend),
        Err(HostFormError::Certificate(
            "certificate has expired".to_string()
        ))
    );
    assert!(editor.hosts().is_empty());
}

#[test]
fn delete_and_serialize() {
    let mut editor = KeycloakHostEditor::load_json("null").expect("null hosts");
    assert!(editor.hosts().is_empty());
    assert!(!editor.delete("sso.example.org"));
    assert_eq!(editor.to_wire(), "[]");
}
