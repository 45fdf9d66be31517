use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod http;

pub use http::HttpBackend;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend request to {endpoint} failed: {reason}")]
    Transport { endpoint: String, reason: String },
    #[error("backend responded to {endpoint} with status {status}")]
    Status { endpoint: String, status: u16 },
    #[error("backend rejected upload: {0}")]
    Rejected(String),
    #[error("failed to decode backend response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}

/// A certificate selected in a file input, carried as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateUpload {
    pub file_name: String,
    pub content: String,
}

impl CertificateUpload {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

/// Remote checks the console delegates to the provisioning backend.
pub trait RegistryBackend {
    fn registry_exists(&self, name: &str) -> Result<bool, BackendError>;

    fn check_pem(&self, upload: &CertificateUpload) -> Result<(), BackendError>;

    fn preload_resources(
        &self,
        template: &str,
        branch: &str,
    ) -> Result<Map<String, Value>, BackendError>;

    fn external_system_exists(&self, name: &str) -> Result<bool, BackendError>;

    /// Stores a custom keycloak host certificate, returning its stored path.
    fn upload_keycloak_pem(
        &self,
        hostname: &str,
        upload: &CertificateUpload,
    ) -> Result<String, BackendError>;
}

/// Backend for commands that run without settings. Every remote call fails,
/// so only checks that stay local can pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineBackend;

impl OfflineBackend {
    fn unavailable(endpoint: &str) -> BackendError {
        BackendError::Transport {
            endpoint: endpoint.to_string(),
            reason: "no backend configured".to_string(),
        }
    }
}

impl RegistryBackend for OfflineBackend {
    fn registry_exists(&self, _name: &str) -> Result<bool, BackendError> {
        Err(Self::unavailable("registry check"))
    }

    fn check_pem(&self, _upload: &CertificateUpload) -> Result<(), BackendError> {
        Err(Self::unavailable("check-pem"))
    }

    fn preload_resources(
        &self,
        _template: &str,
        _branch: &str,
    ) -> Result<Map<String, Value>, BackendError> {
        Err(Self::unavailable("preload-resources"))
    }

    fn external_system_exists(&self, _name: &str) -> Result<bool, BackendError> {
        Err(Self::unavailable("external-system check"))
    }

    fn upload_keycloak_pem(
        &self,
        _hostname: &str,
        _upload: &CertificateUpload,
    ) -> Result<String, BackendError> {
        Err(Self::unavailable("upload-pem-dns"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PemProblem {
    BadFormat,
    Expired,
    HostnameMismatch,
}

impl PemProblem {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BadFormat => "check the file format",
            Self::Expired => "certificate has expired",
            Self::HostnameMismatch => "certificate does not match the domain name",
        }
    }
}

const PEM_PROBLEM_MARKERS: [(&str, PemProblem); 3] = [
    ("found in PEM file", PemProblem::BadFormat),
    (
        "certificate has expired or is not yet valid",
        PemProblem::Expired,
    ),
    ("certificate is valid for", PemProblem::HostnameMismatch),
];

/// Maps a backend PEM rejection message onto a known problem, or passes it
/// through unchanged.
pub fn classify_pem_error(message: &str) -> Result<PemProblem, String> {
    PEM_PROBLEM_MARKERS
        .iter()
        .find(|(marker, _)| message.contains(marker))
        .map(|(_, problem)| *problem)
        .ok_or_else(|| message.to_string())
}

pub fn describe_pem_error(message: &str) -> String {
    match classify_pem_error(message) {
        Ok(problem) => problem.as_str().to_string(),
        Err(raw) => raw,
    }
}
