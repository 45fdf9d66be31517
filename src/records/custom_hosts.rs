use crate::backend::{describe_pem_error, BackendError, CertificateUpload, RegistryBackend};
use crate::shared::patterns::is_hostname;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeycloakHost {
    pub host: String,
    #[serde(default)]
    pub certificate_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostFormError {
    #[error("hostname is required")]
    HostnameRequired,
    #[error("hostname has an invalid format")]
    HostnameFormat,
    #[error("hostname is already in use")]
    HostnameTaken,
    #[error("certificate is required")]
    CertificateRequired,
    #[error("certificate rejected: {0}")]
    Certificate(String),
    #[error(transparent)]
    Backend(#[from] BackendErrorMessage),
}

/// Backend failure carried as text so the form error stays comparable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct BackendErrorMessage(pub String);

/// Custom keycloak DNS hosts of the platform settings page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeycloakHostEditor {
    hosts: Vec<KeycloakHost>,
    editing: Option<String>,
}

impl KeycloakHostEditor {
    pub fn load_json(raw: &str) -> Result<Self, serde_json::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let hosts: Option<Vec<KeycloakHost>> = serde_json::from_str(raw)?;
        Ok(Self {
            hosts: hosts.unwrap_or_default(),
            editing: None,
        })
    }

    pub fn from_hosts(hosts: Vec<KeycloakHost>) -> Self {
        Self {
            hosts,
            editing: None,
        }
    }

    pub fn hosts(&self) -> &[KeycloakHost] {
        &self.hosts
    }

    pub fn begin_edit(&mut self, host: &str) -> bool {
        if self.hosts.iter().any(|entry| entry.host == host) {
            self.editing = Some(host.to_string());
            true
        } else {
            false
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn delete(&mut self, host: &str) -> bool {
        let before = self.hosts.len();
        self.hosts.retain(|entry| entry.host != host);
        before != self.hosts.len()
    }

    /// Adds a host, or renames/re-certifies the one being edited. New hosts
    /// need a certificate; an edited host keeps its stored one when none is
    /// given.
    pub fn submit(
        &mut self,
        hostname: &str,
        certificate: Option<&CertificateUpload>,
        backend: &dyn RegistryBackend,
    ) -> Result<(), HostFormError> {
        if hostname.is_empty() {
            return Err(HostFormError::HostnameRequired);
        }
        if !is_hostname(hostname) {
            return Err(HostFormError::HostnameFormat);
        }
        let editing = self.editing.clone();
        let taken = self
            .hosts
            .iter()
            .any(|entry| entry.host == hostname && editing.as_deref() != Some(hostname));
        if taken {
            return Err(HostFormError::HostnameTaken);
        }

        let certificate_path = match certificate {
            Some(upload) => Some(
                backend
                    .upload_keycloak_pem(hostname, upload)
                    .map_err(map_upload_error)?,
            ),
            None if editing.is_none() => return Err(HostFormError::CertificateRequired),
            None => None,
        };

        match editing {
            None => self.hosts.push(KeycloakHost {
                host: hostname.to_string(),
                certificate_path: certificate_path.unwrap_or_default(),
            }),
            Some(previous) => {
                for entry in self.hosts.iter_mut().filter(|entry| entry.host == previous) {
                    entry.host = hostname.to_string();
                    if let Some(path) = certificate_path.as_ref() {
                        entry.certificate_path = path.clone();
                    }
                }
            }
        }
        self.editing = None;
        Ok(())
    }

    pub fn to_wire(&self) -> String {
        serde_json::to_string(&self.hosts).unwrap_or_else(|_| "[]".to_string())
    }
}

fn map_upload_error(err: BackendError) -> HostFormError {
    match err {
        BackendError::Rejected(message) => HostFormError::Certificate(describe_pem_error(&message)),
        other => HostFormError::Backend(BackendErrorMessage(other.to_string())),
    }
}
