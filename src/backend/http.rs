use super::{BackendError, CertificateUpload, RegistryBackend};
use crate::config::Settings;
use serde_json::{Map, Value};

/// `RegistryBackend` over the console's HTTP admin endpoints. Every request is
/// bounded by the agent timeout so a stalled check settles as an error.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: std::time::Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.backend_url, settings.request_timeout())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// 2xx means the name is taken, 404 means it is free.
    fn exists_at(&self, path: &str) -> Result<bool, BackendError> {
        let url = self.endpoint(path);
        match self.agent.get(&url).call() {
            Ok(_) => Ok(true),
            Err(ureq::Error::Status(404, _)) => Ok(false),
            Err(ureq::Error::Status(status, _)) => Err(BackendError::Status {
                endpoint: url,
                status,
            }),
            Err(err) => Err(transport(url, err)),
        }
    }

    fn post_upload(&self, path: &str, body: &Value) -> Result<String, BackendError> {
        let url = self.endpoint(path);
        match self.agent.post(&url).send_json(body.clone()) {
            Ok(response) => response.into_string().map_err(|err| BackendError::Decode {
                endpoint: url,
                reason: err.to_string(),
            }),
            Err(ureq::Error::Status(_, response)) => {
                let message = response.into_string().unwrap_or_default();
                Err(BackendError::Rejected(message.trim().to_string()))
            }
            Err(err) => Err(transport(url, err)),
        }
    }
}

fn transport(endpoint: String, err: ureq::Error) -> BackendError {
    BackendError::Transport {
        endpoint,
        reason: err.to_string(),
    }
}

impl RegistryBackend for HttpBackend {
    fn registry_exists(&self, name: &str) -> Result<bool, BackendError> {
        self.exists_at(&format!(
            "admin/registry/check/{}",
            urlencoding::encode(name)
        ))
    }

    fn check_pem(&self, upload: &CertificateUpload) -> Result<(), BackendError> {
        let body = serde_json::to_value(upload).map_err(|err| BackendError::Decode {
            endpoint: "admin/registry/check-pem".to_string(),
            reason: err.to_string(),
        })?;
        self.post_upload("admin/registry/check-pem", &body)
            .map(|_| ())
    }

    fn preload_resources(
        &self,
        template: &str,
        branch: &str,
    ) -> Result<Map<String, Value>, BackendError> {
        let url = format!(
            "{}?template={}&branch={}",
            self.endpoint("admin/registry/preload-resources"),
            urlencoding::encode(template),
            urlencoding::encode(branch)
        );
        let response = match self.agent.get(&url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                return Err(BackendError::Status {
                    endpoint: url,
                    status,
                })
            }
            Err(err) => return Err(transport(url, err)),
        };
        let value: Value = response.into_json().map_err(|err| BackendError::Decode {
            endpoint: url.clone(),
            reason: err.to_string(),
        })?;
        match value {
            Value::Object(map) => Ok(map),
            Value::Null => Ok(Map::new()),
            other => Err(BackendError::Decode {
                endpoint: url,
                reason: format!("expected a JSON object, got `{other}`"),
            }),
        }
    }

    fn external_system_exists(&self, name: &str) -> Result<bool, BackendError> {
        self.exists_at(&format!(
            "admin/registry/external-system/check/{}",
            urlencoding::encode(name)
        ))
    }

    fn upload_keycloak_pem(
        &self,
        hostname: &str,
        upload: &CertificateUpload,
    ) -> Result<String, BackendError> {
        let body = serde_json::json!({
            "hostname": hostname,
            "fileName": upload.file_name,
            "content": upload.content,
        });
        self.post_upload("admin/cluster/upload-pem-dns", &body)
            .map(|path| path.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn joins_endpoints_without_doubled_slashes() {
        let backend = HttpBackend::new("https://console.example.com/", Duration::from_secs(1));
        assert_eq!(
            backend.endpoint("/admin/registry/check-pem"),
            "https://console.example.com/admin/registry/check-pem"
        );
    }

    #[test]
    fn unreachable_backend_settles_as_transport_error() {
        let backend = HttpBackend::new("http://127.0.0.1:1", Duration::from_millis(200));
        let err = backend.registry_exists("demo").expect_err("no listener");
        assert!(matches!(err, BackendError::Transport { .. }));
    }
}
