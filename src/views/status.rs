#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryStatus {
    Active,
    Failed,
    InProgress,
    Unknown,
}

impl RegistryStatus {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "active" | "SUCCESS" | "ok" => Self::Active,
            "failed" | "failure" | "FAILURE" => Self::Failed,
            "inactive" => Self::InProgress,
            _ => Self::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Failed => "Failed",
            Self::InProgress => "In progress",
            Self::Unknown => "",
        }
    }
}

/// Status class of an external registration row.
pub fn external_status(status: &str, enabled: bool) -> String {
    if !enabled {
        return "disabled".to_string();
    }
    if status.is_empty() {
        return "active".to_string();
    }
    status.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationKind {
    ExternalSystem,
    InternalRegistry,
}

impl RegistrationKind {
    pub fn from_external(external: bool) -> Self {
        if external {
            Self::ExternalSystem
        } else {
            Self::InternalRegistry
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExternalSystem => "external-system",
            Self::InternalRegistry => "internal-registry",
        }
    }
}
