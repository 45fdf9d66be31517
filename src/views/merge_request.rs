use serde::Deserialize;
use std::collections::BTreeMap;

pub const TARGET_LABEL: &str = "console/target";
pub const SUB_TARGET_LABEL: &str = "console/sub-target";
pub const ACTION_LABEL: &str = "console/action";
pub const SOURCE_BRANCH_LABEL: &str = "console/source-branch";
pub const EXTERNAL_REG_NAME_ANNOTATION: &str = "ext-reg/name";

const MISSING_SOURCE_MESSAGE: &str = "sourceBranch or changesConfigMap must be specified";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MergeRequestMetadata {
    pub name: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeRequestSpec {
    pub source_branch: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MergeRequestStatusValue {
    pub value: String,
}

/// A change record owned by the backend. Everything shown for it is derived
/// from its labels, annotations, source branch and status.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MergeRequest {
    pub metadata: MergeRequestMetadata,
    pub spec: MergeRequestSpec,
    pub status: MergeRequestStatusValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeRequestStatus {
    InProgress,
    Unset,
    New,
    Abandoned,
    Merged,
    Other(String),
}

impl MergeRequestStatus {
    pub fn label(&self) -> &str {
        match self {
            Self::InProgress => "In progress",
            Self::Unset => "-",
            Self::New => "New",
            Self::Abandoned => "Rejected",
            Self::Merged => "Approved",
            Self::Other(raw) => raw,
        }
    }
}

impl MergeRequest {
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    fn label(&self, key: &str) -> Option<&str> {
        self.metadata.labels.get(key).map(String::as_str)
    }

    fn target(&self) -> Option<&str> {
        self.label(TARGET_LABEL)
    }

    fn source_branch(&self) -> &str {
        if self.spec.source_branch.is_empty() {
            self.label(SOURCE_BRANCH_LABEL).unwrap_or_default()
        } else {
            &self.spec.source_branch
        }
    }

    pub fn display_name(&self) -> String {
        match self.target() {
            Some("external-reg") => self
                .metadata
                .annotations
                .get(EXTERNAL_REG_NAME_ANNOTATION)
                .cloned()
                .unwrap_or_default(),
            Some("registry-version-update") => "Registry version update".to_string(),
            Some("edit-registry" | "trembita-registry-update") => "Registry edit".to_string(),
            _ => self.metadata.name.clone(),
        }
    }

    /// Action column of a registry's change list.
    pub fn registry_action(&self) -> String {
        match self.target() {
            Some("external-reg") => {
                let action = match self.label(SUB_TARGET_LABEL) {
                    Some("disable") => "Block",
                    Some("enable") => "Unblock",
                    Some("creation") => "Create",
                    Some("deletion") => "Revoke",
                    _ => "-",
                };
                action.to_string()
            }
            Some("registry-version-update") => {
                format!("Update registry to {}", self.source_branch())
            }
            _ => "-".to_string(),
        }
    }

    /// Action column of the platform change list.
    pub fn platform_action(&self) -> String {
        match self.target() {
            Some("cluster-admins") => "Update platform administrators".to_string(),
            Some("cluster-cidr") => "Access restrictions".to_string(),
            Some("cluster-keycloak-dns") => "Edit Keycloak DNS".to_string(),
            Some("cluster-update") => format!("Update platform to {}", self.source_branch()),
            _ => "-".to_string(),
        }
    }

    pub fn is_in_progress(&self) -> bool {
        let source_empty = self.spec.source_branch.is_empty();
        (self.label(ACTION_LABEL) == Some("branch-merge") && source_empty)
            || self.status.value.is_empty()
            || (self.status.value == MISSING_SOURCE_MESSAGE && !source_empty)
    }

    pub fn status(&self) -> MergeRequestStatus {
        if self.is_in_progress() {
            return MergeRequestStatus::InProgress;
        }
        match self.status.value.as_str() {
            "" => MergeRequestStatus::Unset,
            "NEW" => MergeRequestStatus::New,
            "ABANDONED" => MergeRequestStatus::Abandoned,
            "MERGED" => MergeRequestStatus::Merged,
            other => MergeRequestStatus::Other(other.to_string()),
        }
    }
}
