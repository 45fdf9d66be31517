use crate::shared::patterns::is_ipv4_cidr;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CidrPortal {
    Citizen,
    Officer,
    Admin,
}

pub const CIDR_PORTALS: [CidrPortal; 3] =
    [CidrPortal::Citizen, CidrPortal::Officer, CidrPortal::Admin];

impl CidrPortal {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::Officer => "officer",
            Self::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CidrError {
    #[error("`{0}` is not an IPv4 CIDR")]
    Format(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CidrConfig {
    #[serde(default)]
    citizen: Option<Vec<String>>,
    #[serde(default)]
    officer: Option<Vec<String>>,
    #[serde(default)]
    admin: Option<Vec<String>>,
}

/// Allowed source networks for the citizen, officer and admin portals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CidrLists {
    citizen: Vec<String>,
    officer: Vec<String>,
    admin: Vec<String>,
    changed: bool,
}

impl CidrLists {
    pub fn load_json(&mut self, raw: &str) -> Result<(), serde_json::Error> {
        if raw.trim().is_empty() {
            return Ok(());
        }
        let config: CidrConfig = serde_json::from_str(raw)?;
        if let Some(citizen) = config.citizen {
            self.citizen = citizen;
        }
        if let Some(officer) = config.officer {
            self.officer = officer;
        }
        if let Some(admin) = config.admin {
            self.admin = admin;
        }
        self.changed = false;
        Ok(())
    }

    pub fn entries(&self, portal: CidrPortal) -> &[String] {
        match portal {
            CidrPortal::Citizen => &self.citizen,
            CidrPortal::Officer => &self.officer,
            CidrPortal::Admin => &self.admin,
        }
    }

    fn entries_mut(&mut self, portal: CidrPortal) -> &mut Vec<String> {
        match portal {
            CidrPortal::Citizen => &mut self.citizen,
            CidrPortal::Officer => &mut self.officer,
            CidrPortal::Admin => &mut self.admin,
        }
    }

    pub fn add(&mut self, portal: CidrPortal, raw: &str) -> Result<(), CidrError> {
        if !is_ipv4_cidr(raw) {
            return Err(CidrError::Format(raw.to_string()));
        }
        self.entries_mut(portal).push(raw.to_string());
        self.changed = true;
        Ok(())
    }

    pub fn remove(&mut self, portal: CidrPortal, raw: &str) -> bool {
        let entries = self.entries_mut(portal);
        let Some(index) = entries.iter().position(|entry| entry == raw) else {
            return false;
        };
        entries.remove(index);
        self.changed = true;
        true
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn mark_changed(&mut self, changed: bool) {
        self.changed = changed;
    }

    pub fn to_wire(&self, portal: CidrPortal) -> String {
        serde_json::to_string(self.entries(portal)).unwrap_or_else(|_| "[]".to_string())
    }
}
