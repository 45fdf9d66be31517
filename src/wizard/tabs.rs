use super::errors::ErrorSet;

/// Wizard tabs in presentation order. The derived `Ord` is that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TabKey {
    General,
    Administrators,
    Template,
    Mail,
    Key,
    Resources,
    Dns,
    Cidr,
    SupplierAuthentication,
    BackupSchedule,
    Confirmation,
}

pub const ALL_TABS: [TabKey; 11] = [
    TabKey::General,
    TabKey::Administrators,
    TabKey::Template,
    TabKey::Mail,
    TabKey::Key,
    TabKey::Resources,
    TabKey::Dns,
    TabKey::Cidr,
    TabKey::SupplierAuthentication,
    TabKey::BackupSchedule,
    TabKey::Confirmation,
];

impl TabKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Administrators => "administrators",
            Self::Template => "template",
            Self::Mail => "mail",
            Self::Key => "key",
            Self::Resources => "resources",
            Self::Dns => "dns",
            Self::Cidr => "cidr",
            Self::SupplierAuthentication => "supplierAuthentication",
            Self::BackupSchedule => "backupSchedule",
            Self::Confirmation => "confirmation",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        ALL_TABS
            .iter()
            .copied()
            .find(|key| key.as_str().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| {
                let valid = ALL_TABS
                    .iter()
                    .map(|key| key.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("unknown wizard tab `{raw}`; valid tabs: {valid}")
            })
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Administrators => "Administrators",
            Self::Template => "Registry template",
            Self::Mail => "Mail server",
            Self::Key => "Key data",
            Self::Resources => "Registry resources",
            Self::Dns => "DNS",
            Self::Cidr => "Access restrictions",
            Self::SupplierAuthentication => "Service supplier authentication",
            Self::BackupSchedule => "Backup",
            Self::Confirmation => "Confirmation",
        }
    }
}

impl std::fmt::Display for TabKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabState {
    pub title: String,
    pub visible: bool,
    pub disabled: bool,
    pub validated: bool,
    pub begin_validation: bool,
    pub errors: ErrorSet,
}

impl TabState {
    pub fn new(key: TabKey) -> Self {
        Self {
            title: key.title().to_string(),
            visible: true,
            disabled: true,
            validated: false,
            begin_validation: false,
            errors: ErrorSet::default(),
        }
    }

    /// Start of a validation attempt: nothing stays validated from before.
    pub(crate) fn begin_attempt(&mut self) {
        self.validated = false;
        self.begin_validation = true;
        self.errors.clear();
    }

    pub(crate) fn finish_attempt(&mut self, errors: Option<&ErrorSet>) {
        match errors {
            None => {
                self.validated = true;
                self.begin_validation = false;
            }
            Some(errors) => {
                self.validated = false;
                self.errors = errors.clone();
            }
        }
    }
}
