use super::form::{HardwareField, Portal, SmtpField};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    Required,
    Format,
    Exists,
    Type,
    Unavailable,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "requiredError",
            Self::Format => "formatError",
            Self::Exists => "existsError",
            Self::Type => "typeError",
            Self::Unavailable => "unavailableError",
        }
    }
}

/// The form field an error flag is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    RegistryName,
    Description,
    Administrators,
    Template,
    Branch,
    Smtp(SmtpField),
    CaCertificate,
    CaList,
    KeyFile,
    KeyIssuer,
    KeyPassword,
    Hardware(HardwareField),
    AllowedKey(usize),
    DnsHost(Portal),
    DnsCertificate(Portal),
    CronSchedule,
    RetentionDays,
    AuthUrl,
    WidgetHeight,
    ClientId,
    ClientSecret,
    ExternalSystemName,
}

impl Field {
    pub fn as_str(self) -> String {
        match self {
            Self::RegistryName => "registryName".to_string(),
            Self::Description => "description".to_string(),
            Self::Administrators => "administrators".to_string(),
            Self::Template => "template".to_string(),
            Self::Branch => "branch".to_string(),
            Self::Smtp(field) => format!("smtp.{}", field.as_str()),
            Self::CaCertificate => "caCert".to_string(),
            Self::CaList => "caJSON".to_string(),
            Self::KeyFile => "key6".to_string(),
            Self::KeyIssuer => "signKeyIssuer".to_string(),
            Self::KeyPassword => "signKeyPWD".to_string(),
            Self::Hardware(field) => format!("hardware.{}", field.as_str()),
            Self::AllowedKey(index) => format!("allowedKeys.{index}"),
            Self::DnsHost(portal) => portal.as_str().to_string(),
            Self::DnsCertificate(portal) => format!("{}SSL", portal.as_str()),
            Self::CronSchedule => "cronSchedule".to_string(),
            Self::RetentionDays => "days".to_string(),
            Self::AuthUrl => "url".to_string(),
            Self::WidgetHeight => "widgetHeight".to_string(),
            Self::ClientId => "clientId".to_string(),
            Self::ClientSecret => "secret".to_string(),
            Self::ExternalSystemName => "externalSystemName".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ErrorFlag {
    pub kind: ErrorKind,
    pub field: Field,
}

impl ErrorFlag {
    pub fn new(kind: ErrorKind, field: Field) -> Self {
        Self { kind, field }
    }

    /// Flag name as rendered by the form templates.
    pub fn key(&self) -> String {
        match (self.kind, self.field) {
            (ErrorKind::Exists, Field::RegistryName) => "registryNameAlreadyExists".to_string(),
            (ErrorKind::Format, Field::CronSchedule) => "wrongCronFormat".to_string(),
            (ErrorKind::Format, Field::RetentionDays) => "wrongDaysFormat".to_string(),
            (ErrorKind::Format, Field::AuthUrl) => "urlValidationFailed".to_string(),
            (ErrorKind::Format, Field::WidgetHeight) => "heightIsNotNumber".to_string(),
            (ErrorKind::Required, Field::Template) => "templateRequiredError".to_string(),
            (ErrorKind::Required, Field::Branch) => "branchRequiredError".to_string(),
            (ErrorKind::Required, Field::CaCertificate) => "caCertRequired".to_string(),
            (ErrorKind::Required, Field::CaList) => "caJSONRequired".to_string(),
            (ErrorKind::Required, Field::KeyFile) => "key6Required".to_string(),
            (kind, field) => format!("{}.{}", kind.as_str(), field.as_str()),
        }
    }
}

/// Error flags raised by one validation attempt of one tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSet {
    flags: BTreeSet<ErrorFlag>,
}

impl ErrorSet {
    pub fn raise(&mut self, kind: ErrorKind, field: Field) {
        self.flags.insert(ErrorFlag::new(kind, field));
    }

    pub fn has(&self, kind: ErrorKind, field: Field) -> bool {
        self.flags.contains(&ErrorFlag::new(kind, field))
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.flags.iter().any(|flag| flag.key() == key)
    }

    pub fn count(&self, kind: ErrorKind) -> usize {
        self.flags.iter().filter(|flag| flag.kind == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorFlag> {
        self.flags.iter()
    }

    pub fn clear(&mut self) {
        self.flags.clear();
    }

    pub fn flag_map(&self) -> BTreeMap<String, bool> {
        self.flags.iter().map(|flag| (flag.key(), true)).collect()
    }

    pub fn into_outcome(self) -> ValidationOutcome {
        if self.is_empty() {
            ValidationOutcome::Valid
        } else {
            ValidationOutcome::Invalid(self)
        }
    }
}

/// Settled result of a tab validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(ErrorSet),
}

impl ValidationOutcome {
    pub fn invalid(kind: ErrorKind, field: Field) -> Self {
        let mut errors = ErrorSet::default();
        errors.raise(kind, field);
        Self::Invalid(errors)
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn errors(&self) -> Option<&ErrorSet> {
        match self {
            Self::Valid => None,
            Self::Invalid(errors) => Some(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_keep_form_template_names() {
        let exists = ErrorFlag::new(ErrorKind::Exists, Field::RegistryName);
        assert_eq!(exists.key(), "registryNameAlreadyExists");
        let cert = ErrorFlag::new(ErrorKind::Type, Field::DnsCertificate(Portal::Officer));
        assert_eq!(cert.key(), "typeError.officerSSL");
        let smtp = ErrorFlag::new(ErrorKind::Required, Field::Smtp(SmtpField::Host));
        assert_eq!(smtp.key(), "requiredError.smtp.host");
    }

    #[test]
    fn empty_set_settles_as_valid() {
        assert!(ErrorSet::default().into_outcome().is_valid());
        let outcome = ValidationOutcome::invalid(ErrorKind::Format, Field::CronSchedule);
        assert!(outcome
            .errors()
            .expect("errors")
            .has_key("wrongCronFormat"));
    }
}
