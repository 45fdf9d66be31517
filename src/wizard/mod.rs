pub mod errors;
pub mod form;
pub mod navigation;
pub mod session;
pub mod state;
pub mod tabs;

pub use errors::{ErrorFlag, ErrorKind, ErrorSet, Field, ValidationOutcome};
pub use form::{
    AuthFlow, BackupForm, DnsForm, DnsPortal, FileKey, GeneralForm, HardwareField, HardwareKey,
    KeyDevice, KeyForm, MailForm, MailServer, Portal, RegistryForm, SmtpField, SmtpOptions,
    SupplierAuthForm, TemplateForm, DEFAULT_WIDGET_HEIGHT, DNS_PORTALS, DSO_DEFAULT_URL,
    MASKED_SECRET,
};
pub use navigation::{NavEffect, SubmitOutcome};
pub use session::WizardSession;
pub use state::{WizardAction, WizardState};
pub use tabs::{TabKey, TabState, ALL_TABS};
