use crate::backend::CertificateUpload;
use crate::records::{AdministratorList, AllowedKeyList, CidrLists, ResourceEditor};
use std::collections::BTreeMap;

/// Form data of every wizard tab for one registry.
#[derive(Debug, Clone, Default)]
pub struct RegistryForm {
    pub general: GeneralForm,
    pub admins: AdministratorList,
    pub template: TemplateForm,
    pub mail: MailForm,
    pub key: KeyForm,
    pub resources: ResourceEditor,
    pub dns: DnsForm,
    pub cidr: CidrLists,
    pub supplier_auth: SupplierAuthForm,
    pub backup: BackupForm,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneralForm {
    pub registry_name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateForm {
    pub template: String,
    pub branch: String,
    pub branches: Vec<String>,
    pub project_branches: BTreeMap<String, Vec<String>>,
}

impl TemplateForm {
    /// Switches the template project and narrows the branch choices to it.
    pub fn select_template(&mut self, template: &str) {
        self.template = template.to_string();
        self.branches = self
            .project_branches
            .get(template)
            .cloned()
            .unwrap_or_default();
        if !self.branches.contains(&self.branch) {
            self.branch.clear();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MailServer {
    #[default]
    Platform,
    External,
}

impl MailServer {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Platform => "platform-mail-server",
            Self::External => "external-mail-server",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim() {
            "" | "platform-mail-server" => Ok(Self::Platform),
            "external-mail-server" => Ok(Self::External),
            other => Err(format!(
                "mail server type must be platform-mail-server|external-mail-server (got `{other}`)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SmtpField {
    Host,
    Port,
    Address,
    Password,
}

impl SmtpField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Port => "port",
            Self::Address => "address",
            Self::Password => "password",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SmtpOptions {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub password: String,
}

impl Default for SmtpOptions {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: "587".to_string(),
            address: String::new(),
            password: String::new(),
        }
    }
}

impl SmtpOptions {
    pub fn fields(&self) -> [(SmtpField, &str); 4] {
        [
            (SmtpField::Host, self.host.as_str()),
            (SmtpField::Port, self.port.as_str()),
            (SmtpField::Address, self.address.as_str()),
            (SmtpField::Password, self.password.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailForm {
    pub server: MailServer,
    pub external: SmtpOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyDevice {
    #[default]
    File,
    Hardware,
}

impl KeyDevice {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Hardware => "hardware",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim() {
            "file" => Ok(Self::File),
            "hardware" => Ok(Self::Hardware),
            other => Err(format!("key device type must be file|hardware (got `{other}`)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HardwareField {
    Type,
    Password,
    CaName,
    CaHost,
    CaPort,
    SerialNumber,
    KeyPort,
    KeyHost,
    KeyMask,
}

impl HardwareField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Type => "remoteType",
            Self::Password => "remoteKeyPWD",
            Self::CaName => "remoteCaName",
            Self::CaHost => "remoteCaHost",
            Self::CaPort => "remoteCaPort",
            Self::SerialNumber => "remoteSerialNumber",
            Self::KeyPort => "remoteKeyPort",
            Self::KeyHost => "remoteKeyHost",
            Self::KeyMask => "remoteKeyMask",
        }
    }
}

pub const DEFAULT_HARDWARE_KEY_TYPE: &str = "IIT Gryada-301 crypto module";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareKey {
    pub key_type: String,
    pub password: String,
    pub ca_name: String,
    pub ca_host: String,
    pub ca_port: String,
    pub serial_number: String,
    pub key_port: String,
    pub key_host: String,
    pub key_mask: String,
}

impl Default for HardwareKey {
    fn default() -> Self {
        Self {
            key_type: DEFAULT_HARDWARE_KEY_TYPE.to_string(),
            password: String::new(),
            ca_name: String::new(),
            ca_host: String::new(),
            ca_port: String::new(),
            serial_number: String::new(),
            key_port: String::new(),
            key_host: String::new(),
            key_mask: String::new(),
        }
    }
}

impl HardwareKey {
    pub fn fields(&self) -> [(HardwareField, &str); 9] {
        [
            (HardwareField::Type, self.key_type.as_str()),
            (HardwareField::Password, self.password.as_str()),
            (HardwareField::CaName, self.ca_name.as_str()),
            (HardwareField::CaHost, self.ca_host.as_str()),
            (HardwareField::CaPort, self.ca_port.as_str()),
            (HardwareField::SerialNumber, self.serial_number.as_str()),
            (HardwareField::KeyPort, self.key_port.as_str()),
            (HardwareField::KeyHost, self.key_host.as_str()),
            (HardwareField::KeyMask, self.key_mask.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileKey {
    pub issuer: String,
    pub password: String,
    pub key_file: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct KeyForm {
    pub device: KeyDevice,
    pub hardware: HardwareKey,
    pub file: FileKey,
    pub allowed_keys: AllowedKeyList,
    pub ca_certificate: Option<String>,
    pub ca_list: Option<String>,
    pub ini_preview: String,
    pub changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Portal {
    Officer,
    Citizen,
}

pub const DNS_PORTALS: [Portal; 2] = [Portal::Officer, Portal::Citizen];

impl Portal {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Officer => "officer",
            Self::Citizen => "citizen",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsPortal {
    pub host: String,
    /// Host loaded from the registry values, already backed by a certificate.
    pub preloaded: Option<String>,
    pub edit_visible: bool,
    pub certificate: Option<CertificateUpload>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsForm {
    pub portals: BTreeMap<Portal, DnsPortal>,
}

impl Default for DnsForm {
    fn default() -> Self {
        Self {
            portals: DNS_PORTALS
                .iter()
                .map(|portal| (*portal, DnsPortal::default()))
                .collect(),
        }
    }
}

impl DnsForm {
    pub fn portal(&self, portal: Portal) -> Option<&DnsPortal> {
        self.portals.get(&portal)
    }

    pub fn portal_mut(&mut self, portal: Portal) -> &mut DnsPortal {
        self.portals.entry(portal).or_default()
    }

    /// Host to submit for a portal. A shown-but-untouched preloaded host with
    /// no new certificate submits as blank, meaning "no change".
    pub fn submitted_host(&self, portal: Portal) -> String {
        let Some(state) = self.portal(portal) else {
            return String::new();
        };
        let untouched = state.edit_visible
            && state.preloaded.as_deref() == Some(state.host.as_str())
            && state.certificate.is_none();
        if untouched {
            String::new()
        } else {
            state.host.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthFlow {
    #[default]
    DsoOfficer,
    IdGovUa,
}

pub const DSO_DEFAULT_URL: &str = "https://eu.iit.com.ua/sign-widget/v20200922/";
pub const DEFAULT_WIDGET_HEIGHT: &str = "720";
pub const MASKED_SECRET: &str = "*****";

impl AuthFlow {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DsoOfficer => "dso-officer-auth-flow",
            Self::IdGovUa => "id-gov-ua-officer-redirector",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim() {
            "dso-officer-auth-flow" => Ok(Self::DsoOfficer),
            "id-gov-ua-officer-redirector" => Ok(Self::IdGovUa),
            other => Err(format!(
                "auth flow must be dso-officer-auth-flow|id-gov-ua-officer-redirector (got `{other}`)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierAuthForm {
    pub auth_type: AuthFlow,
    pub url: String,
    pub widget_height: String,
    pub client_id: String,
    pub secret: String,
}

impl Default for SupplierAuthForm {
    fn default() -> Self {
        Self {
            auth_type: AuthFlow::DsoOfficer,
            url: DSO_DEFAULT_URL.to_string(),
            widget_height: DEFAULT_WIDGET_HEIGHT.to_string(),
            client_id: String::new(),
            secret: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupForm {
    pub enabled: bool,
    pub cron_schedule: String,
    pub retention_days: String,
    pub next_launches: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selecting_a_template_narrows_branches() {
        let mut form = TemplateForm {
            branch: "master".to_string(),
            project_branches: BTreeMap::from([
                ("basic".to_string(), vec!["master".to_string()]),
                ("extended".to_string(), vec!["1.9".to_string()]),
            ]),
            ..TemplateForm::default()
        };
        form.select_template("basic");
        assert_eq!(form.branch, "master");
        form.select_template("extended");
        assert_eq!(form.branches, vec!["1.9".to_string()]);
        assert!(form.branch.is_empty());
    }

    #[test]
    fn untouched_preloaded_host_submits_blank() {
        let mut dns = DnsForm::default();
        let officer = dns.portal_mut(Portal::Officer);
        officer.host = "officer.example.com".to_string();
        officer.preloaded = Some("officer.example.com".to_string());
        officer.edit_visible = true;
        assert_eq!(dns.submitted_host(Portal::Officer), "");

        dns.portal_mut(Portal::Officer).certificate =
            Some(CertificateUpload::new("officer.pem", "---"));
        assert_eq!(dns.submitted_host(Portal::Officer), "officer.example.com");
    }
}
