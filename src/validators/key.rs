use super::{FormUpdate, TabValidation, ValidationContext};
use crate::wizard::{
    ErrorKind, ErrorSet, Field, HardwareKey, KeyDevice, ValidationOutcome, WizardAction,
};

pub const HARDWARE_INI_TEMPLATE: &str = "\
[\\]
TraceLevel=0
LogLevel=0

[\\SOFTWARE\\Institute of Informational Technologies\\Certificate Authority-1.3\\End User\\]
Language=1
[\\SOFTWARE\\Institute of Informational Technologies\\Certificate Authority-1.3\\End User\\CMP\\]
Address={{CA_HOST}}
Port={{CA_PORT}}
CommonName={{CA_NAME}}
Use=1

[\\SOFTWARE\\Institute of Informational Technologies\\Key Medias\\NCM Gryada-301\\Modules\\]
SN={{KEY_SN}}
Address={{KEY_HOST}}
AddressMask={{KEY_ADDRESS_MASK}}
";

fn render_template_with_placeholders<F>(template: &str, mut resolve: F) -> Result<String, String>
where
    F: FnMut(&str) -> Result<String, String>,
{
    let mut rendered = String::new();
    let mut cursor = template;

    while let Some(start) = cursor.find("{{") {
        rendered.push_str(&cursor[..start]);
        let after_open = &cursor[start + 2..];
        let Some(close_offset) = after_open.find("}}") else {
            return Err("unclosed placeholder in ini template".to_string());
        };
        let token = after_open[..close_offset].trim();
        if token.is_empty() {
            return Err("empty placeholder in ini template".to_string());
        }
        rendered.push_str(&resolve(token)?);
        cursor = &after_open[close_offset + 2..];
    }

    rendered.push_str(cursor);
    Ok(rendered)
}

/// Renders the crypto module ini file for a hardware key.
pub fn render_hardware_ini(template: &str, hardware: &HardwareKey) -> Result<String, String> {
    let rendered = render_template_with_placeholders(template, |token| {
        let value = match token {
            "CA_NAME" => &hardware.ca_name,
            "CA_HOST" => &hardware.ca_host,
            "CA_PORT" => &hardware.ca_port,
            "KEY_SN" => &hardware.serial_number,
            "KEY_HOST" => &hardware.key_host,
            "KEY_ADDRESS_MASK" => &hardware.key_mask,
            other => return Err(format!("unknown ini placeholder `{other}`")),
        };
        Ok(value.trim().to_string())
    })?;
    Ok(rendered.trim().to_string())
}

pub(super) fn validate(ctx: &ValidationContext<'_>) -> TabValidation {
    let key = &ctx.form.key;
    if ctx.action == WizardAction::Edit && !key.changed {
        return TabValidation::settled(ValidationOutcome::Valid);
    }

    let mut errors = ErrorSet::default();
    if key.ca_certificate.is_none() {
        errors.raise(ErrorKind::Required, Field::CaCertificate);
    }
    if key.ca_list.is_none() {
        errors.raise(ErrorKind::Required, Field::CaList);
    }
    for index in key.allowed_keys.incomplete_indices() {
        errors.raise(ErrorKind::Required, Field::AllowedKey(index));
    }

    let mut preview = None;
    match key.device {
        KeyDevice::Hardware => {
            for (field, value) in key.hardware.fields() {
                if value.trim().is_empty() {
                    errors.raise(ErrorKind::Required, Field::Hardware(field));
                }
            }
            match render_hardware_ini(HARDWARE_INI_TEMPLATE, &key.hardware) {
                Ok(ini) => preview = Some(ini),
                Err(err) => ctx.log.warn("validator.rejected", &err),
            }
        }
        KeyDevice::File => {
            if key.file.issuer.trim().is_empty() {
                errors.raise(ErrorKind::Required, Field::KeyIssuer);
            }
            if key.file.password.is_empty() {
                errors.raise(ErrorKind::Required, Field::KeyPassword);
            }
            if key.file.key_file.is_none() {
                errors.raise(ErrorKind::Required, Field::KeyFile);
            }
        }
    }

    let validation = TabValidation::settled(errors.into_outcome());
    match preview {
        Some(ini) => validation.with_update(FormUpdate::HardwareIniPreview(ini)),
        None => validation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_hardware_placeholder() {
        let hardware = HardwareKey {
            ca_name: "Test CA".to_string(),
            ca_host: "ca.example.org".to_string(),
            ca_port: "80".to_string(),
            serial_number: "0042".to_string(),
            key_host: "10.0.0.5".to_string(),
            key_mask: "255.255.255.0".to_string(),
            ..HardwareKey::default()
        };
        let ini = render_hardware_ini(HARDWARE_INI_TEMPLATE, &hardware).expect("render");
        assert!(ini.starts_with("[\\]"));
        assert!(ini.contains("Address=ca.example.org\nPort=80\nCommonName=Test CA"));
        assert!(ini.contains("SN=0042"));
        assert!(ini.ends_with("AddressMask=255.255.255.0"));
    }

    #[test]
    fn rejects_unknown_and_unclosed_placeholders() {
        let hardware = HardwareKey::default();
        assert!(render_hardware_ini("{{NOPE}}", &hardware).is_err());
        assert!(render_hardware_ini("Port={{CA_PORT", &hardware).is_err());
        assert!(render_hardware_ini("{{ }}", &hardware).is_err());
    }
}
