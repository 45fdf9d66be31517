use crate::backend::RegistryBackend;
use crate::shared::logging::ConsoleLog;
use crate::shared::patterns::is_registry_name;
use crate::wizard::{ErrorKind, Field, ValidationOutcome};

/// Checks the registry name of a new external system registration. The name
/// follows registry naming rules and must not already be registered.
pub fn check_external_system_name(
    name: &str,
    backend: &dyn RegistryBackend,
    log: &ConsoleLog,
) -> ValidationOutcome {
    let name = name.trim();
    if name.is_empty() {
        return ValidationOutcome::invalid(ErrorKind::Required, Field::ExternalSystemName);
    }
    if !is_registry_name(name) {
        return ValidationOutcome::invalid(ErrorKind::Format, Field::ExternalSystemName);
    }
    match backend.external_system_exists(name) {
        Ok(false) => ValidationOutcome::Valid,
        Ok(true) => ValidationOutcome::invalid(ErrorKind::Exists, Field::ExternalSystemName),
        Err(err) => {
            log.warn(
                "backend.error",
                &format!("external system check for `{name}` failed: {err}"),
            );
            ValidationOutcome::invalid(ErrorKind::Unavailable, Field::ExternalSystemName)
        }
    }
}
