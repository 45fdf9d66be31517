use super::{TabValidation, ValidationContext};
use crate::shared::patterns::is_registry_name;
use crate::wizard::{ErrorKind, ErrorSet, Field, ValidationOutcome, WizardAction};

pub const MIN_NAME_LENGTH: usize = 3;
pub const MAX_DESCRIPTION_LENGTH: usize = 250;

pub(super) fn validate(ctx: &ValidationContext<'_>) -> TabValidation {
    let general = &ctx.form.general;
    let name = general.registry_name.trim();
    let mut errors = ErrorSet::default();

    if name.is_empty() {
        errors.raise(ErrorKind::Required, Field::RegistryName);
    } else if name.chars().count() < MIN_NAME_LENGTH || !is_registry_name(name) {
        errors.raise(ErrorKind::Format, Field::RegistryName);
    }
    if general.description.chars().count() > MAX_DESCRIPTION_LENGTH {
        errors.raise(ErrorKind::Format, Field::Description);
    }
    if !errors.is_empty() || ctx.action == WizardAction::Edit {
        return TabValidation::settled(errors.into_outcome());
    }

    match ctx.backend.registry_exists(name) {
        Ok(false) => TabValidation::settled(ValidationOutcome::Valid),
        Ok(true) => TabValidation::settled(ValidationOutcome::invalid(
            ErrorKind::Exists,
            Field::RegistryName,
        )),
        Err(err) => {
            ctx.log.warn(
                "backend.error",
                &format!("registry name check for `{name}` failed: {err}"),
            );
            TabValidation::settled(ValidationOutcome::invalid(
                ErrorKind::Unavailable,
                Field::RegistryName,
            ))
        }
    }
}
