use super::{TabValidation, ValidationContext};
use crate::wizard::{ErrorKind, Field, ValidationOutcome};

pub(super) fn validate(ctx: &ValidationContext<'_>) -> TabValidation {
    if ctx.form.admins.is_empty() {
        return TabValidation::settled(ValidationOutcome::invalid(
            ErrorKind::Required,
            Field::Administrators,
        ));
    }
    TabValidation::settled(ValidationOutcome::Valid)
}
