use super::{TabValidation, ValidationContext};
use crate::wizard::{ErrorKind, ErrorSet, Field, MailServer};

pub(super) fn validate(ctx: &ValidationContext<'_>) -> TabValidation {
    let mail = &ctx.form.mail;
    let mut errors = ErrorSet::default();
    if mail.server == MailServer::External {
        for (field, value) in mail.external.fields() {
            if value.trim().is_empty() {
                errors.raise(ErrorKind::Required, Field::Smtp(field));
            }
        }
    }
    TabValidation::settled(errors.into_outcome())
}
