use super::{TabValidation, ValidationContext};
use crate::shared::patterns::{is_digits, is_http_url};
use crate::wizard::{AuthFlow, ErrorKind, ErrorSet, Field};

pub(super) fn validate(ctx: &ValidationContext<'_>) -> TabValidation {
    let auth = &ctx.form.supplier_auth;
    let mut errors = ErrorSet::default();

    let url = auth.url.trim();
    if url.is_empty() {
        errors.raise(ErrorKind::Required, Field::AuthUrl);
    } else if !is_http_url(url) {
        errors.raise(ErrorKind::Format, Field::AuthUrl);
    }

    match auth.auth_type {
        AuthFlow::DsoOfficer => {
            let height = auth.widget_height.trim();
            if height.is_empty() {
                errors.raise(ErrorKind::Required, Field::WidgetHeight);
            } else if !is_digits(height) {
                errors.raise(ErrorKind::Format, Field::WidgetHeight);
            }
        }
        AuthFlow::IdGovUa => {
            if auth.client_id.trim().is_empty() {
                errors.raise(ErrorKind::Required, Field::ClientId);
            }
            if auth.secret.trim().is_empty() {
                errors.raise(ErrorKind::Required, Field::ClientSecret);
            }
        }
    }

    TabValidation::settled(errors.into_outcome())
}
