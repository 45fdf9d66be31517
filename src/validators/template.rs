use super::{FormUpdate, TabValidation, ValidationContext};
use crate::wizard::{ErrorKind, ErrorSet, Field, ValidationOutcome};

/// Requires a template and branch, then preloads the template's resource
/// defaults. A failed preload is logged and does not block the tab.
pub(super) fn validate(ctx: &ValidationContext<'_>) -> TabValidation {
    let template = ctx.form.template.template.trim();
    let branch = ctx.form.template.branch.trim();

    let mut errors = ErrorSet::default();
    if template.is_empty() {
        errors.raise(ErrorKind::Required, Field::Template);
    }
    if branch.is_empty() {
        errors.raise(ErrorKind::Required, Field::Branch);
    }
    if !errors.is_empty() {
        return TabValidation::settled(errors.into_outcome());
    }

    let validation = TabValidation::settled(ValidationOutcome::Valid);
    match ctx.backend.preload_resources(template, branch) {
        Ok(defaults) => validation.with_update(FormUpdate::ResourcesPreloaded(defaults)),
        Err(err) => {
            ctx.log.warn(
                "resources.preload_failed",
                &format!("preload for template `{template}` branch `{branch}` failed: {err}"),
            );
            validation
        }
    }
}
