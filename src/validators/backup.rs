use super::{FormUpdate, TabValidation, ValidationContext};
use crate::cron::{format_fire_time, parse_cron_expression, PREVIEW_FIRE_TIMES};
use crate::shared::patterns::is_digits;
use crate::wizard::{ErrorKind, ErrorSet, Field};

pub(super) fn validate(ctx: &ValidationContext<'_>) -> TabValidation {
    let backup = &ctx.form.backup;
    if !backup.enabled {
        return TabValidation::settled(ErrorSet::default().into_outcome())
            .with_update(FormUpdate::BackupPreview(Vec::new()));
    }

    let cron = backup.cron_schedule.trim();
    let days = backup.retention_days.trim();
    let mut errors = ErrorSet::default();
    if cron.is_empty() {
        errors.raise(ErrorKind::Required, Field::CronSchedule);
    }
    if days.is_empty() {
        errors.raise(ErrorKind::Required, Field::RetentionDays);
    } else if !is_digits(days) || days.trim_start_matches('0').is_empty() {
        errors.raise(ErrorKind::Format, Field::RetentionDays);
    }

    let mut preview = Vec::new();
    if !cron.is_empty() {
        match parse_cron_expression(cron) {
            Ok(expression) => {
                preview = expression
                    .upcoming(ctx.now, PREVIEW_FIRE_TIMES, &ctx.timezone)
                    .into_iter()
                    .map(|ts| format_fire_time(ts, &ctx.timezone))
                    .collect();
                if preview.len() < PREVIEW_FIRE_TIMES {
                    errors.raise(ErrorKind::Format, Field::CronSchedule);
                }
            }
            Err(_) => errors.raise(ErrorKind::Format, Field::CronSchedule),
        }
    }

    TabValidation::settled(errors.into_outcome()).with_update(FormUpdate::BackupPreview(preview))
}
