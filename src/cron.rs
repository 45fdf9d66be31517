use chrono::{Datelike, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use std::collections::BTreeSet;

const MAX_CRON_SEARCH_MINUTES: i64 = 60 * 24 * 366 * 5;
pub const PREVIEW_FIRE_TIMES: usize = 3;
const MAX_DAYS_IN_MONTH: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

#[derive(Debug, Clone)]
struct CronField {
    any: bool,
    values: BTreeSet<u32>,
}

impl CronField {
    fn matches(&self, value: u32) -> bool {
        self.any || self.values.contains(&value)
    }
}

/// Standard 5-field cron expression: minute hour day_of_month month day_of_week.
#[derive(Debug, Clone)]
pub struct CronExpression {
    minute: CronField,
    hour: CronField,
    day_of_month: CronField,
    month: CronField,
    day_of_week: CronField,
}

pub fn parse_cron_expression(raw: &str) -> Result<CronExpression, String> {
    let fields: Vec<&str> = raw.split_whitespace().collect();
    if fields.len() != 5 {
        return Err(
            "cron expression must use 5 fields: minute hour day_of_month month day_of_week"
                .to_string(),
        );
    }

    let expression = CronExpression {
        minute: parse_cron_field(fields[0], 0, 59, AliasKind::None)?,
        hour: parse_cron_field(fields[1], 0, 23, AliasKind::None)?,
        day_of_month: parse_cron_field(fields[2], 1, 31, AliasKind::None)?,
        month: parse_cron_field(fields[3], 1, 12, AliasKind::Month)?,
        day_of_week: parse_cron_field(fields[4], 0, 7, AliasKind::Weekday)?,
    };
    if !expression.has_reachable_day() {
        return Err(format!("cron expression `{raw}` never fires"));
    }
    Ok(expression)
}

impl CronExpression {
    /// False when every listed day of month is past the end of every listed
    /// month. A restricted weekday field can still fire on its own.
    fn has_reachable_day(&self) -> bool {
        if self.day_of_month.any || !self.day_of_week.any {
            return true;
        }
        let Some(first_day) = self.day_of_month.values.first() else {
            return false;
        };
        (1..=12u32)
            .filter(|month| self.month.matches(*month))
            .any(|month| *first_day <= MAX_DAYS_IN_MONTH[month as usize - 1])
    }

    fn matches(&self, unix_ts: i64, timezone: &Tz) -> bool {
        let Some(utc_dt) = Utc.timestamp_opt(unix_ts, 0).single() else {
            return false;
        };
        let local = utc_dt.with_timezone(timezone);

        if !self.minute.matches(local.minute())
            || !self.hour.matches(local.hour())
            || !self.month.matches(local.month())
        {
            return false;
        }

        let day_of_month_match = self.day_of_month.matches(local.day());
        let day_of_week_match = self
            .day_of_week
            .matches(local.weekday().num_days_from_sunday());

        if self.day_of_month.any || self.day_of_week.any {
            day_of_month_match && day_of_week_match
        } else {
            day_of_month_match || day_of_week_match
        }
    }

    /// First matching minute strictly after `after`.
    pub fn next_after(&self, after: i64, timezone: &Tz) -> Option<i64> {
        let mut candidate = (after.div_euclid(60) + 1) * 60;
        for _ in 0..MAX_CRON_SEARCH_MINUTES {
            if self.matches(candidate, timezone) {
                return Some(candidate);
            }
            candidate = candidate.saturating_add(60);
        }
        None
    }

    /// Up to `count` strictly increasing fire times after `after`.
    pub fn upcoming(&self, after: i64, count: usize, timezone: &Tz) -> Vec<i64> {
        let mut times = Vec::with_capacity(count);
        let mut cursor = after;
        while times.len() < count {
            let Some(next) = self.next_after(cursor, timezone) else {
                break;
            };
            times.push(next);
            cursor = next;
        }
        times
    }
}

pub fn format_fire_time(unix_ts: i64, timezone: &Tz) -> String {
    match Utc.timestamp_opt(unix_ts, 0).single() {
        Some(dt) => dt
            .with_timezone(timezone)
            .format("%d.%m.%Y %H:%M:%S")
            .to_string(),
        None => unix_ts.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AliasKind {
    None,
    Month,
    Weekday,
}

fn parse_cron_field(
    raw: &str,
    min: u32,
    max: u32,
    aliases: AliasKind,
) -> Result<CronField, String> {
    if raw == "*" {
        return Ok(CronField {
            any: true,
            values: BTreeSet::new(),
        });
    }

    let mut values = BTreeSet::new();
    for segment in raw.split(',') {
        parse_cron_segment(segment, min, max, aliases, &mut values)?;
    }
    if values.is_empty() {
        return Err(format!("invalid cron field `{raw}`"));
    }
    Ok(CronField { any: false, values })
}

fn parse_cron_segment(
    raw: &str,
    min: u32,
    max: u32,
    aliases: AliasKind,
    values: &mut BTreeSet<u32>,
) -> Result<(), String> {
    let (range_raw, step) = match raw.split_once('/') {
        Some((range, step_raw)) => {
            let step = step_raw
                .parse::<u32>()
                .map_err(|_| format!("invalid cron step `{step_raw}`"))?;
            if step == 0 {
                return Err("cron step must be >= 1".to_string());
            }
            (range, step)
        }
        None => (raw, 1),
    };

    let (start, end) = if range_raw == "*" {
        (min, max)
    } else if let Some((start_raw, end_raw)) = range_raw.split_once('-') {
        (
            parse_cron_atom(start_raw, min, max, aliases)?,
            parse_cron_atom(end_raw, min, max, aliases)?,
        )
    } else {
        let value = parse_cron_atom(range_raw, min, max, aliases)?;
        (value, value)
    };

    if start > end {
        return Err(format!("invalid cron range `{raw}`"));
    }

    let mut value = start;
    while value <= end {
        let normalized = if aliases == AliasKind::Weekday && value == 7 {
            0
        } else {
            value
        };
        values.insert(normalized);
        match value.checked_add(step) {
            Some(next) => value = next,
            None => break,
        }
    }
    Ok(())
}

fn parse_cron_atom(raw: &str, min: u32, max: u32, aliases: AliasKind) -> Result<u32, String> {
    let lower = raw.to_ascii_lowercase();
    let alias = match aliases {
        AliasKind::None => None,
        AliasKind::Month => [
            "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
        ]
        .iter()
        .position(|name| *name == lower)
        .map(|idx| idx as u32 + 1),
        AliasKind::Weekday => ["sun", "mon", "tue", "wed", "thu", "fri", "sat"]
            .iter()
            .position(|name| *name == lower)
            .map(|idx| idx as u32),
    };
    let value = match alias {
        Some(value) => value,
        None => lower
            .parse::<u32>()
            .map_err(|_| format!("invalid cron value `{raw}`"))?,
    };

    if value < min || value > max {
        return Err(format!(
            "cron value `{raw}` is out of bounds ({min}..={max})"
        ));
    }
    Ok(value)
}
