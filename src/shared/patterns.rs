use regex::Regex;
use std::sync::OnceLock;

const REGISTRY_NAME_PATTERN: &str =
    r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?([a-z0-9]([-a-z0-9]*[a-z0-9])?)*$";
const HOSTNAME_PATTERN: &str = r"^(([a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9\-]*[a-zA-Z0-9])\.)+([A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9\-]*[A-Za-z0-9])$";
const EMAIL_PATTERN: &str = r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#;
const CIDR_PATTERN: &str = r"^([01]?\d\d?|2[0-4]\d|25[0-5])(\.([01]?\d\d?|2[0-4]\d|25[0-5])){3}(/([0-9]|[12]\d|3[0-2]))?$";
const HTTP_URL_PATTERN: &str = r"^(https?://.)[-a-zA-Z0-9@:%._+~#=]{2,256}\.[a-z]{2,6}\b([-a-zA-Z0-9@:%_+.~#?&/=,]*)$";

pub const MATCH_ALL_CIDR: &str = "0.0.0.0/0";

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("valid static pattern"))
}

pub fn is_registry_name(raw: &str) -> bool {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compiled(&CELL, REGISTRY_NAME_PATTERN).is_match(raw)
}

pub fn is_hostname(raw: &str) -> bool {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compiled(&CELL, HOSTNAME_PATTERN).is_match(raw)
}

/// Emails are compared case-insensitively against the pattern.
pub fn is_email(raw: &str) -> bool {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compiled(&CELL, EMAIL_PATTERN).is_match(&raw.to_lowercase())
}

pub fn is_ipv4_cidr(raw: &str) -> bool {
    static CELL: OnceLock<Regex> = OnceLock::new();
    let lowered = raw.to_lowercase();
    lowered == MATCH_ALL_CIDR || compiled(&CELL, CIDR_PATTERN).is_match(&lowered)
}

pub fn is_http_url(raw: &str) -> bool {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compiled(&CELL, HTTP_URL_PATTERN).is_match(raw)
}

pub fn is_digits(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(|ch| ch.is_ascii_digit())
}
