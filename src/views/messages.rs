/// Message for an error key returned by the backend, if the key is known.
pub fn error_message(key: &str) -> Option<&'static str> {
    match key {
        "required" => Some("Must not be empty"),
        "only-integer" => Some("Integers only"),
        "cron-expression" => Some("Invalid expression"),
        "checkFormat" => Some("Check the field format"),
        "invalidFormat" => Some("Invalid format"),
        _ => None,
    }
}
