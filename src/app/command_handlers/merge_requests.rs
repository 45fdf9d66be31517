use crate::shared::errors::ConsoleError;
use crate::views::MergeRequest;
use std::fs;
use std::path::Path;

pub fn cmd_merge_request(args: &[String]) -> Result<String, ConsoleError> {
    let [path] = args else {
        return Err(ConsoleError::Usage(
            "usage: merge-request <mr.json>".to_string(),
        ));
    };
    let path = Path::new(path);
    let raw = fs::read_to_string(path).map_err(|source| ConsoleError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let request = MergeRequest::from_json_str(&raw)
        .map_err(|err| ConsoleError::Usage(format!("invalid merge request json: {err}")))?;

    Ok([
        format!("name={}", request.display_name()),
        format!("registry_action={}", request.registry_action()),
        format!("platform_action={}", request.platform_action()),
        format!("in_progress={}", request.is_in_progress()),
        format!("status={}", request.status().label()),
    ]
    .join("\n"))
}
