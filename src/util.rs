pub const MERGE_TITLE_PREFIX: &str = "Merge branch";

/// Date-only part of an authored timestamp (`2023-01-05T10:00:00Z` -> `2023-01-05`).
pub fn date_prefix(authored_date: &str) -> &str {
    authored_date.split('T').next().unwrap_or(authored_date)
}

/// GitLab-generated merge commits, after stripping at most one leading space.
pub fn is_merge_title(title: &str) -> bool {
    title
        .strip_prefix(' ')
        .unwrap_or(title)
        .starts_with(MERGE_TITLE_PREFIX)
}

/// Replace the value of the `private_token` query parameter.
pub fn redact_token(url: &str) -> String {
    match url.find("private_token=") {
        Some(start) => {
            let value_start = start + "private_token=".len();
            let value_end = url[value_start..]
                .find('&')
                .map_or(url.len(), |i| value_start + i);
            format!("{}***{}", &url[..value_start], &url[value_end..])
        }
        None => url.to_string(),
    }
}
