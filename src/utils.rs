// src/utils.rs

/// Make a file name safe to place inside a quoted `Content-Disposition` value
pub fn header_safe_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_control() || c == '"' || c == '\\' || c == '/' {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// File name that stays a single path component: separators, drive colons
/// and control characters become `_`, as does any `..` run
pub fn disk_safe_file_name(name: &str) -> String {
    let mapped: String = name
        .chars()
        .map(|c| {
            if c.is_control() || c == '/' || c == '\\' || c == ':' {
                '_'
            } else {
                c
            }
        })
        .collect();

    mapped.replace("..", "_")
}

/// `Content-Disposition` header value for a downloadable attachment
pub fn attachment_disposition(file_name: &str) -> String {
    format!(
        "attachment; filename=\"{}\"",
        header_safe_file_name(file_name)
    )
}
