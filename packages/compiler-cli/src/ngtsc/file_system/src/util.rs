use once_cell::sync::Lazy;
use regex::Regex;

static TS_DTS_JS_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\.d\.ts|\.ts|\.js)$").expect("extension pattern is valid"));

/// Convert Windows-style separators to POSIX separators.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Remove a .ts, .d.ts, or .js extension from a file name.
pub fn strip_extension(path: &str) -> String {
    TS_DTS_JS_EXTENSION.replace(path, "").to_string()
}

/// Collapse `.` and `..` segments and duplicate separators. Leading `..`
/// segments of an absolute path are dropped.
pub fn clean_path(path: &str) -> String {
    let normalized = normalize_separators(path);

    let is_windows_absolute = normalized.len() >= 2 && normalized.as_bytes()[1] == b':';
    let is_unix_absolute = normalized.starts_with('/');

    let (drive_prefix, path_part) = if is_windows_absolute {
        (&normalized[0..2], &normalized[2..])
    } else {
        ("", normalized.as_str())
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in path_part.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                if matches!(segments.last(), Some(last) if *last != "..") {
                    segments.pop();
                } else if !is_windows_absolute && !is_unix_absolute {
                    segments.push("..");
                }
            }
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    if is_windows_absolute {
        format!("{}/{}", drive_prefix, joined)
    } else if is_unix_absolute {
        format!("/{}", joined)
    } else {
        joined
    }
}

/// Resolve `paths` right to left against `cwd`, stopping at the first rooted
/// segment.
pub fn resolve_against(cwd: &str, paths: &[&str]) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for path in paths.iter().rev() {
        if path.is_empty() {
            continue;
        }
        parts.push(path);
        if is_rooted(path) {
            break;
        }
    }
    if !parts.last().map(|p| is_rooted(p)).unwrap_or(false) {
        parts.push(cwd);
    }
    parts.reverse();
    clean_path(&parts.join("/"))
}

pub fn is_rooted(path: &str) -> bool {
    path.starts_with('/')
        || path.starts_with('\\')
        || (path.len() >= 2 && path.as_bytes()[1] == b':')
}
