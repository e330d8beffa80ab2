//! Path helpers for a store whose only hierarchy is `/` inside keys.

use super::error::FsError;

pub const SEPARATOR: char = '/';

/// Turns a directory path into the key prefix of its contents.
///
/// Trailing separators collapse to exactly one, so the result is idempotent:
/// `normalize_prefix(normalize_prefix(p)) == normalize_prefix(p)`.
pub fn normalize_prefix(path: &str) -> String {
    format!("{}{}", path.trim_end_matches(SEPARATOR), SEPARATOR)
}

/// Listing prefix for a directory: empty for the root, otherwise
/// [`normalize_prefix`] of `path`.
pub fn directory_prefix(path: &str) -> String {
    if path.trim_matches(SEPARATOR).is_empty() {
        String::new()
    } else {
        normalize_prefix(path)
    }
}

/// Everything before the last separator, or `None` for top-level keys.
pub fn parent_of(path: &str) -> Option<&str> {
    match path.rsplit_once(SEPARATOR) {
        Some((parent, _)) if !parent.is_empty() => Some(parent),
        _ => None,
    }
}

/// Cleans a caller-supplied path into a storage key.
///
/// Leading and repeated separators are dropped; `.` and `..` segments are
/// rejected since the store has no notion of them.
pub fn clean(path: &str) -> Result<String, FsError> {
    let mut segments = Vec::new();
    for segment in path.trim().split(SEPARATOR) {
        match segment {
            "" => continue,
            "." | ".." => {
                return Err(FsError::InvalidPath {
                    path: path.to_string(),
                    reason: format!("relative segment '{}'", segment),
                })
            }
            s if s.chars().any(char::is_control) => {
                return Err(FsError::InvalidPath {
                    path: path.to_string(),
                    reason: "control character".to_string(),
                })
            }
            s => segments.push(s),
        }
    }
    Ok(segments.join("/"))
}

/// Like [`clean`], but an empty result is an error.
pub fn clean_file(path: &str) -> Result<String, FsError> {
    let cleaned = clean(path)?;
    if cleaned.is_empty() {
        return Err(FsError::InvalidPath {
            path: path.to_string(),
            reason: "empty file path".to_string(),
        });
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        bare = { "path", "path/" },
        trailing = { "path/", "path/" },
        repeated = { "path//", "path/" },
        nested = { "a/b", "a/b/" },
        root = { "", "/" },
    )]
    fn test_normalize_prefix(input: &str, expected: &str) {
        assert_eq!(normalize_prefix(input), expected);
        assert_eq!(normalize_prefix(&normalize_prefix(input)), expected);
    }

    #[parameterized(
        root = { "", "" },
        root_separator = { "/", "" },
        bare = { "docs", "docs/" },
        trailing = { "docs//", "docs/" },
    )]
    fn test_directory_prefix(input: &str, expected: &str) {
        assert_eq!(directory_prefix(input), expected);
    }

    #[parameterized(
        nested = { "a/b/c.txt", Some("a/b") },
        one_level = { "a/d.txt", Some("a") },
        top_level = { "c.txt", None },
        leading_separator = { "/c.txt", None },
    )]
    fn test_parent_of(input: &str, expected: Option<&str>) {
        assert_eq!(parent_of(input), expected);
    }

    #[parameterized(
        plain = { "a/b.txt", "a/b.txt" },
        leading = { "/a/b.txt", "a/b.txt" },
        doubled = { "a//b.txt", "a/b.txt" },
        whitespace = { "  a/b  ", "a/b" },
        empty = { "", "" },
    )]
    fn test_clean(input: &str, expected: &str) {
        assert_eq!(clean(input).unwrap(), expected);
    }

    #[test]
    fn test_clean_rejects_relative_segments() {
        assert!(matches!(
            clean("a/../b"),
            Err(FsError::InvalidPath { .. })
        ));
        assert!(matches!(clean("./a"), Err(FsError::InvalidPath { .. })));
        assert!(matches!(clean("a\nb"), Err(FsError::InvalidPath { .. })));
    }

    #[test]
    fn test_clean_file_rejects_empty() {
        assert!(clean_file("/").is_err());
        assert_eq!(clean_file("/x").unwrap(), "x");
    }
}
