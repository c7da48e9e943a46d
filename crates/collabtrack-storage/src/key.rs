//! Storage-key generation, filename sanitization, and the upload
//! extension allow-list.

use uuid::Uuid;

/// Check whether `file_name` carries one of the allowed extensions.
///
/// The comparison is case-insensitive against the last dot-separated
/// segment; a name without any dot is rejected. Bare dotfiles such as
/// `.txt` have no stem and are rejected too, deliberately stricter than
/// extension checks that treat the whole name as a suffix.
pub fn has_allowed_extension(file_name: &str, allowed: &[String]) -> bool {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            allowed.iter().any(|a| *a == ext)
        }
        _ => false,
    }
}

/// Sanitize a user-supplied filename for use inside a storage key.
///
/// Path separators (and everything before the last one) are dropped, then
/// every character outside `[A-Za-z0-9._-]` is replaced with `_`. Leading
/// dots are stripped so a name can never look like a relative traversal.
/// An empty result falls back to `"file"`.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

/// Generate a globally unique storage key for an upload.
///
/// Format: `{prefix}/{project_id}/{uploader_id}-{uuid_v4}-{sanitized_name}`.
/// The embedded UUID guarantees uniqueness even when the same user re-uploads
/// a file with an identical name to the same project.
pub fn generate_storage_key(
    prefix: &str,
    project_id: Uuid,
    uploader_id: Uuid,
    sanitized_name: &str,
) -> String {
    let unique_id = Uuid::new_v4();
    format!("{prefix}/{project_id}/{uploader_id}-{unique_id}-{sanitized_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow_list() -> Vec<String> {
        ["txt", "pdf", "png", "jpg", "jpeg", "gif", "zip", "dwg", "dxf"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_allowed_extensions() {
        let allowed = allow_list();
        assert!(has_allowed_extension("drawing.dwg", &allowed));
        assert!(has_allowed_extension("REPORT.PDF", &allowed));
        assert!(has_allowed_extension("archive.tar.zip", &allowed));
    }

    #[test]
    fn test_disallowed_extensions() {
        let allowed = allow_list();
        assert!(!has_allowed_extension("malware.exe", &allowed));
        assert!(!has_allowed_extension("noextension", &allowed));
        assert!(!has_allowed_extension(".hidden", &allowed));
        assert!(!has_allowed_extension(".txt", &allowed));
        assert!(!has_allowed_extension("", &allowed));
    }

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\eve\\plan.dwg"), "plan.dwg");
        assert_eq!(sanitize_file_name("dir/sub/file.txt"), "file.txt");
    }

    #[test]
    fn test_sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_file_name("my plan (v2).dxf"), "my_plan__v2_.dxf");
        assert_eq!(sanitize_file_name("naïve.pdf"), "na_ve.pdf");
    }

    #[test]
    fn test_sanitize_empty_falls_back() {
        assert_eq!(sanitize_file_name(""), "file");
        assert_eq!(sanitize_file_name("..."), "file");
        assert_eq!(sanitize_file_name("a/b/"), "file");
    }

    #[test]
    fn test_storage_key_format_and_uniqueness() {
        let project = Uuid::new_v4();
        let uploader = Uuid::new_v4();
        let key1 = generate_storage_key("projects", project, uploader, "plan.dwg");
        let key2 = generate_storage_key("projects", project, uploader, "plan.dwg");

        assert!(key1.starts_with(&format!("projects/{project}/{uploader}-")));
        assert!(key1.ends_with("-plan.dwg"));
        // Same name, same project, same uploader: keys still never collide.
        assert_ne!(key1, key2);
    }
}
