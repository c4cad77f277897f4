//! Image naming and url helpers shared by the upload route and the feed.

/// Path prefix under which uploaded images are served.
pub const UPLOADS_PATH: &str = "/uploads";

const MAX_FILENAME_CHARS: usize = 120;
const MAX_EXTENSION_CHARS: usize = 10;

/// Turns a stored image value into an absolute location for display.
///
/// Values that already carry an `http(s)` scheme pass through unchanged;
/// anything else is treated as a path on `base_url`. Blank values have no
/// location.
pub fn resolve_image_url(base_url: &str, value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let lower = value.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(value.to_string());
    }
    Some(format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        value.trim_start_matches('/')
    ))
}

/// Reduces a client-supplied filename to a safe single path segment:
/// directory parts are dropped and anything outside `[A-Za-z0-9._-]`
/// becomes `_`. Long names are cut in the stem so the extension survives.
pub fn sanitize_filename(original: &str) -> String {
    let base = original
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    // ASCII only from here on, so byte offsets are char offsets.
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        return "upload".to_string();
    }

    match cleaned.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty() && !ext.is_empty() && ext.len() <= MAX_EXTENSION_CHARS =>
        {
            let stem_limit = MAX_FILENAME_CHARS - ext.len() - 1;
            format!("{}.{}", &stem[..stem.len().min(stem_limit)], ext)
        }
        _ => cleaned[..cleaned.len().min(MAX_FILENAME_CHARS)].to_string(),
    }
}

/// Stored object name: `<unix millis>_<sanitized filename>`.
pub fn stored_image_name(timestamp_millis: i64, original: &str) -> String {
    format!("{}_{}", timestamp_millis, sanitize_filename(original))
}

pub fn public_upload_url(name: &str) -> String {
    format!("{UPLOADS_PATH}/{name}")
}

/// True when `name` is a single segment that [`sanitize_filename`] could
/// have produced. Guards the download route against traversal.
pub fn is_valid_stored_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

/// Content type served for a stored image, derived from its extension only.
/// Anything that is not a raster image format is served as opaque bytes.
pub fn content_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_urls_pass_through() {
        assert_eq!(
            resolve_image_url("http://api.local", "https://cdn.example.com/a.png").as_deref(),
            Some("https://cdn.example.com/a.png")
        );
        assert_eq!(
            resolve_image_url("http://api.local", "HTTP://x/y.jpg").as_deref(),
            Some("HTTP://x/y.jpg")
        );
    }

    #[test]
    fn test_relative_paths_join_with_single_slash() {
        assert_eq!(
            resolve_image_url("http://10.0.2.2:8080/", "/uploads/1_a.png").as_deref(),
            Some("http://10.0.2.2:8080/uploads/1_a.png")
        );
        assert_eq!(
            resolve_image_url("http://10.0.2.2:8080", "uploads/1_a.png").as_deref(),
            Some("http://10.0.2.2:8080/uploads/1_a.png")
        );
    }

    #[test]
    fn test_blank_value_has_no_location() {
        assert_eq!(resolve_image_url("http://x", "   "), None);
    }

    #[test]
    fn test_sanitize_strips_directories_and_odd_characters() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\photos\\my cat.JPG"), "my_cat.JPG");
        assert_eq!(sanitize_filename("日本.png"), "__.png");
        assert_eq!(sanitize_filename(".hidden"), "hidden");
        assert_eq!(sanitize_filename(""), "upload");
        assert_eq!(sanitize_filename("dir/"), "upload");
    }

    #[test]
    fn test_sanitize_caps_length_and_keeps_extension() {
        let long = format!("{}.png", "a".repeat(300));
        let name = sanitize_filename(&long);
        assert_eq!(name.len(), MAX_FILENAME_CHARS);
        assert!(name.ends_with(".png"), "extension lost: {name}");
        assert_eq!(content_type_for(&name), "image/png");

        let stored = stored_image_name(1_700_000_000_000, &format!("{}.jpeg", "b".repeat(130)));
        assert!(stored.ends_with(".jpeg"));
    }

    #[test]
    fn test_sanitize_long_name_without_extension() {
        let name = sanitize_filename(&"c".repeat(300));
        assert_eq!(name, "c".repeat(MAX_FILENAME_CHARS));
        let odd = format!("x.{}", "y".repeat(200));
        assert_eq!(sanitize_filename(&odd).len(), MAX_FILENAME_CHARS);
    }

    #[test]
    fn test_stored_name_and_url() {
        let name = stored_image_name(1_700_000_000_000, "beach day.jpg");
        assert_eq!(name, "1700000000000_beach_day.jpg");
        assert_eq!(public_upload_url(&name), "/uploads/1700000000000_beach_day.jpg");
        assert!(is_valid_stored_name(&name));
    }

    #[test]
    fn test_invalid_stored_names() {
        assert!(!is_valid_stored_name(""));
        assert!(!is_valid_stored_name(".."));
        assert!(!is_valid_stored_name("a/b.png"));
        assert!(!is_valid_stored_name("a%2Fb"));
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for("a.JPG"), "image/jpeg");
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
        assert_eq!(content_type_for("page.html"), "application/octet-stream");
        assert_eq!(content_type_for("icon.svg"), "application/octet-stream");
    }
}
