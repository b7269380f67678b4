//! Rules for uploaded files: accepted mime types, size limits and the
//! storage keys files are written under.

/// Image types accepted for campaign, project and profile images.
pub const IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// File types accepted for exclusive content.
pub const CONTENT_MIME_TYPES: &[&str] = &[
    "video/mp4",
    "video/webm",
    "audio/mpeg",
    "audio/wav",
    "application/pdf",
    "image/jpeg",
    "image/png",
    "text/plain",
    "text/markdown",
];

/// Campaign and project images: 10 MB.
pub const MAX_CAMPAIGN_IMAGE_BYTES: usize = 10 * 1024 * 1024;
/// Profile and cover images: 5 MB.
pub const MAX_PROFILE_IMAGE_BYTES: usize = 5 * 1024 * 1024;
/// Exclusive content files: 50 MB.
pub const MAX_CONTENT_FILE_BYTES: usize = 50 * 1024 * 1024;

pub const CONTENT_TYPE_VIDEO: &str = "video";
pub const CONTENT_TYPE_AUDIO: &str = "audio";
pub const CONTENT_TYPE_IMAGE: &str = "image";
pub const CONTENT_TYPE_PDF: &str = "pdf";
pub const CONTENT_TYPE_TEXT: &str = "text";

/// Check a file against an allow-list and a size limit.
pub fn validate_upload(
    mime: &str,
    size: usize,
    allowed: &[&str],
    max_bytes: usize,
) -> Result<(), String> {
    if !allowed.contains(&mime) {
        return Err(format!(
            "Invalid file type '{mime}'. Allowed: {}",
            allowed.join(", ")
        ));
    }
    if size > max_bytes {
        return Err(format!(
            "File too large ({size} bytes). Maximum is {} MB",
            max_bytes / (1024 * 1024)
        ));
    }
    Ok(())
}

/// Derive the exclusive-content type from an upload's mime type.
///
/// Anything that is not audio, image, PDF or text is treated as video.
pub fn content_type_for_mime(mime: &str) -> &'static str {
    if mime.starts_with("text/") {
        CONTENT_TYPE_TEXT
    } else if mime.starts_with("audio/") {
        CONTENT_TYPE_AUDIO
    } else if mime.starts_with("image/") {
        CONTENT_TYPE_IMAGE
    } else if mime == "application/pdf" {
        CONTENT_TYPE_PDF
    } else {
        CONTENT_TYPE_VIDEO
    }
}

/// Extension of `filename` including the dot, lowercased, or empty.
fn extension(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            let ext: String = ext
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect();
            if ext.is_empty() {
                String::new()
            } else {
                format!(".{}", ext.to_lowercase())
            }
        }
        _ => String::new(),
    }
}

/// Build a collision-free storage key: `{destination}/{16 hex chars}{.ext}`.
///
/// Path separators and dot segments are stripped from `destination` so a
/// page name or title can never escape the upload root.
pub fn storage_key(destination: &str, original_filename: &str) -> String {
    let dir: Vec<&str> = destination
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != "." && *seg != "..")
        .collect();
    let random: [u8; 8] = rand::random();
    format!(
        "{}/{}{}",
        dir.join("/"),
        hex::encode(random),
        extension(original_filename)
    )
}
