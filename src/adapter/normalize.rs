//! Raw resource to [`Metadata`] normalisation

use chrono::DateTime;
use tracing::debug;

use crate::api::RawResource;
use crate::fs::{FsError, Metadata};

/// Normalises a raw resource descriptor.
///
/// Only the key is mandatory. A missing size, timestamp or MIME type stays
/// unset and a missing version becomes 1.
pub fn normalize_metadata(resource: RawResource) -> Result<Metadata, FsError> {
    let path = match resource.path {
        Some(path) if !path.is_empty() => path,
        _ => {
            return Err(FsError::Malformed {
                message: "resource descriptor has no path".to_string(),
            })
        }
    };

    let timestamp = resource
        .created_at
        .as_deref()
        .and_then(|created_at| match DateTime::parse_from_rfc3339(created_at) {
            Ok(parsed) => Some(parsed.timestamp()),
            Err(e) => {
                debug!("Ignoring unparseable created_at '{}' for {}: {}", created_at, path, e);
                None
            }
        });

    let mime_type = mime_type_for(
        &path,
        resource.resource_type.as_deref(),
        resource.format.as_deref(),
    );

    Ok(Metadata {
        size: resource.bytes,
        timestamp,
        version: resource.version.unwrap_or(1),
        mime_type,
        ..Metadata::file(path)
    })
}

/// Best-effort MIME type from the reported format, falling back to the key's
/// extension for raw uploads, which carry it in the key instead.
fn mime_type_for(path: &str, resource_type: Option<&str>, format: Option<&str>) -> Option<String> {
    let extension = format.map(str::to_string).or_else(|| {
        let name = path.rsplit('/').next().unwrap_or(path);
        name.rsplit_once('.').map(|(_, ext)| ext.to_string())
    });

    if let Some(known) = extension
        .as_deref()
        .and_then(|ext| mime_for_extension(&ext.to_lowercase()))
    {
        return Some(known.to_string());
    }

    match (resource_type, extension) {
        (Some("image"), Some(ext)) => Some(format!("image/{}", ext.to_lowercase())),
        (Some("video"), Some(ext)) => Some(format!("video/{}", ext.to_lowercase())),
        (Some("raw"), _) => Some("application/octet-stream".to_string()),
        _ => None,
    }
}

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let mime = match ext {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        "json" => "application/json",
        "xml" => "application/xml",
        "zip" => "application/zip",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "md" => "text/markdown",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "text/javascript",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        _ => return None,
    };
    Some(mime)
}
