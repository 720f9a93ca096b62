//! Best-effort MIME type lookup by file extension.
//!
//! Unknown extensions map to an empty string; consumers fall back to their
//! own default (`application/octet-stream` when serving).

use std::path::Path;

/// Fallback used when serving an asset without a known type.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Guess the MIME type of `path` from its extension.
pub fn from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    from_extension(ext.as_deref())
}

/// Guess the MIME type for an extension (without the leading dot).
pub fn from_extension(ext: Option<&str>) -> &'static str {
    match ext {
        // Web / Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json" | "map") => "application/json",
        Some("xml") => "text/xml; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",
        Some("md") => "text/markdown; charset=utf-8",
        Some("csv") => "text/csv; charset=utf-8",
        Some("webmanifest") => "application/manifest+json",

        // Images
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Media
        Some("mp3") => "audio/mpeg",
        Some("ogg") => "audio/ogg",
        Some("wav") => "audio/wav",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",

        // Binary
        Some("pdf") => "application/pdf",
        Some("wasm") => "application/wasm",
        Some("zip") => "application/zip",
        Some("gz") => "application/gzip",

        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions() {
        assert_eq!(from_path(Path::new("index.html")), "text/html; charset=utf-8");
        assert_eq!(from_path(Path::new("css/site.css")), "text/css; charset=utf-8");
        assert_eq!(from_path(Path::new("logo.PNG")), "image/png");
        assert_eq!(from_path(Path::new("font.woff2")), "font/woff2");
    }

    #[test]
    fn unknown_is_empty() {
        assert_eq!(from_path(Path::new("LICENSE")), "");
        assert_eq!(from_path(Path::new("data.xyz")), "");
    }
}
