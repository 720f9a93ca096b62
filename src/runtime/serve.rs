//! HTTP handlers over `tiny_http`.

use super::{AssetSource, Bundle, DevAssets};
use crate::bundler::utils::mime;
use chrono::{DateTime, Utc};
use percent_encoding::percent_decode_str;
use std::{io, path::Path, time::SystemTime};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Answers requests from `server` until it shuts down.
///
/// Per-request failures (client hang-ups and the like) are logged and do not
/// stop the loop.
pub fn serve_forever<S: AssetSource>(server: &Server, source: &S) {
    for request in server.incoming_requests() {
        let url = request.url().to_string();
        if let Err(e) = source.serve(request) {
            log::warn!("failed to answer {}: {}", url, e);
        }
    }
}

/// Passthrough file server over the dev-mode root.
pub(super) fn respond_dev(assets: &DevAssets, request: Request) -> io::Result<()> {
    let Some(mut name) = allowed_request(&request) else {
        return respond_status(request, 405, "405 method not allowed\n");
    };
    if assets.resolve(&name).is_some_and(|p| p.is_dir()) {
        name = format!("{}/index.html", name.trim_end_matches('/'));
    }

    let file = match assets.open(&name) {
        Ok(file) => file,
        Err(e) if e.is_not_found() => return respond_status(request, 404, NOT_FOUND_BODY),
        Err(e) => {
            log::warn!("dev asset {}: {}", name, e);
            return respond_status(request, 500, "500 internal server error\n");
        }
    };
    let metadata = file.metadata()?;

    let headers = [
        header("Content-Type", content_type(mime::from_path(Path::new(&name)))),
        metadata
            .modified()
            .ok()
            .and_then(|t| header("Last-Modified", &http_date(t))),
    ];
    let response = Response::new(
        StatusCode(200),
        headers.into_iter().flatten().collect(),
        file,
        usize::try_from(metadata.len()).ok(),
        None,
    );
    request.respond(response)
}

/// Serves the embedded bundle, passing gzip payloads through when accepted.
pub(super) fn respond_embedded(bundle: &Bundle, request: Request) -> io::Result<()> {
    let Some(mut name) = allowed_request(&request) else {
        return respond_status(request, 405, "405 method not allowed\n");
    };
    if bundle.get(&name).is_none() {
        let index = format!("{}/index.html", name.trim_end_matches('/'));
        if bundle.get(&index).is_some() {
            name = index;
        }
    }

    let Some(asset) = bundle.get(&name) else {
        return respond_status(request, 404, NOT_FOUND_BODY);
    };

    let etag = format!("\"{}\"", asset.hash());
    if header_value(&request, "If-None-Match").is_some_and(|v| v == etag) {
        return respond_status(request, 304, "");
    }

    let mut headers: Vec<Header> = [
        header("Content-Type", content_type(asset.mime_type())),
        header("Last-Modified", &http_date(asset.modified_at())),
        header("ETag", &etag),
        header("Vary", "Accept-Encoding"),
    ]
    .into_iter()
    .flatten()
    .collect();

    let gzip_accepted = header_value(&request, "Accept-Encoding").is_some_and(accepts_gzip);

    if asset.is_compressed() && gzip_accepted {
        headers.extend(header("Content-Encoding", "gzip"));
        let body = asset.payload().clone();
        let len = body.len();
        let response = Response::new(StatusCode(200), headers, io::Cursor::new(body), Some(len), None);
        return request.respond(response);
    }

    let len = usize::try_from(asset.size()).ok();
    let response = Response::new(StatusCode(200), headers, asset.reader(), len, None);
    request.respond(response)
}

/// Relative id requested by a GET/HEAD, `None` for any other method.
fn allowed_request(request: &Request) -> Option<String> {
    match request.method() {
        Method::Get | Method::Head => Some(request_name(request.url())),
        _ => None,
    }
}

/// Turns a request URL into a relative id: query dropped, percent-decoded,
/// leading `/` removed, `index.html` appended for directory URLs.
fn request_name(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    let name = decoded.trim_start_matches('/');
    if name.is_empty() || name.ends_with('/') {
        format!("{name}index.html")
    } else {
        name.to_string()
    }
}

/// True when an `Accept-Encoding` value lists `gzip` (or `*`) with a
/// non-zero quality. An explicit `gzip` entry wins over `*`.
fn accepts_gzip(value: &str) -> bool {
    let mut wildcard = None;
    for entry in value.split(',') {
        let mut params = entry.split(';');
        let coding = params.next().unwrap_or_default().trim();
        let quality = params
            .filter_map(|p| p.trim().strip_prefix("q=").or_else(|| p.trim().strip_prefix("Q=")))
            .find_map(|q| q.trim().parse::<f32>().ok())
            .unwrap_or(1.0);

        if coding.eq_ignore_ascii_case("gzip") || coding.eq_ignore_ascii_case("x-gzip") {
            return quality > 0.0;
        }
        if coding == "*" {
            wildcard = Some(quality > 0.0);
        }
    }
    wildcard.unwrap_or(false)
}

fn respond_status(request: Request, status: u16, body: &str) -> io::Result<()> {
    request.respond(Response::from_string(body).with_status_code(StatusCode(status)))
}

fn header(field: &str, value: &str) -> Option<Header> {
    Header::from_bytes(field.as_bytes(), value.as_bytes()).ok()
}

fn header_value<'a>(request: &'a Request, field: &str) -> Option<&'a str> {
    request
        .headers()
        .iter()
        .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case(field))
        .map(|h| h.value.as_str())
}

fn content_type(value: &str) -> &str {
    if value.is_empty() { mime::OCTET_STREAM } else { value }
}

fn http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_names() {
        assert_eq!(request_name("/"), "index.html");
        assert_eq!(request_name("/css/site.css?v=3"), "css/site.css");
        assert_eq!(request_name("/docs/"), "docs/index.html");
        assert_eq!(request_name("/hello%20world.txt"), "hello world.txt");
    }

    #[test]
    fn gzip_quality_values() {
        assert!(accepts_gzip("gzip, br"));
        assert!(accepts_gzip("br;q=1.0, gzip;q=0.5"));
        assert!(accepts_gzip("*"));
        assert!(!accepts_gzip("gzip;q=0, identity"));
        assert!(!accepts_gzip("gzip; q=0.000"));
        assert!(!accepts_gzip("*;q=0"));
        assert!(!accepts_gzip("identity"));
        assert!(!accepts_gzip("gzipx"));
    }

    #[test]
    fn http_dates_are_imf_fixdate() {
        assert_eq!(
            http_date(SystemTime::UNIX_EPOCH),
            "Thu, 01 Jan 1970 00:00:00 GMT"
        );
    }

    #[test]
    fn unknown_types_fall_back_to_octet_stream() {
        assert_eq!(content_type(""), "application/octet-stream");
        assert_eq!(content_type("image/png"), "image/png");
    }
}
