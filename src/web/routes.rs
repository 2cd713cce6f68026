//! HTTP routes: the upload form and the conversion endpoint.
//!
//! Every conversion-time failure is logged and turned into a redirect back to
//! the form with a plain-language message; the only non-redirect failure is
//! the 413 for oversize bodies. Raw errors never reach the browser.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::{AppConfig, ConversionRequest};
use crate::processing;
use crate::utils::formats::{naive_mime_type, ImageFormat, OUTPUT_EXTENSIONS};
use crate::utils::fs::{sanitize_file_stem, unique_file_name, TempFileGuard};
use crate::web::templates;

const DEFAULT_OUTPUT_FORMAT: &str = "jpg";

/// Build the application router around a shared config.
pub fn router(config: Arc<AppConfig>) -> Router {
    let body_limit = config.max_upload_bytes;
    Router::new()
        .route("/", get(index))
        .route("/convert", post(convert))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(config)
}

#[derive(Debug, Deserialize)]
struct IndexParams {
    message: Option<String>,
}

async fn index(
    State(config): State<Arc<AppConfig>>,
    Query(params): Query<IndexParams>,
) -> Html<String> {
    Html(templates::index_page(
        params.message.as_deref(),
        config.max_upload_mib(),
    ))
}

async fn convert(
    State(config): State<Arc<AppConfig>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    // Declared Content-Length over the cap: refuse before reading the body.
    if let Some(length) = declared_content_length(&headers) {
        if length > config.max_upload_bytes as u64 {
            return too_large(&config);
        }
    }

    let mut original_name: Option<String> = None;
    let mut file_bytes: Option<axum::body::Bytes> = None;
    let mut requested_format: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return multipart_failure(&config, e),
        };

        match field.name() {
            Some("file") => {
                original_name = field.file_name().map(str::to_string);
                match field.bytes().await {
                    Ok(bytes) => file_bytes = Some(bytes),
                    Err(e) => return multipart_failure(&config, e),
                }
            }
            Some("output_format") => match field.text().await {
                Ok(text) => requested_format = Some(text),
                Err(e) => return multipart_failure(&config, e),
            },
            _ => {}
        }
    }

    let Some(original_name) = original_name.filter(|name| !name.is_empty()) else {
        return redirect_with_message("No file provided");
    };
    let Some(file_bytes) = file_bytes.filter(|bytes| !bytes.is_empty()) else {
        return redirect_with_message("No file provided");
    };

    // Reject disallowed input extensions before anything touches the disk.
    let input_ext = match input_extension(&original_name) {
        Some(ext) => ext,
        None => {
            debug!("Rejected upload with disallowed name: {:?}", original_name);
            return redirect_with_message("File type not allowed");
        }
    };

    let output_ext = requested_format
        .as_deref()
        .filter(|ext| OUTPUT_EXTENSIONS.contains(ext))
        .unwrap_or(DEFAULT_OUTPUT_FORMAT)
        .to_string();

    let base = sanitize_file_stem(&original_name);
    let unique_id = Uuid::new_v4();
    let input_path = config
        .upload_dir
        .join(unique_file_name(&base, &unique_id, &input_ext));
    let output_path = config
        .output_dir
        .join(unique_file_name(&base, &unique_id, &output_ext));

    // Both temp files go away when the guard drops, on every exit path.
    let mut guard = TempFileGuard::new();
    guard.track(&input_path);
    guard.track(&output_path);

    if let Err(e) = tokio::fs::write(&input_path, &file_bytes).await {
        warn!("Failed to stage upload {}: {}", input_path.display(), e);
        return redirect_with_message("Error converting image: could not store upload");
    }

    let request = ConversionRequest::new(&input_path, &output_path);
    let outcome = tokio::task::spawn_blocking(move || {
        processing::convert(request.input(), request.output())
    })
    .await;

    match outcome {
        Ok(Ok(())) => match tokio::fs::read(&output_path).await {
            Ok(data) => {
                info!(
                    "Converted {:?} -> {} ({} bytes)",
                    original_name,
                    output_path.display(),
                    data.len()
                );
                download_response(&base, &output_ext, data)
            }
            Err(e) => {
                warn!("Converted file unreadable {}: {}", output_path.display(), e);
                redirect_with_message("Error converting image: output not readable")
            }
        },
        Ok(Err(e)) => {
            warn!("Conversion failed for {:?}: {}", original_name, e);
            redirect_with_message(&format!("Error converting image: {e}"))
        }
        Err(e) => {
            warn!("Conversion task panicked for {:?}: {}", original_name, e);
            redirect_with_message("Error converting image: internal error")
        }
    }
}

/// The input extension, lowercase, when it belongs to the allow-list.
fn input_extension(file_name: &str) -> Option<String> {
    let ext = PathBuf::from(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())?;
    ImageFormat::from_str(&ext).ok().map(|_| ext)
}

fn declared_content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

fn download_response(base: &str, output_ext: &str, data: Vec<u8>) -> Response {
    let download_name = format!("{base}.{output_ext}");
    (
        [
            (header::CONTENT_TYPE, naive_mime_type(output_ext)),
            (
                header::CONTENT_DISPOSITION,
                format!(r#"attachment; filename="{download_name}""#),
            ),
        ],
        data,
    )
        .into_response()
}

/// Nearest equivalent of a session flash: the form renders the `message`
/// query parameter after the redirect.
fn redirect_with_message(message: &str) -> Response {
    Redirect::to(&format!("/?message={}", urlencode(message))).into_response()
}

fn too_large(config: &AppConfig) -> Response {
    let message = format!("File too large (max {}MB)", config.max_upload_mib());
    (
        StatusCode::PAYLOAD_TOO_LARGE,
        Html(templates::index_page(
            Some(&message),
            config.max_upload_mib(),
        )),
    )
        .into_response()
}

fn multipart_failure(config: &AppConfig, error: MultipartError) -> Response {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return too_large(config);
    }
    warn!("Failed to read multipart body: {}", error);
    redirect_with_message("Error converting image: malformed upload")
}

fn urlencode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_extension_filters_the_allow_list() {
        assert_eq!(input_extension("IMG_0042.HEIC").as_deref(), Some("heic"));
        assert_eq!(input_extension("photo.jpeg").as_deref(), Some("jpeg"));
        assert_eq!(input_extension("photo.webp"), None);
        assert_eq!(input_extension("no-extension"), None);
    }

    #[test]
    fn urlencode_round_trips_through_query_parsing() {
        assert_eq!(urlencode("No file provided"), "No%20file%20provided");
        assert_eq!(urlencode("a&b=c"), "a%26b%3Dc");
    }
}
