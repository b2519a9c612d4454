//! Custom protocol handlers for efficient data transfer
//!
//! This module implements the `frame://` custom protocol for direct binary
//! transfer of render frames, bypassing Tauri's IPC JSON serialization.

use image::{codecs::jpeg::JpegEncoder, ImageBuffer, ImageEncoder, Rgba};
use log::{debug, warn};
use tauri::http::Response as HttpResponse;

use super::shared_state::{SharedFrameBuffer, SharedPerfStats};
use crate::config::{compression::JPEG_QUALITY, RENDER_HEIGHT, RENDER_WIDTH};

type Response = HttpResponse<Vec<u8>>;

/// Handle requests to the custom `frame://` protocol
///
/// Supported endpoints:
/// - `frame` or `frame.jpg`: JPEG-compressed frame
/// - `frame.raw`: Raw RGBA frame
/// - `stats`: Performance statistics as JSON
pub fn handle_frame_protocol(
    uri_path: &str,
    buffer: &SharedFrameBuffer,
    perf_stats: &SharedPerfStats,
) -> Response {
    let resource = uri_path.trim_start_matches('/');
    debug!("[Protocol] Resolved resource: {}", resource);

    match resource {
        "frame" | "frame.jpg" => handle_jpeg_frame(buffer),
        "frame.raw" => handle_raw_frame(buffer),
        "stats" => handle_stats(perf_stats),
        _ => text_response(404, "Not Found"),
    }
}

fn text_response(status: u16, body: &str) -> Response {
    let mut response = HttpResponse::new(body.as_bytes().to_vec());
    *response.status_mut() = tauri::http::StatusCode::from_u16(status)
        .unwrap_or(tauri::http::StatusCode::INTERNAL_SERVER_ERROR);
    response.headers_mut().insert(
        tauri::http::header::CONTENT_TYPE,
        tauri::http::HeaderValue::from_static("text/plain"),
    );
    response
}

fn frame_response(content_type: &str, body: Vec<u8>) -> Response {
    HttpResponse::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("X-Frame-Width", RENDER_WIDTH.to_string())
        .header("X-Frame-Height", RENDER_HEIGHT.to_string())
        .header("Access-Control-Allow-Origin", "*")
        .header(
            "Access-Control-Expose-Headers",
            "X-Frame-Width, X-Frame-Height",
        )
        .body(body)
        .unwrap_or_else(|_| text_response(500, "Failed to build response"))
}

/// Latest frame, or `None` before the first one arrives
fn latest_frame(buffer: &SharedFrameBuffer) -> Result<Option<Vec<u8>>, Response> {
    buffer
        .0
        .lock()
        .map(|guard| guard.clone())
        .map_err(|_| text_response(500, "Frame buffer poisoned"))
}

/// Handle JPEG-compressed frame request
fn handle_jpeg_frame(buffer: &SharedFrameBuffer) -> Response {
    let rgba_data = match latest_frame(buffer) {
        Ok(Some(data)) => data,
        Ok(None) => return text_response(503, "Frame not ready"),
        Err(response) => return response,
    };

    let Some(img) = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(RENDER_WIDTH, RENDER_HEIGHT, rgba_data)
    else {
        return text_response(500, "Frame size mismatch");
    };

    // JPEG has no alpha channel
    let rgb_img = image::DynamicImage::ImageRgba8(img).to_rgb8();

    let mut jpeg_data = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg_data, JPEG_QUALITY);
    if let Err(e) = encoder.write_image(
        rgb_img.as_raw(),
        RENDER_WIDTH,
        RENDER_HEIGHT,
        image::ExtendedColorType::Rgb8,
    ) {
        warn!("[Protocol] JPEG encoding failed: {e}");
        return text_response(500, "Encoding failed");
    }

    frame_response("image/jpeg", jpeg_data)
}

/// Handle raw RGBA frame request
fn handle_raw_frame(buffer: &SharedFrameBuffer) -> Response {
    match latest_frame(buffer) {
        Ok(Some(data)) => frame_response("application/octet-stream", data),
        Ok(None) => text_response(503, "Frame not ready"),
        Err(response) => response,
    }
}

/// Handle performance stats request
fn handle_stats(perf_stats: &SharedPerfStats) -> Response {
    let json = match perf_stats.0.lock() {
        Ok(guard) => serde_json::to_vec(&*guard).unwrap_or_default(),
        Err(_) => return text_response(500, "Stats poisoned"),
    };

    HttpResponse::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(json)
        .unwrap_or_else(|_| text_response(500, "Failed to build response"))
}
