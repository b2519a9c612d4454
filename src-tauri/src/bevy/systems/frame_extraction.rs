//! Frame extraction system
//!
//! Takes the newest readback from the render world, strips the GPU row
//! padding, and publishes the RGBA frame plus timing stats to Tauri.

use std::time::Instant;

use bevy::{prelude::*, render::renderer::RenderDevice, time::Time};
use log::{debug, info};

use crate::bevy::resources::{
    FrameBufferRes, FrameCount, FrameRateLimiter, FrameTimings, MainWorldReceiver, PerfStatsRes,
    PreRollFrames,
};
use crate::config::{performance::*, RENDER_HEIGHT, RENDER_WIDTH};

/// Extract and process frame data from the render pipeline
pub fn extract_and_process_frame(
    receiver: Res<MainWorldReceiver>,
    buffer: Option<Res<FrameBufferRes>>,
    perf_stats: Option<Res<PerfStatsRes>>,
    mut count: ResMut<FrameCount>,
    mut pre_roll: ResMut<PreRollFrames>,
    mut timings: ResMut<FrameTimings>,
    mut frame_limiter: ResMut<FrameRateLimiter>,
    time: Res<Time>,
) {
    let Some(buffer) = buffer else { return };

    // Let the scene load before publishing anything
    if pre_roll.0 > 0 {
        while receiver.try_recv().is_ok() {}
        pre_roll.0 -= 1;
        if pre_roll.0 % 10 == 0 && pre_roll.0 > 0 {
            debug!("[Bevy] Pre-roll frames remaining: {}", pre_roll.0);
        }
        return;
    }

    let now = Instant::now();
    if now.duration_since(frame_limiter.last_frame_time) < frame_limiter.min_frame_interval {
        while receiver.try_recv().is_ok() {}
        return;
    }
    frame_limiter.last_frame_time = now;

    // Only the newest readback matters
    let Some(padded) = receiver.try_iter().last() else {
        return;
    };
    let receive_ms = now.elapsed().as_secs_f64() * 1000.0;

    let process_start = Instant::now();
    let Some(rgba) = remove_row_padding(&padded, RENDER_WIDTH, RENDER_HEIGHT) else {
        return;
    };
    let process_ms = process_start.elapsed().as_secs_f64() * 1000.0;
    let size_kb = rgba.len() as f64 / 1024.0;

    let Ok(mut frame) = buffer.0 .0.lock() else {
        return;
    };
    *frame = Some(rgba);
    drop(frame);
    count.0 += 1;

    let total_ms = now.elapsed().as_secs_f64() * 1000.0;
    let average_ms = timings.record(total_ms);

    if let Some(perf_res) = &perf_stats {
        if let Ok(mut stats) = perf_res.0 .0.lock() {
            stats.gpu_transfer_ms = receive_ms;
            stats.data_processing_ms = process_ms;
            stats.frame_encoding_ms = total_ms;
            stats.frame_count = count.0;
            stats.data_size_kb = size_kb;
            stats.bevy_fps = if average_ms > 0.0 {
                1000.0 / average_ms
            } else {
                0.0
            };
        }
    }

    let elapsed = time.elapsed_secs_f64();
    if elapsed - timings.last_print_time >= STATS_PRINT_INTERVAL {
        let (min_ms, max_ms) = timings.range();
        info!(
            "[Bevy] Frame {} | Receive: {:.2}ms | Process: {:.2}ms | Avg: {:.2}ms (Min: {:.2}ms, Max: {:.2}ms) | Size: {:.1}KB",
            count.0, receive_ms, process_ms, average_ms, min_ms, max_ms, size_kb
        );
        timings.last_print_time = elapsed;
    }
}

/// Remove GPU buffer row padding alignment, returning pure RGBA data
fn remove_row_padding(data: &[u8], width: u32, height: u32) -> Option<Vec<u8>> {
    let row_bytes = width as usize * 4;
    let aligned_row_bytes = RenderDevice::align_copy_bytes_per_row(row_bytes);
    unpad_rows(data, row_bytes, aligned_row_bytes, height as usize)
}

fn unpad_rows(data: &[u8], row_bytes: usize, aligned_row_bytes: usize, rows: usize) -> Option<Vec<u8>> {
    if data.len() < aligned_row_bytes * rows.saturating_sub(1) + row_bytes {
        return None;
    }
    if row_bytes == aligned_row_bytes {
        return Some(data[..row_bytes * rows].to_vec());
    }
    Some(
        data.chunks(aligned_row_bytes)
            .take(rows)
            .flat_map(|row| &row[..row_bytes])
            .copied()
            .collect(),
    )
}
