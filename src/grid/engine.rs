use crate::api::time::{format_hour_label, format_time_range, parse_time};

use super::{CourseBlock, DisplayWindow, PositionedSegment, SegmentRole, PALETTE_SIZE};

const MINUTES_PER_ROW: u32 = 60;

/// Parse and clip a block to the display window.
///
/// Returns the visible `[start, end)` in minutes since midnight, or `None` when
/// the block is malformed, inverted, or entirely outside the window.
pub fn clip(block: &CourseBlock, window: DisplayWindow) -> Option<(u32, u32)> {
    let start = parse_time(&block.start)?;
    let end = parse_time(&block.end)?;
    if end <= start {
        return None;
    }

    let clipped_start = start.max(window.start_minute());
    let clipped_end = end.min(window.end_minute());
    if clipped_end <= clipped_start {
        return None;
    }

    Some((clipped_start, clipped_end))
}

/// Classify the row `[row_start, row_end)` for a clipped course interval.
/// `None` when the course does not overlap the row.
pub fn classify_row(clipped_start: u32, clipped_end: u32, row_start: u32, row_end: u32) -> Option<SegmentRole> {
    let overlap_start = clipped_start.max(row_start);
    let overlap_end = clipped_end.min(row_end);
    if overlap_end <= overlap_start {
        return None;
    }

    let is_first_row = clipped_start >= row_start && clipped_start < row_end;
    let is_last_row = clipped_end > row_start && clipped_end <= row_end;

    let role = match (is_first_row, is_last_row) {
        (true, true) => SegmentRole::Single,
        (true, false) => SegmentRole::Start,
        (false, true) => SegmentRole::End,
        (false, false) => SegmentRole::Middle,
    };
    Some(role)
}

/// Every row a block touches, with its role. Same for each of the block's days.
pub fn classify_rows(block: &CourseBlock, window: DisplayWindow) -> Vec<(u32, SegmentRole)> {
    let Some((clipped_start, clipped_end)) = clip(block, window) else {
        return Vec::new();
    };

    window
        .row_hours()
        .filter_map(|hour| {
            let row_start = hour * MINUTES_PER_ROW;
            classify_row(clipped_start, clipped_end, row_start, row_start + MINUTES_PER_ROW)
                .map(|role| (hour, role))
        })
        .collect()
}

/// Project courses onto the weekly grid.
///
/// Emits one segment per (block, day) anchored at the row where the block
/// starts. Malformed or out-of-window blocks produce nothing. Day tokens are
/// lower-cased but not checked against the grid; unknown days simply never
/// match a cell when rendered.
pub fn project(blocks: &[CourseBlock], window: DisplayWindow) -> Vec<PositionedSegment> {
    let mut segments = Vec::new();

    for (block_index, block) in blocks.iter().enumerate() {
        if block.days.is_empty() || block.start.is_empty() || block.end.is_empty() {
            log::debug!("skipping course {:?}: missing days or times", block.id);
            continue;
        }

        let Some((clipped_start, clipped_end)) = clip(block, window) else {
            log::debug!(
                "skipping course {:?}: {:?}-{:?} not visible in {}:00-{}:00",
                block.id,
                block.start,
                block.end,
                window.start_hour(),
                window.end_hour()
            );
            continue;
        };

        let color_index = block_index % PALETTE_SIZE;
        let total_duration = (clipped_end - clipped_start) as f64;
        let height_percent = total_duration / MINUTES_PER_ROW as f64 * 100.0;
        let time_range = format_time_range(&block.start, &block.end);

        for day in &block.days {
            let day_key = day.to_lowercase();

            for hour in window.row_hours() {
                let row_start = hour * MINUTES_PER_ROW;
                let row_end = row_start + MINUTES_PER_ROW;

                let Some(role) = classify_row(clipped_start, clipped_end, row_start, row_end) else {
                    continue;
                };
                if !role.is_emitted() {
                    continue;
                }

                let top_percent = (clipped_start - row_start) as f64 / MINUTES_PER_ROW as f64 * 100.0;

                segments.push(PositionedSegment {
                    day_key: day_key.clone(),
                    hour,
                    hour_label: format_hour_label(hour),
                    top_percent,
                    height_percent,
                    role,
                    color_index,
                    block_index,
                    course_id: block.id.clone(),
                    time_range: time_range.clone(),
                });
            }
        }
    }

    log::trace!("projected {} courses into {} segments", blocks.len(), segments.len());
    segments
}
