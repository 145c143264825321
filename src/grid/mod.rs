//! Weekly course grid: projects enrolled courses onto 7 day columns x hourly rows.

mod engine;
mod surface;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::time::format_hour_label;

pub use engine::{classify_row, classify_rows, clip, project};
pub use surface::{render, CellHandle, CellLocator, Overlay, RenderTarget, ScheduleGrid, COURSE_MARKER};

/// Number of colours in the course palette; blocks cycle through it in input order
pub const PALETTE_SIZE: usize = 10;

/// Day columns in display order
pub const GRID_DAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Lower-case three letter key used to address a day column ("mon", "tue", ...)
pub fn day_key(day: Weekday) -> String {
    day_abbrev(day).to_lowercase()
}

/// Column header text for a day ("Mon")
pub fn day_abbrev(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid display window {start}:00-{end}:00 (need start < end <= 24)")]
    InvalidWindow { start: u32, end: u32 },
}

/// One enrolled course as delivered by the schedule API.
///
/// Only `id`, `days`, `start` and `end` drive layout; the rest is label text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseBlock {
    pub id: String,
    pub name: String,
    pub professor: String,
    pub location: String,
    pub days: Vec<String>,
    pub start: String,
    pub end: String,
}

impl CourseBlock {
    /// Days for display on cards: "Mon & Wed"
    pub fn days_text(&self) -> String {
        self.days.join(" & ")
    }
}

/// The hour range the weekly grid renders. Times outside it are clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWindow {
    start_hour: u32,
    end_hour: u32,
}

impl Default for DisplayWindow {
    fn default() -> Self {
        Self {
            start_hour: 7,
            end_hour: 23,
        }
    }
}

impl DisplayWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self, GridError> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(GridError::InvalidWindow {
                start: start_hour,
                end: end_hour,
            });
        }
        Ok(Self { start_hour, end_hour })
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn start_minute(&self) -> u32 {
        self.start_hour * 60
    }

    pub fn end_minute(&self) -> u32 {
        self.end_hour * 60
    }

    /// Hours whose rows can anchor a segment (`start..end`)
    pub fn row_hours(&self) -> std::ops::Range<u32> {
        self.start_hour..self.end_hour
    }

    /// Hours that get a labelled grid row. The closing hour has its own row
    /// ("11:00 PM" for the default window) even though nothing starts there.
    pub fn label_hours(&self) -> std::ops::RangeInclusive<u32> {
        self.start_hour..=self.end_hour.min(23)
    }

    pub fn row_labels(&self) -> Vec<String> {
        self.label_hours().map(format_hour_label).collect()
    }
}

/// Which boundary of a course falls in a given row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentRole {
    /// Course starts and ends inside the row
    Single,
    Start,
    Middle,
    End,
}

impl SegmentRole {
    /// Only the first row of a course spawns a visual element; its height
    /// already reaches into the rows below.
    pub fn is_emitted(self) -> bool {
        matches!(self, SegmentRole::Single | SegmentRole::Start)
    }
}

/// A course block anchored to one grid cell.
///
/// Percentages are relative to a single row (60 minutes). `height_percent`
/// covers the whole clipped course and may exceed 100.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedSegment {
    pub day_key: String,
    pub hour: u32,
    pub hour_label: String,
    pub top_percent: f64,
    pub height_percent: f64,
    pub role: SegmentRole,
    pub color_index: usize,
    pub block_index: usize,
    pub course_id: String,
    pub time_range: String,
}
