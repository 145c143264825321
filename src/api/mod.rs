mod types;
mod client;
pub mod time;

pub use types::*;
pub use client::{ScheduleClient, ScheduleError};
pub use time::{format_hour_label, format_time_range, parse_time};
