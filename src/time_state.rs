use chrono::{Local, NaiveDateTime, TimeZone};

use super::hand::HandKind;

pub const DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Rotation of each hand in whole degrees, clockwise from 12 o'clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandAngles {
    pub second: u32,
    pub minute: u32,
    pub hour: u32,
}

impl HandAngles {
    pub fn degrees(&self, kind: HandKind) -> f32 {
        let angle = match kind {
            HandKind::Second => self.second,
            HandKind::Minute => self.minute,
            HandKind::Hour => self.hour,
        };
        angle as f32
    }
}

/// The single counter every hand angle is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeState {
    /// Never negative
    elapsed_seconds: i64,
}

impl TimeState {
    pub fn new(elapsed_seconds: i64) -> Self {
        Self {
            elapsed_seconds: clamp_seconds(elapsed_seconds),
        }
    }

    /// Parses `yyyy/MM/dd HH:mm:ss` as local wall time, falling back to now.
    pub fn from_date_str(date: Option<&str>) -> Self {
        let parsed = date.and_then(|date| match parse_epoch_seconds(date) {
            Some(seconds) => Some(seconds),
            None => {
                log::warn!("Unparsable start time {date:?}, using current time");
                None
            }
        });

        Self::new(parsed.unwrap_or_else(|| Local::now().timestamp()))
    }

    pub fn now() -> Self {
        Self::from_date_str(None)
    }

    pub fn tick(&mut self) {
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
    }

    pub fn elapsed_seconds(&self) -> i64 {
        self.elapsed_seconds
    }

    pub fn current_angles(&self) -> HandAngles {
        let s = self.elapsed_seconds;
        let minutes_in_hour = s % 3600 / 60;

        HandAngles {
            second: (s % 60 * 6) as u32,
            minute: (minutes_in_hour * 6) as u32,
            hour: (s / 3600 % 12 * 30 + minutes_in_hour / 12 * 6) as u32,
        }
    }

    pub fn snapshot(&self) -> i64 {
        self.elapsed_seconds
    }

    pub fn restore(&mut self, elapsed_seconds: i64) {
        self.elapsed_seconds = clamp_seconds(elapsed_seconds);
    }
}

fn parse_epoch_seconds(date: &str) -> Option<i64> {
    let naive = NaiveDateTime::parse_from_str(date.trim(), DATE_FORMAT).ok()?;
    // DST gaps have no local instant; folds resolve to the earlier one
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp())
}

fn clamp_seconds(seconds: i64) -> i64 {
    if seconds < 0 {
        log::warn!("Negative elapsed seconds {seconds}, clamping to 0");
    }
    seconds.max(0)
}
