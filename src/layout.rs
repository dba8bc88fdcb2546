//! Grid layout for one schedule day.
//!
//! The vertical axis is a minutes-since-midnight scale between a fixed day start and day end.
//! Fixed gaps in the programme (gates opening, lunch, coffee) are removed from that scale, so the
//! space a talk occupies tracks session time rather than wall-clock time. Positions are then
//! normalized into `[0, 1]` and scaled to the column by the board.
//!
//! The horizontal axis is one column per room, in [`RoomOrder`]. Talks in the [`ALL_ROOMS`]
//! pseudo-room span the full width.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, FixedOffset, Timelike};

use crate::{
    error::{GridError, GridResult},
    model::Talk,
};

/// Room id of slots that span every room (keynotes, breaks).
pub const ALL_ROOMS: &str = "all";

/// Rooms with a fixed column position, left to right. Anything else goes after them.
pub const ROOM_PRIORITY: [&str; 4] = ["Moebius", "Blin", "2.02", "2.04"];

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Map a rect in unit space onto `frame`.
    pub fn within(self, frame: Rect) -> Rect {
        Rect {
            x: frame.x + self.x * frame.w,
            y: frame.y + self.y * frame.h,
            w: self.w * frame.w,
            h: self.h * frame.h,
        }
    }
}

/// A stretch of the day removed from the vertical scale.
///
/// The gap applies to a minute value (relative to day start) at or after `from`; when
/// `inclusive` is false it applies strictly after `from`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gap {
    pub name: &'static str,
    pub from: f64,
    pub minutes: f64,
    pub inclusive: bool,
}

impl Gap {
    fn applies_to(&self, minute: f64) -> bool {
        if self.inclusive {
            minute >= self.from
        } else {
            minute > self.from
        }
    }
}

pub const OPENING_GAP: Gap = Gap {
    name: "opening",
    from: 30.0,
    minutes: 30.0,
    inclusive: true,
};
pub const LUNCH_GAP: Gap = Gap {
    name: "lunch",
    from: 4.0 * 60.0 + 30.0,
    minutes: 90.0,
    inclusive: true,
};
pub const COFFEE_GAP: Gap = Gap {
    name: "coffee",
    from: 7.0 * 60.0 + 45.0,
    minutes: 15.0,
    inclusive: false,
};

/// The vertical time axis of a day column.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimeScale {
    pub day_start_minute: f64,
    pub day_end_minute: f64,
    /// Applied in order; each gap is tested against the uncompressed minute.
    #[serde(skip)]
    pub gaps: Vec<Gap>,
    /// Wall-clock offset used to read minutes and days out of epoch seconds.
    pub utc_offset_hours: i32,
}

impl Default for TimeScale {
    fn default() -> Self {
        Self {
            day_start_minute: 8.0 * 60.0,
            day_end_minute: 18.0 * 60.0 + 5.0,
            gaps: vec![OPENING_GAP, LUNCH_GAP, COFFEE_GAP],
            utc_offset_hours: 2,
        }
    }
}

impl TimeScale {
    pub fn validate(&self) -> GridResult<()> {
        if self.day_end_minute <= self.day_start_minute {
            return Err(GridError::config("day end must be after day start"));
        }
        if self.compressed_day_minutes() <= 0.0 {
            return Err(GridError::config(
                "gaps leave no time in the day after compression",
            ));
        }
        self.offset()?;
        Ok(())
    }

    pub fn offset(&self) -> GridResult<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_hours * 3600).ok_or_else(|| {
            GridError::config(format!(
                "utc offset {}h is out of range",
                self.utc_offset_hours
            ))
        })
    }

    /// Remove every applicable gap from `minute` (relative to day start).
    pub fn compress(&self, minute: f64) -> f64 {
        let mut ret = minute;
        for gap in &self.gaps {
            if gap.applies_to(minute) {
                ret -= gap.minutes;
            }
        }
        ret
    }

    /// Compressed length of the range `start..end`.
    pub fn compress_span(&self, start: f64, end: f64) -> f64 {
        self.compress(end) - self.compress(start)
    }

    pub fn compressed_day_minutes(&self) -> f64 {
        let gaps: f64 = self.gaps.iter().map(|g| g.minutes).sum();
        self.day_end_minute - self.day_start_minute - gaps
    }

    pub fn normalize(&self, compressed_minute: f64) -> f64 {
        compressed_minute / self.compressed_day_minutes()
    }

    /// Normalized vertical position of a wall-clock minute of day.
    pub fn position_of(&self, minute_of_day: u32) -> f64 {
        self.normalize(self.compress(f64::from(minute_of_day) - self.day_start_minute))
    }

    fn local_time(&self, epoch_secs: i64) -> GridResult<DateTime<FixedOffset>> {
        let offset = self.offset()?;
        DateTime::from_timestamp(epoch_secs, 0)
            .map(|utc| utc.with_timezone(&offset))
            .ok_or_else(|| {
                GridError::malformed("timestamp", format!("{epoch_secs} is out of range"))
            })
    }

    pub fn minute_of_day(&self, epoch_secs: i64) -> GridResult<u32> {
        let t = self.local_time(epoch_secs)?;
        Ok(t.hour() * 60 + t.minute())
    }

    pub fn day_of_month(&self, epoch_secs: i64) -> GridResult<u32> {
        Ok(self.local_time(epoch_secs)?.day())
    }
}

/// Column order of the rooms found in a talk list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomOrder {
    rooms: Vec<String>,
}

impl RoomOrder {
    /// Distinct rooms in discovery order, then stably sorted by [`ROOM_PRIORITY`].
    pub fn from_talks<'a>(talks: impl IntoIterator<Item = &'a Talk>) -> Self {
        let mut rooms = Vec::<String>::new();
        for talk in talks {
            if talk.room_id != ALL_ROOMS && !rooms.contains(&talk.room_id) {
                rooms.push(talk.room_id.clone());
            }
        }
        rooms.sort_by_key(|room| room_priority(room));
        Self { rooms }
    }

    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn index_of(&self, room_id: &str) -> Option<usize> {
        self.rooms.iter().position(|r| r == room_id)
    }

    /// Horizontal `(x, w)` of a room in unit space.
    pub fn column(&self, room_id: &str) -> GridResult<(f64, f64)> {
        if room_id == ALL_ROOMS {
            return Ok((0.0, 1.0));
        }
        let idx = self
            .index_of(room_id)
            .ok_or_else(|| GridError::malformed("layout", format!("unknown room '{room_id}'")))?;
        let n = self.rooms.len() as f64;
        Ok((idx as f64 / n, 1.0 / n))
    }
}

fn room_priority(room: &str) -> usize {
    ROOM_PRIORITY
        .iter()
        .position(|r| *r == room)
        .unwrap_or(ROOM_PRIORITY.len())
}

/// A talk and its rect in normalized space.
#[derive(Clone, Copy, Debug)]
pub struct PlacedTalk<'a> {
    pub talk: &'a Talk,
    pub rect: Rect,
}

/// Place every talk of one day. Output follows input order.
///
/// Rects are keyed by talk id and start time: when two talks share both, the later one's rect
/// wins and both are placed there.
pub fn layout_day<'a>(
    talks: &[&'a Talk],
    rooms: &RoomOrder,
    scale: &TimeScale,
) -> GridResult<Vec<PlacedTalk<'a>>> {
    let mut raw = HashMap::<(&str, i64), Rect>::with_capacity(talks.len());
    for talk in talks {
        let (x, w) = rooms.column(&talk.room_id)?;
        let start = scale.minute_of_day(talk.start_epoch_secs)?;
        let end = scale.minute_of_day(talk.end_epoch_secs)?;
        let y = f64::from(start) - scale.day_start_minute;
        let h = f64::from(end) - f64::from(start);
        raw.insert((talk.id.as_str(), talk.start_epoch_secs), Rect::new(x, y, w, h));
    }

    let normalized: HashMap<_, _> = raw
        .into_iter()
        .map(|(key, r)| {
            let y = scale.normalize(scale.compress(r.y));
            let h = scale.normalize(scale.compress_span(r.y, r.y + r.h));
            (key, Rect::new(r.x, y, r.w, h))
        })
        .collect();

    talks
        .iter()
        .map(|&talk| {
            normalized
                .get(&(talk.id.as_str(), talk.start_epoch_secs))
                .map(|&rect| PlacedTalk { talk, rect })
                .ok_or_else(|| {
                    GridError::Other(anyhow::anyhow!("talk '{}' lost its rect", talk.id))
                })
        })
        .collect()
}

/// Clock time printed in the gutter at a row's vertical position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeMark {
    pub position: f64,
    pub hour: u32,
    pub minute: u32,
}

impl TimeMark {
    pub fn hour_label(&self) -> String {
        format!("{:02}", self.hour)
    }

    pub fn minute_label(&self) -> String {
        format!("{:02}", self.minute)
    }
}

/// One mark per distinct start time, in first-appearance order.
pub fn time_marks(talks: &[&Talk], scale: &TimeScale) -> GridResult<Vec<TimeMark>> {
    let mut seen = Vec::<i64>::new();
    let mut out = Vec::new();
    for talk in talks {
        if seen.contains(&talk.start_epoch_secs) {
            continue;
        }
        seen.push(talk.start_epoch_secs);
        let minute_of_day = scale.minute_of_day(talk.start_epoch_secs)?;
        out.push(TimeMark {
            position: scale.position_of(minute_of_day),
            hour: minute_of_day / 60,
            minute: minute_of_day % 60,
        });
    }
    Ok(out)
}

/// Group talks by local day of month, earliest day first, dropping `excluded` talk ids.
pub fn split_days<'a>(
    talks: &'a [Talk],
    scale: &TimeScale,
    excluded: &[String],
) -> GridResult<Vec<Vec<&'a Talk>>> {
    let mut days = BTreeMap::<u32, Vec<&Talk>>::new();
    for talk in talks {
        if excluded.iter().any(|id| *id == talk.id) {
            continue;
        }
        let day = scale.day_of_month(talk.start_epoch_secs)?;
        days.entry(day).or_default().push(talk);
    }
    Ok(days.into_values().collect())
}
