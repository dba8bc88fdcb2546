use std::{fs::File, io::BufReader, path::Path};

use crate::{
    error::{GridError, GridResult},
    layout::TimeScale,
    loader::DataFiles,
};

/// Talk id of the evening social event, which has no place in the grid.
pub const SOCIAL_EVENT_ID: &str = "party";

/// Everything about the board that is fixed for a given conference.
///
/// Every field has a default, so a JSON override file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub background: String,
    pub grid_stroke: String,
    /// Width of the gutter holding the hour/minute labels.
    pub time_gutter: f64,
    /// Side of the square speaker avatars.
    pub avatar_side: f64,
    /// Baseline offset of titles and time labels below their row top.
    pub label_offset: f64,
    pub excluded_talks: Vec<String>,
    pub time: TimeScale,
    pub files: DataFiles,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            padding: 25.0,
            background: "#FFFFFF".to_string(),
            grid_stroke: "#636363".to_string(),
            time_gutter: 50.0,
            avatar_side: 30.0,
            label_offset: 10.0,
            excluded_talks: vec![SOCIAL_EVENT_ID.to_string()],
            time: TimeScale::default(),
            files: DataFiles::default(),
        }
    }
}

impl BoardConfig {
    pub fn from_path(path: &Path) -> GridResult<Self> {
        let f = File::open(path).map_err(|e| {
            GridError::config(format!("open config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            GridError::config(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> GridResult<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(GridError::config("canvas width/height must be > 0"));
        }
        if self.padding < 0.0 || self.time_gutter < 0.0 || self.avatar_side < 0.0 {
            return Err(GridError::config(
                "padding, time_gutter and avatar_side must be >= 0",
            ));
        }
        if self.column_width() <= self.time_gutter {
            return Err(GridError::config(
                "day columns are too narrow for the padding and time gutter",
            ));
        }
        if self.column_height() <= 0.0 {
            return Err(GridError::config("padding leaves no room for the grid"));
        }
        self.time.validate()
    }

    /// Width of one day column.
    pub fn column_width(&self) -> f64 {
        self.width / 2.0 - 2.0 * self.padding
    }

    pub fn column_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }
}
