use std::{fs::File, io::BufReader, path::Path};

use crate::{
    error::{GridError, GridResult},
    model::{ScheduleData, SessionMap, SpeakerMap},
};

pub const SCHEDULE_FILE: &str = "schedule-app.json";
pub const SESSIONS_FILE: &str = "sessions.json";
pub const SPEAKERS_FILE: &str = "speakers.json";

/// File names of the three input documents inside the data directory.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DataFiles {
    pub schedule: String,
    pub sessions: String,
    pub speakers: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            schedule: SCHEDULE_FILE.to_string(),
            sessions: SESSIONS_FILE.to_string(),
            speakers: SPEAKERS_FILE.to_string(),
        }
    }
}

/// Everything read from the data directory, loaded once and never mutated.
#[derive(Clone, Debug)]
pub struct DataSet {
    pub schedule: ScheduleData,
    pub sessions: SessionMap,
    pub speakers: SpeakerMap,
}

impl DataSet {
    #[tracing::instrument(skip_all, fields(dir = %dir.display()))]
    pub fn load(dir: &Path, files: &DataFiles) -> GridResult<Self> {
        let schedule: ScheduleData = load_json(dir, &files.schedule)?;
        let sessions: SessionMap = load_json(dir, &files.sessions)?;
        let speakers: SpeakerMap = load_json(dir, &files.speakers)?;
        tracing::info!(
            slots = schedule.slots.all.len(),
            sessions = sessions.len(),
            speakers = speakers.len(),
            "loaded schedule data"
        );
        Ok(Self {
            schedule,
            sessions,
            speakers,
        })
    }

    /// Build a data set from in-memory documents.
    pub fn from_json_str(schedule: &str, sessions: &str, speakers: &str) -> GridResult<Self> {
        Ok(Self {
            schedule: parse_json(SCHEDULE_FILE, schedule)?,
            sessions: parse_json(SESSIONS_FILE, sessions)?,
            speakers: parse_json(SPEAKERS_FILE, speakers)?,
        })
    }
}

pub fn load_json<T: serde::de::DeserializeOwned>(dir: &Path, name: &str) -> GridResult<T> {
    let path = dir.join(name);
    let f = File::open(&path).map_err(|source| GridError::DataNotFound {
        path: path.clone(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(f)).map_err(|e| {
        if e.is_io() {
            GridError::DataNotFound {
                path: path.clone(),
                source: std::io::Error::other(e),
            }
        } else {
            GridError::malformed(path.display().to_string(), e.to_string())
        }
    })
}

fn parse_json<T: serde::de::DeserializeOwned>(name: &str, s: &str) -> GridResult<T> {
    serde_json::from_str(s).map_err(|e| GridError::malformed(name, e.to_string()))
}
