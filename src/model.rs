use std::collections::BTreeMap;

/// Top-level shape of `schedule-app.json`.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ScheduleData {
    pub slots: Slots,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Slots {
    pub all: Vec<Slot>,
}

/// A room occupied for a time range. Dates are ISO-8601 offset date-times.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub start_date: String,
    pub end_date: String,
    pub room_id: String,
    pub session_id: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub complexity: Option<String>,
    #[serde(default)]
    pub speakers: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub platform_url: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub slido: Option<String>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerRecord {
    pub name: String,
    pub photo_url: String,
    #[serde(default)]
    pub order: Option<f32>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub company_logo: Option<String>,
    #[serde(default)]
    pub socials: Vec<Social>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Social {
    pub icon: String,
    pub link: String,
    pub name: String,
}

pub type SessionMap = BTreeMap<String, Session>; // keyed by session id
pub type SpeakerMap = BTreeMap<String, SpeakerRecord>; // keyed by speaker id

/// Resolved speaker attached to a [`Talk`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Speaker {
    pub id: String,
    pub name: String,
    /// Photo path relative to the assets root, as found in the speaker data.
    pub photo_path: String,
}

/// One schedule slot joined with its session and speakers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Talk {
    pub id: String,
    pub title: String,
    pub room_id: String,
    pub speakers: Vec<Speaker>,
    pub start_epoch_secs: i64,
    pub end_epoch_secs: i64, // always > start_epoch_secs
}

impl Talk {
    pub fn duration_secs(&self) -> i64 {
        self.end_epoch_secs - self.start_epoch_secs
    }
}
