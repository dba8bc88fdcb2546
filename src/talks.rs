use chrono::DateTime;

use crate::{
    error::{GridError, GridResult},
    loader::DataSet,
    model::{Slot, Speaker, Talk},
};

/// Join every slot with its session and speakers, in slot order.
///
/// Slots whose session id is unknown are skipped with a warning (breaks and similar slots have no
/// formal session). A session naming a speaker that is absent from the speaker data is an error.
#[tracing::instrument(skip(data), fields(slots = data.schedule.slots.all.len()))]
pub fn assemble_talks(data: &DataSet) -> GridResult<Vec<Talk>> {
    let mut talks = Vec::with_capacity(data.schedule.slots.all.len());
    for slot in &data.schedule.slots.all {
        let Some(session) = data.sessions.get(&slot.session_id) else {
            tracing::warn!(session = %slot.session_id, "no session found, skipping slot");
            continue;
        };

        let speakers = session
            .speakers
            .iter()
            .map(|speaker_id| {
                data.speakers
                    .get(speaker_id)
                    .map(|record| Speaker {
                        id: speaker_id.clone(),
                        name: record.name.clone(),
                        photo_path: record.photo_url.clone(),
                    })
                    .ok_or_else(|| GridError::MissingSpeaker {
                        session: slot.session_id.clone(),
                        speaker: speaker_id.clone(),
                    })
            })
            .collect::<GridResult<Vec<_>>>()?;

        let (start_epoch_secs, end_epoch_secs) = slot_epoch_range(slot)?;
        talks.push(Talk {
            id: slot.session_id.clone(),
            title: session.title.clone(),
            room_id: slot.room_id.clone(),
            speakers,
            start_epoch_secs,
            end_epoch_secs,
        });
    }

    tracing::debug!(talks = talks.len(), "assembled talks");
    Ok(talks)
}

fn slot_epoch_range(slot: &Slot) -> GridResult<(i64, i64)> {
    let start = parse_epoch_secs(&slot.session_id, &slot.start_date)?;
    let end = parse_epoch_secs(&slot.session_id, &slot.end_date)?;
    if start >= end {
        return Err(GridError::malformed(
            format!("slot '{}'", slot.session_id),
            format!(
                "start '{}' is not before end '{}'",
                slot.start_date, slot.end_date
            ),
        ));
    }
    Ok((start, end))
}

/// Parse an ISO-8601 offset date-time into epoch seconds. The offset is consumed here.
pub fn parse_epoch_secs(session_id: &str, value: &str) -> GridResult<i64> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.timestamp())
        .map_err(|e| {
            GridError::malformed(
                format!("slot '{session_id}'"),
                format!("invalid date-time '{value}': {e}"),
            )
        })
}
