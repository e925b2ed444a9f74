//! Shareable links: the track record, compacted and numerically rounded,
//! percent-encoded into a single `track` query parameter.

use shared::TrackRecord;

use crate::error::EditorError;

const PARAM: &str = "track";

/// Encode a track as a query string (`track=<encoded JSON>`)
pub fn encode(record: &TrackRecord) -> String {
    let json = serde_json::to_string(&record.rounded()).unwrap_or_default();
    format!("{PARAM}={}", urlencoding::encode(&json))
}

/// Extract and parse the `track` parameter from a query string.
/// `Ok(None)` when the parameter is absent; the caller decides whether a
/// decode failure is reported or swallowed.
pub fn decode_query(query: &str) -> Result<Option<TrackRecord>, EditorError> {
    let query = query.strip_prefix('?').unwrap_or(query);
    for pair in query.split('&') {
        let mut parts = pair.splitn(2, '=');
        if parts.next() != Some(PARAM) {
            continue;
        }
        let value = parts.next().unwrap_or("");
        let json = urlencoding::decode(value)?;
        let record: TrackRecord = serde_json::from_str(&json)?;
        return Ok(Some(record));
    }
    Ok(None)
}
