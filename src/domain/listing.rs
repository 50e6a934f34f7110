use crate::api::RawListing;
use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use serde_json::Value;
use tracing::warn;

/// Marker the API uses when an item has no picture, hence no creation date.
const NO_TIMESTAMP: &str = "NA";
const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// A listing ready to be displayed: the raw record plus its localized
/// creation date. Equality is structural over both.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub raw: RawListing,
    pub created_at: DateTime<Tz>,
}

impl Listing {
    pub fn id(&self) -> &str {
        &self.raw.id
    }

    pub fn display_title(&self) -> String {
        if self.raw.is_photo_suspicious {
            format!("{} - PHOTO SUSPICIEUSE", self.raw.title)
        } else {
            self.raw.title.clone()
        }
    }
}

pub fn parse_created_at(ts: &str, tz: Tz) -> Option<DateTime<Tz>> {
    DateTime::parse_from_str(ts, CREATED_AT_FORMAT)
        .or_else(|_| DateTime::<FixedOffset>::parse_from_rfc3339(ts))
        .ok()
        .map(|dt| dt.with_timezone(&tz))
}

/// Appends the usable records of one API page to `clothes`.
///
/// Records without a creation date, undecodable records and records already
/// present are skipped with a warning. Returns how many were appended.
pub fn format_clothes(clothes: &mut Vec<Listing>, records: Vec<Value>, tz: Tz) -> usize {
    let before = clothes.len();

    for record in records {
        let raw: RawListing = match serde_json::from_value(record) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Encountered malformed item, skipping: {e}");
                continue;
            }
        };

        if raw.created_at_ts == NO_TIMESTAMP {
            warn!(id = %raw.id, "Encountered item with no picture, skipping");
            continue;
        }

        let Some(created_at) = parse_created_at(&raw.created_at_ts, tz) else {
            warn!(id = %raw.id, ts = %raw.created_at_ts, "Encountered item with invalid date, skipping");
            continue;
        };

        let item = Listing { raw, created_at };

        if clothes.contains(&item) {
            warn!(id = %item.id(), "Item encountered more than once, skipping");
        } else if clothes.iter().any(|c| c.id() == item.id()) {
            warn!(id = %item.id(), "Item id already listed with other content, keeping the first");
        } else {
            clothes.push(item);
        }
    }

    clothes.len() - before
}
