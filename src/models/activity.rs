//! Activity summary: per-kind engagement samples merged into one timeline.

use super::engagement::{EngagementKind, EngagementRecord};
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Sentinel reported when no fetched engagement has a usable timestamp.
pub const NO_ACTIVITY: &str = "No engagements found";

/// Parse an engagement timestamp.
///
/// HubSpot returns RFC 3339 strings for `createdAt`/`hs_createdate` and epoch
/// milliseconds for some `hs_timestamp` values. Anything else is `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse::<i64>()
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis);
    }
    None
}

/// Engagements of one kind: the true association count plus a bounded sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngagementSummary {
    #[serde(skip)]
    pub kind: EngagementKind,

    /// Number of associated records, independent of how many were fetched
    pub count: usize,

    /// Detail-fetched records in association order
    pub items: Vec<EngagementRecord>,
}

impl EngagementSummary {
    pub fn empty(kind: EngagementKind) -> Self {
        Self {
            kind,
            count: 0,
            items: Vec::new(),
        }
    }
}

/// A fetched engagement tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineItem {
    #[serde(rename = "type")]
    pub kind: EngagementKind,

    #[serde(flatten)]
    pub record: EngagementRecord,
}

/// The latest engagement, or the "none found" sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MostRecentEngagement {
    NoneFound,
    Found(TimelineItem),
}

impl MostRecentEngagement {
    pub fn item(&self) -> Option<&TimelineItem> {
        match self {
            MostRecentEngagement::NoneFound => None,
            MostRecentEngagement::Found(item) => Some(item),
        }
    }
}

impl Serialize for MostRecentEngagement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            MostRecentEngagement::NoneFound => serializer.serialize_str(NO_ACTIVITY),
            MostRecentEngagement::Found(item) => item.serialize(serializer),
        }
    }
}

/// Aggregated engagement activity for one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    /// Sum of the per-kind association counts
    pub total_engagements: usize,

    pub most_recent_engagement: MostRecentEngagement,

    /// One entry per kind, in [`EngagementKind::ALL`] order
    #[serde(serialize_with = "serialize_by_kind")]
    pub engagements: Vec<EngagementSummary>,

    /// All fetched items, newest first
    pub timeline: Vec<TimelineItem>,
}

impl ActivitySummary {
    /// Merge per-kind results into a summary.
    ///
    /// `per_kind` may arrive in any order and may omit kinds; the result
    /// always holds all five kinds in processing order. Items are merged in
    /// that order and then stably sorted newest first, so equal timestamps
    /// keep the calls, emails, notes, tasks, meetings order. Items without a
    /// parseable timestamp sort last.
    pub fn from_kinds(per_kind: Vec<EngagementSummary>) -> Self {
        let mut engagements: Vec<EngagementSummary> = EngagementKind::ALL
            .iter()
            .map(|k| EngagementSummary::empty(*k))
            .collect();
        for summary in per_kind {
            let slot = summary.kind as usize;
            engagements[slot] = summary;
        }

        let total_engagements = engagements.iter().map(|s| s.count).sum();

        let mut stamped: Vec<(Option<DateTime<Utc>>, TimelineItem)> = engagements
            .iter()
            .flat_map(|s| {
                s.items.iter().map(move |record| {
                    let ts = record.created_at.as_deref().and_then(parse_timestamp);
                    (
                        ts,
                        TimelineItem {
                            kind: s.kind,
                            record: record.clone(),
                        },
                    )
                })
            })
            .collect();

        // `None` orders below every `Some`, so reversing puts it last.
        // `sort_by` is stable.
        stamped.sort_by(|a, b| b.0.cmp(&a.0));

        let most_recent_engagement = match stamped.first() {
            Some((Some(_), item)) => MostRecentEngagement::Found(item.clone()),
            _ => MostRecentEngagement::NoneFound,
        };

        let timeline = stamped.into_iter().map(|(_, item)| item).collect();

        Self {
            total_engagements,
            most_recent_engagement,
            engagements,
            timeline,
        }
    }

    /// The summary for one kind.
    pub fn kind(&self, kind: EngagementKind) -> &EngagementSummary {
        &self.engagements[kind as usize]
    }
}

fn serialize_by_kind<S>(engagements: &[EngagementSummary], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(engagements.len()))?;
    for summary in engagements {
        map.serialize_entry(summary.kind.object_type(), summary)?;
    }
    map.end()
}
