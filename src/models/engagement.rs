//! Engagement kinds and the record normalizer.
//!
//! HubSpot stores each engagement type as its own object with its own
//! property names (`hs_call_title`, `hs_email_subject`, ...). The table below
//! maps every kind onto the uniform [`EngagementRecord`] shape, so the
//! activity aggregator can treat all five kinds the same way. Adding a kind
//! means adding a variant and one table row.

use super::crm_object::CrmObject;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five engagement types associated with a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementKind {
    Call,
    Email,
    Note,
    Task,
    Meeting,
}

/// Property names of one kind, by normalized attribute.
struct FieldMap {
    object_type: &'static str,
    label: &'static str,
    plural_label: &'static str,
    subject: Option<&'static str>,
    body: &'static str,
    status: Option<&'static str>,
    direction: Option<&'static str>,
}

// Indexed by `EngagementKind as usize`.
const FIELD_MAPS: [FieldMap; 5] = [
    FieldMap {
        object_type: "calls",
        label: "Call",
        plural_label: "Calls",
        subject: Some("hs_call_title"),
        body: "hs_call_body",
        status: Some("hs_call_status"),
        direction: Some("hs_call_direction"),
    },
    FieldMap {
        object_type: "emails",
        label: "Email",
        plural_label: "Emails",
        subject: Some("hs_email_subject"),
        body: "hs_email_text",
        status: Some("hs_email_status"),
        direction: Some("hs_email_direction"),
    },
    FieldMap {
        object_type: "notes",
        label: "Note",
        plural_label: "Notes",
        subject: None,
        body: "hs_note_body",
        status: None,
        direction: None,
    },
    FieldMap {
        object_type: "tasks",
        label: "Task",
        plural_label: "Tasks",
        subject: Some("hs_task_subject"),
        body: "hs_task_body",
        status: Some("hs_task_status"),
        direction: None,
    },
    FieldMap {
        object_type: "meetings",
        label: "Meeting",
        plural_label: "Meetings",
        subject: Some("hs_meeting_title"),
        body: "hs_meeting_body",
        status: Some("hs_meeting_outcome"),
        direction: None,
    },
];

/// Timestamp properties requested for every kind, in fallback order after
/// the object's own `createdAt`.
const TIMESTAMP_PROPERTIES: [&str; 2] = ["hs_createdate", "hs_timestamp"];

impl EngagementKind {
    /// All kinds in processing order. Equal timestamps keep this order.
    pub const ALL: [EngagementKind; 5] = [
        EngagementKind::Call,
        EngagementKind::Email,
        EngagementKind::Note,
        EngagementKind::Task,
        EngagementKind::Meeting,
    ];

    fn fields(self) -> &'static FieldMap {
        &FIELD_MAPS[self as usize]
    }

    /// Object type segment used in API paths, e.g. `calls`.
    pub fn object_type(self) -> &'static str {
        self.fields().object_type
    }

    pub fn label(self) -> &'static str {
        self.fields().label
    }

    pub fn plural_label(self) -> &'static str {
        self.fields().plural_label
    }

    /// The fixed property list requested when fetching one record.
    pub fn properties(self) -> Vec<&'static str> {
        let f = self.fields();
        let mut props: Vec<&'static str> = Vec::with_capacity(6);
        props.extend(f.subject);
        props.push(f.body);
        props.extend(f.status);
        props.extend(f.direction);
        props.extend(TIMESTAMP_PROPERTIES);
        props
    }

    /// Map a raw record of this kind onto the uniform shape.
    ///
    /// Never fails: absent or blank properties leave the attribute unset.
    pub fn normalize(self, raw: &CrmObject) -> EngagementRecord {
        let f = self.fields();
        let prop = |name: Option<&str>| {
            name.and_then(|n| raw.property(n))
                .map(str::to_string)
        };

        let created_at = raw
            .created_at
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .or_else(|| {
                TIMESTAMP_PROPERTIES
                    .iter()
                    .find_map(|p| raw.property(p))
                    .map(str::to_string)
            });

        EngagementRecord {
            id: raw.id.clone(),
            created_at,
            subject: prop(f.subject),
            body: prop(Some(f.body)),
            status: prop(f.status),
            direction: prop(f.direction),
        }
    }
}

impl fmt::Display for EngagementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.object_type())
    }
}

/// An engagement reduced to the fields every kind shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementRecord {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Title or subject line; notes have none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Call/email/task status or meeting outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Calls and emails only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}
