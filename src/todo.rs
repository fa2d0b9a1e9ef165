//! To-do tasks (iCal `VTODO` item)

use serde::Deserialize;

use crate::date::{normalize_field, DatePolicy, NormalizedInstant};
use crate::fields::{non_empty, optional_text, ExtraProperties};

/// The status a to-do gets when the caller does not provide one
pub const DEFAULT_STATUS: &str = "IN-PROCESS";

/// The fields a to-do is built from. Only `summary` is required.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TodoFields {
    pub summary: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub status: Option<String>,
    /// Should be left empty for a new to-do, or be the UID of the to-do that is being updated
    #[serde(default, deserialize_with = "optional_text")]
    pub uid: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub dtstamp: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub sequence: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub created: Option<String>,
    #[serde(default, alias = "lastModified", deserialize_with = "optional_text")]
    pub last_modified: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub description: Option<String>,
    #[serde(default, alias = "percentComplete", deserialize_with = "optional_text")]
    pub percent_complete: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraProperties,
}

impl TodoFields {
    pub fn new<S: Into<String>>(summary: S) -> Self {
        Self { summary: summary.into(), ..Self::default() }
    }
}


/// An assembled to-do
#[derive(Clone, Debug, PartialEq)]
pub struct Todo {
    /// Always set: it falls back to the assembly time when missing or invalid
    dtstamp: NormalizedInstant,
    /// Persistent, globally unique identifier for the calendar component
    uid: Option<String>,
    summary: String,
    status: String,
    sequence: Option<String>,
    created: Option<NormalizedInstant>,
    last_modified: Option<NormalizedInstant>,
    description: Option<String>,
    percent_complete: Option<String>,

    /// Extra properties, written verbatim after the known ones
    extra_properties: ExtraProperties,
}

impl Todo {
    /// Build a to-do from its fields.
    ///
    /// Invalid `created` and `last_modified` dates are silently left out.
    pub fn assemble(fields: &TodoFields) -> Self {
        let dtstamp = normalize_field("dtstamp", fields.dtstamp.as_deref(), DatePolicy::DefaultToNow)
            .value()
            .unwrap_or_else(NormalizedInstant::now);

        let todo = Self {
            dtstamp,
            uid: non_empty(&fields.uid).map(String::from),
            summary: fields.summary.clone(),
            status: non_empty(&fields.status).unwrap_or(DEFAULT_STATUS).to_string(),
            sequence: non_empty(&fields.sequence).map(String::from),
            created: normalize_field("created", fields.created.as_deref(), DatePolicy::SilentOmit).value(),
            last_modified: normalize_field("last_modified", fields.last_modified.as_deref(), DatePolicy::SilentOmit).value(),
            description: non_empty(&fields.description).map(String::from),
            percent_complete: non_empty(&fields.percent_complete).map(String::from),
            extra_properties: fields.extra.clone(),
        };
        log::debug!("Assembled to-do {:?}", todo.summary);
        todo
    }

    pub fn dtstamp(&self) -> &NormalizedInstant   { &self.dtstamp }
    pub fn uid(&self) -> Option<&str>             { self.uid.as_deref() }
    pub fn summary(&self) -> &str                 { &self.summary }
    pub fn status(&self) -> &str                  { &self.status }
    pub fn sequence(&self) -> Option<&str>        { self.sequence.as_deref() }
    pub fn created(&self) -> Option<&NormalizedInstant>       { self.created.as_ref() }
    pub fn last_modified(&self) -> Option<&NormalizedInstant> { self.last_modified.as_ref() }
    pub fn description(&self) -> Option<&str>     { self.description.as_deref() }
    pub fn percent_complete(&self) -> Option<&str> { self.percent_complete.as_deref() }
    pub fn extra_properties(&self) -> &ExtraProperties { &self.extra_properties }
}
