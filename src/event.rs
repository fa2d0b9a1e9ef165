//! Calendar events (iCal `VEVENT` item)

use serde::Deserialize;

use crate::date::{normalize_field, DatePolicy, NormalizedInstant};
use crate::fields::{non_empty, optional_text, ExtraProperties};

/// The fields an event is built from
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct EventFields {
    pub summary: String,
    pub dtstart: String,
    /// Defaults to the start time
    #[serde(default, deserialize_with = "optional_text")]
    pub dtend: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub dtstamp: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraProperties,
}

impl EventFields {
    pub fn new<S: Into<String>, T: Into<String>>(summary: S, dtstart: T) -> Self {
        Self { summary: summary.into(), dtstart: dtstart.into(), ..Self::default() }
    }
}


/// An assembled calendar event
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    dtstamp: NormalizedInstant,
    summary: String,
    /// `None` when the caller's start time could not be parsed
    dtstart: Option<NormalizedInstant>,
    dtend: Option<NormalizedInstant>,
    location: Option<String>,
    description: Option<String>,
    extra_properties: ExtraProperties,
}

impl Event {
    /// Build an event from its fields.
    ///
    /// Unparseable start and end times are silently left out. A missing end time is the (already normalized) start time.
    pub fn assemble(fields: &EventFields) -> Self {
        let dtstamp = normalize_field("dtstamp", fields.dtstamp.as_deref(), DatePolicy::DefaultToNow)
            .value()
            .unwrap_or_else(NormalizedInstant::now);

        let dtstart = normalize_field("dtstart", Some(fields.dtstart.as_str()), DatePolicy::SilentOmit).value();
        let dtend = match non_empty(&fields.dtend) {
            None => dtstart,
            Some(dtend) => normalize_field("dtend", Some(dtend), DatePolicy::SilentOmit).value(),
        };

        let event = Self {
            dtstamp,
            summary: fields.summary.clone(),
            dtstart,
            dtend,
            location: non_empty(&fields.location).map(String::from),
            description: non_empty(&fields.description).map(String::from),
            extra_properties: fields.extra.clone(),
        };
        if event.dtstart.is_none() {
            log::debug!("Event {:?} has no valid start time", event.summary);
        }
        event
    }

    pub fn dtstamp(&self) -> &NormalizedInstant { &self.dtstamp }
    pub fn summary(&self) -> &str               { &self.summary }
    pub fn dtstart(&self) -> Option<&NormalizedInstant> { self.dtstart.as_ref() }
    pub fn dtend(&self) -> Option<&NormalizedInstant>   { self.dtend.as_ref() }
    pub fn location(&self) -> Option<&str>      { self.location.as_deref() }
    pub fn description(&self) -> Option<&str>   { self.description.as_deref() }
    pub fn extra_properties(&self) -> &ExtraProperties { &self.extra_properties }

    /// Events have no caller-supplied UID
    pub fn uid(&self) -> Option<&str> {
        None
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_defaults_to_start() {
        let event = Event::assemble(&EventFields::new("Standup", "2024-01-01T09:00:00+0000"));

        assert_eq!(event.dtstart().map(|d| d.to_ical()), Some(String::from("20240101T090000Z")));
        assert_eq!(event.dtend(), event.dtstart());
        assert_eq!(event.location(), None);
        assert_eq!(event.description(), None);
    }

    #[test]
    fn test_explicit_end() {
        let mut fields = EventFields::new("Standup", "2024-01-01 09:00");
        fields.dtend = Some(String::from("2024-01-01 09:15"));
        fields.location = Some(String::from("Room 4"));

        let event = Event::assemble(&fields);
        assert_eq!(event.dtend().map(|d| d.to_ical()), Some(String::from("20240101T091500Z")));
        assert_eq!(event.location(), Some("Room 4"));
    }

    #[test]
    fn test_invalid_times_are_omitted() {
        let event = Event::assemble(&EventFields::new("Standup", "someday"));
        assert_eq!(event.dtstart(), None);
        assert_eq!(event.dtend(), None);

        let mut fields = EventFields::new("Standup", "2024-01-01T09:00:00Z");
        fields.dtend = Some(String::from("later"));
        let event = Event::assemble(&fields);
        assert!(event.dtstart().is_some());
        assert_eq!(event.dtend(), None);
    }
}
