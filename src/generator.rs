//! The operations a host can invoke
//!
//! Each operation assembles a record, serializes it, and reports back through a [`NotificationSink`]:
//! * warnings (e.g. an invalid birthday) are sent as non-final `status` notifications, and do not stop the operation,
//! * the generated document is sent as a single `message`, fenced in a code block,
//! * a serialization failure is sent as a `status`, and the operation returns `None`.
//!
//! Nothing is shared between calls: a `Generator` can serve any number of concurrent calls.

use serde::Deserialize;

use crate::config::Settings;
use crate::contact::{Contact, ContactFields};
use crate::error::SerializeError;
use crate::event::{Event, EventFields};
use crate::item::CalendarItem;
use crate::notify::{Notification, NotificationSink};
use crate::todo::{Todo, TodoFields};
use crate::utils::fenced;

/// Label of the code block that holds a generated vCard
pub const VCARD_LABEL: &str = "vcard";
/// Label of the code block that holds a generated iCal calendar
pub const ICAL_LABEL: &str = "icalendar";

/// A named invocation, as hosts send them: `{"name": "create_icalendar_todo", "arguments": {"summary": "..."}}`
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum ToolCall {
    CreateContactVcard(ContactFields),
    CreateIcalendarTodo(TodoFields),
    CreateIcalendarEvent(EventFields),
}

impl ToolCall {
    /// Parse a host invocation
    pub fn from_json(json: &serde_json::Value) -> Result<Self, serde_json::Error> {
        ToolCall::deserialize(json)
    }
}


/// Generates contact cards and calendar items
#[derive(Clone, Debug, Default)]
pub struct Generator {
    settings: Settings,
}

impl Generator {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Create a vCard for a contact.
    ///
    /// Returns the vCard, or `None` if it could not be serialized (in which case the sink has been told why).
    pub async fn create_contact_vcard<N>(&self, fields: &ContactFields, sink: &N) -> Option<String>
    where
        N: NotificationSink + ?Sized,
    {
        let assembled = Contact::assemble(fields);
        for warning in assembled.warnings {
            sink.notify(Notification::terminal_status(warning)).await;
        }

        let result = crate::vcard::build_from(&assembled.record);
        report(result, VCARD_LABEL, "VCard", sink).await
    }

    /// Create an iCal calendar that holds a single to-do.
    ///
    /// Returns the calendar, or `None` if it could not be serialized (in which case the sink has been told why).
    pub async fn create_icalendar_todo<N>(&self, fields: &TodoFields, sink: &N) -> Option<String>
    where
        N: NotificationSink + ?Sized,
    {
        let item = CalendarItem::from(Todo::assemble(fields));
        let result = crate::ical::build_from(&item, &self.settings);
        report(result, ICAL_LABEL, "iCalendar", sink).await
    }

    /// Create an iCal calendar that holds a single event.
    ///
    /// Returns the calendar, or `None` if it could not be serialized (in which case the sink has been told why).
    pub async fn create_icalendar_event<N>(&self, fields: &EventFields, sink: &N) -> Option<String>
    where
        N: NotificationSink + ?Sized,
    {
        let item = CalendarItem::from(Event::assemble(fields));
        let result = crate::ical::build_from(&item, &self.settings);
        report(result, ICAL_LABEL, "iCalendar", sink).await
    }

    /// Run a named invocation
    pub async fn call<N>(&self, call: &ToolCall, sink: &N) -> Option<String>
    where
        N: NotificationSink + ?Sized,
    {
        match call {
            ToolCall::CreateContactVcard(fields) => self.create_contact_vcard(fields, sink).await,
            ToolCall::CreateIcalendarTodo(fields) => self.create_icalendar_todo(fields, sink).await,
            ToolCall::CreateIcalendarEvent(fields) => self.create_icalendar_event(fields, sink).await,
        }
    }

    /// Parse and run a host invocation. Invalid invocations are reported to the sink.
    pub async fn call_json<N>(&self, json: &serde_json::Value, sink: &N) -> Option<String>
    where
        N: NotificationSink + ?Sized,
    {
        match ToolCall::from_json(json) {
            Ok(call) => self.call(&call, sink).await,
            Err(err) => {
                log::warn!("Invalid tool call: {}", err);
                sink.notify(Notification::terminal_status(format!("Invalid tool call: {}", err))).await;
                None
            },
        }
    }
}

/// Tell the sink how serialization went
async fn report<N>(result: Result<String, SerializeError>, label: &str, format_name: &str, sink: &N) -> Option<String>
where
    N: NotificationSink + ?Sized,
{
    match result {
        Ok(document) => {
            sink.notify(Notification::message(fenced(label, &document))).await;
            Some(document)
        },
        Err(err) => {
            log::warn!("Unable to serialize {}: {}", format_name, err);
            sink.notify(Notification::terminal_status(format!("Error serializing {}: {}", format_name, err))).await;
            None
        },
    }
}
