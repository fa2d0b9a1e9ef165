//! A module to build iCal files

use ics::components::Property;
use ics::{ICalendar, ToDo};
use uuid::Uuid;

use crate::config::Settings;
use crate::error::SerializeError;
use crate::item::CalendarItem;
use crate::utils::{property_name, raw_value, text_value};

/// Create an iCal file from a `crate::item::CalendarItem`
///
/// The calendar holds this single item.
pub fn build_from(item: &CalendarItem, settings: &Settings) -> Result<String, SerializeError> {
    let dtstamp = item.dtstamp().to_ical();
    let properties = component_properties(item)?;
    let uid = match item.uid() {
        Some(uid) => text_value("UID", uid)?,
        None => derived_uid(&dtstamp, &properties),
    };

    let mut calendar = ICalendar::new("2.0", raw_value("PRODID", &settings.prod_id())?);
    match item {
        CalendarItem::Todo(_) => {
            let mut todo = ToDo::new(uid, dtstamp);
            for (name, value) in properties {
                todo.push(Property::new(name, value));
            }
            calendar.add_todo(todo);
        },
        CalendarItem::Event(_) => {
            let mut event = ics::Event::new(uid, dtstamp);
            for (name, value) in properties {
                event.push(Property::new(name, value));
            }
            calendar.add_event(event);
        },
    }

    let mut buffer = Vec::new();
    calendar.write(&mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// The encoded properties of the component, apart from `UID` and `DTSTAMP`, in output order
fn component_properties(item: &CalendarItem) -> Result<Vec<(String, String)>, SerializeError> {
    let mut props = Vec::new();

    match item {
        CalendarItem::Todo(todo) => {
            props.push(("SUMMARY".to_string(), text_value("SUMMARY", todo.summary())?));
            props.push(("STATUS".to_string(), raw_value("STATUS", todo.status())?));
            if let Some(sequence) = todo.sequence() {
                props.push(("SEQUENCE".to_string(), raw_value("SEQUENCE", sequence)?));
            }
            if let Some(created) = todo.created() {
                props.push(("CREATED".to_string(), created.to_ical()));
            }
            if let Some(last_modified) = todo.last_modified() {
                props.push(("LAST-MODIFIED".to_string(), last_modified.to_ical()));
            }
            if let Some(description) = todo.description() {
                props.push(("DESCRIPTION".to_string(), text_value("DESCRIPTION", description)?));
            }
            if let Some(percent_complete) = todo.percent_complete() {
                props.push(("PERCENT-COMPLETE".to_string(), raw_value("PERCENT-COMPLETE", percent_complete)?));
            }
        },
        CalendarItem::Event(event) => {
            props.push(("SUMMARY".to_string(), text_value("SUMMARY", event.summary())?));
            if let Some(dtstart) = event.dtstart() {
                props.push(("DTSTART".to_string(), dtstart.to_ical()));
            }
            if let Some(dtend) = event.dtend() {
                props.push(("DTEND".to_string(), dtend.to_ical()));
            }
            if let Some(location) = event.location() {
                props.push(("LOCATION".to_string(), text_value("LOCATION", location)?));
            }
            if let Some(description) = event.description() {
                props.push(("DESCRIPTION".to_string(), text_value("DESCRIPTION", description)?));
            }
        },
    }

    for (name, value) in item.extra_properties().iter() {
        let name = property_name(name)?;
        let value = text_value(&name, value)?;
        props.push((name, value));
    }

    Ok(props)
}

/// RFC5545 requires a UID, but the caller did not provide any.
/// Derive it from the content, so that the same item always gets the same UID.
fn derived_uid(dtstamp: &str, properties: &[(String, String)]) -> String {
    let mut content = format!("DTSTAMP:{}\n", dtstamp);
    for (name, value) in properties {
        content.push_str(name);
        content.push(':');
        content.push_str(value);
        content.push('\n');
    }
    Uuid::new_v5(&Uuid::NAMESPACE_OID, content.as_bytes()).to_hyphenated().to_string()
}
