//! iCal items (to-dos and events)

use crate::date::NormalizedInstant;
use crate::event::Event;
use crate::fields::ExtraProperties;
use crate::todo::Todo;

/// The single component a generated calendar holds
#[derive(Clone, Debug, PartialEq)]
pub enum CalendarItem {
    Event(Event),
    Todo(Todo),
}

/// Returns `todo.$property_name` or `event.$property_name`, depending on whether self is a Todo or an Event
macro_rules! synthetise_common_getter {
    ($property_name:ident, $return_type:ty) => {
        pub fn $property_name(&self) -> $return_type {
            match self {
                CalendarItem::Event(e) => e.$property_name(),
                CalendarItem::Todo(t) => t.$property_name(),
            }
        }
    }
}

impl CalendarItem {
    synthetise_common_getter!(uid, Option<&str>);
    synthetise_common_getter!(dtstamp, &NormalizedInstant);
    synthetise_common_getter!(extra_properties, &ExtraProperties);
}

impl From<Todo> for CalendarItem {
    fn from(todo: Todo) -> Self {
        CalendarItem::Todo(todo)
    }
}

impl From<Event> for CalendarItem {
    fn from(event: Event) -> Self {
        CalendarItem::Event(event)
    }
}
