//! This crate generates contact cards (vCard) and calendar items (iCal to-dos and events) from loosely-typed fields,
//! typically provided by a chat assistant through a plugin host.
//!
//! The entry point is the [`Generator`](generator::Generator). Its operations never fail loudly: they report
//! warnings, results and errors to a [`NotificationSink`](notify::NotificationSink), and return `None` when no document could be produced.
//!
//! Dates can be given in many formats. The [`date`] module normalizes them to UTC.
//!
//! Records are assembled first ([`Contact`], [`Todo`], [`Event`]), and serialized afterwards (by the [`vcard`] and [`ical`] modules),
//! so that they can be inspected before being written.

pub mod date;
pub mod error;
pub mod fields;
pub mod notify;

pub mod contact;
pub use contact::{Contact, ContactFields};
pub mod todo;
pub use todo::{Todo, TodoFields};
pub mod event;
pub use event::{Event, EventFields};
pub mod item;
pub use item::CalendarItem;

pub mod ical;
pub mod vcard;

pub mod generator;
pub use generator::Generator;

pub mod config;
pub mod utils;
