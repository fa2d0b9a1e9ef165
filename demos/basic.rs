//! Generate a contact card and a to-do, and log what a host would receive

use pimkit::config::Settings;
use pimkit::notify::LogSink;
use pimkit::{ContactFields, Generator, TodoFields};

#[tokio::main]
async fn main() {
    env_logger::init();

    let generator = Generator::new(Settings::new("ABC Corporation", "My Product"));
    let sink = LogSink;

    let mut contact = ContactFields::new("Ada");
    contact.last_name = Some(String::from("Lovelace"));
    contact.email = Some(String::from("ada@example.com"));
    contact.birthday = Some(String::from("1815-12-10"));
    if let Some(vcard) = generator.create_contact_vcard(&contact, &sink).await {
        println!("{}", vcard);
    }

    let mut todo = TodoFields::new("Publish the notes on the Analytical Engine");
    todo.percent_complete = Some(String::from("90"));
    if let Some(ical) = generator.create_icalendar_todo(&todo, &sink).await {
        println!("{}", ical);
    }
}
