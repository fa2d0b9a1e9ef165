//! A module to build vCard files

use crate::contact::{Contact, ContactProperty, PropertyValue};
use crate::error::SerializeError;
use crate::utils::{fold_line, property_name, raw_value, text_value};

use super::VCARD_VERSION;

/// Create a vCard file from a `crate::contact::Contact`
pub fn build_from(contact: &Contact) -> Result<String, SerializeError> {
    if contact.given_name().is_empty() {
        return Err(SerializeError::MissingField("first_name"));
    }

    let mut output = String::new();
    output.push_str("BEGIN:VCARD\r\n");
    output.push_str(&fold_line(&format!("VERSION:{}", VCARD_VERSION)));

    // N is family; given; additional names; prefixes; suffixes
    let name = ContactProperty::new("N", PropertyValue::Structured(vec![
        contact.family_name().to_string(),
        contact.given_name().to_string(),
        String::new(),
        String::new(),
        String::new(),
    ]));
    output.push_str(&content_line(&name)?);
    output.push_str(&content_line(&ContactProperty::new("FN", PropertyValue::Text(contact.full_name().to_string())))?);

    for prop in contact.properties() {
        output.push_str(&content_line(prop)?);
    }

    output.push_str("END:VCARD\r\n");
    Ok(output)
}

fn content_line(prop: &ContactProperty) -> Result<String, SerializeError> {
    let name = property_name(prop.name())?;

    let value = match prop.value() {
        PropertyValue::Text(text) => text_value(&name, text)?,
        PropertyValue::Raw(raw) => raw_value(&name, raw)?,
        PropertyValue::Structured(components) => {
            let mut encoded = Vec::with_capacity(components.len());
            for component in components {
                encoded.push(text_value(&name, component)?);
            }
            encoded.join(";")
        },
    };

    let line = match prop.type_param() {
        None => format!("{}:{}", name, value),
        Some(type_param) => format!("{};TYPE={}:{}", name, property_name(type_param)?, value),
    };
    Ok(fold_line(&line))
}
