//! Contact cards (vCard `VCARD` item)

use serde::Deserialize;

use crate::date::{normalize_field, DatePolicy, FieldDate};
use crate::fields::{non_empty, optional_text, Assembled, ExtraProperties};

/// The fields a contact card is built from.
///
/// Only `first_name` is required. Empty strings are treated as absent fields.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ContactFields {
    #[serde(alias = "firstName")]
    pub first_name: String,
    #[serde(default, alias = "lastName", deserialize_with = "optional_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub organization: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub phone: Option<String>,
    /// Street address
    #[serde(default, deserialize_with = "optional_text")]
    pub address: Option<String>,
    /// Job title
    #[serde(default, deserialize_with = "optional_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub website: Option<String>,
    /// Any format [`crate::date::parse`] understands
    #[serde(default, deserialize_with = "optional_text")]
    pub birthday: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub note: Option<String>,
    #[serde(default, alias = "photoUrl", deserialize_with = "optional_text")]
    pub photo_url: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraProperties,
}

impl ContactFields {
    pub fn new<S: Into<String>>(first_name: S) -> Self {
        Self { first_name: first_name.into(), ..Self::default() }
    }
}


/// How a property value must be encoded
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// Free text, that will be escaped
    Text(String),
    /// A value written as-is (URIs, dates)
    Raw(String),
    /// A `;`-separated list of text components (e.g. `N` or `ADR`)
    Structured(Vec<String>),
}

/// A property of a contact card, with its optional `TYPE` parameter
#[derive(Clone, Debug, PartialEq)]
pub struct ContactProperty {
    name: String,
    type_param: Option<String>,
    value: PropertyValue,
}

impl ContactProperty {
    pub fn new<S: Into<String>>(name: S, value: PropertyValue) -> Self {
        Self { name: name.into(), type_param: None, value }
    }

    pub fn with_type<S: Into<String>>(mut self, type_param: S) -> Self {
        self.type_param = Some(type_param.into());
        self
    }

    pub fn name(&self) -> &str                { &self.name }
    pub fn type_param(&self) -> Option<&str>  { self.type_param.as_deref() }
    pub fn value(&self) -> &PropertyValue     { &self.value }
}


/// An assembled contact card.
///
/// The structured name and the formatted name are always present, the other properties are kept in insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct Contact {
    given_name: String,
    family_name: String,
    full_name: String,
    properties: Vec<ContactProperty>,
}

impl Contact {
    /// Build a contact from its fields.
    ///
    /// An unparseable birthday does not prevent the contact from being built: it is left out, and reported as a warning.
    pub fn assemble(fields: &ContactFields) -> Assembled<Contact> {
        let family_name = non_empty(&fields.last_name).unwrap_or_default().to_string();
        let full_name = format!("{} {}", fields.first_name, family_name).trim().to_string();

        let mut assembled = Assembled::new(Contact {
            given_name: fields.first_name.clone(),
            family_name,
            full_name,
            properties: Vec::new(),
        });
        let properties = &mut assembled.record.properties;

        if let Some(org) = non_empty(&fields.organization) {
            properties.push(ContactProperty::new("ORG", PropertyValue::Structured(vec![org.to_string()])));
        }
        if let Some(email) = non_empty(&fields.email) {
            properties.push(ContactProperty::new("EMAIL", PropertyValue::Text(email.to_string())).with_type("INTERNET"));
        }
        if let Some(phone) = non_empty(&fields.phone) {
            properties.push(ContactProperty::new("TEL", PropertyValue::Text(phone.to_string())).with_type("CELL"));
        }
        if let Some(street) = non_empty(&fields.address) {
            // PO box; extended address; street; locality; region; postal code; country
            let adr = vec![String::new(), String::new(), street.to_string(), String::new(), String::new(), String::new(), String::new()];
            properties.push(ContactProperty::new("ADR", PropertyValue::Structured(adr)).with_type("HOME"));
        }
        if let Some(title) = non_empty(&fields.title) {
            properties.push(ContactProperty::new("TITLE", PropertyValue::Text(title.to_string())));
        }
        if let Some(website) = non_empty(&fields.website) {
            properties.push(ContactProperty::new("URL", PropertyValue::Raw(website.to_string())));
        }

        match normalize_field("birthday", fields.birthday.as_deref(), DatePolicy::WarnAndOmit) {
            FieldDate::Value(bday) => properties.push(ContactProperty::new("BDAY", PropertyValue::Raw(bday.to_iso()))),
            FieldDate::Omitted => {},
            FieldDate::Rejected { warning } => {
                log::warn!("{}", warning);
                assembled.warnings.push(warning);
            },
        }

        if let Some(note) = non_empty(&fields.note) {
            properties.push(ContactProperty::new("NOTE", PropertyValue::Text(note.to_string())));
        }
        if let Some(photo) = non_empty(&fields.photo_url) {
            properties.push(ContactProperty::new("PHOTO", PropertyValue::Raw(photo.to_string())).with_type("URL"));
        }

        for (name, value) in fields.extra.iter() {
            properties.push(ContactProperty::new(name, PropertyValue::Text(value.to_string())));
        }

        log::debug!("Assembled contact {:?} with {} optional properties", assembled.record.full_name, assembled.record.properties.len());
        assembled
    }

    pub fn given_name(&self) -> &str  { &self.given_name }
    pub fn family_name(&self) -> &str { &self.family_name }
    pub fn full_name(&self) -> &str   { &self.full_name }
    pub fn properties(&self) -> &[ContactProperty] { &self.properties }

    /// The first property with this name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&ContactProperty> {
        self.properties.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }
}
