//! Some utility functions shared by the vCard and iCal builders

use crate::error::SerializeError;

/// Maximum length of a content line, in octets, not including the CRLF
const MAX_LINE_OCTETS: usize = 75;

/// Escape a TEXT value (or a component of a structured value)
///
/// Backslash, semicolon, comma and newlines are escaped. Carriage returns are dropped, since `\n` already encodes the line break.
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\r' => {},
            _ => result.push(c),
        }
    }

    result
}

/// Fold a content line at 75 octets, and terminate it with CRLF.
///
/// Continuation lines start with a single space. UTF-8 sequences are never split.
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return format!("{}\r\n", line);
    }

    let mut result = String::with_capacity(line.len() + (line.len() / MAX_LINE_OCTETS + 1) * 3);
    let mut start = 0;
    let mut first_line = true;

    while start < line.len() {
        // Continuation lines lose one octet to the leading space
        let max_len = if first_line { MAX_LINE_OCTETS } else { MAX_LINE_OCTETS - 1 };
        let mut end = usize::min(start + max_len, line.len());
        while !line.is_char_boundary(end) {
            end -= 1;
        }

        if !first_line {
            result.push(' ');
        }
        result.push_str(&line[start..end]);
        result.push_str("\r\n");

        start = end;
        first_line = false;
    }

    result
}

/// Check that a property name can be written in a content line, and return its canonical (uppercase) form
///
/// Names are made of ASCII letters, digits and dashes (RFC 5545 `iana-token` / `x-name`).
pub fn property_name(name: &str) -> Result<String, SerializeError> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(SerializeError::InvalidPropertyName(name.to_string()));
    }
    Ok(name.to_ascii_uppercase())
}

/// Check that a value does not contain characters that cannot be encoded in a content line
///
/// Newlines and tabs are fine (they are escaped or allowed as-is), other control characters are not.
pub fn check_value(property: &str, value: &str) -> Result<(), SerializeError> {
    match value.chars().find(|c| c.is_ascii_control() && !matches!(c, '\n' | '\r' | '\t')) {
        None => Ok(()),
        Some(character) => Err(SerializeError::ForbiddenCharacter {
            property: property.to_string(),
            character,
        }),
    }
}

/// Encode a TEXT value of a property
pub fn text_value(property: &str, value: &str) -> Result<String, SerializeError> {
    check_value(property, value)?;
    Ok(escape_text(value))
}

/// Encode a value that is written as-is (URIs, dates, numbers...). Only line breaks are escaped.
///
/// A lone `\r` counts as a line break.
pub fn raw_value(property: &str, value: &str) -> Result<String, SerializeError> {
    check_value(property, value)?;
    Ok(value.replace("\r\n", "\n").replace('\r', "\n").replace('\n', "\\n"))
}

/// Wrap a document into a Markdown code block labeled with its format
pub fn fenced(label: &str, document: &str) -> String {
    format!("```{}\n{}\n```\n", label, document)
}
