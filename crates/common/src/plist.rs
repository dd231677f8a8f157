//! XML property list rendering for JSON values
//!
//! Objects become `<dict>` (keys in map order), arrays `<array>`, strings
//! `<string>`, integers `<integer>`, other numbers `<real>` and booleans
//! `<true/>`/`<false/>`. `null` has no property list form, so any `null`
//! anywhere in the value fails the whole render.

use std::fmt::Write as _;

use serde_json::{Map, Value};

use crate::error::{GenericError, KitResult};

const HEADER: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" ",
    "\"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n",
    "<plist version=\"1.0\">\n",
);
const FOOTER: &str = "</plist>\n";

/// Placeholder returned by [`property_list_string`] when rendering fails
pub const INVALID_PROPERTY_LIST: &str = "<invalid>";

/// Render `value` as an XML property list document
///
/// # Errors
/// Returns a serialization error when `value` contains `null`.
pub fn to_xml_string(value: &Value) -> KitResult<String> {
    let mut output = String::from(HEADER);
    write_value(&mut output, value, 0)?;
    output.push_str(FOOTER);
    Ok(output)
}

/// Render `value` as an XML property list, or `"<invalid>"` if it has no
/// property list form
#[must_use]
pub fn property_list_string(value: &Value) -> String {
    to_xml_string(value).unwrap_or_else(|_| INVALID_PROPERTY_LIST.to_string())
}

/// Property list rendering on JSON maps
pub trait PropertyListExt {
    /// XML property list text, `"<invalid>"` on failure
    fn property_list(&self) -> String;
}

impl PropertyListExt for Map<String, Value> {
    fn property_list(&self) -> String {
        let mut output = String::from(HEADER);
        match write_dict(&mut output, self, 0) {
            Ok(()) => {
                output.push_str(FOOTER);
                output
            }
            Err(_) => INVALID_PROPERTY_LIST.to_string(),
        }
    }
}

impl PropertyListExt for Value {
    fn property_list(&self) -> String {
        property_list_string(self)
    }
}

fn indent(output: &mut String, depth: usize) {
    output.extend(std::iter::repeat('\t').take(depth));
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn write_value(output: &mut String, value: &Value, depth: usize) -> KitResult<()> {
    match value {
        Value::Null => {
            return Err(GenericError::serialization("Property lists cannot represent null values."))
        }
        Value::Bool(flag) => {
            indent(output, depth);
            output.push_str(if *flag { "<true/>\n" } else { "<false/>\n" });
        }
        Value::Number(number) => {
            indent(output, depth);
            if number.is_f64() {
                let _ = writeln!(output, "<real>{number}</real>");
            } else {
                let _ = writeln!(output, "<integer>{number}</integer>");
            }
        }
        Value::String(text) => {
            indent(output, depth);
            let _ = writeln!(output, "<string>{}</string>", escape(text));
        }
        Value::Array(items) => {
            indent(output, depth);
            if items.is_empty() {
                output.push_str("<array/>\n");
                return Ok(());
            }
            output.push_str("<array>\n");
            for item in items {
                write_value(output, item, depth + 1)?;
            }
            indent(output, depth);
            output.push_str("</array>\n");
        }
        Value::Object(map) => write_dict(output, map, depth)?,
    }
    Ok(())
}

fn write_dict(output: &mut String, map: &Map<String, Value>, depth: usize) -> KitResult<()> {
    indent(output, depth);
    if map.is_empty() {
        output.push_str("<dict/>\n");
        return Ok(());
    }
    output.push_str("<dict>\n");
    for (key, value) in map {
        indent(output, depth + 1);
        let _ = writeln!(output, "<key>{}</key>", escape(key));
        write_value(output, value, depth + 1)?;
    }
    indent(output, depth);
    output.push_str("</dict>\n");
    Ok(())
}
