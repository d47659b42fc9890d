//! Property lookup within a VEVENT block.
//!
//! Only the first occurrence of a property name counts. iCalendar allows a
//! property to repeat, but calboard does not model multi-valued properties,
//! so later occurrences are ignored.

use std::collections::HashMap;

use super::unfold::RawBlock;

/// One property occurrence: its trimmed value and its parameters.
///
/// Parameter names are stored uppercased, so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyValue {
    pub value: String,
    pub params: HashMap<String, String>,
}

impl PropertyValue {
    pub fn new(value: impl Into<String>) -> Self {
        PropertyValue {
            value: value.into(),
            params: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.params.insert(name.to_ascii_uppercase(), value.into());
        self
    }

    /// Look up a parameter by name, ignoring case.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(&name.to_ascii_uppercase())
            .map(String::as_str)
    }
}

impl<'a> RawBlock<'a> {
    /// First `NAME[;PARAM=VAL...]:VALUE` line for `name`, with parameters parsed.
    pub fn property(&self, name: &str) -> Option<PropertyValue> {
        self.property_lines()
            .filter_map(split_content_line)
            .find(|line| line.name == name)
            .map(|line| PropertyValue {
                value: line.value.trim().to_string(),
                params: parse_params(line.params),
            })
    }

    /// Trimmed value of the first `name` line, without parameter parsing.
    pub fn value(&self, name: &str) -> Option<&'a str> {
        self.property_lines()
            .filter_map(split_content_line)
            .find(|line| line.name == name)
            .map(|line| line.value.trim())
    }
}

struct ContentLine<'a> {
    name: &'a str,
    params: &'a str,
    value: &'a str,
}

/// Split a content line into name, raw parameter text and value.
///
/// The value starts at the first `:` that is not inside a quoted parameter value.
fn split_content_line(line: &str) -> Option<ContentLine<'_>> {
    let name_end = line.find([';', ':'])?;
    let name = &line[..name_end];
    if name.is_empty() {
        return None;
    }

    if line[name_end..].starts_with(':') {
        return Some(ContentLine {
            name,
            params: "",
            value: &line[name_end + 1..],
        });
    }

    let rest = &line[name_end + 1..];
    let mut in_quotes = false;
    for (i, c) in rest.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => {
                return Some(ContentLine {
                    name,
                    params: &rest[..i],
                    value: &rest[i + 1..],
                });
            }
            _ => {}
        }
    }

    None
}

/// Parse `KEY=VAL;KEY2="quoted;val"` into an uppercase-keyed map.
fn parse_params(raw: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    let mut start = 0;
    let mut in_quotes = false;

    for (i, c) in raw.char_indices().chain(std::iter::once((raw.len(), ';'))) {
        match c {
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                if let Some((key, val)) = raw[start..i].split_once('=') {
                    let key = key.trim();
                    if !key.is_empty() {
                        params
                            .entry(key.to_ascii_uppercase())
                            .or_insert_with(|| val.trim().trim_matches('"').to_string());
                    }
                }
                start = i + 1;
            }
            _ => {}
        }
    }

    params
}
