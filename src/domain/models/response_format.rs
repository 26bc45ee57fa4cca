#[cfg(test)]
#[path = "response_format_test.rs"]
mod tests;

use std::io;

use anyhow::Result;
use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

/// Shown when the backend reports an error, or the request itself failed.
pub const ERROR_RESPONSE_TEXT: &str = "Error storing query. Check console for details.";
pub const UNEXPECTED_RESPONSE_TEXT: &str = "Unexpected response format.";
pub const SQL_RESULT_PREFIX: &str = "SQL Query Result: ";

/// Payload substituted for a `/query` call that never produced one.
pub fn failed_query_payload() -> Value {
    return serde_json::json!({ "error": "Error storing query." });
}

/// Selects how `/query` payloads are turned into response text. `Chat` only
/// understands answers, `Tabular` additionally renders SQL query results.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Chat,
    Tabular,
}

/// Two space indented JSON that prints whole floats without a trailing `.0`,
/// the way a browser's `JSON.stringify(value, null, 2)` does.
struct ResultFormatter<'a> {
    pretty: PrettyFormatter<'a>,
}

impl<'a> Formatter for ResultFormatter<'a> {
    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        if value == 0.0 {
            return writer.write_all(b"0");
        }
        // Past 1e21 browsers switch to exponent notation.
        if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e21 {
            return write!(writer, "{value:.0}");
        }

        return self.pretty.write_f64(writer, value);
    }

    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        return self.pretty.begin_array(writer);
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        return self.pretty.end_array(writer);
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        return self.pretty.begin_array_value(writer, first);
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        return self.pretty.end_array_value(writer);
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        return self.pretty.begin_object(writer);
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        return self.pretty.end_object(writer);
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        return self.pretty.begin_object_key(writer, first);
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        return self.pretty.begin_object_value(writer);
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        return self.pretty.end_object_value(writer);
    }
}

fn result_text(result: &Value) -> Result<String> {
    let mut buf = vec![];
    let formatter = ResultFormatter {
        pretty: PrettyFormatter::with_indent(b"  "),
    };
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    result.serialize(&mut ser)?;

    return Ok(String::from_utf8(buf)?);
}

fn field<'a>(payload: &'a Value, key: &str) -> Option<&'a Value> {
    return payload.get(key).filter(|val| return !val.is_null());
}

impl ResponseFormat {
    pub fn parse(text: &str) -> Option<ResponseFormat> {
        return ResponseFormat::iter().find(|e| return e.to_string() == text);
    }

    pub fn response_text(&self, payload: &Value) -> String {
        if field(payload, "error").is_some() {
            return ERROR_RESPONSE_TEXT.to_string();
        }

        if let Some(response) = field(payload, "response") {
            if let Some(text) = response.as_str() {
                return text.to_string();
            }
            return response.to_string();
        }

        if *self == ResponseFormat::Tabular {
            if let Some(result) = field(payload, "result") {
                let pretty = result_text(result).unwrap_or_else(|_| return result.to_string());
                return format!("{SQL_RESULT_PREFIX}{pretty}");
            }
        }

        return UNEXPECTED_RESPONSE_TEXT.to_string();
    }
}
