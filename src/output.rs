use crate::error::{RawmailError, Result};
use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, Serializer};
use std::io::{self, Write};

/// The single-field record emitted by the CLI: `{"Data": "<expanded text>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    #[serde(rename = "Data")]
    pub data: String,
}

impl OutputRecord {
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }

    /// Writes the record as one line of JSON, newline included
    ///
    /// # Errors
    ///
    /// Returns `RawmailError::Json` if serialization fails or `RawmailError::Io`
    /// if the writer does.
    pub fn write_json_line<W: Write>(&self, mut writer: W) -> Result<()> {
        let mut serializer = Serializer::with_formatter(&mut writer, SpacedFormatter);
        self.serialize(&mut serializer)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Encodes the record as a JSON line, newline included
    ///
    /// # Errors
    ///
    /// See [`OutputRecord::write_json_line`].
    pub fn to_json_line(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_json_line(&mut buf)?;
        String::from_utf8(buf)
            .map_err(|e| RawmailError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

/// Compact JSON with `", "` between members and `": "` after keys
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_json_line_layout() {
        let record = OutputRecord::new("Hello World!");
        assert_eq!(record.to_json_line().unwrap(), "{\"Data\": \"Hello World!\"}\n");
    }

    #[test]
    fn test_json_line_escapes() {
        let record = OutputRecord::new("a \"quoted\" \\ path\r\n\tend\u{1}");
        let line = record.to_json_line().unwrap();
        assert_eq!(
            line,
            "{\"Data\": \"a \\\"quoted\\\" \\\\ path\\r\\n\\tend\\u0001\"}\n"
        );
        // Exactly one line on output
        assert_eq!(line.matches('\n').count(), 1);
    }

    #[test]
    fn test_json_line_keeps_utf8() {
        let record = OutputRecord::new("Grüße 🌍");
        assert_eq!(record.to_json_line().unwrap(), "{\"Data\": \"Grüße 🌍\"}\n");
    }

    #[test]
    fn test_json_line_parses_to_single_key() {
        let record = OutputRecord::new("MIME-Version: 1.0\n\nbody");
        let line = record.to_json_line().unwrap();

        let value: Value = serde_json::from_str(&line).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["Data"], "MIME-Version: 1.0\n\nbody");

        let parsed: OutputRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_write_json_line_to_writer() {
        let mut out = Vec::new();
        OutputRecord::new("").write_json_line(&mut out).unwrap();
        assert_eq!(out, b"{\"Data\": \"\"}\n");
    }
}
