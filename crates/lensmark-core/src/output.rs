//! JSON and JSON Lines output for extraction results and catalog listings.

use serde::Serialize;
use std::io::{self, Write};

use crate::config::OutputConfig;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Single JSON object or array
    Json,
    /// One JSON object per line (newline-delimited JSON)
    JsonLines,
}

impl OutputFormat {
    /// Parse format from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "jsonl" | "jsonlines" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// Serializes records to any writer.
///
/// In JSON mode a batch becomes one array; in JSON Lines mode every record is
/// written on its own line, so long scans can be piped as they go.
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
    written: usize,
}

impl<W: Write> OutputWriter<W> {
    /// Create a writer. `pretty` only applies to JSON mode.
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
            written: 0,
        }
    }

    /// Create a writer from the `[output]` config section, falling back to
    /// JSON for unknown formats.
    pub fn from_config(writer: W, config: &OutputConfig) -> Self {
        let format = OutputFormat::parse(&config.format).unwrap_or(OutputFormat::Json);
        Self::new(writer, format, config.pretty)
    }

    /// Write a single record.
    pub fn write<T: Serialize>(&mut self, item: &T) -> io::Result<()> {
        if self.pretty && self.format == OutputFormat::Json {
            serde_json::to_writer_pretty(&mut self.writer, item).map_err(io::Error::other)?;
        } else {
            serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
        }
        writeln!(self.writer)?;
        self.written += 1;
        Ok(())
    }

    /// Write a batch: a JSON array, or one line per record.
    pub fn write_all<T: Serialize>(&mut self, items: &[T]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut self.writer, items)
                        .map_err(io::Error::other)?;
                } else {
                    serde_json::to_writer(&mut self.writer, items).map_err(io::Error::other)?;
                }
                writeln!(self.writer)?;
                self.written += items.len();
            }
            OutputFormat::JsonLines => {
                for item in items {
                    self.write(item)?;
                }
            }
        }
        Ok(())
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExtractedMetadata, FileMetadata};
    use std::path::PathBuf;

    fn records() -> Vec<FileMetadata> {
        vec![
            FileMetadata {
                path: PathBuf::from("DJI_0001.JPG"),
                metadata: ExtractedMetadata {
                    camera_make: Some("DJI".into()),
                    gimbal_pitch: Some(-90.0),
                    ..Default::default()
                },
            },
            FileMetadata {
                path: PathBuf::from("scan.png"),
                metadata: ExtractedMetadata::default(),
            },
        ]
    }

    #[test]
    fn test_jsonl_one_record_per_line() {
        let mut buffer = Vec::new();
        let mut writer = OutputWriter::new(&mut buffer, OutputFormat::JsonLines, true);
        writer.write_all(&records()).unwrap();
        assert_eq!(writer.written(), 2);

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"gimbal_pitch\":-90.0"));
        assert!(lines[1].ends_with("\"metadata\":{}}"));
    }

    #[test]
    fn test_json_batch_is_array() {
        let mut buffer = Vec::new();
        let mut writer = OutputWriter::new(&mut buffer, OutputFormat::Json, false);
        writer.write_all(&records()).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_from_config() {
        let config = OutputConfig {
            format: "JSONL".into(),
            pretty: true,
        };
        let writer = OutputWriter::from_config(Vec::new(), &config);
        assert_eq!(writer.format, OutputFormat::JsonLines);

        let fallback = OutputConfig {
            format: "xml".into(),
            pretty: false,
        };
        assert_eq!(
            OutputWriter::from_config(Vec::new(), &fallback).format,
            OutputFormat::Json
        );
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("ndjson"), Some(OutputFormat::JsonLines));
        assert_eq!(OutputFormat::parse("csv"), None);
    }
}
