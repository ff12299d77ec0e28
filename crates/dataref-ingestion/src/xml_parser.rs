//! Full-text XML (JATS / publisher markup) text extraction.
//!
//! Every non-empty text node is collected in document order, element text and
//! tail text alike, and joined with single spaces. Broken markup is recovered
//! from: mismatched end tags are accepted and parsing resumes after an error,
//! so text past the damage is still mined.

use std::path::Path;

use dataref_common::{DatarefError, Result, TextSource};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, warn};

use crate::sanitize::clean_text;

/// Read an XML file and return its cleaned text.
pub fn extract_xml_text(xml_path: &Path) -> Result<String> {
    let bytes = std::fs::read(xml_path)
        .map_err(|e| DatarefError::source_read(TextSource::Xml, xml_path, e))?;
    let xml = String::from_utf8_lossy(&bytes);
    let parts = collect_text_nodes(&xml);
    debug!(path = %xml_path.display(), nodes = parts.len(), "XML text extracted");
    Ok(clean_text(&parts.join(" ")))
}

/// Trimmed, non-empty text and CDATA nodes in document order.
pub fn collect_text_nodes(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    reader.config_mut().check_end_names = false;
    reader.config_mut().allow_unmatched_ends = true;

    let mut parts = Vec::new();
    let mut buf = Vec::new();
    let mut last_error_at = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(ref e)) => {
                let text = match e.unescape() {
                    Ok(t) => t.into_owned(),
                    // Unknown entities (&nbsp; and friends) keep their raw form.
                    Err(_) => String::from_utf8_lossy(e).into_owned(),
                };
                push_trimmed(&mut parts, &text);
            }
            Ok(Event::CData(ref e)) => {
                push_trimmed(&mut parts, &String::from_utf8_lossy(e));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                let position = reader.buffer_position();
                warn!(position, "XML parse error, resuming: {}", e);
                // No progress since the previous error: the rest is unreadable.
                if last_error_at == Some(position) {
                    break;
                }
                last_error_at = Some(position);
            }
            _ => {}
        }
        buf.clear();
    }

    parts
}

fn push_trimmed(parts: &mut Vec<String>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
}
