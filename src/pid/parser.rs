use quick_xml::events::Event;
use quick_xml::{DeError, Reader, Writer};
use thiserror::Error;

use super::ROOT_ELEMENT;
use super::model::PidData;

/// Error raised when a PID block cannot be read
#[derive(Error, Debug)]
pub enum PidError {
    #[error("PID block is empty")]
    Empty,

    #[error("unexpected root element <{0}>, expected <PidData>")]
    UnexpectedRoot(String),

    #[error("malformed PID XML: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("unreadable PID block: {0}")]
    Deserialize(#[from] DeError),
}

/// Parse a normalized PID block.
///
/// The document must be well-formed and rooted at `<PidData>`; anything
/// beneath the root that is not recognised is ignored.
pub fn parse(xml: &str) -> Result<PidData, PidError> {
    if xml.trim().is_empty() {
        return Err(PidError::Empty);
    }

    let compacted = compact(xml)?;
    Ok(quick_xml::de::from_str(&compacted)?)
}

/// Re-emit the document without whitespace-only text and with trimmed
/// character data, checking the root element on the way.
fn compact(xml: &str) -> Result<String, PidError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut writer = Writer::new(Vec::with_capacity(xml.len()));
    let mut root_seen = false;

    loop {
        let event = reader.read_event()?;

        if let Event::Start(e) | Event::Empty(e) = &event {
            if !root_seen {
                let name = e.local_name();
                if name.as_ref() != ROOT_ELEMENT.as_bytes() {
                    return Err(PidError::UnexpectedRoot(
                        String::from_utf8_lossy(name.as_ref()).into_owned(),
                    ));
                }
                root_seen = true;
            }
        }

        match event {
            Event::Text(e) => {
                let mut text = e.into_owned();
                text.inplace_trim_start();
                let empty = text.inplace_trim_end();
                if !empty {
                    writer
                        .write_event(Event::Text(text))
                        .map_err(quick_xml::Error::from)?;
                }
            }
            Event::Eof => break,
            event => writer.write_event(event).map_err(quick_xml::Error::from)?,
        }
    }

    if !root_seen {
        return Err(PidError::Empty);
    }

    String::from_utf8(writer.into_inner())
        .map_err(|e| PidError::Deserialize(DeError::Custom(e.to_string())))
}
