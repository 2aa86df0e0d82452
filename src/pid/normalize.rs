use std::borrow::Cow;

use quick_xml::escape::{resolve_html5_entity, resolve_predefined_entity, unescape_with};

const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";
const BOM: char = '\u{feff}';

/// Turn a PID string as it arrives from POS clients into parseable XML.
///
/// Clients send the block HTML-escaped, wrapped in CDATA, prefixed with a
/// byte-order mark, or any mix of those. Never fails: text that cannot be
/// unescaped is kept as-is and left for the parser to reject.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();

    let unescaped = unescape_with(trimmed, |entity| {
        resolve_predefined_entity(entity).or_else(|| resolve_html5_entity(entity))
    })
    .unwrap_or(Cow::Borrowed(trimmed));

    let without_cdata = strip_cdata_markers(&unescaped);

    without_cdata
        .trim_start_matches(|c: char| c == BOM || c.is_whitespace())
        .trim_end()
        .to_string()
}

/// Drop every CDATA marker, wherever it sits.
///
/// Removing one marker can splice a new one together, so this runs until
/// none are left.
fn strip_cdata_markers(input: &str) -> Cow<'_, str> {
    if !input.contains(CDATA_OPEN) && !input.contains(CDATA_CLOSE) {
        return Cow::Borrowed(input);
    }

    let mut text = input.to_string();
    while text.contains(CDATA_OPEN) || text.contains(CDATA_CLOSE) {
        text = text.replace(CDATA_OPEN, "").replace(CDATA_CLOSE, "");
    }
    Cow::Owned(text)
}
