use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::Event;
use regex::Regex;
use std::sync::LazyLock;

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("word pattern is a valid regex"));

static CHARACTER_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&#?[A-Za-z0-9]{1,32};").expect("reference pattern is a valid regex")
});

/// Elements whose content is code or styling, never prose.
const RAW_TEXT_ELEMENTS: [&[u8]; 2] = [b"script", b"style"];

/// Tokenizes a whole document, HTML or plain text.
///
/// The caller is expected to have lowercased the document already; tokens are
/// returned exactly as they appear, in document order.
pub fn tokenize_document(document: &str) -> Vec<String> {
    if !document.contains('<') {
        return extract_tokens(document);
    }

    scan_text_segments(document)
        .iter()
        .flat_map(|segment| extract_tokens(segment))
        .collect()
}

/// Splits one text segment into its word runs.
pub fn extract_tokens(segment: &str) -> Vec<String> {
    WORD_PATTERN
        .find_iter(segment)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Walks the markup and collects the visible text segments.
///
/// Stray `<` and `&` in running text are kept as text (see [`escape_stray_markup`]).
/// A segment that still fails to decode is logged and kept as raw text. A reader
/// error ends the scan early, keeping whatever was collected up to that point.
pub fn scan_text_segments(document: &str) -> Vec<String> {
    let document = escape_stray_markup(document);
    let mut reader = Reader::from_str(&document);
    reader.trim_text(false);
    reader.check_end_names(false);

    let mut segments = Vec::new();
    let mut raw_text_depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(tag)) => {
                if is_raw_text_element(tag.name().as_ref()) {
                    raw_text_depth += 1;
                }
            }
            Ok(Event::End(tag)) => {
                if is_raw_text_element(tag.name().as_ref()) {
                    raw_text_depth = raw_text_depth.saturating_sub(1);
                }
            }
            Ok(Event::Text(text)) if raw_text_depth == 0 => {
                match text.unescape() {
                    Ok(segment) => segments.push(segment.into_owned()),
                    Err(err) => {
                        tracing::warn!(
                            "Keeping undecodable text segment near byte {} as raw text: {}",
                            reader.buffer_position(),
                            err
                        );
                        segments.push(String::from_utf8_lossy(&*text).into_owned());
                    }
                }
            }
            Ok(Event::CData(data)) if raw_text_depth == 0 => match std::str::from_utf8(&*data) {
                Ok(segment) => segments.push(segment.to_string()),
                Err(err) => {
                    tracing::warn!(
                        "Skipping undecodable CDATA segment near byte {}: {}",
                        reader.buffer_position(),
                        err
                    );
                }
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(
                    "Markup scan stopped at byte {}: {}",
                    reader.buffer_position(),
                    err
                );
                break;
            }
        }
    }

    tracing::debug!("Scanned {} text segments", segments.len());
    segments
}

/// Escapes markup characters that a lenient HTML reader would treat as text.
///
/// A `<` not followed by a letter, `/`, `!` or `?` cannot open a tag, and a `&`
/// that does not start a resolvable character reference is a literal ampersand
/// (`dombey & son`, `&c.`).
pub fn escape_stray_markup(document: &str) -> String {
    let mut escaped = String::with_capacity(document.len());
    let mut chars = document.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '<' => match chars.peek() {
                Some((_, next)) if next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?') => {
                    escaped.push('<')
                }
                _ => escaped.push_str("&lt;"),
            },
            '&' => {
                let resolvable = CHARACTER_REFERENCE
                    .find(&document[i..])
                    .is_some_and(|reference| unescape(reference.as_str()).is_ok());
                if resolvable {
                    escaped.push('&');
                } else {
                    escaped.push_str("&amp;");
                }
            }
            _ => escaped.push(c),
        }
    }

    escaped
}

fn is_raw_text_element(name: &[u8]) -> bool {
    RAW_TEXT_ELEMENTS
        .iter()
        .any(|element| name.eq_ignore_ascii_case(element))
}
