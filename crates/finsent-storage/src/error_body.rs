//! Storage service error bodies: `<Error><Code>..</Code><Message>..</Message></Error>`.

use quick_xml::events::Event;
use quick_xml::Reader;

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ServiceErrorBody {
    pub(crate) code: Option<String>,
    pub(crate) message: Option<String>,
}

/// Pull `Code` and `Message` out of an XML error body.
///
/// Malformed or empty bodies yield an empty result rather than an error; the
/// HTTP status is still reported by the caller.
pub(crate) fn parse_error_body(xml: &str) -> ServiceErrorBody {
    let mut reader = Reader::from_str(xml.trim_start_matches('\u{feff}'));
    reader.config_mut().trim_text(true);

    let mut parsed = ServiceErrorBody::default();
    let mut current_tag = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                current_tag = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
            }
            Ok(Event::End(_)) => current_tag.clear(),
            Ok(Event::Text(e)) => {
                let text = e.unescape().unwrap_or_default().into_owned();
                match current_tag.as_str() {
                    "Code" => parsed.code = Some(text),
                    // The service appends request ids and timestamps on new lines.
                    "Message" => parsed.message = text.lines().next().map(str::to_string),
                    _ => {}
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
    }

    parsed
}
