//! Payload serialization and response text extraction.
//!
//! The SOAP services take fixed-structure XML documents; the subscriber list
//! API takes an URL-encoded form body. Both serializers iterate fields in the
//! schema order their integration hardcodes, so output is deterministic and
//! stable for golden-string tests regardless of how the caller filled the
//! form.

use std::borrow::Cow;

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Fixed-order XML writer for service payloads.
///
/// Text values are entity-escaped, boolean flags render as the literal
/// strings `true`/`false`, and empty values render as self-closing elements
/// so the document shape stays stable no matter which slots the caller
/// filled.
#[derive(Debug, Default)]
pub struct PayloadWriter {
    buf: String,
}

impl PayloadWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a section element.
    pub fn open(&mut self, tag: &str) {
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push('>');
    }

    /// Close a section element.
    pub fn close(&mut self, tag: &str) {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
    }

    /// Write one element; empty values become self-closing.
    pub fn element(&mut self, tag: &str, value: &str) {
        if value.is_empty() {
            self.buf.push('<');
            self.buf.push_str(tag);
            self.buf.push_str("/>");
        } else {
            self.open(tag);
            self.buf.push_str(&escape(value));
            self.close(tag);
        }
    }

    /// Write a boolean flag as the literal string `true` or `false`.
    pub fn flag(&mut self, tag: &str, value: bool) {
        self.element(tag, if value { "true" } else { "false" });
    }

    /// Consume the writer and return the document.
    #[must_use]
    pub fn finish(self) -> String {
        self.buf
    }
}

/// Encode key/value pairs as an `&`-joined URL-encoded form body.
///
/// No leading separator; keys and values are both percent-encoded.
#[must_use]
pub fn encode_form(pairs: &[(&str, String)]) -> String {
    let mut body = String::new();
    for (key, value) in pairs {
        if !body.is_empty() {
            body.push('&');
        }
        body.push_str(&urlencoding::encode(key));
        body.push('=');
        body.push_str(&urlencoding::encode(value));
    }
    body
}

/// Text content of the first `<tag>` element in `xml`, entity-decoded.
///
/// Returns `None` when the element is absent or empty. Nested documents
/// shipped as escaped text (the SOAP result payloads) come back decoded and
/// ready for a second pass.
#[must_use]
pub fn element_text(xml: &str, tag: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut inside = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => inside = e.local_name().as_ref() == tag.as_bytes(),
            Ok(Event::Text(t)) if inside => return t.unescape().ok().map(Cow::into_owned),
            Ok(Event::End(_)) => inside = false,
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}
