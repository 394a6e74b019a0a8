//! XML envelopes exchanged between the dispatcher and the responder.
//!
//! The request is `<root><timeout>N</timeout></root>` and the reply is the
//! fixed [`SUCCESS_REPLY`]. An XML declaration is accepted on input but
//! never emitted.

mod error;

pub use error::XmlError;

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;
use std::time::Duration;

/// Root element of both envelopes.
pub const ROOT_ELEMENT: &str = "root";

/// Body returned by the responder once its delay has elapsed.
pub const SUCCESS_REPLY: &str = "<root><success>true</success></root>";

/// Content type sent and served for XML bodies.
pub const XML_CONTENT_TYPE: &str = "application/xml";

/// Delay requested by the dispatcher, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TimeoutRequest {
    pub timeout: u64,
}

impl TimeoutRequest {
    pub fn new(timeout: u64) -> Self {
        Self { timeout }
    }

    /// Parse a request envelope.
    ///
    /// # Examples
    ///
    /// ```
    /// use xmlecho::xml::TimeoutRequest;
    ///
    /// let req = TimeoutRequest::from_xml("<root><timeout>3</timeout></root>").unwrap();
    /// assert_eq!(req.timeout, 3);
    /// ```
    pub fn from_xml(body: &str) -> Result<Self, XmlError> {
        let found = root_element_name(body)?;
        if found != ROOT_ELEMENT {
            return Err(XmlError::UnexpectedRoot {
                expected: ROOT_ELEMENT.to_string(),
                found,
            });
        }
        let request: Self = quick_xml::de::from_str(body)?;
        if request.timeout.checked_mul(1000).is_none() {
            return Err(XmlError::Malformed(format!(
                "timeout {} is out of range",
                request.timeout
            )));
        }
        Ok(request)
    }

    /// Render the request envelope.
    pub fn to_xml(&self) -> String {
        format!("<root><timeout>{}</timeout></root>", self.timeout)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Name of the document's single root element.
///
/// Walks the whole document: only whitespace, comments and processing
/// instructions may surround the root element.
fn root_element_name(body: &str) -> Result<String, XmlError> {
    let mut reader = Reader::from_str(body);
    let mut root: Option<String> = None;
    let mut depth = 0usize;
    let mut closed = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if closed => {
                return Err(XmlError::Malformed(format!(
                    "unexpected element <{}> after root element",
                    String::from_utf8_lossy(e.name().as_ref())
                )));
            }
            Event::Start(e) => {
                if root.is_none() {
                    root = Some(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if root.is_none() {
                    root = Some(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                    closed = true;
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    closed = true;
                }
            }
            Event::Text(t) if depth == 0 && !t.iter().all(u8::is_ascii_whitespace) => {
                let position = if closed { "after" } else { "before" };
                return Err(XmlError::Malformed(format!(
                    "text content {} root element",
                    position
                )));
            }
            Event::CData(_) if depth == 0 => {
                return Err(XmlError::Malformed(
                    "CDATA outside root element".to_string(),
                ));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match root {
        Some(name) if closed => Ok(name),
        Some(name) => Err(XmlError::Malformed(format!(
            "root element <{}> is not closed",
            name
        ))),
        None => Err(XmlError::Malformed("document has no root element".to_string())),
    }
}
