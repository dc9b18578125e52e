use std::borrow::Cow;

use serde::Serialize;

use crate::common::header::HeaderMap;
use crate::common::snapshot::body_text;

/// One named part of a multipart request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestPart {
    name: String,
    filename: Option<String>,
    headers: HeaderMap,
    #[serde(serialize_with = "body_text")]
    body: Vec<u8>,
}

impl RequestPart {
    /// Creates a part with the given name, submitted file name, headers, and content.
    pub fn new(name: String, filename: Option<String>, headers: HeaderMap, body: Vec<u8>) -> RequestPart {
        RequestPart { name, filename, headers, body }
    }

    /// The part name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The file name submitted with the part, if any.
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// The part's headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The part's content.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The part's content as text. Invalid UTF-8 is replaced.
    pub fn body_utf8(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
