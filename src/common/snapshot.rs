use std::borrow::Cow;

use serde::ser::Serializer;
use serde::Serialize;
use url::Url;

use crate::common::cookie::RequestCookie;
use crate::common::header::HeaderMap;
use crate::common::method::Method;
use crate::common::parameters::Parameters;
use crate::common::part::RequestPart;

/// An immutable record of one captured HTTP request, used for rendering documentation examples
/// rather than live transmission. Snapshots are only created through [`crate::builder`], which
/// keeps the Host and Content-Length headers consistent with the URI and body; once created,
/// every "modification" allocates a new snapshot and leaves the original untouched, so snapshots
/// can be shared freely across threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestSnapshot {
    uri: Url,
    method: Method,
    #[serde(serialize_with = "body_text")]
    body: Vec<u8>,
    headers: HeaderMap,
    parameters: Parameters,
    parts: Vec<RequestPart>,
    cookies: Vec<RequestCookie>,
}

impl RequestSnapshot {
    pub(crate) fn new(
        uri: Url,
        method: Method,
        body: Vec<u8>,
        headers: HeaderMap,
        parameters: Parameters,
        parts: Vec<RequestPart>,
        cookies: Vec<RequestCookie>,
    ) -> RequestSnapshot {
        RequestSnapshot { uri, method, body, headers, parameters, parts, cookies }
    }

    /// The request URI.
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// The request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The request body. Empty means the request has no body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The request body as text. Invalid UTF-8 is replaced.
    pub fn body_utf8(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// The request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The query or form parameters.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The multipart parts.
    pub fn parts(&self) -> &[RequestPart] {
        &self.parts
    }

    /// The request cookies.
    pub fn cookies(&self) -> &[RequestCookie] {
        &self.cookies
    }
}

/// Serializes request content as text for template rendering. Invalid UTF-8 is replaced.
pub(crate) fn body_text<S: Serializer>(body: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(body))
}
