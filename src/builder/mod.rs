use log::trace;
use url::Url;

use crate::common::cookie::RequestCookie;
use crate::common::header::{self, Header, HeaderMap};
use crate::common::method::Method;
use crate::common::parameters::Parameters;
use crate::common::part::RequestPart;
use crate::common::snapshot::RequestSnapshot;

/// Creates a snapshot from raw captured attributes. The given headers are augmented so that they
/// always include a Host header when the URI has a host, and a Content-Length header matching the
/// body length when the request has a body.
pub fn construct(
    uri: Url,
    method: Method,
    body: Vec<u8>,
    headers: HeaderMap,
    parameters: Parameters,
    parts: Vec<RequestPart>,
    cookies: Vec<RequestCookie>,
) -> RequestSnapshot {
    let headers = augment_headers(headers, &uri, &body);
    RequestSnapshot::new(uri, method, body, headers, parameters, parts, cookies)
}

/// Creates a snapshot with no cookies. Equivalent to [`construct`] with an empty cookie list.
pub fn construct_without_cookies(
    uri: Url,
    method: Method,
    body: Vec<u8>,
    headers: HeaderMap,
    parameters: Parameters,
    parts: Vec<RequestPart>,
) -> RequestSnapshot {
    construct(uri, method, body, headers, parameters, parts, Vec::new())
}

/// Creates a snapshot based on the given original but with the given body. If the original has a
/// Content-Length header its value is synchronized to the length of the new body; a missing
/// Content-Length stays missing. All other attributes are copied unchanged.
pub fn with_new_body(original: &RequestSnapshot, new_body: Vec<u8>) -> RequestSnapshot {
    let mut buffer = HeaderBuffer::new(original.headers().clone());
    buffer.sync_content_length(&new_body);
    RequestSnapshot::new(
        original.uri().clone(),
        original.method(),
        new_body,
        buffer.freeze(),
        original.parameters().clone(),
        original.parts().to_vec(),
        original.cookies().to_vec(),
    )
}

/// Creates a snapshot based on the given original but with the given headers, taken verbatim.
/// No Host or Content-Length augmentation is performed; callers that have computed a fully formed
/// header set keep exactly what they pass in.
pub fn with_new_headers(original: &RequestSnapshot, new_headers: HeaderMap) -> RequestSnapshot {
    RequestSnapshot::new(
        original.uri().clone(),
        original.method(),
        original.body().to_vec(),
        new_headers,
        original.parameters().clone(),
        original.parts().to_vec(),
        original.cookies().to_vec(),
    )
}

/// Creates a snapshot based on the given original but with the given parameters. The query string
/// of a GET request is rebuilt from the new parameters; an empty set removes the query component
/// entirely. For any other method the URI is left unchanged, since the parameters travel in the
/// body instead.
pub fn with_new_parameters(original: &RequestSnapshot, new_parameters: Parameters) -> RequestSnapshot {
    let uri = if original.method() == Method::GET {
        update_query_string(original.uri(), &new_parameters)
    } else {
        original.uri().clone()
    };
    RequestSnapshot::new(
        uri,
        original.method(),
        original.body().to_vec(),
        original.headers().clone(),
        new_parameters,
        original.parts().to_vec(),
        original.cookies().to_vec(),
    )
}

fn update_query_string(original_uri: &Url, parameters: &Parameters) -> Url {
    let mut uri = original_uri.clone();
    if parameters.is_empty() {
        uri.set_query(None);
    } else {
        uri.set_query(Some(&parameters.to_query_string()));
    }
    uri
}

fn augment_headers(headers: HeaderMap, uri: &Url, body: &[u8]) -> HeaderMap {
    let mut buffer = HeaderBuffer::new(headers);
    if let Some(host) = host_header(uri) {
        buffer.add_if_absent(header::HOST, host);
    }
    buffer.set_content_length(body);
    buffer.freeze()
}

/// The Host header value for the given URI, or None when the URI has no host. The port is
/// included only when the URI carries an explicit non-default port.
fn host_header(uri: &Url) -> Option<String> {
    let host = uri.host_str()?;
    Some(match uri.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Buffer for header edits made while a snapshot is assembled. Lives only for the duration of a
/// single builder call and freezes into the final map before the snapshot is returned.
struct HeaderBuffer {
    headers: HeaderMap,
}

impl HeaderBuffer {
    fn new(headers: HeaderMap) -> HeaderBuffer {
        HeaderBuffer { headers }
    }

    /// Adds the header only if the map has no entry for it yet.
    fn add_if_absent(&mut self, name: Header, value: String) {
        if !self.headers.contains_header(&name) {
            trace!("adding {}: {}", name, value);
            self.headers.add_header(name, value);
        }
    }

    /// Sets Content-Length to the body length. An empty body leaves the map as it is, including
    /// any Content-Length already present.
    fn set_content_length(&mut self, body: &[u8]) {
        if !body.is_empty() {
            trace!("setting content-length to {}", body.len());
            self.headers.set_header(header::CONTENT_LENGTH, body.len().to_string());
        }
    }

    /// Updates the value of an existing Content-Length header to the body length. A map without
    /// Content-Length is left untouched, even for a non-empty body.
    fn sync_content_length(&mut self, body: &[u8]) {
        if self.headers.contains_header(&header::CONTENT_LENGTH) {
            trace!("syncing content-length to {}", body.len());
            self.headers.set_header(header::CONTENT_LENGTH, body.len().to_string());
        }
    }

    fn freeze(self) -> HeaderMap {
        self.headers
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::builder;
    use crate::common::header;
    use crate::common::method::Method;
    use crate::{header_map, parameters};

    fn uri(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn host_header_added_from_uri() {
        let snapshot = builder::construct_without_cookies(
            uri("http://example.com/widgets"),
            Method::GET,
            Vec::new(),
            header_map![],
            parameters![],
            Vec::new(),
        );

        assert_eq!(Some(&"example.com".to_string()), snapshot.headers().get_first_header_value(&header::HOST));
    }

    #[test]
    fn host_header_includes_explicit_port() {
        let snapshot = builder::construct_without_cookies(
            uri("http://example.com:8080/x"),
            Method::GET,
            Vec::new(),
            header_map![],
            parameters![],
            Vec::new(),
        );

        assert_eq!(Some(&"example.com:8080".to_string()), snapshot.headers().get_first_header_value(&header::HOST));
    }

    #[test]
    fn host_header_omits_default_port() {
        let snapshot = builder::construct_without_cookies(
            uri("http://example.com:80/x"),
            Method::GET,
            Vec::new(),
            header_map![],
            parameters![],
            Vec::new(),
        );

        assert_eq!(Some(&"example.com".to_string()), snapshot.headers().get_first_header_value(&header::HOST));
    }

    #[test]
    fn existing_host_header_is_kept() {
        let snapshot = builder::construct_without_cookies(
            uri("http://example.com/"),
            Method::GET,
            Vec::new(),
            header_map![(header::HOST, "proxy.internal")],
            parameters![],
            Vec::new(),
        );

        assert_eq!(Some(["proxy.internal".to_string()].as_slice()), snapshot.headers().get(&header::HOST));
    }

    #[test]
    fn no_host_header_for_uri_without_host() {
        let snapshot = builder::construct_without_cookies(
            uri("mailto:docs@example.com"),
            Method::GET,
            Vec::new(),
            header_map![],
            parameters![],
            Vec::new(),
        );

        assert!(!snapshot.headers().contains_header(&header::HOST));
    }

    #[test]
    fn content_length_set_for_body() {
        let snapshot = builder::construct_without_cookies(
            uri("http://example.com/x"),
            Method::POST,
            br#"{"a":1}"#.to_vec(),
            header_map![],
            parameters![],
            Vec::new(),
        );

        assert_eq!(Some(&"7".to_string()), snapshot.headers().get_first_header_value(&header::CONTENT_LENGTH));
    }

    #[test]
    fn stale_content_length_overwritten() {
        let snapshot = builder::construct_without_cookies(
            uri("http://example.com/x"),
            Method::POST,
            b"hello".to_vec(),
            header_map![(header::CONTENT_LENGTH, "99")],
            parameters![],
            Vec::new(),
        );

        assert_eq!(Some(["5".to_string()].as_slice()), snapshot.headers().get(&header::CONTENT_LENGTH));
    }

    #[test]
    fn no_content_length_for_empty_body() {
        let snapshot = builder::construct_without_cookies(
            uri("http://example.com/x"),
            Method::GET,
            Vec::new(),
            header_map![],
            parameters![],
            Vec::new(),
        );

        assert!(!snapshot.headers().contains_header(&header::CONTENT_LENGTH));
    }

    #[test]
    fn preset_content_length_kept_for_empty_body() {
        let snapshot = builder::construct_without_cookies(
            uri("http://example.com/x"),
            Method::GET,
            Vec::new(),
            header_map![(header::CONTENT_LENGTH, "3")],
            parameters![],
            Vec::new(),
        );

        assert_eq!(Some(&"3".to_string()), snapshot.headers().get_first_header_value(&header::CONTENT_LENGTH));
    }

    #[test]
    fn new_body_updates_content_length() {
        let original = builder::construct_without_cookies(
            uri("http://example.com/x"),
            Method::POST,
            b"hello".to_vec(),
            header_map![],
            parameters![],
            Vec::new(),
        );

        let derived = builder::with_new_body(&original, b"hello, world".to_vec());

        assert_eq!(b"hello, world", derived.body());
        assert_eq!(Some(&"12".to_string()), derived.headers().get_first_header_value(&header::CONTENT_LENGTH));
        assert_eq!(b"hello", original.body());
        assert_eq!(Some(&"5".to_string()), original.headers().get_first_header_value(&header::CONTENT_LENGTH));
    }

    #[test]
    fn new_body_does_not_introduce_content_length() {
        let original = builder::construct_without_cookies(
            uri("http://example.com/x"),
            Method::GET,
            Vec::new(),
            header_map![],
            parameters![],
            Vec::new(),
        );

        let derived = builder::with_new_body(&original, b"late body".to_vec());

        assert!(!derived.headers().contains_header(&header::CONTENT_LENGTH));
    }

    #[test]
    fn emptied_body_zeroes_content_length_without_removing_it() {
        let original = builder::construct_without_cookies(
            uri("http://example.com/x"),
            Method::POST,
            b"hello".to_vec(),
            header_map![],
            parameters![],
            Vec::new(),
        );

        let derived = builder::with_new_body(&original, Vec::new());

        assert_eq!(Some(&"0".to_string()), derived.headers().get_first_header_value(&header::CONTENT_LENGTH));
    }

    #[test]
    fn new_body_twice_is_idempotent() {
        let original = builder::construct_without_cookies(
            uri("http://example.com/x"),
            Method::POST,
            b"hello".to_vec(),
            header_map![("content-type", "text/plain")],
            parameters![],
            Vec::new(),
        );

        let once = builder::with_new_body(&original, b"replaced".to_vec());
        let twice = builder::with_new_body(&once, b"replaced".to_vec());

        assert_eq!(once, twice);
    }

    #[test]
    fn new_headers_taken_verbatim() {
        let original = builder::construct_without_cookies(
            uri("http://example.com/x"),
            Method::POST,
            b"hello".to_vec(),
            header_map![],
            parameters![],
            Vec::new(),
        );
        assert!(original.headers().contains_header(&header::HOST));

        let derived = builder::with_new_headers(&original, header_map![("x-custom", "1")]);

        assert!(!derived.headers().contains_header(&header::HOST));
        assert!(!derived.headers().contains_header(&header::CONTENT_LENGTH));
        assert_eq!(Some(&"1".to_string()), derived.headers().get_first_header_value(&"x-custom".into()));
        assert_eq!(b"hello", derived.body());
    }

    #[test]
    fn new_parameters_rebuild_query_of_get_request() {
        let original = builder::construct_without_cookies(
            uri("http://example.com/x?old=1"),
            Method::GET,
            Vec::new(),
            header_map![],
            parameters![("old", "1")],
            Vec::new(),
        );

        let derived = builder::with_new_parameters(&original, parameters![("new", "2")]);

        assert_eq!("http://example.com/x?new=2", derived.uri().as_str());
        assert_eq!(parameters![("new", "2")], *derived.parameters());
        assert_eq!("http://example.com/x?old=1", original.uri().as_str());
    }

    #[test]
    fn empty_parameters_remove_query_entirely() {
        let original = builder::construct_without_cookies(
            uri("http://example.com/x?old=1"),
            Method::GET,
            Vec::new(),
            header_map![],
            parameters![("old", "1")],
            Vec::new(),
        );

        let derived = builder::with_new_parameters(&original, parameters![]);

        assert_eq!("http://example.com/x", derived.uri().as_str());
        assert!(derived.parameters().is_empty());
    }

    #[test]
    fn query_rebuild_preserves_rest_of_uri() {
        let original = builder::construct_without_cookies(
            uri("https://user@example.com:8443/a/b?old=1#section"),
            Method::GET,
            Vec::new(),
            header_map![],
            parameters![("old", "1")],
            Vec::new(),
        );

        let derived = builder::with_new_parameters(&original, parameters![("new", "2")]);

        assert_eq!("https://user@example.com:8443/a/b?new=2#section", derived.uri().as_str());
    }

    #[test]
    fn non_get_request_uri_unchanged_by_new_parameters() {
        let original = builder::construct_without_cookies(
            uri("http://example.com/x?old=1"),
            Method::POST,
            b"old=1".to_vec(),
            header_map![],
            parameters![("old", "1")],
            Vec::new(),
        );

        let derived = builder::with_new_parameters(&original, parameters![("new", "2")]);

        assert_eq!("http://example.com/x?old=1", derived.uri().as_str());
        assert_eq!(parameters![("new", "2")], *derived.parameters());
    }

    #[test]
    fn derivation_copies_unrelated_attributes() {
        let original = builder::construct(
            uri("http://example.com/x"),
            Method::POST,
            b"hello".to_vec(),
            header_map![("content-type", "text/plain")],
            parameters![("a", "1")],
            Vec::new(),
            vec![crate::common::cookie::RequestCookie::new("session".to_string(), "abc".to_string())],
        );

        let derived = builder::with_new_body(&original, b"bye".to_vec());

        assert_eq!(original.uri(), derived.uri());
        assert_eq!(original.method(), derived.method());
        assert_eq!(original.parameters(), derived.parameters());
        assert_eq!(original.cookies(), derived.cookies());
        assert_eq!(
            original.headers().get_first_header_value(&header::CONTENT_TYPE),
            derived.headers().get_first_header_value(&header::CONTENT_TYPE)
        );
    }
}
