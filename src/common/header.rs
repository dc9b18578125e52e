use std::fmt::{Display, Formatter};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::common::header::Header::{Custom, Standard};

/// A header name. Is either a "Standard" header with a static string, or a "Custom" header with a
/// uniquely allocated String. The "Standard" variant is to reuse memory for frequently seen headers.
/// Names are kept lowercase so lookups are case-insensitive.
#[derive(PartialEq, Eq, Hash, Debug, Clone)]
pub enum Header {
    Standard(&'static str),
    Custom(String),
}

impl Header {
    pub fn as_str(&self) -> &str {
        match self {
            Header::Standard(str) => str,
            Header::Custom(str) => str.as_str(),
        }
    }
}

impl Display for Header {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Standard(s) => f.write_str(s),
            Custom(s) => f.write_str(s),
        }
    }
}

impl Serialize for Header {
    /// Serializes the header as its lowercase name.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

macro_rules! standard_headers {
    (
        $(
            $(#[$docs:meta])*
            ($name:ident, $value:expr);
        )+
    ) => {
        $(
            $(#[$docs])*
            pub const $name: Header = Header::Standard($value);
        )+


        impl From<String> for Header {
            /// Gets a header from the given string representing the header name.
            fn from(mut value: String) -> Header {
                value.make_ascii_lowercase();
                match value.as_str() {
                    $(
                    $value => $name,
                    )+
                    _ => Header::Custom(value)
                }
            }
        }
    }
}

impl From<&str> for Header {
    /// Gets a header from the given string representing the header name.
    fn from(value: &str) -> Header {
        Header::from(value.to_string())
    }
}

standard_headers! {
    (ACCEPT, "accept");
    (ACCEPT_CHARSET, "accept-charset");
    (ACCEPT_ENCODING, "accept-encoding");
    (ACCEPT_LANGUAGE, "accept-language");
    (AUTHORIZATION, "authorization");
    (CACHE_CONTROL, "cache-control");
    (CONNECTION, "connection");
    (CONTENT_DISPOSITION, "content-disposition");
    (CONTENT_ENCODING, "content-encoding");
    (CONTENT_LANGUAGE, "content-language");
    (CONTENT_LENGTH, "content-length");
    (CONTENT_TYPE, "content-type");
    (COOKIE, "cookie");
    (DATE, "date");
    (EXPECT, "expect");
    (FORWARDED, "forwarded");
    (FROM, "from");
    (HOST, "host");
    (IF_MATCH, "if-match");
    (IF_MODIFIED_SINCE, "if-modified-since");
    (IF_NONE_MATCH, "if-none-match");
    (IF_RANGE, "if-range");
    (IF_UNMODIFIED_SINCE, "if-unmodified-since");
    (MAX_FORWARDS, "max-forwards");
    (ORIGIN, "origin");
    (PRAGMA, "pragma");
    (PROXY_AUTHORIZATION, "proxy-authorization");
    (RANGE, "range");
    (REFERER, "referer");
    (TE, "te");
    (TRAILER, "trailer");
    (TRANSFER_ENCODING, "transfer-encoding");
    (UPGRADE, "upgrade");
    (USER_AGENT, "user-agent");
    (VIA, "via");
    (WARNING, "warning");
}

/// Creates a map of headers.
/// ```
/// use reqsnap::common::header::{CONTENT_LENGTH, HOST, Header};
/// use reqsnap::header_map;
///
/// let headers = header_map![
///     (HOST, "example.com"),
///     ("X-Request-Id", "42"),
///     ("conTent-LENgth", "5")
/// ];
///
/// assert!(headers.contains_header_value(&HOST, "example.com"));
/// assert!(headers.contains_header_value(&Header::Custom("x-request-id".into()), "42"));
/// assert!(headers.contains_header_value(&CONTENT_LENGTH, "5"));
/// ```
#[macro_export]
macro_rules! header_map {
    () => { $crate::common::header::HeaderMap::new() };
    ($(($header:expr, $value:expr)),+ $(,)?) => {
        $crate::common::header::HeaderMap::from_pairs(vec![
            $(($header.into(), $value.into()),)+
        ])
    }
}

/// A multimap of headers to values. Distinct header names keep their insertion order, and repeated
/// values for one name keep theirs, so rendered output is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderMap {
    entries: Vec<(Header, Vec<String>)>,
}

impl HeaderMap {
    /// Creates an empty header map.
    pub fn new() -> HeaderMap {
        HeaderMap { entries: Vec::new() }
    }

    /// Gets a header map from the given vector of header value and key pairs.
    pub fn from_pairs(header_values: Vec<(Header, String)>) -> HeaderMap {
        header_values.into_iter().fold(HeaderMap::new(), |mut m, (header, value)| {
            m.add_header(header, value);
            m
        })
    }

    /// Adds a value for the given header, after any values the header already has.
    pub fn add_header(&mut self, k: Header, v: String) {
        match self.entries.iter_mut().find(|(name, _)| *name == k) {
            Some((_, values)) => values.push(v),
            None => self.entries.push((k, vec![v])),
        }
    }

    /// Replaces all values for the given header with the single given value. An existing header
    /// keeps its position in the map; a new one is appended at the end.
    pub fn set_header(&mut self, k: Header, v: String) {
        match self.entries.iter_mut().find(|(name, _)| *name == k) {
            Some((_, values)) => *values = vec![v],
            None => self.entries.push((k, vec![v])),
        }
    }

    /// Checks if the map contains the given header.
    pub fn contains_header(&self, k: &Header) -> bool {
        self.entries.iter().any(|(name, _)| name == k)
    }

    /// Checks if the map contains the given header and corresponding header value.
    pub fn contains_header_value(&self, k: &Header, v: &str) -> bool {
        self.get(k).map_or(false, |values| values.iter().any(|value| value == v))
    }

    /// Gets all values for the given header.
    pub fn get(&self, k: &Header) -> Option<&[String]> {
        self.entries.iter().find(|(name, _)| name == k).map(|(_, values)| values.as_slice())
    }

    /// Gets the first value for the given header.
    pub fn get_first_header_value(&self, k: &Header) -> Option<&String> {
        self.get(k)?.first()
    }

    /// Iterates headers and their values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Header, &[String])> {
        self.entries.iter().map(|(name, values)| (name, values.as_slice()))
    }

    /// The number of distinct header names in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for HeaderMap {
    /// Serializes the map as an ordered mapping of lowercase name to value list.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, values) in &self.entries {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}
