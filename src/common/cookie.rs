use serde::Serialize;

/// A cookie sent with a captured request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestCookie {
    name: String,
    value: String,
}

impl RequestCookie {
    /// Creates a cookie with the given name and value.
    pub fn new(name: String, value: String) -> RequestCookie {
        RequestCookie { name, value }
    }

    /// The cookie name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cookie value.
    pub fn value(&self) -> &str {
        &self.value
    }
}
