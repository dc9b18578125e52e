use serde::ser::{Serialize, SerializeMap, Serializer};

/// Creates a set of parameters.
/// ```
/// use reqsnap::parameters;
///
/// let parameters = parameters![
///     ("q", "a b"),
///     ("page", "1"),
///     ("q", "c")
/// ];
///
/// assert_eq!("q=a+b&q=c&page=1", parameters.to_query_string());
/// ```
#[macro_export]
macro_rules! parameters {
    () => { $crate::common::parameters::Parameters::new() };
    ($(($name:expr, $value:expr)),+ $(,)?) => {
        $crate::common::parameters::Parameters::from_pairs(vec![
            $(($name.into(), $value.into()),)+
        ])
    }
}

/// A multimap of request parameter names to values, used both for query strings and form encoded
/// bodies. Names keep their insertion order, and repeated values for one name keep theirs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parameters {
    entries: Vec<(String, Vec<String>)>,
}

impl Parameters {
    /// Creates an empty parameter set.
    pub fn new() -> Parameters {
        Parameters { entries: Vec::new() }
    }

    /// Gets a parameter set from the given vector of name and value pairs.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Parameters {
        pairs.into_iter().fold(Parameters::new(), |mut p, (name, value)| {
            p.add(name, value);
            p
        })
    }

    /// Adds a value for the given parameter, after any values the parameter already has.
    pub fn add(&mut self, name: String, value: String) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// Checks if the set contains the given parameter.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Gets all values for the given parameter.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, values)| values.as_slice())
    }

    /// Iterates parameters and their values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &[String])> {
        self.entries.iter().map(|(name, values)| (name, values.as_slice()))
    }

    /// The number of distinct parameter names in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encodes the parameters as an `application/x-www-form-urlencoded` query string. Repeated
    /// values are joined as `name=value1&name=value2` in insertion order.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, values) in &self.entries {
            for value in values {
                serializer.append_pair(name, value);
            }
        }
        serializer.finish()
    }

    /// Decodes a query string or form encoded body into a parameter set.
    pub fn from_query_string(raw: &str) -> Parameters {
        let mut parameters = Parameters::new();
        for (name, value) in form_urlencoded::parse(raw.as_bytes()).into_owned() {
            parameters.add(name, value);
        }
        parameters
    }
}

impl Serialize for Parameters {
    /// Serializes the set as an ordered mapping of name to value list.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, values) in &self.entries {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}
