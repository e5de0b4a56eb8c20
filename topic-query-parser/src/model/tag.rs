use serde::{Deserialize, Serialize};

/// A bracketed tag as written in the source: `[name=default key=value ...]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    /// The value written directly after the tag name (`[name=value]`).
    pub default: Option<String>,
    /// Key/value pairs in source order. Duplicates are kept; lookups see the last one.
    pub attributes: Vec<(String, String)>,
}

impl Tag {
    /// Look up an attribute by its exact name.
    ///
    /// When a key is written more than once, the last occurrence wins.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}
