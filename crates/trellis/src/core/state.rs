use std::{fmt, str::FromStr};

use convert_case::{Case, Casing};

use crate::{error, error::Result};

/// Return true if the full name is usable as an explicit node name.
pub fn valid_nodename(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}

/// A node name. Explicit names are any non-empty string without whitespace;
/// generated names are `<kind>_<n>` in snake case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeName {
    /// Stored node name string.
    name: String,
}

impl FromStr for NodeName {
    type Err = error::Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl NodeName {
    /// Create a new NodeName, rejecting empty names and names containing
    /// whitespace.
    fn new(name: &str) -> Result<Self> {
        if !valid_nodename(name) {
            return Err(error::Error::Invalid(format!("node name {name:?}")));
        }
        Ok(Self {
            name: name.to_string(),
        })
    }

    /// Munge an arbitrary string into a snake case kind name, such as a Rust
    /// type name. Characters outside `[a-z0-9_]` are dropped.
    pub fn convert(name: &str) -> Self {
        let raw = name.to_case(Case::Snake);
        let filtered: String = raw
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
            .collect();
        let name = if filtered.is_empty() {
            "node".to_string()
        } else {
            filtered
        };
        Self { name }
    }

    /// Generate the default name for the `n`th node of this kind.
    pub fn numbered(&self, n: u64) -> Self {
        Self {
            name: format!("{}_{n}", self.name),
        }
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq<&str> for NodeName {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

impl PartialEq<str> for NodeName {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

impl TryFrom<&str> for NodeName {
    type Error = error::Error;
    fn try_from(name: &str) -> Result<Self> {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_names() {
        assert_eq!(NodeName::try_from("counter_label").unwrap(), "counter_label");
        assert_eq!(NodeName::try_from("Score:Panel").unwrap(), "Score:Panel");
        assert!(NodeName::try_from("").is_err());
        assert!(NodeName::try_from("two words").is_err());
        assert!("tab\there".parse::<NodeName>().is_err());
    }

    #[test]
    fn kind_names() {
        assert_eq!(NodeName::convert("TextField"), "text_field");
        assert_eq!(NodeName::convert("Button"), "button");
        assert_eq!(NodeName::convert("!!!"), "node");
        assert_eq!(NodeName::convert("Slider").numbered(3), "slider_3");
    }
}
