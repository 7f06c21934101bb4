// License: MIT

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::HoconError;
use crate::parser::Parser;
use crate::value::Value;

mod access;


/// A fully parsed and resolved configuration tree.
///
/// A `Config` is immutable once built and can be shared freely for reads.
/// Values are addressed with dotted paths (`"server.host"`) through the
/// typed accessors in this module.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    root: Value,
}

impl Config {
    /// Parse a HOCON document from a string.
    ///
    /// # Examples
    /// ```
    /// use hocon_cfg::Config;
    ///
    /// let config = Config::from_str("server { host: localhost, port: 8080 }")?;
    /// assert_eq!(config.get_string("server.host"), "localhost");
    /// assert_eq!(config.get_int("server.port"), 8080);
    /// # Ok::<(), hocon_cfg::HoconError>(())
    /// ```
    pub fn from_str(input: &str) -> Result<Self, HoconError> {
        let mut parser = Parser::new(input);

        Ok(Config { root: parser.parse()? })
    }

    /// Parse the HOCON resource at the given path.
    ///
    /// Include directives inside the file are resolved relative to its
    /// parent directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, HoconError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| HoconError::could_not_parse_resource(&e))?;
        let mut parser = Parser::with_file_dir(&content, path.parent());

        Ok(Config { root: parser.parse()? })
    }

    /// The root value of the tree; an object unless the document was a
    /// top-level array.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Raw lookup by dotted path.
    ///
    /// Returns `None` when the path is missing or the root is not an
    /// object. Callers who prefer total functions over the panicking typed
    /// accessors branch on the returned variant themselves.
    pub fn get(&self, path: &str) -> Option<&Value> {
        match &self.root {
            Value::Object(object) => object.find(path),
            _ => None,
        }
    }

    /// Merge `other` underneath `self`: for keys present in both trees the
    /// value from `self` wins.
    ///
    /// Returns `self` unchanged unless both roots are objects.
    pub fn with_fallback(&self, other: &Config) -> Config {
        match (&self.root, &other.root) {
            (Value::Object(own), Value::Object(fallback)) => {
                let mut merged = fallback.clone();
                merged.merge(own.clone());

                Config { root: Value::Object(merged) }
            }
            _ => self.clone(),
        }
    }

    pub(crate) fn from_root(root: Value) -> Self {
        Config { root }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt(f)
    }
}
