use std::fmt;
use std::time::Duration;

use indexmap::IndexMap;

/// An unresolved reference to another value in the tree or to an
/// environment variable, e.g. `${a.b}` or `${?a.b}`.
///
/// Optional substitutions (`${?path}`) are silently dropped when they
/// cannot be resolved; required ones abort the parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Substitution {
    pub path: String,
    pub optional: bool,
}

impl Substitution {
    pub fn new(path: impl Into<String>, optional: bool) -> Self {
        Substitution { path: path.into(), optional }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "${{?{}}}", self.path)
        } else {
            write!(f, "${{{}}}", self.path)
        }
    }
}

/// A single HOCON value.
///
/// `Substitution`, `Concatenation` and `ValueWithAlternative` only exist in
/// unresolved trees; after resolution they either reduce to plain values or
/// remain as unresolved optional leftovers the accessors treat as absent.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Object(Object),
    Array(Vec<Value>),
    String(String),
    Int(i64),
    Float(f64),
    Boolean(bool),
    Null,
    /// A time span, stored with nanosecond precision.
    Duration(Duration),
    Substitution(Substitution),
    /// Adjacent values on one logical line, joined at resolution time.
    /// String elements carry the preserved inter-token whitespace.
    Concatenation(Vec<Value>),
    /// A known value plus a substitution that overrides it if it resolves.
    ValueWithAlternative {
        value: Box<Value>,
        alternative: Substitution,
    },
}

impl Value {
    pub fn as_object(&self) -> Option<&Object> {
        if let Value::Object(object) = self {
            Some(object)
        } else {
            None
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Whether this value may absorb further same-line values into a
    /// concatenation.
    pub(crate) fn is_concatenable(&self) -> bool {
        matches!(
            self,
            Value::String(_) | Value::Substitution(_) | Value::Concatenation(_)
        )
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Object(object) => object.fmt(f),
            Value::Array(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    value.fmt(f)?;
                }
                write!(f, "]")
            }
            Value::String(s) => {
                if s.is_empty() || s.chars().any(|c| c == ' ' || c.is_ascii_punctuation()) {
                    write!(f, "{:?}", s)
                } else {
                    write!(f, "{}", s)
                }
            }
            Value::Int(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{}", value),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Null => write!(f, "null"),
            Value::Duration(duration) => write!(f, "{:?}", duration),
            Value::Substitution(substitution) => substitution.fmt(f),
            Value::Concatenation(values) => {
                for value in values {
                    // string elements (including whitespace separators) join raw
                    match value {
                        Value::String(s) => write!(f, "{}", s)?,
                        other => other.fmt(f)?,
                    }
                }
                Ok(())
            }
            Value::ValueWithAlternative { value, alternative } => {
                write!(f, "({} | {})", value, alternative)
            }
        }
    }
}

/// A HOCON object: a mapping from keys to values with stable insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    items: IndexMap<String, Value>,
}

impl Object {
    pub fn new() -> Self {
        Object { items: IndexMap::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.items.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.items.get_mut(key)
    }

    /// Insert a value, keeping the original position of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.items.insert(key.into(), value);
    }

    /// Take a value out of the object, keeping the key's position so it can
    /// be put back with [`Object::insert`].
    pub(crate) fn take(&mut self, key: &str) -> Option<Value> {
        self.items.get_mut(key).map(|slot| std::mem::replace(slot, Value::Null))
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Value> {
        self.items.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.items.keys()
    }

    /// Look up a value by dotted path, descending through nested objects.
    ///
    /// Returns `None` if any intermediate segment is missing or is not an
    /// object.
    pub fn find(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let last = segments.next_back()?;

        let mut current = self;
        for segment in segments {
            current = current.get(segment)?.as_object()?;
        }

        current.get(last)
    }

    /// Deep-merge `other` into `self`.
    ///
    /// Keys holding objects on both sides merge recursively; for every other
    /// kind of collision the value from `other` wins.
    pub fn merge(&mut self, other: Object) {
        for (key, value) in other.items {
            match (self.items.get_mut(&key), value) {
                (Some(Value::Object(existing)), Value::Object(incoming)) => {
                    existing.merge(incoming);
                }
                (_, value) => {
                    self.items.insert(key, value);
                }
            }
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}", key, value)?;
        }
        write!(f, "}}")
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Object {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Object {
            items: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<K: Into<String>, const N: usize> From<[(K, Value); N]> for Object {
    fn from(entries: [(K, Value); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
