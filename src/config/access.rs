use std::time::Duration;

use indexmap::IndexMap;

use crate::value::{Object, Value};

use super::Config;

/// Typed, path-addressed accessors.
///
/// All of these return the type's zero value for a missing path. Asking
/// for the wrong type is a programmer error and panics; strings are
/// coerced to numbers and booleans where they parse. An optional
/// substitution that never resolved counts as a missing path.
impl Config {
    /// # Panics
    /// If the value at `path` is not an object.
    pub fn get_object(&self, path: &str) -> Object {
        match self.resolved(path) {
            None => Object::new(),
            Some(Value::Object(object)) => object.clone(),
            Some(other) => panic!("cannot use value: {} as an object", other),
        }
    }

    /// # Panics
    /// If the value at `path` is not an array.
    pub fn get_array(&self, path: &str) -> Vec<Value> {
        match self.resolved(path) {
            None => Vec::new(),
            Some(Value::Array(values)) => values.clone(),
            Some(other) => panic!("cannot use value: {} as an array", other),
        }
    }

    /// Any value renders to its string form; missing paths give `""`.
    pub fn get_string(&self, path: &str) -> String {
        match self.resolved(path) {
            None => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// # Panics
    /// If the value at `path` is neither an int nor a string that parses
    /// as one.
    pub fn get_int(&self, path: &str) -> i64 {
        match self.resolved(path) {
            None => 0,
            Some(Value::Int(value)) => *value,
            Some(Value::String(s)) => match s.parse::<i64>() {
                Ok(value) => value,
                Err(_) => panic!("cannot parse value: {} to an int", s),
            },
            Some(other) => panic!("cannot parse value: {} to an int", other),
        }
    }

    /// # Panics
    /// If the value at `path` is neither a float nor a string that parses
    /// as one.
    pub fn get_float32(&self, path: &str) -> f32 {
        match self.resolved(path) {
            None => 0.0,
            Some(Value::Float(value)) => *value as f32,
            Some(Value::String(s)) => match s.parse::<f32>() {
                Ok(value) => value,
                Err(_) => panic!("cannot parse value: {} to a float", s),
            },
            Some(other) => panic!("cannot parse value: {} to a float", other),
        }
    }

    /// # Panics
    /// If the value at `path` is neither a float nor a string that parses
    /// as one.
    pub fn get_float64(&self, path: &str) -> f64 {
        match self.resolved(path) {
            None => 0.0,
            Some(Value::Float(value)) => *value,
            Some(Value::String(s)) => match s.parse::<f64>() {
                Ok(value) => value,
                Err(_) => panic!("cannot parse value: {} to a float", s),
            },
            Some(other) => panic!("cannot parse value: {} to a float", other),
        }
    }

    /// Accepts the boolean synonyms `true/yes/on` and `false/no/off` in
    /// string form.
    ///
    /// # Panics
    /// If the value at `path` is neither a boolean nor one of the synonym
    /// strings.
    pub fn get_boolean(&self, path: &str) -> bool {
        match self.resolved(path) {
            None => false,
            Some(Value::Boolean(value)) => *value,
            Some(Value::String(s)) => match s.as_str() {
                "true" | "yes" | "on" => true,
                "false" | "no" | "off" => false,
                _ => panic!("cannot parse value: {} to a boolean", s),
            },
            Some(other) => panic!("cannot parse value: {} to a boolean", other),
        }
    }

    /// # Panics
    /// If the value at `path` is not a duration.
    pub fn get_duration(&self, path: &str) -> Duration {
        match self.resolved(path) {
            None => Duration::ZERO,
            Some(Value::Duration(duration)) => *duration,
            Some(other) => panic!("cannot use value: {} as a duration", other),
        }
    }

    /// # Panics
    /// If the value at `path` is not an array of ints (or of strings that
    /// parse as ints).
    pub fn get_int_slice(&self, path: &str) -> Vec<i64> {
        self.elements(path, "an int array")
            .iter()
            .map(|element| match element {
                Value::Int(value) => *value,
                Value::String(s) => match s.parse::<i64>() {
                    Ok(value) => value,
                    Err(_) => panic!("cannot parse value: {} to an int", s),
                },
                other => panic!("cannot parse value: {} to an int", other),
            })
            .collect()
    }

    /// Every element renders to its string form.
    ///
    /// # Panics
    /// If the value at `path` is not an array.
    pub fn get_string_slice(&self, path: &str) -> Vec<String> {
        self.elements(path, "a string array")
            .iter()
            .map(|element| match element {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect()
    }

    /// The object at `path` as a map of raw values.
    ///
    /// # Panics
    /// If the value at `path` is not an object.
    pub fn get_string_map(&self, path: &str) -> IndexMap<String, Value> {
        self.get_object(path)
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// The object at `path` as a map of string-rendered values.
    ///
    /// # Panics
    /// If the value at `path` is not an object.
    pub fn get_string_map_string(&self, path: &str) -> IndexMap<String, String> {
        self.get_object(path)
            .iter()
            .map(|(key, value)| {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), rendered)
            })
            .collect()
    }

    /// Lookup that treats an unresolved optional substitution as absent.
    fn resolved(&self, path: &str) -> Option<&Value> {
        match self.get(path) {
            Some(Value::Substitution(substitution)) if substitution.optional => None,
            other => other,
        }
    }

    /// Array elements at `path`, with unresolved optional substitutions
    /// dropped.
    fn elements(&self, path: &str, wanted: &str) -> Vec<Value> {
        match self.resolved(path) {
            None => Vec::new(),
            Some(Value::Array(values)) => values
                .iter()
                .filter(|element| {
                    !matches!(element, Value::Substitution(substitution) if substitution.optional)
                })
                .cloned()
                .collect(),
            Some(other) => panic!("cannot use value: {} as {}", other, wanted),
        }
    }
}
