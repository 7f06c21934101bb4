// License: MIT

use std::env;

use crate::error::HoconError;
use crate::value::{Object, Value};

/// Resolve every substitution in the tree, in place.
///
/// Lookups run against a snapshot of the unresolved root object, so the
/// outcome does not depend on the order entries are visited in. A value
/// found through a substitution is itself resolved before it is planted,
/// which makes chains like `a: ${b}, b: ${c}, c: 1` come out flat; a
/// visited-path set turns reference cycles into plain lookup misses.
pub(crate) fn resolve(root: &mut Value) -> Result<(), HoconError> {
    let lookup = match root {
        Value::Object(object) => object.clone(),
        _ => Object::new(),
    };

    let resolver = Resolver { lookup };
    resolver.resolve_container(root, &mut Vec::new())
}

struct Resolver {
    lookup: Object,
}

impl Resolver {
    fn resolve_container(&self, value: &mut Value, visiting: &mut Vec<String>) -> Result<(), HoconError> {
        match value {
            Value::Object(object) => {
                for (_, entry) in object.iter_mut() {
                    self.process(entry, visiting)?;
                }

                reduce_object_concatenations(object)
            }
            Value::Array(values) | Value::Concatenation(values) => {
                for element in values.iter_mut() {
                    self.process(element, visiting)?;
                }

                Ok(())
            }
            _ => Err(HoconError::invalid_value(
                "substitutions are only allowed in field values and array elements",
                0,
                0,
            )),
        }
    }

    fn process(&self, value: &mut Value, visiting: &mut Vec<String>) -> Result<(), HoconError> {
        match value {
            Value::Substitution(substitution) => {
                match self.lookup_path(&substitution.path, visiting)? {
                    Some(found) => *value = found,
                    None if substitution.optional => {} // left in place, accessors treat it as absent
                    None => {
                        return Err(HoconError::could_not_resolve_substitution(&substitution.path));
                    }
                }

                Ok(())
            }
            Value::ValueWithAlternative { value: primary, alternative } => {
                let replacement = match self.lookup_path(&alternative.path, visiting)? {
                    Some(found) => found,
                    None if alternative.optional => {
                        let mut primary = std::mem::replace(primary.as_mut(), Value::Null);
                        self.process(&mut primary, visiting)?;
                        primary
                    }
                    None => {
                        return Err(HoconError::could_not_resolve_substitution(&alternative.path));
                    }
                };

                *value = replacement;
                Ok(())
            }
            Value::Object(_) | Value::Array(_) | Value::Concatenation(_) => {
                self.resolve_container(value, visiting)
            }
            _ => Ok(()),
        }
    }

    /// Look a substitution path up in the tree snapshot, falling back to an
    /// environment variable of the same name. `Ok(None)` means the path has
    /// no value anywhere.
    fn lookup_path(&self, path: &str, visiting: &mut Vec<String>) -> Result<Option<Value>, HoconError> {
        if visiting.iter().any(|seen| seen == path) {
            return Ok(None);
        }

        if let Some(found) = self.lookup.find(path) {
            let mut value = found.clone();

            visiting.push(path.to_string());
            self.process(&mut value, visiting)?;
            visiting.pop();

            return Ok(Some(value));
        }

        match env::var(path) {
            Ok(env_value) => Ok(Some(Value::String(env_value))),
            Err(_) => Ok(None),
        }
    }
}

/// Replace every concatenation that contains an object with the deep merge
/// of its elements. Mixing objects with anything else is an error.
fn reduce_object_concatenations(object: &mut Object) -> Result<(), HoconError> {
    let keys: Vec<String> = object.keys().cloned().collect();

    for key in keys {
        let contains_object = matches!(
            object.get(&key),
            Some(Value::Concatenation(elements)) if elements.iter().any(Value::is_object)
        );

        if !contains_object {
            continue;
        }

        if let Some(Value::Concatenation(elements)) = object.take(&key) {
            let mut merged = Object::new();

            for element in elements {
                match element {
                    Value::Object(incoming) => merged.merge(incoming),
                    _ => return Err(HoconError::InvalidConcatenation),
                }
            }

            object.insert(key, Value::Object(merged));
        }
    }

    Ok(())
}
