//! The mapping of canonical fields to user-entered values.

use std::collections::BTreeMap;

use super::fields::CanonicalField;

/// User-supplied field values, keyed by canonical field.
///
/// A key is present only while the user has text in that field; assigning an
/// empty value removes the key. Absence means "unknown, to be estimated".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputMap {
    values: BTreeMap<CanonicalField, String>,
}

impl InputMap {
    /// Store `raw` under `field`, or remove the key when `raw` is empty.
    ///
    /// Values are stored verbatim; the input widget is responsible for
    /// constraining entry to non-negative numeric text.
    pub fn set_field(&mut self, field: CanonicalField, raw: &str) {
        if raw.is_empty() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, raw.to_string());
        }
    }

    /// The stored value for `field`, if the user supplied one.
    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// True iff at least one field has a value. Gates submission.
    pub fn has_any_input(&self) -> bool {
        !self.values.is_empty()
    }

    /// Number of supplied fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True iff no field has a value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Remove every value.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// True iff the service-side key `name` corresponds to a supplied field.
    pub fn contains_wire_name(&self, name: &str) -> bool {
        CanonicalField::from_wire_name(name)
            .is_some_and(|field| self.values.contains_key(&field))
    }

    /// The request payload mapping: wire name to entered text.
    pub fn wire_map(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .map(|(field, value)| (field.wire_name().to_string(), value.clone()))
            .collect()
    }
}
