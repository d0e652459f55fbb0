use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-event key/value store holding vectors of ints, floats, doubles and strings.
///
/// Each value type lives in its own map, so the same key may be used once per type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericParameters {
    /// Integer parameters.
    pub ints: BTreeMap<String, Vec<i32>>,
    /// Single-precision parameters.
    pub floats: BTreeMap<String, Vec<f32>>,
    /// Double-precision parameters.
    pub doubles: BTreeMap<String, Vec<f64>>,
    /// String parameters.
    pub strings: BTreeMap<String, Vec<String>>,
}

/// Value types that can be stored in [`GenericParameters`].
pub trait ParameterValue: Clone + Sized {
    /// Name of the value type, used in diagnostics.
    const TYPE_NAME: &'static str;

    /// Map holding values of this type.
    fn map(params: &GenericParameters) -> &BTreeMap<String, Vec<Self>>;

    /// Mutable map holding values of this type.
    fn map_mut(params: &mut GenericParameters) -> &mut BTreeMap<String, Vec<Self>>;
}

macro_rules! parameter_value {
    ($ty:ty, $field:ident, $name:expr) => {
        impl ParameterValue for $ty {
            const TYPE_NAME: &'static str = $name;

            fn map(params: &GenericParameters) -> &BTreeMap<String, Vec<Self>> {
                &params.$field
            }

            fn map_mut(params: &mut GenericParameters) -> &mut BTreeMap<String, Vec<Self>> {
                &mut params.$field
            }
        }
    };
}

parameter_value!(i32, ints, "int");
parameter_value!(f32, floats, "float");
parameter_value!(f64, doubles, "double");
parameter_value!(String, strings, "string");

impl GenericParameters {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `values` under `key`, replacing any previous values of the same type.
    pub fn set<T: ParameterValue>(&mut self, key: impl Into<String>, values: Vec<T>) {
        T::map_mut(self).insert(key.into(), values);
    }

    /// Returns the values stored under `key`.
    pub fn get<T: ParameterValue>(&self, key: &str) -> Option<&[T]> {
        T::map(self).get(key).map(Vec::as_slice)
    }

    /// Returns the first value stored under `key`.
    pub fn get_one<T: ParameterValue>(&self, key: &str) -> Option<&T> {
        self.get::<T>(key).and_then(|v| v.first())
    }

    /// Keys holding values of type `T`, sorted.
    pub fn keys<'a, T: ParameterValue + 'a>(&'a self) -> impl Iterator<Item = &'a str> + 'a {
        T::map(self).keys().map(String::as_str)
    }

    /// Removes the values of type `T` stored under `key`.
    pub fn remove<T: ParameterValue>(&mut self, key: &str) -> Option<Vec<T>> {
        T::map_mut(self).remove(key)
    }

    /// Total number of keys across all value types.
    pub fn len(&self) -> usize {
        self.ints.len() + self.floats.len() + self.doubles.len() + self.strings.len()
    }

    /// Returns true if no parameter is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all parameters.
    pub fn clear(&mut self) {
        self.ints.clear();
        self.floats.clear();
        self.doubles.clear();
        self.strings.clear();
    }
}
