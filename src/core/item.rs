use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

use serde_json::{Map, Value};

use crate::error::StringifyError;

/// Result of turning one field value into text.
pub type StringifyResult = Result<String, StringifyError>;

/// A record whose fields can be looked up by id.
///
/// Only the ids configured on the writer are ever looked up; other keys are
/// ignored.
pub trait Record {
    type Value;

    fn field(&self, id: &str) -> Option<&Self::Value>;
}

impl<V, S: BuildHasher> Record for HashMap<String, V, S> {
    type Value = V;

    fn field(&self, id: &str) -> Option<&V> {
        self.get(id)
    }
}

impl<V> Record for BTreeMap<String, V> {
    type Value = V;

    fn field(&self, id: &str) -> Option<&V> {
        self.get(id)
    }
}

impl Record for Map<String, Value> {
    type Value = Value;

    fn field(&self, id: &str) -> Option<&Value> {
        self.get(id)
    }
}

/// Objects are looked up by key, any other JSON value has no fields.
impl Record for Value {
    type Value = Value;

    fn field(&self, id: &str) -> Option<&Value> {
        self.as_object().and_then(|object| object.get(id))
    }
}

/// Turns a field value into the text written in its CSV cell.
///
/// `None` is passed when the record has no value for the field.
pub trait Stringifier<V> {
    fn stringify(&self, value: Option<&V>) -> StringifyResult;
}

impl<V, T: Stringifier<V> + ?Sized> Stringifier<V> for &T {
    fn stringify(&self, value: Option<&V>) -> StringifyResult {
        (**self).stringify(value)
    }
}

/// Plain text rendering of a value, before any quoting.
pub trait FieldValue {
    fn to_field(&self) -> Cow<'_, str>;
}

impl FieldValue for String {
    fn to_field(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl FieldValue for &str {
    fn to_field(&self) -> Cow<'_, str> {
        Cow::Borrowed(*self)
    }
}

impl FieldValue for char {
    fn to_field(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

impl FieldValue for bool {
    fn to_field(&self) -> Cow<'_, str> {
        Cow::Borrowed(if *self { "true" } else { "false" })
    }
}

macro_rules! impl_field_value_for_numbers {
    ($($t:ty),*) => {
        $(
            impl FieldValue for $t {
                fn to_field(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

impl_field_value_for_numbers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_field(&self) -> Cow<'_, str> {
        match self {
            Some(value) => value.to_field(),
            None => Cow::Borrowed(""),
        }
    }
}

/// Strings are written without their JSON quotes and `null` is empty.
/// Arrays and objects are written as compact JSON.
impl FieldValue for Value {
    fn to_field(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            Value::String(s) => Cow::Borrowed(s.as_str()),
            Value::Bool(b) => b.to_field(),
            other => Cow::Owned(other.to_string()),
        }
    }
}
