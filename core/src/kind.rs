//! Declared member kinds and checked conversions between `Value` and Rust types.

use crate::{ConversionError, ConversionResult, Value};
use std::fmt;

/// The declared type of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Accepts every value.
    Any,
    Bool,
    Int,
    Float,
    String,
    Timestamp,
    Duration,
    List,
}

impl ValueKind {
    /// Returns the type name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Any => "Any",
            ValueKind::Bool => "Bool",
            ValueKind::Int => "Int",
            ValueKind::Float => "Float",
            ValueKind::String => "String",
            ValueKind::Timestamp => "Timestamp",
            ValueKind::Duration => "Duration",
            ValueKind::List => "List",
        }
    }

    /// Returns true for the text kind.
    pub fn is_text(&self) -> bool {
        matches!(self, ValueKind::String)
    }

    /// Check if a value may be assigned to a member of this kind.
    pub fn accepts(&self, value: &Value) -> bool {
        let actual = value.kind();
        if *self == ValueKind::Any || *self == actual {
            return true;
        }
        // Null is compatible with anything
        if value.is_null() {
            return true;
        }
        // Int can be used where Float is expected
        if *self == ValueKind::Float && actual == ValueKind::Int {
            return true;
        }
        // Int can be used where Duration/Timestamp are expected (they are Int-based types)
        matches!(self, ValueKind::Duration | ValueKind::Timestamp) && actual == ValueKind::Int
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A Rust type that can travel through a visitor as a `Value`.
pub trait ValueType: Sized {
    /// The declared kind a member of this type reports.
    fn kind() -> ValueKind;

    /// Checked conversion out of a `Value`.
    fn from_value(value: Value) -> ConversionResult<Self>;

    /// Conversion into a `Value`.
    fn into_value(self) -> Value;
}

impl ValueType for Value {
    fn kind() -> ValueKind {
        ValueKind::Any
    }

    fn from_value(value: Value) -> ConversionResult<Self> {
        Ok(value)
    }

    fn into_value(self) -> Value {
        self
    }
}

impl ValueType for bool {
    fn kind() -> ValueKind {
        ValueKind::Bool
    }

    fn from_value(value: Value) -> ConversionResult<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(ConversionError::incompatible("Bool", other.type_name())),
        }
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl ValueType for i64 {
    fn kind() -> ValueKind {
        ValueKind::Int
    }

    fn from_value(value: Value) -> ConversionResult<Self> {
        match value {
            Value::Int(i) | Value::Timestamp(i) | Value::Duration(i) => Ok(i),
            other => Err(ConversionError::incompatible("Int", other.type_name())),
        }
    }

    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

impl ValueType for i32 {
    fn kind() -> ValueKind {
        ValueKind::Int
    }

    fn from_value(value: Value) -> ConversionResult<Self> {
        let wide = i64::from_value(value)?;
        i32::try_from(wide).map_err(|_| ConversionError::out_of_range(wide.to_string(), "i32"))
    }

    fn into_value(self) -> Value {
        Value::Int(self as i64)
    }
}

impl ValueType for u32 {
    fn kind() -> ValueKind {
        ValueKind::Int
    }

    fn from_value(value: Value) -> ConversionResult<Self> {
        let wide = i64::from_value(value)?;
        u32::try_from(wide).map_err(|_| ConversionError::out_of_range(wide.to_string(), "u32"))
    }

    fn into_value(self) -> Value {
        Value::Int(self as i64)
    }
}

impl ValueType for f64 {
    fn kind() -> ValueKind {
        ValueKind::Float
    }

    fn from_value(value: Value) -> ConversionResult<Self> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            other => Err(ConversionError::incompatible("Float", other.type_name())),
        }
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl ValueType for String {
    fn kind() -> ValueKind {
        ValueKind::String
    }

    fn from_value(value: Value) -> ConversionResult<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(ConversionError::incompatible("String", other.type_name())),
        }
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl<V: ValueType> ValueType for Vec<V> {
    fn kind() -> ValueKind {
        ValueKind::List
    }

    fn from_value(value: Value) -> ConversionResult<Self> {
        match value {
            Value::List(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| V::from_value(item).map_err(|e| ConversionError::element(i, e)))
                .collect(),
            other => Err(ConversionError::incompatible("List", other.type_name())),
        }
    }

    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(ValueType::into_value).collect())
    }
}

impl<V: ValueType> ValueType for Option<V> {
    fn kind() -> ValueKind {
        V::kind()
    }

    fn from_value(value: Value) -> ConversionResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => V::from_value(other).map(Some),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }
}
