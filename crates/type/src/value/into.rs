// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::{OrderedF64, Value};

pub trait IntoValue {
	fn into_value(self) -> Value;
}

impl<T: Into<Value>> IntoValue for T {
	fn into_value(self) -> Value {
		self.into()
	}
}

/// Conversion out of a [`Value`], used when building typed result rows.
pub trait FromValue: Sized {
	fn from_value(value: Value) -> Option<Self>;
}

macro_rules! impl_value_conversions {
	($ty:ty, $variant:ident) => {
		impl From<$ty> for Value {
			fn from(value: $ty) -> Self {
				Value::$variant(value)
			}
		}

		impl FromValue for $ty {
			fn from_value(value: Value) -> Option<Self> {
				match value {
					Value::$variant(v) => Some(v),
					_ => None,
				}
			}
		}
	};
}

impl_value_conversions!(bool, Boolean);
impl_value_conversions!(i32, Int4);
impl_value_conversions!(i64, Int8);
impl_value_conversions!(u64, Uint8);
impl_value_conversions!(String, Utf8);
impl_value_conversions!(Vec<u8>, Blob);

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Float8(OrderedF64::from(value))
	}
}

impl FromValue for f64 {
	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Float8(v) => Some(v.value()),
			_ => None,
		}
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::Utf8(value.to_string())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		match value {
			Some(v) => v.into(),
			None => Value::Undefined,
		}
	}
}

impl<T: FromValue> FromValue for Option<T> {
	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Undefined => Some(None),
			other => T::from_value(other).map(Some),
		}
	}
}

impl FromValue for Value {
	fn from_value(value: Value) -> Option<Self> {
		Some(value)
	}
}
