// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	any::type_name,
	fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

use crate::{
	error::{Error, Result},
	value::{FromValue, Value},
};

/// Positional access to the fields of a row.
pub trait Tuple {
	fn arity(&self) -> usize;

	fn field(&self, index: usize) -> Option<Value>;

	fn values(&self) -> Vec<Value>;
}

impl<T: Tuple + ?Sized> Tuple for &T {
	fn arity(&self) -> usize {
		(**self).arity()
	}

	fn field(&self, index: usize) -> Option<Value> {
		(**self).field(index)
	}

	fn values(&self) -> Vec<Value> {
		(**self).values()
	}
}

/// Construction of a result row from the combined fields of a match.
pub trait FromTuple: Sized {
	/// Number of fields the row is made of, `None` when any arity is accepted.
	const ARITY: Option<usize>;

	fn from_values(values: Vec<Value>) -> Result<Self>;
}

/// The value at `index`, failing when the row has no such field.
pub fn key_at<T: Tuple + ?Sized>(row: &T, index: usize) -> Result<Value> {
	row.field(index).ok_or_else(|| Error::IndexOutOfRange {
		index,
		arity: row.arity(),
	})
}

#[doc(hidden)]
pub fn convert_field<T: FromValue>(index: usize, value: Value) -> Result<T> {
	let found = value.get_type();
	T::from_value(value).ok_or(Error::FieldTypeMismatch {
		index,
		expected: type_name::<T>(),
		found,
	})
}

/// An untyped row, the fallback result when no schema is given.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Vec<Value>);

impl Row {
	pub fn new(values: Vec<Value>) -> Self {
		Row(values)
	}

	pub fn get(&self, index: usize) -> Option<&Value> {
		self.0.get(index)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn into_values(self) -> Vec<Value> {
		self.0
	}
}

impl Tuple for Row {
	fn arity(&self) -> usize {
		self.0.len()
	}

	fn field(&self, index: usize) -> Option<Value> {
		self.0.get(index).cloned()
	}

	fn values(&self) -> Vec<Value> {
		self.0.clone()
	}
}

impl FromTuple for Row {
	const ARITY: Option<usize> = None;

	fn from_values(values: Vec<Value>) -> Result<Self> {
		Ok(Row(values))
	}
}

impl From<Vec<Value>> for Row {
	fn from(values: Vec<Value>) -> Self {
		Row(values)
	}
}

impl Display for Row {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("(")?;
		for (idx, value) in self.0.iter().enumerate() {
			if idx > 0 {
				f.write_str(", ")?;
			}
			Display::fmt(value, f)?;
		}
		f.write_str(")")
	}
}

/// Build a [`Row`] from anything convertible into a [`Value`].
///
/// ```
/// use reljoin_type::{Value, row};
///
/// let row = row![2i64, "Bob"];
/// assert_eq!(row.get(1), Some(&Value::utf8("Bob")));
/// ```
#[macro_export]
macro_rules! row {
	() => {
		$crate::Row::default()
	};
	($($value:expr),+ $(,)?) => {
		$crate::Row::new(vec![$($crate::IntoValue::into_value($value)),+])
	};
}

/// Declare a struct and implement [`Tuple`] and [`FromTuple`] for it, in
/// field declaration order. Field types must convert into and out of
/// [`Value`] and be `Clone`.
///
/// ```
/// use reljoin_type::{FromTuple, Tuple, Value, tuple};
///
/// tuple! {
/// 	#[derive(Clone, Debug, PartialEq)]
/// 	pub struct User {
/// 		pub id: i64,
/// 		pub name: String,
/// 	}
/// }
///
/// let user = User::from_values(vec![Value::int8(1), Value::utf8("Alice")]).unwrap();
/// assert_eq!(user.arity(), 2);
/// assert_eq!(user.field(1), Some(Value::utf8("Alice")));
/// ```
#[macro_export]
macro_rules! tuple {
	(
		$(#[$meta:meta])*
		$vis:vis struct $name:ident {
			$($field_vis:vis $field:ident : $ty:ty),* $(,)?
		}
	) => {
		$(#[$meta])*
		$vis struct $name {
			$($field_vis $field: $ty),*
		}

		impl $crate::Tuple for $name {
			fn arity(&self) -> usize {
				[$(stringify!($field)),*].len()
			}

			fn field(&self, index: usize) -> Option<$crate::Value> {
				let accessors: &[fn(&Self) -> $crate::Value] =
					&[$(|row: &Self| $crate::IntoValue::into_value(row.$field.clone())),*];
				accessors.get(index).map(|accessor| accessor(self))
			}

			fn values(&self) -> Vec<$crate::Value> {
				vec![$($crate::IntoValue::into_value(self.$field.clone())),*]
			}
		}

		impl $crate::FromTuple for $name {
			const ARITY: Option<usize> = Some([$(stringify!($field)),*].len());

			fn from_values(values: Vec<$crate::Value>) -> $crate::Result<Self> {
				let expected = [$(stringify!($field)),*].len();
				let actual = values.len();
				if actual != expected {
					return Err($crate::Error::ResultArityMismatch { expected, actual });
				}
				let mut values = values.into_iter().enumerate();
				Ok(Self {
					$($field: {
						let (index, value) = values
							.next()
							.ok_or($crate::Error::ResultArityMismatch { expected, actual })?;
						$crate::row::convert_field::<$ty>(index, value)?
					}),*
				})
			}
		}
	};
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Type, Value};

	crate::tuple! {
		#[derive(Clone, Debug, PartialEq)]
		struct Person {
			id: i64,
			name: String,
			score: f64,
		}
	}

	#[test]
	fn test_key_at() {
		let row = crate::row![1i64, "Alice"];
		assert_eq!(key_at(&row, 0).unwrap(), Value::int8(1));
		assert!(matches!(
			key_at(&row, 2),
			Err(Error::IndexOutOfRange {
				index: 2,
				arity: 2
			})
		));
	}

	#[test]
	fn test_tuple_macro_field_access() {
		let person = Person {
			id: 7,
			name: "Eve".to_string(),
			score: 1.5,
		};
		assert_eq!(person.arity(), 3);
		assert_eq!(person.field(0), Some(Value::int8(7)));
		assert_eq!(person.field(2), Some(Value::float8(1.5)));
		assert_eq!(person.field(3), None);
		assert_eq!(person.values(), vec![Value::int8(7), Value::utf8("Eve"), Value::float8(1.5)]);
	}

	#[test]
	fn test_tuple_macro_field_agrees_with_values() {
		let person = Person {
			id: 3,
			name: "Charlie".to_string(),
			score: -0.0,
		};
		let values = person.values();
		for index in 0..values.len() + 2 {
			assert_eq!(person.field(index), values.get(index).cloned(), "index {index}");
		}
		assert!(matches!(
			key_at(&person, 5),
			Err(Error::IndexOutOfRange {
				index: 5,
				arity: 3
			})
		));
	}

	#[test]
	fn test_tuple_macro_from_values() {
		assert_eq!(Person::ARITY, Some(3));
		let person = Person::from_values(vec![Value::int8(2), Value::utf8("Bob"), Value::float8(200.0)]).unwrap();
		assert_eq!(
			person,
			Person {
				id: 2,
				name: "Bob".to_string(),
				score: 200.0
			}
		);
	}

	#[test]
	fn test_tuple_macro_rejects_wrong_arity() {
		let err = Person::from_values(vec![Value::int8(2), Value::utf8("Bob")]).unwrap_err();
		assert!(matches!(
			err,
			Error::ResultArityMismatch {
				expected: 3,
				actual: 2
			}
		));
	}

	#[test]
	fn test_tuple_macro_rejects_wrong_type() {
		let err = Person::from_values(vec![Value::utf8("2"), Value::utf8("Bob"), Value::float8(1.0)]).unwrap_err();
		assert!(matches!(
			err,
			Error::FieldTypeMismatch {
				index: 0,
				found: Type::Utf8,
				..
			}
		));
	}

	#[test]
	fn test_row_display() {
		assert_eq!(crate::row![2i64, "Bob", 250.0].to_string(), "(2, Bob, 250)");
		assert_eq!(crate::row![].to_string(), "()");
	}
}
