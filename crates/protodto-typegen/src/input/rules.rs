//! Constraint-rule annotation (`validate.rules`).
//!
//! Only one of the per-kind rule sets is expected to be present on a field;
//! which one depends on the field's scalar kind.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldRules {
    pub message: Option<MessageRules>,
    pub float: Option<NumericRules<f32>>,
    pub double: Option<NumericRules<f64>>,
    pub int32: Option<NumericRules<i32>>,
    pub int64: Option<NumericRules<i64>>,
    pub uint32: Option<NumericRules<u32>>,
    pub uint64: Option<NumericRules<u64>>,
    pub sint32: Option<NumericRules<i32>>,
    pub sint64: Option<NumericRules<i64>>,
    pub fixed32: Option<NumericRules<u32>>,
    pub fixed64: Option<NumericRules<u64>>,
    pub sfixed32: Option<NumericRules<i32>>,
    pub sfixed64: Option<NumericRules<i64>>,
    pub string: Option<StringRules>,
    pub repeated: Option<RepeatedRules>,
    #[serde(rename = "enum")]
    pub enumeration: Option<EnumRules>,
}

impl FieldRules {
    /// The numeric rule set, whichever scalar kind it was declared for,
    /// widened to `f64`.
    pub fn numeric(&self) -> Option<NumericBounds> {
        self.float
            .as_ref()
            .map(NumericRules::bounds)
            .or_else(|| self.double.as_ref().map(NumericRules::bounds))
            .or_else(|| self.int32.as_ref().map(NumericRules::bounds))
            .or_else(|| self.int64.as_ref().map(NumericRules::bounds))
            .or_else(|| self.uint32.as_ref().map(NumericRules::bounds))
            .or_else(|| self.uint64.as_ref().map(NumericRules::bounds))
            .or_else(|| self.sint32.as_ref().map(NumericRules::bounds))
            .or_else(|| self.sint64.as_ref().map(NumericRules::bounds))
            .or_else(|| self.fixed32.as_ref().map(NumericRules::bounds))
            .or_else(|| self.fixed64.as_ref().map(NumericRules::bounds))
            .or_else(|| self.sfixed32.as_ref().map(NumericRules::bounds))
            .or_else(|| self.sfixed64.as_ref().map(NumericRules::bounds))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MessageRules {
    pub required: Option<bool>,
    pub skip: Option<bool>,
}

/// Bounds for one numeric kind. Every bound is optional: an absent bound and
/// a bound of zero are different things.
///
/// Values may arrive as JSON numbers or as strings, which is how the JSON
/// mapping writes 64-bit integers and non-finite floats.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(deserialize = "T: Deserialize<'de> + FromStr, <T as FromStr>::Err: Display")
)]
pub struct NumericRules<T> {
    #[serde(rename = "const", default, deserialize_with = "number_or_string::option")]
    pub constant: Option<T>,
    #[serde(default, deserialize_with = "number_or_string::option")]
    pub lt: Option<T>,
    #[serde(default, deserialize_with = "number_or_string::option")]
    pub lte: Option<T>,
    #[serde(default, deserialize_with = "number_or_string::option")]
    pub gt: Option<T>,
    #[serde(default, deserialize_with = "number_or_string::option")]
    pub gte: Option<T>,
    #[serde(rename = "in", default, deserialize_with = "number_or_string::list")]
    pub within: Vec<T>,
    #[serde(default, deserialize_with = "number_or_string::list")]
    pub not_in: Vec<T>,
}

/// Numeric scalar types that can be widened into a bound.
pub trait Bound: Copy {
    fn widen(self) -> f64;
}

macro_rules! impl_bound {
    ($($ty:ty),*) => {
        $(impl Bound for $ty {
            fn widen(self) -> f64 {
                self as f64
            }
        })*
    };
}

impl_bound!(i32, i64, u32, u64, f32, f64);

impl<T: Bound> NumericRules<T> {
    pub fn bounds(&self) -> NumericBounds {
        NumericBounds {
            constant: self.constant.map(Bound::widen),
            lt: self.lt.map(Bound::widen),
            lte: self.lte.map(Bound::widen),
            gt: self.gt.map(Bound::widen),
            gte: self.gte.map(Bound::widen),
        }
    }
}

/// Kind-independent view of a numeric rule set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumericBounds {
    pub constant: Option<f64>,
    pub lt: Option<f64>,
    pub lte: Option<f64>,
    pub gt: Option<f64>,
    pub gte: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StringRules {
    #[serde(deserialize_with = "number_or_string::option")]
    pub len: Option<u64>,
    #[serde(deserialize_with = "number_or_string::option")]
    pub min_len: Option<u64>,
    #[serde(deserialize_with = "number_or_string::option")]
    pub max_len: Option<u64>,
    pub pattern: Option<String>,
    pub email: bool,
    pub hostname: bool,
    pub ipv4: bool,
    pub ipv6: bool,
    pub uri: bool,
    pub uri_ref: bool,
    pub uuid: bool,
}

impl StringRules {
    /// JSON Schema `format` implied by the well-known string rules.
    pub fn format(&self) -> Option<&'static str> {
        [
            (self.email, "email"),
            (self.hostname, "hostname"),
            (self.ipv4, "ipv4"),
            (self.ipv6, "ipv6"),
            (self.uri, "uri"),
            (self.uri_ref, "uri-reference"),
            (self.uuid, "uuid"),
        ]
        .into_iter()
        .find_map(|(set, format)| set.then_some(format))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RepeatedRules {
    #[serde(deserialize_with = "number_or_string::option")]
    pub min_items: Option<u64>,
    #[serde(deserialize_with = "number_or_string::option")]
    pub max_items: Option<u64>,
    pub unique: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnumRules {
    pub defined_only: Option<bool>,
    #[serde(rename = "in")]
    pub within: Vec<i32>,
    pub not_in: Vec<i32>,
}

/// Decoding for rule values written either as numbers or as strings.
mod number_or_string {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr<T> {
        Number(T),
        Text(String),
    }

    impl<T> Repr<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        fn into_value<E: de::Error>(self) -> Result<T, E> {
            match self {
                Repr::Number(value) => Ok(value),
                Repr::Text(text) => text
                    .trim()
                    .parse()
                    .map_err(|e| E::custom(format!("invalid number {:?}: {}", text, e))),
            }
        }
    }

    pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + FromStr,
        T::Err: Display,
    {
        Option::<Repr<T>>::deserialize(deserializer)?
            .map(Repr::into_value)
            .transpose()
    }

    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + FromStr,
        T::Err: Display,
    {
        Vec::<Repr<T>>::deserialize(deserializer)?
            .into_iter()
            .map(Repr::into_value)
            .collect()
    }
}
