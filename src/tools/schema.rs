//! Parameter type resolution for tool declarations.
//!
//! Rust has no runtime signature reflection, so every tool states its
//! parameters explicitly and the Rust type of each parameter picks the schema
//! type through [`SchemaType`]:
//!
//! 1. primitives map through a fixed table (string, integer, number, boolean,
//!    array, object);
//! 2. wrapper types (`&T`, `Box<T>`, `Arc<T>`, `Cow<T>`, `Option<T>`) resolve
//!    to the type they wrap;
//! 3. anything else that opts in with an empty `impl SchemaType` is a string.
//!
//! [`ParamType::from_type_name`] applies the same table to type names.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use crate::types::tool::ParamType;

/// Maps a Rust type to the schema type advertised to the model.
pub trait SchemaType {
    fn param_type() -> ParamType {
        ParamType::String
    }
}

macro_rules! schema_type {
    ($param:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl SchemaType for $ty {
                fn param_type() -> ParamType {
                    $param
                }
            }
        )+
    };
}

schema_type!(ParamType::String => String, str, char);
schema_type!(ParamType::Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
schema_type!(ParamType::Number => f32, f64);
schema_type!(ParamType::Boolean => bool);
schema_type!(ParamType::Object => serde_json::Map<String, serde_json::Value>);

// Free-form JSON has no primitive mapping.
impl SchemaType for serde_json::Value {}

impl<T> SchemaType for Vec<T> {
    fn param_type() -> ParamType {
        ParamType::Array
    }
}

impl<T> SchemaType for [T] {
    fn param_type() -> ParamType {
        ParamType::Array
    }
}

impl<T, const N: usize> SchemaType for [T; N] {
    fn param_type() -> ParamType {
        ParamType::Array
    }
}

impl<T> SchemaType for VecDeque<T> {
    fn param_type() -> ParamType {
        ParamType::Array
    }
}

impl<T, S> SchemaType for HashSet<T, S> {
    fn param_type() -> ParamType {
        ParamType::Array
    }
}

impl<T> SchemaType for BTreeSet<T> {
    fn param_type() -> ParamType {
        ParamType::Array
    }
}

impl<K, V, S> SchemaType for HashMap<K, V, S> {
    fn param_type() -> ParamType {
        ParamType::Object
    }
}

impl<K, V> SchemaType for BTreeMap<K, V> {
    fn param_type() -> ParamType {
        ParamType::Object
    }
}

macro_rules! delegate_schema_type {
    ($($wrapper:ident),+) => {
        $(
            impl<T: SchemaType + ?Sized> SchemaType for $wrapper<T> {
                fn param_type() -> ParamType {
                    T::param_type()
                }
            }
        )+
    };
}

delegate_schema_type!(Box, Arc, Rc);

impl<T: SchemaType + ?Sized> SchemaType for &T {
    fn param_type() -> ParamType {
        T::param_type()
    }
}

impl<T: SchemaType> SchemaType for Option<T> {
    fn param_type() -> ParamType {
        T::param_type()
    }
}

impl<T: SchemaType + ToOwned + ?Sized> SchemaType for Cow<'_, T> {
    fn param_type() -> ParamType {
        T::param_type()
    }
}

/// Type-name table, checked in order.
const PRIMITIVE_TABLE: &[(&str, ParamType)] = &[
    ("str", ParamType::String),
    ("String", ParamType::String),
    ("string", ParamType::String),
    ("char", ParamType::String),
    ("int", ParamType::Integer),
    ("integer", ParamType::Integer),
    ("i8", ParamType::Integer),
    ("i16", ParamType::Integer),
    ("i32", ParamType::Integer),
    ("i64", ParamType::Integer),
    ("i128", ParamType::Integer),
    ("isize", ParamType::Integer),
    ("u8", ParamType::Integer),
    ("u16", ParamType::Integer),
    ("u32", ParamType::Integer),
    ("u64", ParamType::Integer),
    ("u128", ParamType::Integer),
    ("usize", ParamType::Integer),
    ("float", ParamType::Number),
    ("number", ParamType::Number),
    ("f32", ParamType::Number),
    ("f64", ParamType::Number),
    ("bool", ParamType::Boolean),
    ("boolean", ParamType::Boolean),
    ("list", ParamType::Array),
    ("array", ParamType::Array),
    ("Vec", ParamType::Array),
    ("VecDeque", ParamType::Array),
    ("dict", ParamType::Object),
    ("object", ParamType::Object),
    ("HashMap", ParamType::Object),
    ("BTreeMap", ParamType::Object),
    ("Map", ParamType::Object),
];

/// Wrappers whose parameter decides the type.
const TRANSPARENT_WRAPPERS: &[&str] = &["Option", "Box", "Arc", "Rc", "Cow", "Optional"];

impl ParamType {
    /// Resolve a type name such as `"int"`, `"Vec<String>"` or
    /// `"Option<f64>"`. Unknown names resolve to [`ParamType::String`].
    pub fn from_type_name(name: &str) -> ParamType {
        let name = name.trim().trim_start_matches('&').trim();
        if let Some(t) = lookup(name) {
            return t;
        }

        let (head, inner) = split_generic(name);
        // Path-qualified names (`std::collections::HashMap`) match on the last segment.
        let head = head.rsplit("::").next().unwrap_or(head);

        if TRANSPARENT_WRAPPERS.contains(&head) {
            if let Some(inner) = inner {
                return ParamType::from_type_name(last_argument(inner));
            }
        }
        if name.starts_with('[') && name.ends_with(']') {
            return ParamType::Array;
        }
        lookup(head).unwrap_or(ParamType::String)
    }
}

fn lookup(name: &str) -> Option<ParamType> {
    PRIMITIVE_TABLE
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, t)| *t)
}

/// Last top-level generic argument: `'a, str` -> `str`, `K, Vec<V>` -> `Vec<V>`.
fn last_argument(args: &str) -> &str {
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in args.char_indices() {
        match c {
            '<' | '[' | '(' => depth += 1,
            '>' | ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => start = i + 1,
            _ => {}
        }
    }
    args[start..].trim()
}

/// Split `Head<Inner>` / `head[inner]` into its parts.
fn split_generic(name: &str) -> (&str, Option<&str>) {
    for (open, close) in [('<', '>'), ('[', ']')] {
        if let Some(start) = name.find(open) {
            if start > 0 && name.ends_with(close) {
                let head = name[..start].trim();
                let inner = name[start + 1..name.len() - 1].trim();
                return (head, Some(inner));
            }
        }
    }
    (name, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Coordinates;
    impl SchemaType for Coordinates {}

    #[test]
    fn test_primitive_table() {
        assert_eq!(<String as SchemaType>::param_type(), ParamType::String);
        assert_eq!(<str as SchemaType>::param_type(), ParamType::String);
        assert_eq!(<i64 as SchemaType>::param_type(), ParamType::Integer);
        assert_eq!(<u8 as SchemaType>::param_type(), ParamType::Integer);
        assert_eq!(<f64 as SchemaType>::param_type(), ParamType::Number);
        assert_eq!(<bool as SchemaType>::param_type(), ParamType::Boolean);
        assert_eq!(<Vec<String> as SchemaType>::param_type(), ParamType::Array);
        assert_eq!(<[i32; 3] as SchemaType>::param_type(), ParamType::Array);
        assert_eq!(
            <HashMap<String, i64> as SchemaType>::param_type(),
            ParamType::Object
        );
    }

    #[test]
    fn test_wrappers_delegate() {
        assert_eq!(<Option<i32> as SchemaType>::param_type(), ParamType::Integer);
        assert_eq!(<&str as SchemaType>::param_type(), ParamType::String);
        assert_eq!(<Box<bool> as SchemaType>::param_type(), ParamType::Boolean);
        assert_eq!(<Arc<Vec<u8>> as SchemaType>::param_type(), ParamType::Array);
        assert_eq!(<Cow<'_, str> as SchemaType>::param_type(), ParamType::String);
        assert_eq!(
            <Option<BTreeMap<String, f64>> as SchemaType>::param_type(),
            ParamType::Object
        );
    }

    #[test]
    fn test_other_types_fall_back_to_string() {
        assert_eq!(<Coordinates as SchemaType>::param_type(), ParamType::String);
        assert_eq!(
            <serde_json::Value as SchemaType>::param_type(),
            ParamType::String
        );
        assert_eq!(
            <Option<Coordinates> as SchemaType>::param_type(),
            ParamType::String
        );
    }

    #[test]
    fn test_type_names() {
        assert_eq!(ParamType::from_type_name("str"), ParamType::String);
        assert_eq!(ParamType::from_type_name("int"), ParamType::Integer);
        assert_eq!(ParamType::from_type_name("float"), ParamType::Number);
        assert_eq!(ParamType::from_type_name("bool"), ParamType::Boolean);
        assert_eq!(ParamType::from_type_name("list"), ParamType::Array);
        assert_eq!(ParamType::from_type_name("dict"), ParamType::Object);
        assert_eq!(ParamType::from_type_name("Vec<String>"), ParamType::Array);
        assert_eq!(ParamType::from_type_name("list[int]"), ParamType::Array);
        assert_eq!(ParamType::from_type_name("[u8]"), ParamType::Array);
        assert_eq!(
            ParamType::from_type_name("std::collections::HashMap<String, i32>"),
            ParamType::Object
        );
        assert_eq!(ParamType::from_type_name("Option<f64>"), ParamType::Number);
        assert_eq!(ParamType::from_type_name("&str"), ParamType::String);
        assert_eq!(ParamType::from_type_name("Cow<'a, str>"), ParamType::String);
        assert_eq!(
            ParamType::from_type_name("Option<HashMap<String, i64>>"),
            ParamType::Object
        );
        assert_eq!(
            ParamType::from_type_name("Option<Vec<(i32, f64)>>"),
            ParamType::Array
        );
    }

    #[test]
    fn test_unknown_type_names() {
        assert_eq!(ParamType::from_type_name("datetime"), ParamType::String);
        assert_eq!(ParamType::from_type_name("Coordinates"), ParamType::String);
        assert_eq!(ParamType::from_type_name(""), ParamType::String);
        assert_eq!(ParamType::from_type_name("Option<Uuid>"), ParamType::String);
    }
}
