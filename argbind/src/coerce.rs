//! Conversion of literal strings into typed field values

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::hash::Hash;
use std::path::PathBuf;

use crate::errors::CoercionError;

/// A scalar type a literal can be converted into
///
/// Implemented for `bool`, `char`, the integer and float primitives,
/// `String`, `PathBuf` and `Option<V>`. Enumerations get an implementation
/// from `#[derive(ArgEnum)]`.
pub trait ArgValue: Sized {
    /// Display name used in error messages
    fn type_name() -> &'static str;

    /// Convert a literal into a value of this type
    ///
    /// # Errors
    ///
    /// Returns a [`CoercionError`] when the literal is not a valid value.
    fn coerce(literal: &str) -> Result<Self, CoercionError>;
}

/// A fieldless enumeration whose members are selected by name
pub trait ArgEnum: Sized + 'static {
    /// Member names in declaration order
    const VARIANTS: &'static [&'static str];

    /// Build the member at `index` in [`ArgEnum::VARIANTS`]
    fn from_variant_index(index: usize) -> Option<Self>;
}

/// Select an enumeration member by case-insensitive name
///
/// # Errors
///
/// Returns [`CoercionError::InvalidEnumMember`] listing every member in
/// declaration order when no name matches.
///
/// # Examples
///
/// ```
/// use argbind::{ArgEnum, coerce_enum};
///
/// #[derive(Debug, PartialEq)]
/// enum Level { Low, High }
///
/// impl ArgEnum for Level {
///     const VARIANTS: &'static [&'static str] = &["Low", "High"];
///     fn from_variant_index(index: usize) -> Option<Self> {
///         [Self::Low, Self::High].into_iter().nth(index)
///     }
/// }
///
/// assert_eq!(coerce_enum::<Level>("high"), Ok(Level::High));
/// assert!(coerce_enum::<Level>("Hi").is_err());
/// ```
pub fn coerce_enum<E: ArgEnum>(literal: &str) -> Result<E, CoercionError> {
    let wanted = literal.trim().to_lowercase();
    E::VARIANTS
        .iter()
        .position(|name| name.to_lowercase() == wanted)
        .and_then(E::from_variant_index)
        .ok_or_else(|| CoercionError::InvalidEnumMember {
            value: literal.to_string(),
            members: E::VARIANTS.iter().map(ToString::to_string).collect(),
        })
}

fn invalid<T: ArgValue>(literal: &str) -> CoercionError {
    CoercionError::InvalidLiteral {
        value: literal.to_string(),
        type_name: T::type_name().to_string(),
    }
}

impl ArgValue for bool {
    fn type_name() -> &'static str {
        "bool"
    }

    fn coerce(literal: &str) -> Result<Self, CoercionError> {
        let trimmed = literal.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(invalid::<Self>(literal))
        }
    }
}

macro_rules! impl_arg_value_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ArgValue for $ty {
                fn type_name() -> &'static str {
                    stringify!($ty)
                }

                fn coerce(literal: &str) -> Result<Self, CoercionError> {
                    literal.trim().parse::<$ty>().map_err(|_| invalid::<Self>(literal))
                }
            }
        )*
    };
}

impl_arg_value_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

impl ArgValue for char {
    fn type_name() -> &'static str {
        "char"
    }

    fn coerce(literal: &str) -> Result<Self, CoercionError> {
        let mut chars = literal.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(invalid::<Self>(literal)),
        }
    }
}

impl ArgValue for String {
    fn type_name() -> &'static str {
        "String"
    }

    fn coerce(literal: &str) -> Result<Self, CoercionError> {
        Ok(literal.to_string())
    }
}

impl ArgValue for PathBuf {
    fn type_name() -> &'static str {
        "PathBuf"
    }

    fn coerce(literal: &str) -> Result<Self, CoercionError> {
        Ok(PathBuf::from(literal))
    }
}

impl<V: ArgValue> ArgValue for Option<V> {
    fn type_name() -> &'static str {
        V::type_name()
    }

    fn coerce(literal: &str) -> Result<Self, CoercionError> {
        V::coerce(literal).map(Some)
    }
}

/// A collection type bound by an array parameter
pub trait ArgCollection: Sized {
    /// Element type every literal is converted into
    type Element: ArgValue;

    /// Build the collection from converted elements, preserving their order
    fn from_elements(elements: Vec<Self::Element>) -> Self;
}

impl<E: ArgValue> ArgCollection for Vec<E> {
    type Element = E;

    fn from_elements(elements: Vec<E>) -> Self {
        elements
    }
}

impl<E: ArgValue> ArgCollection for VecDeque<E> {
    type Element = E;

    fn from_elements(elements: Vec<E>) -> Self {
        elements.into()
    }
}

impl<E: ArgValue + Ord> ArgCollection for BTreeSet<E> {
    type Element = E;

    fn from_elements(elements: Vec<E>) -> Self {
        elements.into_iter().collect()
    }
}

impl<E: ArgValue + Eq + Hash> ArgCollection for HashSet<E> {
    type Element = E;

    fn from_elements(elements: Vec<E>) -> Self {
        elements.into_iter().collect()
    }
}

/// Convert every literal into the collection's element type
///
/// Stops at the first literal that fails. The partial result is discarded and
/// the error reports every literal that was supplied.
///
/// # Errors
///
/// Returns [`CoercionError::InvalidLiteralList`] or
/// [`CoercionError::InvalidEnumList`].
pub fn coerce_all<C: ArgCollection>(literals: &[String]) -> Result<C, CoercionError> {
    literals
        .iter()
        .map(|literal| C::Element::coerce(literal))
        .collect::<Result<Vec<_>, _>>()
        .map(C::from_elements)
        .map_err(|err| err.into_list(literals))
}

/// Split an inline list literal on `,` and `;`
#[must_use]
pub fn split_list(literal: &str) -> Vec<String> {
    literal.split([',', ';']).map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Ordinal {
        First,
        Second,
        Third,
    }

    impl ArgEnum for Ordinal {
        const VARIANTS: &'static [&'static str] = &["First", "Second", "Third"];

        fn from_variant_index(index: usize) -> Option<Self> {
            [Self::First, Self::Second, Self::Third].get(index).copied()
        }
    }

    impl ArgValue for Ordinal {
        fn type_name() -> &'static str {
            "Ordinal"
        }

        fn coerce(literal: &str) -> Result<Self, CoercionError> {
            coerce_enum(literal)
        }
    }

    #[test]
    fn test_primitives() {
        assert_eq!(i32::coerce("16"), Ok(16));
        assert!((f32::coerce("1.618").unwrap() - 1.618).abs() < f32::EPSILON);
        assert!((f64::coerce(" 2.5 ").unwrap() - 2.5).abs() < f64::EPSILON);
        assert_eq!(bool::coerce("false"), Ok(false));
        assert_eq!(bool::coerce("TRUE"), Ok(true));
        assert_eq!(char::coerce("x"), Ok('x'));
        assert_eq!(String::coerce(" a b "), Ok(" a b ".to_string()));
        assert_eq!(Option::<u8>::coerce("7"), Ok(Some(7)));
    }

    #[test]
    fn test_invalid_literals() {
        assert_eq!(
            i32::coerce("NaN").unwrap_err().to_string(),
            "Given value 'NaN' should be of type 'i32'"
        );
        assert_eq!(
            bool::coerce("NotTrue").unwrap_err().to_string(),
            "Given value 'NotTrue' should be of type 'bool'"
        );
        assert!(f32::coerce("Golden").is_err());
        assert!(char::coerce("xy").is_err());
        assert!(u8::coerce("-1").is_err());
    }

    #[test]
    fn test_enum_case_insensitive() {
        assert_eq!(Ordinal::coerce("Second"), Ok(Ordinal::Second));
        assert_eq!(Ordinal::coerce("second"), Ok(Ordinal::Second));
        assert_eq!(Ordinal::coerce("THIRD"), Ok(Ordinal::Third));
        assert_eq!(Ordinal::coerce(" second "), Ok(Ordinal::Second));
    }

    #[test]
    fn test_enum_unknown_member() {
        let err = Ordinal::coerce("Sec").unwrap_err();
        assert_eq!(
            err,
            CoercionError::InvalidEnumMember {
                value: "Sec".to_string(),
                members: vec!["First".into(), "Second".into(), "Third".into()],
            }
        );
    }

    #[test]
    fn test_enum_list_with_spaces() {
        let literals = split_list("Second, Third");
        assert_eq!(
            coerce_all::<Vec<Ordinal>>(&literals),
            Ok(vec![Ordinal::Second, Ordinal::Third])
        );

        let err = coerce_all::<Vec<Ordinal>>(&split_list("Second, Sec")).unwrap_err();
        assert_eq!(
            err,
            CoercionError::InvalidEnumList {
                values: vec!["Second".into(), " Sec".into()],
                members: vec!["First".into(), "Second".into(), "Third".into()],
            }
        );
    }

    #[test]
    fn test_collections() {
        let literals = vec!["2".to_string(), "3".to_string()];
        assert_eq!(coerce_all::<Vec<i32>>(&literals), Ok(vec![2, 3]));
        assert_eq!(
            coerce_all::<VecDeque<i32>>(&literals),
            Ok(VecDeque::from(vec![2, 3]))
        );

        let literals = vec!["Third".to_string(), "first".to_string()];
        let set = coerce_all::<BTreeSet<Ordinal>>(&literals).unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![Ordinal::First, Ordinal::Third]);
    }

    #[test]
    fn test_collection_failures_report_all_literals() {
        let literals = vec!["NaN".to_string(), "1".to_string()];
        assert_eq!(
            coerce_all::<Vec<i32>>(&literals).unwrap_err().to_string(),
            "Given values 'NaN, 1' should be a list of type 'i32'"
        );

        let literals = vec!["First".to_string(), "Sec".to_string()];
        assert_eq!(
            coerce_all::<Vec<Ordinal>>(&literals).unwrap_err().to_string(),
            "Given list 'First, Sec' contains an unknown value. Valid values - [First, Second, Third]"
        );
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("a1,a2"), vec!["a1", "a2"]);
        assert_eq!(split_list("a;b,c"), vec!["a", "b", "c"]);
        assert_eq!(split_list("single"), vec!["single"]);
    }
}
