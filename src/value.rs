//! Defines the representation of nested data structure values.

use std::fmt;
use std::fmt::Formatter;

/// Represents one nested value of a column, a record or any part of it.
///
/// A value is either a scalar leaf, a null, or an ordered list of nested
/// values. Lists own their elements, so a value is always a finite tree.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum NestedValue<T> {
    /// A scalar value
    Leaf(T),
    /// An absent value. It may stand in for a scalar or for a list.
    Null,
    /// Repeated value represented as a list of elements. If there are zero
    /// elements the list is present but empty, which is not the same as null.
    List(Vec<NestedValue<T>>),
}

impl<T> NestedValue<T> {
    pub fn leaf(value: T) -> Self {
        NestedValue::Leaf(value)
    }

    pub fn null() -> Self {
        NestedValue::Null
    }

    pub fn list(items: impl IntoIterator<Item = NestedValue<T>>) -> Self {
        NestedValue::List(items.into_iter().collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, NestedValue::Null)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, NestedValue::List(_))
    }

    /// Returns the scalar if this is a leaf.
    pub fn as_leaf(&self) -> Option<&T> {
        match self {
            NestedValue::Leaf(value) => Some(value),
            NestedValue::Null | NestedValue::List(_) => None,
        }
    }

    /// Returns the elements if this is a list.
    pub fn as_list(&self) -> Option<&[NestedValue<T>]> {
        match self {
            NestedValue::List(items) => Some(items),
            NestedValue::Leaf(_) | NestedValue::Null => None,
        }
    }

    /// Returns the maximum number of lists nested along any path.
    ///
    /// A leaf or null has depth 0, `[]` and `[1]` have depth 1, `[[]]` has
    /// depth 2.
    pub fn list_depth(&self) -> usize {
        self.iter_depth_first()
            .filter(|(value, _)| value.is_list())
            .map(|(_, depth)| depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// Returns a depth-first iterator for a [`NestedValue`].
    pub fn iter_depth_first(&self) -> DepthFirstValueIterator<'_, T> {
        DepthFirstValueIterator {
            stack: vec![(self, 0)],
        }
    }
}

impl<T: fmt::Display> fmt::Display for NestedValue<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NestedValue::Leaf(value) => write!(f, "{}", value),
            NestedValue::Null => write!(f, "null"),
            NestedValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl<T> From<Option<T>> for NestedValue<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => NestedValue::Leaf(value),
            None => NestedValue::Null,
        }
    }
}

impl<T> From<Vec<NestedValue<T>>> for NestedValue<T> {
    fn from(items: Vec<NestedValue<T>>) -> Self {
        NestedValue::List(items)
    }
}

impl<T> FromIterator<NestedValue<T>> for NestedValue<T> {
    fn from_iter<I: IntoIterator<Item = NestedValue<T>>>(iter: I) -> Self {
        NestedValue::List(iter.into_iter().collect())
    }
}

/// Builds a [`NestedValue`] from a JSON-like literal.
///
/// Lists are written with brackets, `null` is a null and every other token
/// tree is an expression which becomes a leaf.
///
/// ```
/// use dremel::{nested, NestedValue};
///
/// let value: NestedValue<i64> = nested!([1, [2, null], []]);
/// assert_eq!(value.to_string(), "[1, [2, null], []]");
/// ```
#[macro_export]
macro_rules! nested {
    (null) => {
        $crate::NestedValue::Null
    };
    ([ $($item:tt),* $(,)? ]) => {
        $crate::NestedValue::List(vec![$($crate::nested!($item)),*])
    };
    ($leaf:expr) => {
        $crate::NestedValue::Leaf($leaf)
    };
}

/// A depth-first iterator for [`NestedValue`].
///
/// The iterator visits every node in pre-order. It yields the node together
/// with the number of lists enclosing it.
#[derive(Debug)]
pub struct DepthFirstValueIterator<'a, T> {
    stack: Vec<(&'a NestedValue<T>, usize)>,
}

impl<'a, T> Iterator for DepthFirstValueIterator<'a, T> {
    type Item = (&'a NestedValue<T>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (value, depth) = self.stack.pop()?;
        if let NestedValue::List(items) = value {
            for item in items.iter().rev() {
                self.stack.push((item, depth + 1))
            }
        }
        Some((value, depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_builds_nested_lists() {
        let actual: NestedValue<i64> = nested!([1, [2, null], []]);
        let expected = NestedValue::List(vec![
            NestedValue::Leaf(1),
            NestedValue::List(vec![NestedValue::Leaf(2), NestedValue::Null]),
            NestedValue::List(vec![]),
        ]);

        assert_eq!(actual, expected);
        assert_eq!(nested!(null), NestedValue::<i64>::Null);
        assert_eq!(nested!("x"), NestedValue::Leaf("x"));
    }

    #[test]
    fn test_optional_conversion() {
        assert_eq!(NestedValue::from(Some(42)), NestedValue::Leaf(42));
        assert_eq!(NestedValue::from(None::<i64>), NestedValue::Null);
    }

    #[test]
    fn test_collect_into_list() {
        let actual = (0..3).map(NestedValue::leaf).collect::<NestedValue<_>>();
        assert_eq!(actual, nested!([0, 1, 2]));
    }

    #[test]
    fn test_display() {
        let value: NestedValue<&str> = nested!([["a", "b"], null, [], [[null]]]);
        assert_eq!(value.to_string(), "[[a, b], null, [], [[null]]]");
        assert_eq!(NestedValue::<i64>::Null.to_string(), "null");
    }

    #[test]
    fn test_list_depth() {
        assert_eq!(NestedValue::Leaf(1).list_depth(), 0);
        assert_eq!(NestedValue::<i64>::Null.list_depth(), 0);
        assert_eq!(NestedValue::<i64>::List(vec![]).list_depth(), 1);
        assert_eq!(NestedValue::<i64>::List(vec![NestedValue::List(vec![])]).list_depth(), 2);
        let ragged: NestedValue<i64> = nested!([[1], [[2, 3]], null]);
        assert_eq!(ragged.list_depth(), 3);
    }

    #[test]
    fn test_depth_first_list() {
        let value: NestedValue<i64> = nested!([1, [2, null], 3]);
        let items = value.iter_depth_first().collect::<Vec<_>>();

        assert_eq!(items.len(), 6);
        assert!(items[0].0.is_list());
        assert_eq!(items[0].1, 0);
        assert_eq!(items[1], (&NestedValue::Leaf(1), 1));
        assert!(items[2].0.is_list());
        assert_eq!(items[3], (&NestedValue::Leaf(2), 2));
        assert_eq!(items[4], (&NestedValue::Null, 2));
        assert_eq!(items[5], (&NestedValue::Leaf(3), 1));
    }

    #[test]
    fn test_accessors() {
        let value: NestedValue<i64> = nested!([7]);
        assert_eq!(value.as_list(), Some(&[NestedValue::Leaf(7)][..]));
        assert_eq!(value.as_leaf(), None);
        assert_eq!(NestedValue::Leaf(7).as_leaf(), Some(&7));
        assert!(NestedValue::<i64>::null().is_null());
    }
}
