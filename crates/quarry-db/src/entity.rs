//! Row hydration.
//!
//! [`Entity`] is the contract for types built from raw rows; [`Collection`]
//! is the default wrapper around a hydrated result set. `Statement::get`
//! uses both, and `Statement::collect` accepts any container constructible
//! from a `Vec` of entities.

use quarry_sql::Value;

use crate::error::Result;
use crate::row::Row;

/// A type that can be hydrated from a raw row and converted back.
pub trait Entity: Sized {
    /// Builds the entity from one raw row.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Hydration`] when the row is missing data the
    /// entity requires.
    fn from_row(row: &Row) -> Result<Self>;

    /// The entity's identity value, if it has one.
    fn id(&self) -> Option<Value>;

    /// Converts the entity back into a row mapping.
    fn to_row(&self) -> Row;
}

/// The default container for hydrated result sets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection<E> {
    items: Vec<E>,
}

impl<E> Collection<E> {
    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the entities.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.items.iter()
    }

    /// Returns the first entity, if any.
    #[must_use]
    pub fn first(&self) -> Option<&E> {
        self.items.first()
    }

    /// Unwraps the inner vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<E> {
        self.items
    }
}

impl<E> From<Vec<E>> for Collection<E> {
    fn from(items: Vec<E>) -> Self {
        Self { items }
    }
}

impl<E> IntoIterator for Collection<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a Collection<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[derive(Debug, PartialEq)]
    struct Tag {
        id: i64,
        label: String,
    }

    impl Entity for Tag {
        fn from_row(row: &Row) -> Result<Self> {
            let id = match row.get("id") {
                Some(Value::Int(n)) => *n,
                _ => return Err(Error::Hydration(String::from("missing id"))),
            };
            let label = match row.get("label") {
                Some(Value::Text(s)) => s.clone(),
                _ => return Err(Error::Hydration(String::from("missing label"))),
            };
            Ok(Self { id, label })
        }

        fn id(&self) -> Option<Value> {
            Some(Value::Int(self.id))
        }

        fn to_row(&self) -> Row {
            let mut row = Row::new();
            row.set("id", self.id);
            row.set("label", self.label.clone());
            row
        }
    }

    #[test]
    fn test_round_trip() {
        let mut row = Row::new();
        row.set("id", 3);
        row.set("label", "urgent");
        let tag = Tag::from_row(&row).expect("hydrates");
        assert_eq!(tag.id(), Some(Value::Int(3)));
        assert_eq!(tag.to_row(), row);
    }

    #[test]
    fn test_hydration_failure() {
        let row = Row::new();
        assert!(matches!(Tag::from_row(&row), Err(Error::Hydration(_))));
    }

    #[test]
    fn test_collection_basics() {
        let collection: Collection<i32> = vec![1, 2, 3].into();
        assert_eq!(collection.len(), 3);
        assert!(!collection.is_empty());
        assert_eq!(collection.first(), Some(&1));
        assert_eq!(collection.into_iter().sum::<i32>(), 6);
    }
}
