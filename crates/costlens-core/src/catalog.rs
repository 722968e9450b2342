use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
    /// Position in the catalog, starting at zero.
    pub order: usize,
}

/// Ordered, immutable set of cost categories shared by every scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from `(id, label)` pairs. Order is taken from iteration order.
    pub fn new<I, S, L>(entries: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (S, L)>,
        S: Into<String>,
        L: Into<String>,
    {
        let mut categories = Vec::new();
        let mut index = HashMap::new();

        for (position, (id, label)) in entries.into_iter().enumerate() {
            let id = id.into();
            if id.trim().is_empty() {
                return Err(ValidationError::EmptyCategoryId { position });
            }
            if index.insert(id.clone(), position).is_some() {
                return Err(ValidationError::DuplicateCategory { category_id: id });
            }
            categories.push(Category {
                id,
                label: label.into(),
                order: position,
            });
        }

        if categories.is_empty() {
            return Err(ValidationError::EmptyCatalog);
        }

        Ok(Self { categories, index })
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.index.get(id).map(|&i| &self.categories[i])
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.categories.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_assigns_order_from_position() {
        let catalog = Catalog::new([("energy", "Energy"), ("water", "Water")]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("water").unwrap().order, 1);
        assert_eq!(catalog.position("energy"), Some(0));
        assert!(!catalog.contains("waste"));
    }

    #[test]
    fn catalog_rejects_duplicates_and_empty() {
        let err = Catalog::new([("a", "A"), ("a", "Again")]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateCategory {
                category_id: "a".into()
            }
        );

        let err = Catalog::new(Vec::<(String, String)>::new()).unwrap_err();
        assert_eq!(err, ValidationError::EmptyCatalog);

        let err = Catalog::new([("a", "A"), ("  ", "Blank")]).unwrap_err();
        assert_eq!(err, ValidationError::EmptyCategoryId { position: 1 });
    }
}
