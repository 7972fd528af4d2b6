//! In-memory record of which products have already been announced.
//!
//! State lives for one process lifetime; a restart re-announces everything
//! on the next poll.

use std::collections::{BTreeMap, HashSet};

use brickwatch_core::{Category, ProductRecord};

use crate::StoreError;

#[derive(Debug, Default)]
struct Admitted {
    ids: HashSet<String>,
    /// Admission order.
    records: Vec<ProductRecord>,
}

/// Per-category dedup store keyed by product id.
///
/// Only the categories the store was created with are tracked; admitting into
/// any other category is an error.
#[derive(Debug)]
pub struct CategoryStore {
    categories: BTreeMap<Category, Admitted>,
}

impl CategoryStore {
    #[must_use]
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            categories: categories
                .into_iter()
                .map(|category| (category, Admitted::default()))
                .collect(),
        }
    }

    #[must_use]
    pub fn with_all_categories() -> Self {
        Self::new(Category::ALL)
    }

    /// Tracked categories in poll order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.keys().copied()
    }

    /// Admits the records whose ids have not been seen in `category` and
    /// returns them in input order.
    ///
    /// Records with an empty id are ignored. When an id repeats within
    /// `records`, only its first occurrence is admitted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownCategory`] if `category` is not tracked.
    pub fn admit_new(
        &mut self,
        category: Category,
        records: &[ProductRecord],
    ) -> Result<Vec<ProductRecord>, StoreError> {
        let admitted = self
            .categories
            .get_mut(&category)
            .ok_or(StoreError::UnknownCategory(category))?;

        let mut fresh = Vec::new();
        for record in records {
            if record.id.is_empty() {
                continue;
            }
            if admitted.ids.insert(record.id.clone()) {
                admitted.records.push(record.clone());
                fresh.push(record.clone());
            }
        }

        tracing::debug!(
            %category,
            offered = records.len(),
            admitted = fresh.len(),
            total = admitted.records.len(),
            "dedup pass complete"
        );
        Ok(fresh)
    }

    /// [`admit_new`](Self::admit_new) with the category given by key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Category`] if `key` is not a category key, or
    /// [`StoreError::UnknownCategory`] if the category is not tracked.
    pub fn admit_new_by_key(
        &mut self,
        key: &str,
        records: &[ProductRecord],
    ) -> Result<Vec<ProductRecord>, StoreError> {
        let category: Category = key.parse()?;
        self.admit_new(category, records)
    }

    #[must_use]
    pub fn contains(&self, category: Category, id: &str) -> bool {
        self.categories
            .get(&category)
            .is_some_and(|admitted| admitted.ids.contains(id))
    }

    /// Number of admitted records in `category`; zero when untracked.
    #[must_use]
    pub fn len(&self, category: Category) -> usize {
        self.categories
            .get(&category)
            .map_or(0, |admitted| admitted.records.len())
    }

    #[must_use]
    pub fn is_empty(&self, category: Category) -> bool {
        self.len(category) == 0
    }

    /// Admitted records of `category` in admission order.
    #[must_use]
    pub fn admitted(&self, category: Category) -> &[ProductRecord] {
        self.categories
            .get(&category)
            .map(|admitted| admitted.records.as_slice())
            .unwrap_or_default()
    }

    /// Forgets every admitted record; tracked categories are kept.
    pub fn reset(&mut self) {
        for admitted in self.categories.values_mut() {
            *admitted = Admitted::default();
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
