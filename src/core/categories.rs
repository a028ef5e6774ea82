//! Category resolution - turns stored `category_id` values into display names.
//!
//! The category tables are authoritative. When a row points at an id that is not in
//! the fetched table, the id is checked against [`FALLBACK_CATEGORIES`], the one
//! built-in list of well-known categories. Anything else resolves to
//! [`ResolvedCategory::Unknown`] and is displayed as the raw id.

use crate::entities::{expense_category, income_category};
use serde::Serialize;
use std::collections::HashMap;

/// A built-in category used when the category table is empty or does not know an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackCategory {
    /// Stable UUID
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
}

/// The eight built-in categories.
pub const FALLBACK_CATEGORIES: [FallbackCategory; 8] = [
    FallbackCategory {
        id: "3b6e0f5a-1c2d-4e8f-9a10-000000000001",
        name: "Tithes & Offerings",
    },
    FallbackCategory {
        id: "3b6e0f5a-1c2d-4e8f-9a10-000000000002",
        name: "Building Fund",
    },
    FallbackCategory {
        id: "3b6e0f5a-1c2d-4e8f-9a10-000000000003",
        name: "Missions",
    },
    FallbackCategory {
        id: "3b6e0f5a-1c2d-4e8f-9a10-000000000004",
        name: "Salaries",
    },
    FallbackCategory {
        id: "3b6e0f5a-1c2d-4e8f-9a10-000000000005",
        name: "Utilities",
    },
    FallbackCategory {
        id: "3b6e0f5a-1c2d-4e8f-9a10-000000000006",
        name: "Maintenance",
    },
    FallbackCategory {
        id: "3b6e0f5a-1c2d-4e8f-9a10-000000000007",
        name: "Ministry Programs",
    },
    FallbackCategory {
        id: "3b6e0f5a-1c2d-4e8f-9a10-000000000008",
        name: "Benevolence",
    },
];

/// Looks an id up in [`FALLBACK_CATEGORIES`].
#[must_use]
pub fn fallback_name(id: &str) -> Option<&'static str> {
    FALLBACK_CATEGORIES
        .iter()
        .find(|category| category.id == id)
        .map(|category| category.name)
}

/// A category row, independent of which table it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRecord {
    /// Category id
    pub id: String,
    /// Display name
    pub name: String,
}

impl From<income_category::Model> for CategoryRecord {
    fn from(model: income_category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<expense_category::Model> for CategoryRecord {
    fn from(model: expense_category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<FallbackCategory> for CategoryRecord {
    fn from(category: FallbackCategory) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.to_string(),
        }
    }
}

/// Outcome of resolving a category id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedCategory {
    /// Found in the authoritative table
    Known {
        /// Category id
        id: String,
        /// Name from the table
        name: String,
    },
    /// Not in the table, but one of the built-in ids
    Fallback {
        /// Category id
        id: String,
        /// Built-in name
        name: &'static str,
    },
    /// Nobody knows this id
    Unknown {
        /// The unresolved id
        id: String,
    },
}

impl ResolvedCategory {
    /// Name to show: the category name, or the raw id when unknown.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Known { name, .. } => name.as_str(),
            Self::Fallback { name, .. } => *name,
            Self::Unknown { id } => id.as_str(),
        }
    }

    /// Whether the id could not be resolved at all.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown { .. })
    }
}

/// Resolves category ids against a fetched category table.
#[derive(Debug, Clone, Default)]
pub struct CategoryResolver {
    known: HashMap<String, String>,
    records: Vec<CategoryRecord>,
}

impl CategoryResolver {
    /// Builds a resolver from the rows of a category table.
    pub fn new<I, R>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<CategoryRecord>,
    {
        let records: Vec<CategoryRecord> = rows.into_iter().map(Into::into).collect();
        let known = records
            .iter()
            .map(|record| (record.id.clone(), record.name.clone()))
            .collect();
        Self { known, records }
    }

    /// Resolves one id.
    #[must_use]
    pub fn resolve(&self, id: &str) -> ResolvedCategory {
        if let Some(name) = self.known.get(id) {
            return ResolvedCategory::Known {
                id: id.to_string(),
                name: name.clone(),
            };
        }

        fallback_name(id).map_or_else(
            || ResolvedCategory::Unknown { id: id.to_string() },
            |name| ResolvedCategory::Fallback {
                id: id.to_string(),
                name,
            },
        )
    }

    /// Display label for an optional id; `None` when the row has no category.
    #[must_use]
    pub fn label(&self, id: Option<&str>) -> Option<String> {
        id.map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| self.resolve(id).display_name().to_string())
    }

    /// Choices for a category picker: the table rows, or the built-in list when
    /// the table is empty.
    #[must_use]
    pub fn options(&self) -> Vec<CategoryRecord> {
        if self.records.is_empty() {
            FALLBACK_CATEGORIES.iter().copied().map(Into::into).collect()
        } else {
            self.records.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<CategoryRecord> {
        vec![CategoryRecord {
            id: "a1".to_string(),
            name: "Choir".to_string(),
        }]
    }

    #[test]
    fn test_fallback_ids_are_unique() {
        let mut ids: Vec<&str> = FALLBACK_CATEGORIES.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_resolve_known() {
        let resolver = CategoryResolver::new(table());
        assert_eq!(
            resolver.resolve("a1"),
            ResolvedCategory::Known {
                id: "a1".to_string(),
                name: "Choir".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_fallback_when_missing_from_table() {
        let resolver = CategoryResolver::new(table());
        let resolved = resolver.resolve(FALLBACK_CATEGORIES[4].id);
        assert!(matches!(resolved, ResolvedCategory::Fallback { name: "Utilities", .. }));
        assert_eq!(resolved.display_name(), "Utilities");
    }

    #[test]
    fn test_resolve_unknown_renders_raw_id() {
        let resolver = CategoryResolver::new(table());
        let resolved = resolver.resolve("deadbeef-0000");
        assert!(resolved.is_unknown());
        assert_eq!(resolved.display_name(), "deadbeef-0000");
    }

    #[test]
    fn test_table_wins_over_fallback() {
        let resolver = CategoryResolver::new(vec![CategoryRecord {
            id: FALLBACK_CATEGORIES[0].id.to_string(),
            name: "Tithes".to_string(),
        }]);
        assert_eq!(resolver.resolve(FALLBACK_CATEGORIES[0].id).display_name(), "Tithes");
    }

    #[test]
    fn test_label_handles_missing_ids() {
        let resolver = CategoryResolver::default();
        assert_eq!(resolver.label(None), None);
        assert_eq!(resolver.label(Some("  ")), None);
        assert_eq!(resolver.label(Some("x")), Some("x".to_string()));
    }

    #[test]
    fn test_options_fall_back_when_table_empty() {
        let empty = CategoryResolver::new(Vec::<CategoryRecord>::new());
        assert_eq!(empty.options().len(), 8);

        let populated = CategoryResolver::new(table());
        assert_eq!(populated.options(), table());
    }
}
