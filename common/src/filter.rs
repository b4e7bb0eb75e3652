//! Category and search filtering
//!
//! Stable filter over canonical items: an item is visible when it passes the
//! active category and, for non-blank search text, the search predicate.

use crate::favorites::FavoriteStore;
use crate::types::{CanonicalItem, ItemKind};
use serde::{Deserialize, Serialize};

/// Browsing category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Category {
    #[default]
    All,
    Favorites,
    Antibiotics,
    GramPositive,
    GramNegative,
    /// Exact (case-insensitive) classification label
    Classification(String),
}

impl Category {
    /// Any string is a category; unknown names are classifications
    pub fn parse(s: &str) -> Self {
        match s {
            "all" => Category::All,
            "favorites" => Category::Favorites,
            "antibiotics" => Category::Antibiotics,
            "gram+" => Category::GramPositive,
            "gram-" => Category::GramNegative,
            other => Category::Classification(other.to_string()),
        }
    }

    /// Built-in categories, in navigation order
    pub fn builtins() -> [Category; 5] {
        [
            Category::All,
            Category::Favorites,
            Category::Antibiotics,
            Category::GramPositive,
            Category::GramNegative,
        ]
    }

    /// Category predicate
    ///
    /// Gram categories match the token as a substring of the gram status,
    /// classification categories require the whole label to match.
    pub fn matches(&self, item: &CanonicalItem, favorites: &FavoriteStore) -> bool {
        match self {
            Category::All => true,
            Category::Favorites => favorites.is_favorite(&item.id),
            Category::Antibiotics => item.kind == ItemKind::Antibiotic,
            Category::GramPositive => item.gram_status.to_lowercase().contains("gram+"),
            Category::GramNegative => item.gram_status.to_lowercase().contains("gram-"),
            Category::Classification(label) => item.classification.to_lowercase() == label.to_lowercase(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::All => write!(f, "all"),
            Category::Favorites => write!(f, "favorites"),
            Category::Antibiotics => write!(f, "antibiotics"),
            Category::GramPositive => write!(f, "gram+"),
            Category::GramNegative => write!(f, "gram-"),
            Category::Classification(label) => write!(f, "{}", label),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Category::parse(s))
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::parse(&s)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.to_string()
    }
}

/// Visible subset plus the counts shown next to it
#[derive(Debug, Clone)]
pub struct FilterResult<'a> {
    pub visible: Vec<&'a CanonicalItem>,
    pub total: usize,
}

impl FilterResult<'_> {
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// "Showing <visible> of <total>"
    pub fn summary(&self) -> String {
        format!("Showing {} of {}", self.visible_count(), self.total)
    }
}

/// Search predicate over name, description and classification
pub fn matches_search(item: &CanonicalItem, search_text: &str) -> bool {
    let needle = search_text.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let haystack = format!("{} {} {}", item.name, item.description, item.classification).to_lowercase();
    haystack.contains(&needle)
}

/// Apply category and search, keeping dataset order
pub fn filter<'a>(
    items: &'a [CanonicalItem],
    search_text: &str,
    category: &Category,
    favorites: &FavoriteStore,
) -> FilterResult<'a> {
    let visible = items
        .iter()
        .filter(|item| category.matches(item, favorites))
        .filter(|item| matches_search(item, search_text))
        .collect();

    FilterResult {
        visible,
        total: items.len(),
    }
}

/// Distinct non-empty classifications with item counts, first-seen order
pub fn classification_counts(items: &[CanonicalItem]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for item in items.iter().filter(|i| !i.classification.is_empty()) {
        match counts
            .iter_mut()
            .find(|(label, _)| label.to_lowercase() == item.classification.to_lowercase())
        {
            Some((_, count)) => *count += 1,
            None => counts.push((item.classification.clone(), 1)),
        }
    }

    counts
}
