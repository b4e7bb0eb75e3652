//! Application state
//!
//! Owns the loaded items, the transient view state, favorites, theme and the
//! key-value store they persist to. Every user action goes through here, one
//! at a time.

use crate::detail::{project, DetailView};
use crate::error::Result;
use crate::favorites::FavoriteStore;
use crate::filter::{filter, Category, FilterResult};
use crate::storage::KeyValueStore;
use crate::theme::Theme;
use crate::types::CanonicalItem;

/// Transient view state, never persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub search_text: String,
    pub active_category: Category,
    pub selected_item_id: Option<String>,
}

pub struct AppState<S: KeyValueStore> {
    items: Vec<CanonicalItem>,
    view: ViewState,
    favorites: FavoriteStore,
    theme: Theme,
    store: S,
}

impl<S: KeyValueStore> AppState<S> {
    /// Build state from loaded items; favorites and theme come from `store`
    pub fn new(items: Vec<CanonicalItem>, store: S) -> Self {
        let favorites = FavoriteStore::load(&store);
        let theme = Theme::load(&store);

        Self {
            items,
            view: ViewState::default(),
            favorites,
            theme,
            store,
        }
    }

    pub fn items(&self) -> &[CanonicalItem] {
        &self.items
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn favorites(&self) -> &FavoriteStore {
        &self.favorites
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// First item carrying `id`
    pub fn find(&self, id: &str) -> Option<&CanonicalItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.view.search_text = text.into();
    }

    pub fn set_category(&mut self, category: Category) {
        self.view.active_category = category;
    }

    /// Items visible under the current search and category
    pub fn visible(&self) -> FilterResult<'_> {
        filter(
            &self.items,
            &self.view.search_text,
            &self.view.active_category,
            &self.favorites,
        )
    }

    /// Open the detail panel; opening the item already shown closes it.
    /// Returns the view now shown, if any.
    pub fn toggle_detail(&mut self, id: &str) -> Option<DetailView> {
        if self.view.selected_item_id.as_deref() == Some(id) {
            self.close_detail();
            return None;
        }
        self.open_detail(id)
    }

    /// Open the detail panel for `id`; unknown ids leave the panel closed
    pub fn open_detail(&mut self, id: &str) -> Option<DetailView> {
        let view = self.find(id).map(project);
        self.view.selected_item_id = view.as_ref().map(|_| id.to_string());
        view
    }

    pub fn close_detail(&mut self) {
        self.view.selected_item_id = None;
    }

    /// Detail view of the selected item
    pub fn detail(&self) -> Option<DetailView> {
        self.view
            .selected_item_id
            .as_deref()
            .and_then(|id| self.find(id))
            .map(project)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.is_favorite(id)
    }

    /// Flip favorite membership and persist it
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        self.favorites.toggle(id, &mut self.store)
    }

    /// Favorited items in dataset order
    pub fn favorite_items(&self) -> Vec<&CanonicalItem> {
        self.favorites.select(&self.items)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<Theme> {
        theme.save(&mut self.store)?;
        self.theme = theme;
        Ok(theme)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.set_theme(self.theme.toggled())
    }
}
