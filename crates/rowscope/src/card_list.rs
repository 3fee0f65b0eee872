//! The card list: a column-less sibling of the table.
//!
//! Items are searched through a caller-supplied text projection, then stably
//! reordered so favorites come first. At most one card is expanded at a time.
//! There is no pagination and no column visibility.

use std::fmt;
use std::sync::Arc;

use crate::config::DEFAULT_SEARCH_PLACEHOLDER;
use crate::search::SearchQuery;

/// Message shown when no card survives search.
pub const EMPTY_CARDS_MESSAGE: &str = "No records to show.";

type Projection<T, R> = Arc<dyn Fn(&T) -> R + Send + Sync>;
type Callback<T> = Box<dyn FnMut(&T) + Send>;

/// A searchable, favorite-first list of cards.
pub struct EntityCardList<T> {
    get_id: Projection<T, String>,
    search_text: Option<Projection<T, String>>,
    is_favorite: Option<Projection<T, bool>>,
    on_card_click: Option<Callback<T>>,
    on_toggle_favorite: Option<Callback<T>>,
    enable_search: bool,
    search_placeholder: String,
    expandable: bool,
    title: Option<String>,
    description: Option<String>,
    search: String,
    expanded: Option<String>,
}

impl<T> fmt::Debug for EntityCardList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityCardList")
            .field("title", &self.title)
            .field("enable_search", &self.enable_search)
            .field("expandable", &self.expandable)
            .field("search", &self.search)
            .field("expanded", &self.expanded)
            .finish_non_exhaustive()
    }
}

/// One card in a [`CardListView`].
#[derive(Debug)]
pub struct CardView<'r, T> {
    pub id: String,
    pub item: &'r T,
    pub favorite: bool,
    /// Whether a favorite toggle should be offered.
    pub can_favorite: bool,
    pub expanded: bool,
}

/// The derived list for one render.
#[derive(Debug)]
pub struct CardListView<'r, T> {
    pub title: Option<&'r str>,
    pub description: Option<&'r str>,
    pub search: &'r str,
    /// Placeholder for the search box; `None` when search is disabled.
    pub search_placeholder: Option<&'r str>,
    pub cards: Vec<CardView<'r, T>>,
    /// Set when there are no cards.
    pub empty_message: Option<&'static str>,
}

impl<T> EntityCardList<T> {
    /// A list identifying items with `get_id`.
    pub fn new(get_id: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        EntityCardList {
            get_id: Arc::new(get_id),
            search_text: None,
            is_favorite: None,
            on_card_click: None,
            on_toggle_favorite: None,
            enable_search: true,
            search_placeholder: DEFAULT_SEARCH_PLACEHOLDER.to_string(),
            expandable: true,
            title: None,
            description: None,
            search: String::new(),
            expanded: None,
        }
    }

    /// Text each item is searched by. Without it, search has no effect.
    pub fn search_text(mut self, f: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.search_text = Some(Arc::new(f));
        self
    }

    pub fn is_favorite(mut self, f: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.is_favorite = Some(Arc::new(f));
        self
    }

    pub fn on_card_click(mut self, f: impl FnMut(&T) + Send + 'static) -> Self {
        self.on_card_click = Some(Box::new(f));
        self
    }

    pub fn on_toggle_favorite(mut self, f: impl FnMut(&T) + Send + 'static) -> Self {
        self.on_toggle_favorite = Some(Box::new(f));
        self
    }

    pub fn enable_search(mut self, enabled: bool) -> Self {
        self.enable_search = enabled;
        self
    }

    pub fn search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.search_placeholder = placeholder.into();
        self
    }

    pub fn expandable(mut self, expandable: bool) -> Self {
        self.expandable = expandable;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Current search input.
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Expands `id`, collapsing any other card, or collapses it if it is the
    /// expanded card.
    pub fn toggle_expanded(&mut self, id: &str) {
        if !self.expandable {
            log::debug!("card list is not expandable, ignoring toggle for '{}'", id);
            return;
        }
        if self.expanded.as_deref() == Some(id) {
            self.expanded = None;
        } else {
            self.expanded = Some(id.to_string());
        }
    }

    pub fn expanded_id(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.as_deref() == Some(id)
    }

    /// Emits a card click.
    pub fn click(&mut self, item: &T) {
        if let Some(cb) = self.on_card_click.as_mut() {
            cb(item);
        }
    }

    /// Emits a favorite toggle. Favorite state itself belongs to the caller.
    pub fn toggle_favorite(&mut self, item: &T) {
        if let Some(cb) = self.on_toggle_favorite.as_mut() {
            cb(item);
        }
    }

    /// Searches and orders `items`.
    pub fn view<'r>(&'r self, items: &'r [T]) -> CardListView<'r, T> {
        let mut rows: Vec<&'r T> = items.iter().collect();

        if let (true, Some(text)) = (self.enable_search, self.search_text.as_ref()) {
            let query = SearchQuery::new(&self.search);
            if !query.is_empty() {
                rows.retain(|item| query.matches_text(&text(item)));
            }
        }

        if let Some(fav) = self.is_favorite.as_ref() {
            // sort_by_key is stable: each group keeps its prior order.
            rows.sort_by_key(|item| !fav(item));
        }

        let can_favorite = self.is_favorite.is_some() && self.on_toggle_favorite.is_some();
        let cards: Vec<CardView<'r, T>> = rows
            .into_iter()
            .map(|item| {
                let id = (self.get_id)(item);
                CardView {
                    expanded: self.is_expanded(&id),
                    favorite: self.is_favorite.as_ref().is_some_and(|f| f(item)),
                    can_favorite,
                    id,
                    item,
                }
            })
            .collect();

        CardListView {
            title: self.title.as_deref(),
            description: self.description.as_deref(),
            search: &self.search,
            search_placeholder: self.enable_search.then_some(self.search_placeholder.as_str()),
            empty_message: cards.is_empty().then_some(EMPTY_CARDS_MESSAGE),
            cards,
        }
    }
}
