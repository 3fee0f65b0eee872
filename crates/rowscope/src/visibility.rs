//! Column visibility bookkeeping.
//!
//! Every known column starts visible. No operation may leave zero columns
//! visible: a request that would hide the last visible column is ignored.

use std::collections::HashMap;

/// Which columns are shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    order: Vec<String>,
    shown: HashMap<String, bool>,
}

impl Visibility {
    /// All of `ids` visible, in the given order.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let order: Vec<String> = ids.into_iter().map(Into::into).collect();
        let shown = order.iter().map(|id| (id.clone(), true)).collect();
        Visibility { order, shown }
    }

    /// Re-initializes for a new column set: everything visible.
    pub fn reset<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self = Visibility::new(ids);
    }

    /// Whether `id` is shown. Unknown ids are reported hidden.
    pub fn is_visible(&self, id: &str) -> bool {
        self.shown.get(id).copied().unwrap_or(false)
    }

    /// Number of visible columns.
    pub fn visible_count(&self) -> usize {
        self.shown.values().filter(|v| **v).count()
    }

    /// Returns `true` if every known column is visible.
    pub fn all_visible(&self) -> bool {
        self.shown.values().all(|v| *v)
    }

    /// Visible ids in column order.
    pub fn visible_ids(&self) -> impl Iterator<Item = &str> {
        self.order
            .iter()
            .filter(|id| self.is_visible(id))
            .map(String::as_str)
    }

    /// Flips one column. Returns `false` when nothing changed: the id is
    /// unknown, or it is the sole visible column.
    pub fn toggle(&mut self, id: &str) -> bool {
        let Some(&visible) = self.shown.get(id) else {
            log::debug!("visibility toggle for unknown column '{}' ignored", id);
            return false;
        };
        if visible && self.visible_count() == 1 {
            log::debug!("refusing to hide last visible column '{}'", id);
            return false;
        }
        self.shown.insert(id.to_string(), !visible);
        true
    }

    /// Sets one column's visibility, subject to the same last-column rule.
    pub fn set(&mut self, id: &str, visible: bool) -> bool {
        if self.shown.get(id) == Some(&visible) {
            return false;
        }
        self.toggle(id)
    }

    /// Shows every known column.
    pub fn show_all(&mut self) {
        for v in self.shown.values_mut() {
            *v = true;
        }
    }

    /// The single "toggle all" affordance: with everything visible, keep only
    /// the first column; otherwise show everything again.
    pub fn hide_all_but_first(&mut self) {
        if !self.all_visible() {
            self.show_all();
            return;
        }
        let first = self.order.first().cloned();
        for (id, v) in self.shown.iter_mut() {
            *v = Some(id) == first.as_ref();
        }
    }
}
