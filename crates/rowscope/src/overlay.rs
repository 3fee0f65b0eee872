//! Transient menus and panels attached to a table.

/// The one overlay currently open on a table, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    /// The filter rule editor.
    FilterPanel,
    /// The export/print menu.
    ExportMenu,
    /// The column visibility menu.
    ColumnMenu,
    /// The per-column header menu for the given column id.
    HeaderMenu(String),
}

impl Overlay {
    pub fn is_open(&self) -> bool {
        !matches!(self, Overlay::None)
    }

    /// Opens `target`, or closes it if it is already the open overlay.
    pub fn toggled(&self, target: Overlay) -> Overlay {
        if *self == target {
            Overlay::None
        } else {
            target
        }
    }
}
