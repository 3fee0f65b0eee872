//! Column descriptors and the column registry.
//!
//! A [`Column`] says how one column is labeled, where its cells come from,
//! and which pipeline stages may use it. Where a cell comes from is a tagged
//! [`ColumnSource`]: a raw record field, a computed accessor, or nothing.
//! Only field-backed columns take part in search, filtering and export.
//!
//! [`ColumnSet`] is the registry every stage reads from. It keeps declared
//! order and answers lookups by id.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::value::Value;

/// Function that turns a row into display text.
pub type CellFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Explicit comparator for two defined sort values.
pub type CompareFn = Arc<dyn Fn(&Value<'_>, &Value<'_>) -> Ordering + Send + Sync>;

/// Text alignment within a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Left-aligned (default).
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right-aligned.
    Right,
}

/// Viewport width class used to resolve responsive hiding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    /// Phone-sized.
    Narrow,
    /// Tablet-sized.
    Medium,
    /// Everything wider.
    #[default]
    Wide,
}

/// Responsive visibility hints for a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveHide {
    /// Hidden on narrow viewports.
    pub on_narrow: bool,
    /// Hidden on narrow and medium viewports.
    pub on_medium: bool,
}

impl ResponsiveHide {
    /// Returns `true` if a column with these hints is shown at `viewport`.
    pub fn shown_at(self, viewport: Viewport) -> bool {
        match viewport {
            Viewport::Wide => true,
            Viewport::Medium => !self.on_medium,
            Viewport::Narrow => !self.on_narrow && !self.on_medium,
        }
    }
}

/// Where a column's cells come from.
pub enum ColumnSource<T> {
    /// A raw record field, optionally displayed through a renderer.
    Field {
        /// Field name passed to [`Record::field`].
        field: String,
        /// Display override. Search, filter, sort and export still use the raw field.
        render: Option<CellFn<T>>,
    },
    /// A value computed from the whole row.
    Computed {
        /// Produces the cell text.
        compute: CellFn<T>,
    },
    /// Renders nothing (action or spacer columns).
    Blank,
}

impl<T> Clone for ColumnSource<T> {
    fn clone(&self) -> Self {
        match self {
            ColumnSource::Field { field, render } => ColumnSource::Field {
                field: field.clone(),
                render: render.clone(),
            },
            ColumnSource::Computed { compute } => ColumnSource::Computed {
                compute: compute.clone(),
            },
            ColumnSource::Blank => ColumnSource::Blank,
        }
    }
}

impl<T> fmt::Debug for ColumnSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSource::Field { field, render } => f
                .debug_struct("Field")
                .field("field", field)
                .field("render", &render.is_some())
                .finish(),
            ColumnSource::Computed { .. } => f.write_str("Computed"),
            ColumnSource::Blank => f.write_str("Blank"),
        }
    }
}

/// Describes one table column.
///
/// # Example
///
/// ```
/// use rowscope::{Align, Column};
/// # use rowscope::{Record, Value};
/// # struct Row { hours: f64 }
/// # impl Record for Row {
/// #     fn field(&self, _: &str) -> Value<'_> { Value::None }
/// # }
///
/// let hours: Column<Row> = Column::field("totalHours", "Hours", "totalHours")
///     .sortable()
///     .align(Align::Right)
///     .hide_on_narrow()
///     .render(|row: &Row| format!("{} h", row.hours));
///
/// assert!(hours.is_filterable());
/// ```
pub struct Column<T> {
    id: String,
    label: String,
    source: ColumnSource<T>,
    sortable: bool,
    filterable: Option<bool>,
    align: Align,
    responsive: ResponsiveHide,
    comparator: Option<CompareFn>,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Column {
            id: self.id.clone(),
            label: self.label.clone(),
            source: self.source.clone(),
            sortable: self.sortable,
            filterable: self.filterable,
            align: self.align,
            responsive: self.responsive,
            comparator: self.comparator.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("source", &self.source)
            .field("sortable", &self.sortable)
            .field("filterable", &self.is_filterable())
            .field("align", &self.align)
            .field("responsive", &self.responsive)
            .finish()
    }
}

impl<T> Column<T> {
    fn with_source(id: impl Into<String>, label: impl Into<String>, source: ColumnSource<T>) -> Self {
        Column {
            id: id.into(),
            label: label.into(),
            source,
            sortable: false,
            filterable: None,
            align: Align::Left,
            responsive: ResponsiveHide::default(),
            comparator: None,
        }
    }

    /// A column backed by a record field.
    pub fn field(id: impl Into<String>, label: impl Into<String>, field: impl Into<String>) -> Self {
        Self::with_source(
            id,
            label,
            ColumnSource::Field {
                field: field.into(),
                render: None,
            },
        )
    }

    /// A column computed from the whole row. Not searchable, filterable or exported.
    pub fn computed<F>(id: impl Into<String>, label: impl Into<String>, compute: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self::with_source(
            id,
            label,
            ColumnSource::Computed {
                compute: Arc::new(compute),
            },
        )
    }

    /// A column that renders nothing.
    pub fn blank(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_source(id, label, ColumnSource::Blank)
    }

    /// Marks the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Overrides whether the column is offered to search and filters.
    ///
    /// Only field-backed columns can ever be filterable; `true` on any other
    /// column has no effect.
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = Some(filterable);
        self
    }

    /// Sets the cell alignment.
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Hides the column on narrow viewports.
    pub fn hide_on_narrow(mut self) -> Self {
        self.responsive.on_narrow = true;
        self
    }

    /// Hides the column on narrow and medium viewports.
    pub fn hide_on_medium(mut self) -> Self {
        self.responsive.on_medium = true;
        self
    }

    /// Displays a field-backed column through `render`.
    ///
    /// On a computed column this replaces the computation. On a blank
    /// column it turns it into a computed one.
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        let render: CellFn<T> = Arc::new(render);
        self.source = match self.source {
            ColumnSource::Field { field, .. } => ColumnSource::Field {
                field,
                render: Some(render),
            },
            ColumnSource::Computed { .. } | ColumnSource::Blank => {
                ColumnSource::Computed { compute: render }
            }
        };
        self
    }

    /// Replaces locale string comparison with an explicit comparator.
    ///
    /// The comparator only ever sees two defined values; missing values are
    /// ordered last before it is consulted.
    pub fn compare_with<F>(mut self, compare: F) -> Self
    where
        F: Fn(&Value<'_>, &Value<'_>) -> Ordering + Send + Sync + 'static,
    {
        self.comparator = Some(Arc::new(compare));
        self
    }

    /// Column id, unique within a [`ColumnSet`].
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Header label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Where cells come from.
    pub fn source(&self) -> &ColumnSource<T> {
        &self.source
    }

    /// The source field, if this column is field-backed.
    pub fn source_field(&self) -> Option<&str> {
        match &self.source {
            ColumnSource::Field { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Whether a sort request on this column is honored.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Whether search and filters see this column.
    pub fn is_filterable(&self) -> bool {
        self.source_field().is_some() && self.filterable.unwrap_or(true)
    }

    /// Cell alignment.
    pub fn alignment(&self) -> Align {
        self.align
    }

    /// Responsive hints.
    pub fn responsive(&self) -> ResponsiveHide {
        self.responsive
    }

    pub(crate) fn comparator(&self) -> Option<&CompareFn> {
        self.comparator.as_ref()
    }
}

impl<T: Record> Column<T> {
    /// Raw value used by search, filters and export. `None` unless field-backed.
    pub fn raw_value<'a>(&self, row: &'a T) -> Value<'a> {
        match &self.source {
            ColumnSource::Field { field, .. } => row.field(field),
            _ => Value::None,
        }
    }

    /// Value the sort stage orders by.
    ///
    /// Field-backed columns sort by the raw field; computed columns by their
    /// computed text; blank columns have no value.
    pub fn sort_value<'a>(&self, row: &'a T) -> Value<'a> {
        match &self.source {
            ColumnSource::Field { field, .. } => row.field(field),
            ColumnSource::Computed { compute } => Value::from(compute(row)),
            ColumnSource::Blank => Value::None,
        }
    }

    /// Display text for a cell.
    pub fn render_cell(&self, row: &T) -> String {
        match &self.source {
            ColumnSource::Field {
                render: Some(render),
                ..
            } => render(row),
            ColumnSource::Field { field, render: None } => row.field(field).to_text().into_owned(),
            ColumnSource::Computed { compute } => compute(row),
            ColumnSource::Blank => String::new(),
        }
    }
}

/// Ordered, id-unique registry of columns.
///
/// Duplicate ids are a configuration error the registry tolerates: the first
/// declaration wins and later ones are dropped with a warning.
pub struct ColumnSet<T> {
    columns: Vec<Column<T>>,
    index: HashMap<String, usize>,
}

impl<T> Clone for ColumnSet<T> {
    fn clone(&self) -> Self {
        ColumnSet {
            columns: self.columns.clone(),
            index: self.index.clone(),
        }
    }
}

impl<T> fmt::Debug for ColumnSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.columns.iter()).finish()
    }
}

impl<T> Default for ColumnSet<T> {
    fn default() -> Self {
        ColumnSet {
            columns: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> ColumnSet<T> {
    /// Normalizes a list of column descriptors.
    pub fn new(columns: impl IntoIterator<Item = Column<T>>) -> Self {
        let mut set = ColumnSet::default();
        for column in columns {
            if set.index.contains_key(column.id()) {
                log::warn!("duplicate column id '{}' ignored", column.id());
                continue;
            }
            set.index.insert(column.id.clone(), set.columns.len());
            set.columns.push(column);
        }
        set
    }

    /// Looks up a column by id.
    pub fn get(&self, id: &str) -> Option<&Column<T>> {
        self.index.get(id).map(|&i| &self.columns[i])
    }

    /// Declared position of a column.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Columns in declared order.
    pub fn iter(&self) -> impl Iterator<Item = &Column<T>> {
        self.columns.iter()
    }

    /// Column ids in declared order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.id())
    }

    /// Columns visible to search and filters, in declared order.
    pub fn filterable(&self) -> impl Iterator<Item = &Column<T>> {
        self.columns.iter().filter(|c| c.is_filterable())
    }

    /// Default target for a new filter rule.
    pub fn first_filterable(&self) -> Option<&Column<T>> {
        self.filterable().next()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<T> FromIterator<Column<T>> for ColumnSet<T> {
    fn from_iter<I: IntoIterator<Item = Column<T>>>(iter: I) -> Self {
        ColumnSet::new(iter)
    }
}

impl<T> From<Vec<Column<T>>> for ColumnSet<T> {
    fn from(columns: Vec<Column<T>>) -> Self {
        ColumnSet::new(columns)
    }
}
