//! Ownership of a piece of table state.
//!
//! Each concern (search, sort, page, page size) is either owned by the table
//! or owned by the caller. The choice is made once, at construction, by
//! whether a change callback was supplied. A caller-owned value is only ever
//! replaced through [`Control::sync`]; requests are forwarded to the callback.

use std::fmt;

/// Change callback for a caller-owned value.
pub type OnChange<S> = Box<dyn FnMut(&S) + Send>;

/// A value owned either by the table or by the caller.
pub enum Control<S> {
    /// The table owns the value and updates it on request.
    Internal(S),
    /// The caller owns the value; requests go to `on_change`.
    External { value: S, on_change: OnChange<S> },
}

impl<S: fmt::Debug> fmt::Debug for Control<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Control::Internal(value) => f.debug_tuple("Internal").field(value).finish(),
            Control::External { value, .. } => f
                .debug_struct("External")
                .field("value", value)
                .finish_non_exhaustive(),
        }
    }
}

impl<S: Default> Default for Control<S> {
    fn default() -> Self {
        Control::Internal(S::default())
    }
}

impl<S> Control<S> {
    /// Table-owned, starting at `value`.
    pub fn internal(value: S) -> Self {
        Control::Internal(value)
    }

    /// Caller-owned, currently `value`.
    pub fn external(value: S, on_change: impl FnMut(&S) + Send + 'static) -> Self {
        Control::External {
            value,
            on_change: Box::new(on_change),
        }
    }

    /// The value to render with.
    pub fn get(&self) -> &S {
        match self {
            Control::Internal(value) | Control::External { value, .. } => value,
        }
    }

    /// Whether the caller owns the value.
    pub fn is_controlled(&self) -> bool {
        matches!(self, Control::External { .. })
    }

    /// Requests a new value.
    ///
    /// Table-owned values are replaced and `true` is returned. Caller-owned
    /// values are left alone: the callback is invoked and `false` returned.
    pub fn request(&mut self, next: S) -> bool {
        match self {
            Control::Internal(value) => {
                *value = next;
                true
            }
            Control::External { on_change, .. } => {
                on_change(&next);
                false
            }
        }
    }

    /// Delivers the caller's current value. Ignored for table-owned values.
    pub fn sync(&mut self, next: S) {
        match self {
            Control::External { value, .. } => *value = next,
            Control::Internal(_) => {
                log::debug!("sync ignored: value is owned by the table");
            }
        }
    }
}
