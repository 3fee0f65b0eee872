//! Proc macros for rowscope.
//!
//! - [`Record`] - Generate typed field access for table rows
//!
//! The derive is re-exported by `rowscope` behind its default `derive`
//! feature, so most users never depend on this crate directly.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Record` trait so a struct can back table columns.
///
/// # Field Attributes
///
/// | Attribute | Exposed as |
/// |-----------|------------|
/// | `String` | Borrowed text; the field must be `AsRef<str>` |
/// | `Number` | `Number`; the field must be a `Copy` numeric primitive |
/// | `Bool` | `Bool` |
/// | `Display` | Owned text from `ToString` (enums, dates, ids) |
/// | `skip` | Not exposed |
/// | `rename = "..."` | Record field name to use instead of the Rust name |
///
/// Fields without a `#[field(...)]` attribute are not exposed. An
/// `Option<T>` field reads as `Value::None` when it is `None`.
///
/// # Generated Code
///
/// 1. Field name constants (e.g., `Attendance::NAME`, `Attendance::TOTAL_HOURS`)
/// 2. Implementation of `Record::field()`
///
/// # Example
///
/// ```ignore
/// use rowscope::{Column, Record, Value};
///
/// #[derive(Record)]
/// struct Attendance {
///     #[field(String)]
///     name: String,
///
///     #[field(Number, rename = "totalHours")]
///     total_hours: Option<f64>,
///
///     #[field(Display)]
///     status: Status,
///
///     #[field(skip)]
///     internal_id: u64,
/// }
///
/// let hours = Column::field("hours", "Total Hours", Attendance::TOTAL_HOURS).sortable();
/// ```
#[proc_macro_derive(Record, attributes(field))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
