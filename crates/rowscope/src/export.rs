//! CSV export and print projection.
//!
//! Both artifacts cover the visible, field-backed columns over every row that
//! survives search and filters. Pagination never limits an export.
//!
//! CSV output quotes every field, headers included, and joins records with
//! `\n` without a trailing terminator.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::column::Column;
use crate::error::{HostError, Result, TableError};
use crate::record::Record;

/// MIME type offered to hosts for CSV downloads.
pub const CSV_MIME: &str = "text/csv;charset=utf-8";

/// Base file name used when the table has no export name.
pub const DEFAULT_EXPORT_NAME: &str = "export";

/// A finished CSV artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvExport {
    /// File name offered to the host, e.g. `attendance.csv`.
    pub file_name: String,
    /// UTF-8 CSV text.
    pub content: String,
    /// Data rows written, header excluded.
    pub rows: usize,
    /// Columns written.
    pub columns: usize,
}

impl CsvExport {
    /// MIME type of [`content`](Self::content).
    pub fn mime(&self) -> &'static str {
        CSV_MIME
    }
}

/// A print-friendly projection of the exported rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintView {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PrintView {
    /// Renders the view as aligned plain text.
    pub fn to_text(&self) -> String {
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| c.chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{:<width$}", c, width = *w))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = Vec::with_capacity(self.rows.len() + 2);
        if !self.title.is_empty() {
            out.push(self.title.clone());
        }
        out.push(line(&self.headers));
        out.extend(self.rows.iter().map(|r| line(r)));
        out.join("\n")
    }
}

/// File name for an export: `<name>.csv`, falling back to
/// [`DEFAULT_EXPORT_NAME`] for a blank name.
pub fn csv_file_name(name: Option<&str>) -> String {
    let base = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_EXPORT_NAME);
    if base.to_lowercase().ends_with(".csv") {
        base.to_string()
    } else {
        format!("{}.csv", base)
    }
}

/// Serializes `rows` over `columns` as fully quoted CSV.
///
/// `columns` should already be the visible, field-backed set; other columns
/// would export as empty cells. With no columns the content is empty.
pub fn build_csv<T: Record>(
    name: Option<&str>,
    columns: &[&Column<T>],
    rows: &[&T],
) -> Result<CsvExport> {
    let file_name = csv_file_name(name);
    if columns.is_empty() {
        return Ok(CsvExport {
            file_name,
            content: String::new(),
            rows: 0,
            columns: 0,
        });
    }

    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(columns.iter().map(|c| c.label()))?;
    for row in rows {
        wtr.write_record(columns.iter().map(|c| c.raw_value(*row).to_text().into_owned()))?;
    }

    let bytes = wtr.into_inner().map_err(|e| TableError::Io(e.into_error()))?;
    let mut content =
        String::from_utf8(bytes).map_err(|e| TableError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    if content.ends_with('\n') {
        content.pop();
    }

    Ok(CsvExport {
        file_name,
        content,
        rows: rows.len(),
        columns: columns.len(),
    })
}

/// Builds the print projection of `rows` over `columns`.
pub fn build_print_view<T: Record>(title: &str, columns: &[&Column<T>], rows: &[&T]) -> PrintView {
    PrintView {
        title: title.to_string(),
        headers: columns.iter().map(|c| c.label().to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|c| c.raw_value(*row).to_text().into_owned())
                    .collect()
            })
            .collect(),
    }
}

/// The environment that receives downloads and print requests.
pub trait Host {
    /// Offers a CSV file to the user.
    fn download(&mut self, export: &CsvExport) -> std::result::Result<(), HostError>;

    /// Triggers the environment's print facility.
    fn print(&mut self, view: &PrintView) -> std::result::Result<(), HostError>;
}

/// Writes downloads into a directory. Printing is unsupported.
#[derive(Debug, Clone)]
pub struct DirectoryHost {
    dir: PathBuf,
}

impl DirectoryHost {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectoryHost { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Host for DirectoryHost {
    fn download(&mut self, export: &CsvExport) -> std::result::Result<(), HostError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&export.file_name);
        fs::write(&path, &export.content)?;
        log::info!("wrote {} rows to {}", export.rows, path.display());
        Ok(())
    }

    fn print(&mut self, _view: &PrintView) -> std::result::Result<(), HostError> {
        Err(HostError::Unsupported("printing"))
    }
}

/// Records every request in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    pub downloads: Vec<CsvExport>,
    pub prints: Vec<PrintView>,
    /// When set, every request fails with [`HostError::Unsupported`].
    pub unsupported: bool,
}

impl MemoryHost {
    pub fn new() -> Self {
        MemoryHost::default()
    }

    /// A host that rejects every request.
    pub fn unsupported() -> Self {
        MemoryHost {
            unsupported: true,
            ..MemoryHost::default()
        }
    }
}

impl Host for MemoryHost {
    fn download(&mut self, export: &CsvExport) -> std::result::Result<(), HostError> {
        if self.unsupported {
            return Err(HostError::Unsupported("download"));
        }
        self.downloads.push(export.clone());
        Ok(())
    }

    fn print(&mut self, view: &PrintView) -> std::result::Result<(), HostError> {
        if self.unsupported {
            return Err(HostError::Unsupported("printing"));
        }
        self.prints.push(view.clone());
        Ok(())
    }
}
