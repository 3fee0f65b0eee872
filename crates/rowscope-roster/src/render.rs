//! Plain-text rendering of table and card views, and a host that prints
//! to the terminal.

use std::io::{self, Write};

use rowscope::{Align, CardListView, CsvExport, Dir, HeaderView, HostError, PrintView, TableView, ViewState};

use crate::attendance::AttendanceRecord;

const GAP: &str = "  ";

fn header_text(h: &HeaderView) -> String {
    match h.sorted {
        Some(Dir::Asc) => format!("{} ^", h.label),
        Some(Dir::Desc) => format!("{} v", h.label),
        None => h.label.clone(),
    }
}

fn pad(text: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{:<width$}", text),
        Align::Center => format!("{:^width$}", text),
        Align::Right => format!("{:>width$}", text),
    }
}

/// Renders one table view: optional title, header, rows (or the state
/// message) and the footer.
pub fn table<T>(view: &TableView<'_, T>) -> String {
    let mut out = Vec::new();
    if let Some(title) = &view.title {
        out.push(title.clone());
    }
    if !view.search.is_empty() {
        out.push(format!("Search: {}", view.search));
    }
    if view.active_filters > 0 {
        out.push(format!("Filters: {} active", view.active_filters));
    }

    let headers: Vec<String> = view.columns.iter().map(header_text).collect();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            view.rows
                .iter()
                .filter_map(|r| r.cells.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(view.columns.iter().zip(&widths))
            .map(|(c, (h, w))| pad(c, *w, h.align))
            .collect::<Vec<_>>()
            .join(GAP)
            .trim_end()
            .to_string()
    };

    out.push(line(&headers));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join(GAP),
    );

    match &view.state {
        ViewState::Loading => out.push("Loading...".to_string()),
        ViewState::Empty(message) => out.push(message.clone()),
        ViewState::Rows => out.extend(view.rows.iter().map(|r| line(&r.cells))),
    }

    out.push(String::new());
    out.push(format!(
        "{}  (page {} of {}, {} per page)",
        view.summary(),
        view.window.page(),
        view.window.total_pages(),
        view.window.page_size()
    ));
    out.join("\n")
}

/// Renders a card list, favorites marked with `*`.
pub fn cards(view: &CardListView<'_, AttendanceRecord>) -> String {
    let mut out = Vec::new();
    if let Some(title) = view.title {
        out.push(title.to_string());
    }
    if let Some(description) = view.description {
        out.push(description.to_string());
    }
    if let Some(message) = view.empty_message {
        out.push(message.to_string());
        return out.join("\n");
    }

    for card in &view.cards {
        let r = card.item;
        let mark = if card.favorite { "*" } else { " " };
        out.push(format!(
            "{} [{}] {}  {}  {}  {}",
            mark, card.id, r.name, r.department, r.status, r.work_mode
        ));
        if card.expanded {
            out.push(format!("      {}  {}", r.email, r.role));
            if let (Some(login), Some(logout)) = (&r.login_time, &r.logout_time) {
                out.push(format!("      {} - {}", login, logout));
            }
            if let Some(notes) = &r.notes {
                out.push(format!("      {}", notes));
            }
        }
    }
    out.join("\n")
}

/// Prints to stdout. Downloads are left to [`rowscope::DirectoryHost`].
pub struct TerminalHost<W> {
    out: W,
}

impl TerminalHost<io::Stdout> {
    pub fn stdout() -> Self {
        TerminalHost { out: io::stdout() }
    }
}

impl<W: Write> rowscope::Host for TerminalHost<W> {
    fn download(&mut self, _export: &CsvExport) -> Result<(), HostError> {
        Err(HostError::Unsupported("download"))
    }

    fn print(&mut self, view: &PrintView) -> Result<(), HostError> {
        writeln!(self.out, "{}", view.to_text())?;
        Ok(())
    }
}
