//! `roster`: browse an attendance sheet from the terminal.
//!
//! Loads attendance records (a JSON array, or a built-in sample sheet) and
//! runs them through a rowscope table or card list: search, filter rules,
//! sorting, paging, column hiding, CSV export and a print view.

mod attendance;
mod render;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rowscope::{DataTable, DirectoryHost, EntityCardList, FilterOp, TableOptions, Viewport};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use crate::attendance::AttendanceRecord;

/// Browse, filter and export an attendance sheet
#[derive(Parser, Debug)]
#[command(name = "roster", version, about)]
struct Cli {
    /// JSON file holding an array of attendance records (sample data if omitted)
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Table options as YAML or JSON
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Global search text
    #[arg(short, long)]
    search: Option<String>,

    /// Filter rule as column:operator:value; an empty column uses the first filterable one
    #[arg(short, long = "filter", value_name = "RULE")]
    filters: Vec<String>,

    /// Column to sort by
    #[arg(long, value_name = "COLUMN")]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Page to show (1-based, clamped)
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Rows per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Hide a column (repeatable)
    #[arg(long = "hide", value_name = "COLUMN")]
    hidden: Vec<String>,

    /// Viewport width class for responsive columns
    #[arg(long, value_enum, default_value_t = ViewportArg::Wide)]
    viewport: ViewportArg,

    /// Write the filtered rows as CSV into this directory
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,

    /// Print the filtered rows instead of the paged table
    #[arg(long)]
    print: bool,

    /// Show a card list instead of a table
    #[arg(long)]
    cards: bool,

    /// Mark a record id as favorite in the card list (repeatable)
    #[arg(long = "favorite", value_name = "ID")]
    favorites: Vec<String>,

    /// Expand a card by record id
    #[arg(long, value_name = "ID")]
    expand: Option<String>,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ViewportArg {
    Narrow,
    Medium,
    Wide,
}

impl From<ViewportArg> for Viewport {
    fn from(v: ViewportArg) -> Self {
        match v {
            ViewportArg::Narrow => Viewport::Narrow,
            ViewportArg::Medium => Viewport::Medium,
            ViewportArg::Wide => Viewport::Wide,
        }
    }
}

/// A parsed `--filter` argument.
#[derive(Debug, PartialEq, Eq)]
struct FilterArg {
    column: Option<String>,
    op: FilterOp,
    value: String,
}

fn parse_filter(rule: &str) -> Result<FilterArg> {
    let mut parts = rule.splitn(3, ':');
    let (Some(column), Some(op), Some(value)) = (parts.next(), parts.next(), parts.next()) else {
        bail!("filter '{}' should look like column:operator:value", rule);
    };
    let op: FilterOp = op.parse().with_context(|| format!("in filter '{}'", rule))?;
    let column = column.trim();
    Ok(FilterArg {
        column: (!column.is_empty()).then(|| column.to_string()),
        op,
        value: value.to_string(),
    })
}

fn load_options(path: &Path) -> Result<TableOptions> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let options = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => TableOptions::from_json(&text),
        _ => TableOptions::from_yaml(&text),
    }
    .with_context(|| format!("loading options from {}", path.display()))?;
    Ok(options)
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)
        .context("initializing logger")?;
    Ok(())
}

fn build_table(cli: &Cli, options: TableOptions) -> Result<DataTable<AttendanceRecord>> {
    let mut builder = DataTable::builder(attendance::columns())
        .options(options)
        .title("Attendance")
        .row_id(|r: &AttendanceRecord, _| r.id.clone());
    if let Some(query) = &cli.search {
        builder = builder.initial_search(query.clone());
    }
    let mut table = builder.build();
    table.set_viewport(cli.viewport.into());

    if let Some(column) = &cli.sort {
        if table.columns().get(column).is_none() {
            bail!("unknown sort column '{}'", column);
        }
        let direction = if cli.desc { rowscope::Dir::Desc } else { rowscope::Dir::Asc };
        table.sort_change(column, direction);
    }
    if let Some(size) = cli.page_size {
        table.set_page_size(size);
    }
    for rule in &cli.filters {
        let f = parse_filter(rule)?;
        if table.add_filter(f.column.as_deref(), f.op, f.value).is_none() {
            log::warn!("filter '{}' ignored: filters are disabled or no column is filterable", rule);
        }
    }
    for column in &cli.hidden {
        if !table.toggle_column(column) {
            log::warn!("column '{}' not hidden", column);
        }
    }
    Ok(table)
}

fn run_table(cli: &Cli, rows: &[AttendanceRecord], options: TableOptions) -> Result<()> {
    let mut table = build_table(cli, options)?;

    // The first render establishes the row count the page is clamped against.
    table.view(rows);
    table.go_to_page(cli.page);

    if let Some(dir) = &cli.export {
        let mut host = DirectoryHost::new(dir);
        if !table.download_csv(rows, &mut host) {
            bail!("export to {} failed", dir.display());
        }
    }
    if cli.print {
        let mut host = render::TerminalHost::stdout();
        if !table.print(rows, &mut host) {
            bail!("print failed");
        }
        return Ok(());
    }

    let view = table.view(rows);
    println!("{}", render::table(&view));
    Ok(())
}

fn run_cards(cli: &Cli, rows: &[AttendanceRecord]) {
    let favorites: HashSet<String> = cli.favorites.iter().cloned().collect();
    let mut list = EntityCardList::new(|r: &AttendanceRecord| r.id.clone())
        .search_text(attendance::card_search_text)
        .is_favorite(move |r: &AttendanceRecord| favorites.contains(&r.id))
        .expandable(true)
        .title("Team")
        .description("Today's attendance");
    if let Some(query) = &cli.search {
        list.set_search(query.clone());
    }
    if let Some(id) = &cli.expand {
        list.toggle_expanded(id);
    }
    println!("{}", render::cards(&list.view(rows)));
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let rows = match &cli.data {
        Some(path) => attendance::load(path)?,
        None => attendance::seeded(),
    };
    let options = match &cli.config {
        Some(path) => load_options(path)?,
        None => TableOptions::default(),
    };

    if cli.cards {
        run_cards(&cli, &rows);
        Ok(())
    } else {
        run_table(&cli, &rows, options)
    }
}
