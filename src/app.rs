use anyhow::{Context, Result, bail};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::ContactsError;
use crate::formats::{Action, Format, FormatHandler, FormatRegistry, SharedHandler};
use crate::models::{Named, Record};
use crate::storage::Config;
use crate::views::{ListView, TableView, ViewRegistry};

/// Application state: the registered formats and views and the contact book file
pub struct App {
    /// Application configuration
    pub config: Config,

    /// Built-in formats, each with one reader/writer bound at startup
    formats: FormatRegistry,

    /// Built-in views
    views: ViewRegistry,

    /// Format the contact book is stored in
    book_format: Rc<Format>,

    /// Contact book location
    book_path: PathBuf,
}

impl App {
    /// Register the built-in formats and views and resolve the contact book path
    pub fn new(config: Config, data_dir: &Path) -> Result<Self> {
        let mut formats = FormatRegistry::new();
        for format in [Format::json(&mut formats)?, Format::binary(&mut formats)?] {
            FormatHandler::bind_empty(&format)?;
        }

        let mut views = ViewRegistry::default();
        TableView::attach(&mut views)?;
        ListView::attach(&mut views)?;

        let book_format = formats
            .get(&config.general.default_format)
            .context("Invalid default_format in configuration")?;

        let book_path = config
            .general
            .book_file
            .clone()
            .unwrap_or_else(|| data_dir.join(format!("contacts.{}", book_format.extension())));

        log::debug!(
            "Contact book: {:?} ({} format)",
            book_path,
            config.general.default_format
        );

        Ok(App {
            config,
            formats,
            views,
            book_format,
            book_path,
        })
    }

    pub fn book_path(&self) -> &Path {
        &self.book_path
    }

    /// Registered format names
    pub fn format_names(&self) -> Vec<String> {
        self.formats.names()
    }

    /// Registered view names
    pub fn view_names(&self) -> Vec<String> {
        self.views.names()
    }

    /// Read the contact book; a book that doesn't exist yet is empty
    pub fn load(&self) -> Result<Vec<Record>> {
        if !self.book_path.exists() {
            log::info!("No contact book at {:?} yet", self.book_path);
            return Ok(Vec::new());
        }

        let records = run_action(
            &self.book_format,
            Action::Deserialize,
            Vec::new(),
            &self.book_path,
        )
        .with_context(|| format!("Failed to read contact book {:?}", self.book_path))?;

        Ok(records)
    }

    /// Write `records` as the new contact book
    pub fn save(&self, records: Vec<Record>) -> Result<()> {
        run_action(
            &self.book_format,
            Action::Serialize,
            records,
            &self.book_path,
        )
        .with_context(|| format!("Failed to write contact book {:?}", self.book_path))?;

        Ok(())
    }

    /// Append a contact to the book; returns the new contact count
    pub fn add(&self, record: Record) -> Result<usize> {
        let mut records = self.load()?;
        log::info!("Adding contact \"{}\"", record.name);
        records.push(record);
        let count = records.len();
        self.save(records)?;
        Ok(count)
    }

    /// Render the contact book to stdout via one view, or all views when `view` is `None`
    pub fn show(&mut self, view: Option<&str>) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.show_to(view, &mut out)?;
        out.flush().context("Failed to write to stdout")?;
        Ok(())
    }

    /// Render the contact book into `out`
    pub fn show_to(&mut self, view: Option<&str>, out: &mut dyn Write) -> Result<()> {
        let records = self.load()?;
        self.views.set_records(records);
        self.views.broadcast(view, out)?;
        Ok(())
    }

    /// Write the contact book to `path` in the named format
    pub fn export(&self, format: &str, path: &Path) -> Result<usize> {
        let records = self.load()?;
        let count = records.len();
        let format = self.formats.get(format)?;

        run_action(&format, Action::Serialize, records, path)
            .with_context(|| format!("Failed to export contacts to {:?}", path))?;

        Ok(count)
    }

    /// Read contacts from `path` in the named format into the book
    /// Returns the number of contacts read
    pub fn import(&self, format: &str, path: &Path, replace: bool) -> Result<usize> {
        let format = self.formats.get(format)?;
        let imported = run_action(&format, Action::Deserialize, Vec::new(), path)
            .with_context(|| format!("Failed to import contacts from {:?}", path))?;
        if imported.is_empty() {
            bail!("No contacts to import in {:?}", path);
        }
        let count = imported.len();

        let records = if replace {
            imported
        } else {
            let mut records = self.load()?;
            records.extend(imported);
            records
        };

        self.save(records)?;
        Ok(count)
    }

    /// Ask every format to acknowledge its bound reader/writer
    pub fn check(&self) -> Result<()> {
        self.formats.broadcast_to_all()?;
        Ok(())
    }
}

/// Load `records` and `path` into the format's bound handler, run `action`,
/// and hand back whatever is left in the handler's buffer
fn run_action(
    format: &Rc<Format>,
    action: Action,
    records: Vec<Record>,
    path: &Path,
) -> crate::error::Result<Vec<Record>> {
    let handler = bound_handler(format)?;
    {
        let mut handler = handler.try_borrow_mut().map_err(|_| {
            ContactsError::HandlerBusy(format!("{} reader/writer", format_name(format)))
        })?;
        handler.set_path(path);
        handler.set_records(records);
    }

    let result = format.dispatch(action);
    // Don't keep contacts around in the handler between operations
    let records = handler.borrow_mut().take_records();
    result.map(|_| records)
}

fn bound_handler(format: &Rc<Format>) -> crate::error::Result<SharedHandler> {
    format
        .handler()
        .ok_or_else(|| ContactsError::NoHandler(format_name(format)))
}

fn format_name(format: &Format) -> String {
    format.name().to_string()
}
