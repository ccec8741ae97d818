use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use contacts::app::App;
use contacts::logging;
use contacts::models::Record;
use contacts::storage::{ConfigStorage, TomlConfigStorage, ensure_directories};

#[derive(Parser)]
#[command(name = "contacts")]
#[command(about = "Contact book with pluggable file formats and views", long_about = None)]
struct Cli {
    /// Configuration file (default: $XDG_CONFIG_HOME/contacts/contacts.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Contact book file, overriding the configured location
    #[arg(long, global = true)]
    book: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a contact to the book
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        address: String,
        #[arg(short, long)]
        phone: String,
    },

    /// Display the contact book
    Show {
        /// View to display with (default: configured default_view)
        #[arg(short, long, conflicts_with = "all")]
        view: Option<String>,

        /// Display with every registered view
        #[arg(long)]
        all: bool,
    },

    /// Write the contact book to a file in the given format
    Export {
        /// Format name (default: configured default_format)
        #[arg(short, long)]
        format: Option<String>,
        path: PathBuf,
    },

    /// Read contacts from a file in the given format into the book
    Import {
        /// Format name (default: configured default_format)
        #[arg(short, long)]
        format: Option<String>,
        /// Replace the book instead of appending
        #[arg(long)]
        replace: bool,
        path: PathBuf,
    },

    /// List registered formats
    Formats,

    /// List registered views
    Views,

    /// Check that every format has a reader/writer bound
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (data_dir, config_dir) = ensure_directories()?;
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("contacts.toml"));
    let mut config = TomlConfigStorage::new(config_path).load()?;

    if config.logging.file {
        logging::init_logger(
            data_dir.join("contacts.log"),
            &config.logging.file_level,
            &config.logging.console_level,
        )?;
    } else {
        env_logger::init();
    }

    if let Some(book) = cli.book {
        config.general.book_file = Some(book);
    }

    let default_format = config.general.default_format.clone();
    let default_view = config.general.default_view.clone();
    let mut app = App::new(config, &data_dir)?;

    match cli.command {
        Some(Commands::Add {
            name,
            address,
            phone,
        }) => cmd_add(&app, Record::new(name, address, phone)),
        Some(Commands::Show { view, all }) => {
            let view = if all {
                None
            } else {
                Some(view.unwrap_or(default_view))
            };
            app.show(view.as_deref())
        }
        Some(Commands::Export { format, path }) => {
            cmd_export(&app, &format.unwrap_or(default_format), path)
        }
        Some(Commands::Import {
            format,
            replace,
            path,
        }) => cmd_import(&app, &format.unwrap_or(default_format), path, replace),
        Some(Commands::Formats) => {
            for name in app.format_names() {
                println!("{}", name);
            }
            Ok(())
        }
        Some(Commands::Views) => {
            for name in app.view_names() {
                println!("{}", name);
            }
            Ok(())
        }
        Some(Commands::Check) => {
            app.check()?;
            println!("All formats have a reader/writer bound.");
            Ok(())
        }
        None => app.show(Some(default_view.as_str())),
    }
}

/// Add a contact and report the new size of the book
fn cmd_add(app: &App, record: Record) -> Result<()> {
    let name = record.name.clone();
    let count = app.add(record)?;
    println!(
        "Added \"{}\" ({} contacts in {:?})",
        name,
        count,
        app.book_path()
    );
    Ok(())
}

fn cmd_export(app: &App, format: &str, path: PathBuf) -> Result<()> {
    let count = app
        .export(format, &path)
        .with_context(|| format!("Export as {} failed", format))?;
    println!("Exported {} contacts to {:?}", count, path);
    Ok(())
}

fn cmd_import(app: &App, format: &str, path: PathBuf, replace: bool) -> Result<()> {
    let count = app
        .import(format, &path, replace)
        .with_context(|| format!("Import as {} failed", format))?;
    let verb = if replace { "Replaced book with" } else { "Imported" };
    println!("{} {} contacts from {:?}", verb, count, path);
    Ok(())
}
