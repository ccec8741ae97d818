pub mod list;
pub mod registry;
pub mod table;

use std::io::{self, Write};

use crate::error::{ContactsError, Result};
use crate::models::{Named, Record};

pub use list::ListView;
pub use registry::ViewRegistry;
pub use table::TableView;

/// Trait for a display strategy over a contact list
pub trait View: Named {
    /// Write `records` to `out`
    fn render(&self, records: &[Record], out: &mut dyn Write) -> io::Result<()>;

    /// Notification entry point used by the view registry
    fn notify(
        &self,
        registry: &ViewRegistry,
        records: &[Record],
        out: &mut dyn Write,
    ) -> Result<()> {
        log::debug!(
            "\"{}\" view rendering {} contacts for \"{}\"",
            self.name(),
            records.len(),
            registry.label()
        );
        self.render(records, out).map_err(ContactsError::Render)
    }
}

/// Pad `text` to `width` terminal columns
fn pad(text: &str, width: usize) -> String {
    use unicode_width::UnicodeWidthStr;

    let used = text.width();
    if used >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - used))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_counts_display_width() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("abcdef", 4), "abcdef");
        // Wide characters take two columns each
        assert_eq!(pad("日本", 6), "日本  ");
    }
}
