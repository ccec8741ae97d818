use std::io::{self, Write};
use std::rc::Rc;

use super::{View, ViewRegistry};
use crate::error::Result;
use crate::models::{Named, Record};

/// One labelled block per contact
pub struct ListView;

impl ListView {
    /// Create a list view and register it with `registry`
    pub fn attach(registry: &mut ViewRegistry) -> Result<Rc<dyn View>> {
        let view: Rc<dyn View> = Rc::new(ListView);
        registry.register(view.clone())?;
        Ok(view)
    }
}

impl Named for ListView {
    fn name(&self) -> &str {
        "list"
    }
}

impl View for ListView {
    fn render(&self, records: &[Record], out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "\n\nContact Details in List View:")?;
        writeln!(out, "{}", "-".repeat(28))?;
        for (index, record) in records.iter().enumerate() {
            writeln!(out, "Index: {}", index + 1)?;
            writeln!(out, "Name: {}", record.name)?;
            writeln!(out, "Address: {}", record.address)?;
            writeln!(out, "Phone: {}", record.phone)?;
            writeln!(out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(records: &[Record]) -> String {
        let mut out = Vec::new();
        ListView.render(records, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_list_empty_has_no_blocks() {
        let text = render(&[]);
        assert!(!text.contains("Index:"));
        assert!(text.contains("Contact Details in List View:"));
    }

    #[test]
    fn test_list_blocks() {
        let text = render(&[
            Record::new("Ann", "1 Main St", "555-0100"),
            Record::new("Bo", "2 Side Rd", "555-0101"),
        ]);

        assert!(text.contains(
            "Index: 1\nName: Ann\nAddress: 1 Main St\nPhone: 555-0100\n\nIndex: 2\nName: Bo\n"
        ));
        assert_eq!(text.matches("Index:").count(), 2);
    }
}
