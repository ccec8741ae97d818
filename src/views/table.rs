use std::io::{self, Write};
use std::rc::Rc;

use super::{View, ViewRegistry, pad};
use crate::error::Result;
use crate::models::{Named, Record};

/// Column widths: index, name, address, phone
const COLUMNS: [usize; 4] = [5, 15, 50, 15];

/// Fixed-width table with a header and `-` rules
pub struct TableView;

impl TableView {
    /// Create a table view and register it with `registry`
    pub fn attach(registry: &mut ViewRegistry) -> Result<Rc<dyn View>> {
        let view: Rc<dyn View> = Rc::new(TableView);
        registry.register(view.clone())?;
        Ok(view)
    }
}

impl Named for TableView {
    fn name(&self) -> &str {
        "table"
    }
}

impl View for TableView {
    fn render(&self, records: &[Record], out: &mut dyn Write) -> io::Result<()> {
        // "| " + cells joined by " | " + " |"
        let rule = "-".repeat(COLUMNS.iter().sum::<usize>() + 3 * COLUMNS.len() + 1);

        writeln!(out, "\n\nContact Details in Table View:")?;
        writeln!(out, "{}", rule)?;
        write_row(out, ["Index", "Name", "Address", "Phone"])?;
        writeln!(out, "{}", rule)?;
        for (index, record) in records.iter().enumerate() {
            let number = (index + 1).to_string();
            write_row(
                out,
                [&number, &record.name, &record.address, &record.phone],
            )?;
        }
        writeln!(out, "{}", rule)
    }
}

fn write_row(out: &mut dyn Write, cells: [&str; 4]) -> io::Result<()> {
    let cells: Vec<String> = cells
        .iter()
        .zip(COLUMNS)
        .map(|(cell, width)| pad(cell, width))
        .collect();
    writeln!(out, "| {} |", cells.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(records: &[Record]) -> String {
        let mut out = Vec::new();
        TableView.render(records, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_table_empty_has_only_header() {
        let text = render(&[]);
        let lines: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Contact Details in Table View:");
        assert_eq!(lines[1], "-".repeat(98));
        assert!(lines[2].starts_with("| Index | Name "));
        assert_eq!(lines[3], lines[4]);
    }

    #[test]
    fn test_table_rows_are_one_based_and_aligned() {
        let text = render(&[
            Record::new("Ann", "1 Main St", "555-0100"),
            Record::new("Bo", "2 Side Rd", "555-0101"),
        ]);
        let rows: Vec<&str> = text.lines().filter(|l| l.starts_with("| ")).collect();

        assert_eq!(rows.len(), 3);
        assert!(rows[1].starts_with("| 1     | Ann             | 1 Main St "));
        assert!(rows[2].starts_with("| 2     | Bo "));
        assert!(rows.iter().all(|r| r.len() == 98 && r.ends_with(" |")));
    }
}
