use std::rc::Rc;

use super::format::Format;
use crate::error::{ContactsError, Result};
use crate::models::Registry;

/// Registry of the available serialization formats
pub struct FormatRegistry {
    formats: Registry<Format>,
}

impl FormatRegistry {
    /// Create a new empty format registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: Registry::new("Formats"),
        }
    }

    pub fn label(&self) -> &'static str {
        self.formats.label()
    }

    /// Add a format; fails if it is already registered
    pub fn register(&mut self, format: Rc<Format>) -> Result<()> {
        self.formats.register(format)
    }

    /// Remove a format; fails if it is not registered
    pub fn unregister(&mut self, format: &Rc<Format>) -> Result<()> {
        self.formats.unregister(format)
    }

    pub fn contains(&self, format: &Rc<Format>) -> bool {
        self.formats.contains(format)
    }

    /// Look up a format by name
    pub fn get(&self, name: &str) -> Result<Rc<Format>> {
        self.formats
            .get(name)
            .cloned()
            .ok_or_else(|| ContactsError::UnknownFormat(name.to_string()))
    }

    /// Format names in registration order
    pub fn names(&self) -> Vec<String> {
        self.formats.names()
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Notify every registered format, in registration order
    /// Stops at the first format that fails to acknowledge
    pub fn broadcast_to_all(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ContactsError::EmptyRegistry(self.label()));
        }

        log::debug!("Notifying {} formats", self.len());
        for format in self.formats.snapshot() {
            format.receive_notification(self)?;
        }
        Ok(())
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}
