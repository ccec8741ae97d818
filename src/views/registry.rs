use std::io::Write;
use std::rc::Rc;

use super::View;
use crate::error::{ContactsError, Result};
use crate::models::{Record, Registry};

/// Registry of display views plus the contact list they render
pub struct ViewRegistry {
    views: Registry<dyn View>,
    records: Vec<Record>,
}

impl ViewRegistry {
    /// Create a registry that will render `records`
    pub fn new(records: Vec<Record>) -> Self {
        ViewRegistry {
            views: Registry::new("Views"),
            records,
        }
    }

    pub fn label(&self) -> &'static str {
        self.views.label()
    }

    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    /// Add a view; fails if it (or its name) is already registered
    pub fn register(&mut self, view: Rc<dyn View>) -> Result<()> {
        self.views.register(view)
    }

    /// Remove a view; fails if it is not registered
    pub fn unregister(&mut self, view: &Rc<dyn View>) -> Result<()> {
        self.views.unregister(view)
    }

    pub fn contains(&self, view: &Rc<dyn View>) -> bool {
        self.views.contains(view)
    }

    pub fn get(&self, name: &str) -> Option<Rc<dyn View>> {
        self.views.get(name).cloned()
    }

    /// View names in registration order
    pub fn names(&self) -> Vec<String> {
        self.views.names()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Render into `out` via the named view, or every view when `name` is `None`
    pub fn broadcast(&self, name: Option<&str>, out: &mut dyn Write) -> Result<()> {
        if self.views.is_empty() {
            return Err(ContactsError::EmptyRegistry(self.label()));
        }

        match name {
            Some(name) => {
                let view = self
                    .get(name)
                    .ok_or_else(|| ContactsError::UnknownView(name.to_string()))?;
                view.notify(self, &self.records, out)
            }
            None => {
                log::debug!("Notifying {} views", self.views.len());
                for view in self.views.snapshot() {
                    view.notify(self, &self.records, out)?;
                }
                Ok(())
            }
        }
    }
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
