use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::codec::{BincodeCodec, JsonCodec, RecordCodec};
use super::handler::{Action, SharedHandler};
use super::registry::FormatRegistry;
use crate::error::{ContactsError, Result};
use crate::models::Named;

/// A named serialization format with at most one bound reader/writer
///
/// A format registers itself with a [`FormatRegistry`] on construction and
/// forwards actions to whichever handler is currently bound. Binding a new
/// handler replaces the old one.
pub struct Format {
    codec: Rc<dyn RecordCodec>,
    handler: RefCell<Option<SharedHandler>>,
}

impl Format {
    /// Create a format for `codec` and register it with `registry`
    pub fn new(codec: Rc<dyn RecordCodec>, registry: &mut FormatRegistry) -> Result<Rc<Self>> {
        let format = Rc::new(Format {
            codec,
            handler: RefCell::new(None),
        });
        registry.register(format.clone())?;
        Ok(format)
    }

    /// JSON array-of-objects format
    pub fn json(registry: &mut FormatRegistry) -> Result<Rc<Self>> {
        Self::new(Rc::new(JsonCodec), registry)
    }

    /// Compact binary format
    pub fn binary(registry: &mut FormatRegistry) -> Result<Rc<Self>> {
        Self::new(Rc::new(BincodeCodec), registry)
    }

    pub fn codec(&self) -> Rc<dyn RecordCodec> {
        self.codec.clone()
    }

    /// Suggested file extension for this format
    pub fn extension(&self) -> &'static str {
        self.codec.extension()
    }

    /// The currently bound handler, if any
    pub fn handler(&self) -> Option<SharedHandler> {
        self.handler.borrow().clone()
    }

    pub fn has_handler(&self) -> bool {
        self.handler.borrow().is_some()
    }

    /// Bind `handler` as the reader/writer for this format
    /// Any other bound handler is replaced
    pub fn bind_handler(&self, handler: &SharedHandler) -> Result<()> {
        let new_name = handler_name(handler);
        let mut slot = self.handler.borrow_mut();

        if let Some(current) = slot.as_ref() {
            if Rc::ptr_eq(current, handler) {
                return Err(ContactsError::AlreadyBound {
                    handler: new_name,
                    format: self.name().to_string(),
                });
            }
            log::warn!(
                "Replacing \"{}\" with \"{}\" for \"{}\" format",
                handler_name(current),
                new_name,
                self.name()
            );
        }

        log::info!("Binding \"{}\" to \"{}\" format", new_name, self.name());
        *slot = Some(handler.clone());
        Ok(())
    }

    /// Clear the binding if `handler` is the one currently bound
    pub fn unbind_handler(&self, handler: &SharedHandler) -> Result<()> {
        let mut slot = self.handler.borrow_mut();

        match slot.as_ref() {
            Some(current) if Rc::ptr_eq(current, handler) => {
                *slot = None;
                log::info!(
                    "Unbound \"{}\", no reader/writer bound to \"{}\" format",
                    handler_name(handler),
                    self.name()
                );
                Ok(())
            }
            _ => Err(ContactsError::NotBound {
                handler: handler_name(handler),
                format: self.name().to_string(),
            }),
        }
    }

    /// Forward `action` to the bound handler
    pub fn dispatch(&self, action: impl Into<Option<Action>>) -> Result<()> {
        // Clone the handle out so the slot is free while the handler runs
        let shared = self
            .handler()
            .ok_or_else(|| ContactsError::NoHandler(self.name().to_string()))?;

        let mut handler = shared
            .try_borrow_mut()
            .map_err(|_| ContactsError::HandlerBusy(format!("{} reader/writer", self.name())))?;

        handler.notify(self, action.into())
    }

    /// Acknowledge a broadcast from the registry
    pub fn receive_notification(&self, registry: &FormatRegistry) -> Result<()> {
        let handler = self
            .handler()
            .ok_or_else(|| ContactsError::NoHandler(self.name().to_string()))?;

        log::info!(
            "\"{}\" is bound to \"{}\" format (notified by \"{}\")",
            handler_name(&handler),
            self.name(),
            registry.label()
        );
        Ok(())
    }
}

impl Named for Format {
    fn name(&self) -> &str {
        self.codec.name()
    }
}

impl fmt::Debug for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Format")
            .field("name", &self.codec.name())
            .field("bound", &self.has_handler())
            .finish()
    }
}

fn handler_name(handler: &SharedHandler) -> String {
    handler
        .try_borrow()
        .map(|h| h.name())
        .unwrap_or_else(|_| "busy reader/writer".to_string())
}
