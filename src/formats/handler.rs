use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};
use std::str::FromStr;

use super::codec::RecordCodec;
use super::format::Format;
use crate::error::{ContactsError, Result};
use crate::models::{Named, Record};

/// Shared handle to a handler, held by its format and by the caller
pub type SharedHandler = Rc<RefCell<FormatHandler>>;

/// Operations a handler can be asked to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Write the record buffer to the file path
    Serialize,
    /// Replace the record buffer with the contents of the file path
    Deserialize,
}

impl Action {
    pub const ALL: &'static [&'static str] = &["serialize", "deserialize"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Serialize => "serialize",
            Action::Deserialize => "deserialize",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ContactsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Err(ContactsError::MissingAction(Action::ALL)),
            "serialize" | "serialise" => Ok(Action::Serialize),
            "deserialize" | "deserialise" => Ok(Action::Deserialize),
            _ => Err(ContactsError::UnsupportedAction(s.to_string())),
        }
    }
}

/// Reader/writer for one format, bound to a record buffer and a file path
pub struct FormatHandler {
    /// Format this handler was created for (for un/registration)
    format: Weak<Format>,
    codec: Rc<dyn RecordCodec>,
    records: Vec<Record>,
    path: PathBuf,
}

impl FormatHandler {
    /// Create a handler and bind it to `format`, replacing any current handler
    pub fn bind(
        format: &Rc<Format>,
        records: Vec<Record>,
        path: impl Into<PathBuf>,
    ) -> Result<SharedHandler> {
        let handler = Rc::new(RefCell::new(FormatHandler {
            format: Rc::downgrade(format),
            codec: format.codec(),
            records,
            path: path.into(),
        }));
        format.bind_handler(&handler)?;
        Ok(handler)
    }

    /// Create a handler with an empty buffer and no path
    pub fn bind_empty(format: &Rc<Format>) -> Result<SharedHandler> {
        Self::bind(format, Vec::new(), PathBuf::new())
    }

    /// Display name, e.g. "json reader/writer"
    pub fn name(&self) -> String {
        format!("{} reader/writer", self.codec.name())
    }

    /// The format this handler was created for, if it still exists
    pub fn format(&self) -> Option<Rc<Format>> {
        self.format.upgrade()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    /// Take the record buffer, leaving it empty
    pub fn take_records(&mut self) -> Vec<Record> {
        std::mem::take(&mut self.records)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    /// Notification entry point used by the bound format
    /// Only the format this handler was created for may notify it
    pub fn notify(&mut self, format: &Format, action: Option<Action>) -> Result<()> {
        let own = self.format();
        if !own.is_some_and(|own| std::ptr::eq(Rc::as_ptr(&own), format)) {
            return Err(ContactsError::NotBound {
                handler: self.name(),
                format: format.name().to_string(),
            });
        }

        let action = action.ok_or(ContactsError::MissingAction(Action::ALL))?;
        log::debug!(
            "\"{}\" received {} from \"{}\" format",
            self.name(),
            action,
            format.name()
        );

        match action {
            Action::Serialize => self.serialize(),
            Action::Deserialize => self.deserialize(),
        }
    }

    /// Write the record buffer to the file path, overwriting it
    pub fn serialize(&self) -> Result<()> {
        if self.records.is_empty() {
            return Err(ContactsError::EmptyData(self.name()));
        }
        if self.path.as_os_str().is_empty() {
            return Err(ContactsError::MissingPath(self.name()));
        }

        let bytes = self.codec.encode(&self.records)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| ContactsError::io(parent, e))?;
        }

        fs::write(&self.path, &bytes).map_err(|e| ContactsError::io(&self.path, e))?;

        log::info!(
            "Serialized {} contacts as {} into {:?}",
            self.records.len(),
            self.codec.name(),
            self.path
        );
        Ok(())
    }

    /// Replace the record buffer with the records stored at the file path
    pub fn deserialize(&mut self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(ContactsError::MissingPath(self.name()));
        }
        if !self.path.exists() {
            return Err(ContactsError::PathNotFound(self.path.clone()));
        }

        let bytes = fs::read(&self.path).map_err(|e| ContactsError::io(&self.path, e))?;
        self.records = self.codec.decode(&bytes)?;

        log::info!(
            "Deserialized {} contacts as {} from {:?}",
            self.records.len(),
            self.codec.name(),
            self.path
        );
        Ok(())
    }
}

impl fmt::Debug for FormatHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatHandler")
            .field("codec", &self.codec.name())
            .field("records", &self.records.len())
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::FormatRegistry;

    fn sample() -> Vec<Record> {
        vec![Record::new("A", "B", "C")]
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!("serialize".parse::<Action>().unwrap(), Action::Serialize);
        assert_eq!("deserialise".parse::<Action>().unwrap(), Action::Deserialize);
        assert!(matches!(
            "".parse::<Action>(),
            Err(ContactsError::MissingAction(_))
        ));
        assert!(matches!(
            "compress".parse::<Action>(),
            Err(ContactsError::UnsupportedAction(name)) if name == "compress"
        ));
    }

    #[test]
    fn test_action_parsing_is_exact() {
        for text in [" serialize", "Serialize", "DESERIALISE", "serialize\n"] {
            assert!(matches!(
                text.parse::<Action>(),
                Err(ContactsError::UnsupportedAction(name)) if name == text
            ));
        }
        assert!(matches!(
            "Compress".parse::<Action>(),
            Err(ContactsError::UnsupportedAction(name)) if name == "Compress"
        ));
    }

    #[test]
    fn test_notify_from_foreign_format() {
        let mut registry = FormatRegistry::new();
        let json = Format::json(&mut registry).unwrap();
        let binary = Format::binary(&mut registry).unwrap();
        let handler = FormatHandler::bind(&json, sample(), "contacts.json").unwrap();

        let err = handler
            .borrow_mut()
            .notify(&binary, Some(Action::Serialize))
            .unwrap_err();
        assert!(matches!(
            err,
            ContactsError::NotBound { format, .. } if format == "binary"
        ));
    }

    #[test]
    fn test_deserialize_ignores_extra_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        fs::write(
            &path,
            r#"[{"name":"A","address":"B","phone":"C","email":"x"}]"#,
        )
        .unwrap();

        let mut registry = FormatRegistry::new();
        let json = Format::json(&mut registry).unwrap();
        let handler = FormatHandler::bind(&json, Vec::new(), &path).unwrap();
        json.dispatch(Action::Deserialize).unwrap();

        assert_eq!(handler.borrow().records(), sample().as_slice());
    }

    #[test]
    fn test_notify_without_action() {
        let mut registry = FormatRegistry::new();
        let json = Format::json(&mut registry).unwrap();
        let handler = FormatHandler::bind_empty(&json).unwrap();

        let err = handler.borrow_mut().notify(&json, None).unwrap_err();
        assert!(matches!(err, ContactsError::MissingAction(_)));
    }

    #[test]
    fn test_serialize_empty_buffer_fails_even_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let mut registry = FormatRegistry::new();
        let json = Format::json(&mut registry).unwrap();
        let handler = FormatHandler::bind(&json, Vec::new(), &path).unwrap();

        let err = handler.borrow().serialize().unwrap_err();
        assert!(matches!(err, ContactsError::EmptyData(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_serialize_without_path() {
        let mut registry = FormatRegistry::new();
        let json = Format::json(&mut registry).unwrap();
        let handler = FormatHandler::bind(&json, sample(), "").unwrap();

        let err = handler.borrow().serialize().unwrap_err();
        assert!(matches!(err, ContactsError::MissingPath(_)));
    }

    #[test]
    fn test_deserialize_without_path() {
        let mut registry = FormatRegistry::new();
        let json = Format::json(&mut registry).unwrap();
        let handler = FormatHandler::bind_empty(&json).unwrap();

        let err = handler.borrow_mut().deserialize().unwrap_err();
        assert!(matches!(err, ContactsError::MissingPath(_)));
    }

    #[test]
    fn test_deserialize_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let mut registry = FormatRegistry::new();
        let json = Format::json(&mut registry).unwrap();
        let handler = FormatHandler::bind(&json, sample(), &path).unwrap();

        let err = handler.borrow_mut().deserialize().unwrap_err();
        assert!(matches!(err, ContactsError::PathNotFound(p) if p == path));
        // Buffer left untouched on failure
        assert_eq!(handler.borrow().records(), sample().as_slice());
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        let mut registry = FormatRegistry::new();
        let json = Format::json(&mut registry).unwrap();
        let handler = FormatHandler::bind(&json, sample(), &path).unwrap();

        handler.borrow().serialize().unwrap();
        handler.borrow_mut().set_records(Vec::new());
        handler.borrow_mut().deserialize().unwrap();

        assert_eq!(handler.borrow().records(), sample().as_slice());
    }

    #[test]
    fn test_serialize_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        fs::write(&path, "stale contents that are much longer than the new ones").unwrap();

        let mut registry = FormatRegistry::new();
        let json = Format::json(&mut registry).unwrap();
        let handler = FormatHandler::bind(&json, sample(), &path).unwrap();
        handler.borrow().serialize().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(!text.contains("stale"));
        let stored: Vec<Record> = serde_json::from_str(&text).unwrap();
        assert_eq!(stored, sample());
    }

    #[test]
    fn test_binary_round_trip_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("contacts.bin");
        let mut registry = FormatRegistry::new();
        let binary = Format::binary(&mut registry).unwrap();
        let records = vec![
            Record::new("Zoë", "Straße 1", "+49 30 1234"),
            Record::new("A", "B", "C"),
        ];
        let handler = FormatHandler::bind(&binary, records.clone(), &path).unwrap();

        handler.borrow().serialize().unwrap();
        let reader = FormatHandler::bind(&binary, Vec::new(), &path).unwrap();
        reader.borrow_mut().deserialize().unwrap();

        assert_eq!(reader.borrow().records(), records.as_slice());
    }

    #[test]
    fn test_handler_name_and_format() {
        let mut registry = FormatRegistry::new();
        let binary = Format::binary(&mut registry).unwrap();
        let handler = FormatHandler::bind_empty(&binary).unwrap();

        assert_eq!(handler.borrow().name(), "binary reader/writer");
        assert!(Rc::ptr_eq(&handler.borrow().format().unwrap(), &binary));
    }
}
