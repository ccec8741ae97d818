use crate::error::{ContactsError, Result};
use crate::models::{Record, records_from_json};

/// Trait for turning a record list into bytes and back
pub trait RecordCodec {
    /// Format name, used as the registry key (e.g. "json")
    fn name(&self) -> &'static str;

    /// Default file extension for this format
    fn extension(&self) -> &'static str;

    /// Encode records to bytes
    fn encode(&self, records: &[Record]) -> Result<Vec<u8>>;

    /// Decode bytes to records, preserving order
    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>>;
}

/// UTF-8 JSON array of `{name, address, phone}` objects
pub struct JsonCodec;

impl RecordCodec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(records)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        records_from_json(value)
    }
}

/// Compact binary encoding via bincode
/// Only guaranteed to read back what this codec wrote
pub struct BincodeCodec;

impl RecordCodec for BincodeCodec {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn extension(&self) -> &'static str {
        "bin"
    }

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>> {
        Ok(bincode::encode_to_vec(records, bincode::config::standard())?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        let (records, bytes_read): (Vec<Record>, usize) =
            bincode::decode_from_slice(bytes, bincode::config::standard())?;

        if bytes_read != bytes.len() {
            return Err(ContactsError::InvalidData(format!(
                "{} trailing bytes after contact list",
                bytes.len() - bytes_read
            )));
        }

        Ok(records)
    }
}
