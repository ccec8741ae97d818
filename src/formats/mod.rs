pub mod codec;
pub mod format;
pub mod handler;
pub mod registry;

pub use codec::{BincodeCodec, JsonCodec, RecordCodec};
pub use format::Format;
pub use handler::{Action, FormatHandler, SharedHandler};
pub use registry::FormatRegistry;
