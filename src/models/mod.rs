pub mod record;
pub mod registry;

pub use record::{Record, records_from_json};
pub use registry::{Named, Registry};
