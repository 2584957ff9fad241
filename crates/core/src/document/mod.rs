pub mod id;
pub mod merge;
pub mod model;
pub mod validate;

pub use id::{Collection, DocumentPath, DEFAULT_DOCUMENT_ID};
pub use merge::merge_fields;
pub use model::{DocumentRow, Fields, StoredDocument};
