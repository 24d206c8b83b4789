//! Storage Adapters

mod local_blob_storage;

pub use local_blob_storage::{LocalBlobStorage, FILES_ROUTE};
