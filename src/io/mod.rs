pub mod csv_export;
pub mod error;
pub mod export;
pub mod file;
pub mod store;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use store::{MemoryStore, StoreData, TimelineStore};
