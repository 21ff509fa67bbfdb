mod client;
mod error;

pub use client::{AirtableStore, RecordStore, StoreSettings};
pub use error::StoreError;
