use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store is not configured")]
    NotConfigured,
    #[error("failed to fetch pending records: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("failed to update record status: {0}")]
    Update(#[source] reqwest::Error),
}
