use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("no AI api key is configured")]
    NotConfigured,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("the model returned an empty response")]
    EmptyResponse,
    #[error("the model response was not a subject/body JSON object")]
    MalformedResponse,
}
