use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("no playable clips found")]
    EmptyResult,

    #[error("invalid upstream url: {0}")]
    InvalidUrl(String),

    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl Error {
    pub(crate) fn upstream(err: impl std::fmt::Display) -> Self {
        Self::Upstream(err.to_string())
    }
}
