use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReposcopeError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Invalid repository identifier: {0}")]
    InvalidRepo(String),
}

pub type Result<T> = std::result::Result<T, ReposcopeError>;
