use thiserror::Error;

pub mod game;
pub mod nullable;
pub mod suggest;
pub mod util;

#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("parse failure: {0}")]
    ParseFailure(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("search error: {0}")]
    Search(String),
}

impl ServiceError {
    pub fn bad_request<T, R>(msg: T) -> ServiceResult<R>
    where
        T: Into<String>,
    {
        Err(ServiceError::BadRequest(msg.into()))
    }

    pub fn not_found<T, R>(msg: T) -> ServiceResult<R>
    where
        T: Into<String>,
    {
        Err(ServiceError::NotFound(msg.into()))
    }

    pub fn storage<T, R>(msg: T) -> ServiceResult<R>
    where
        T: Into<String>,
    {
        Err(ServiceError::Storage(msg.into()))
    }

    pub fn search<T, R>(msg: T) -> ServiceResult<R>
    where
        T: Into<String>,
    {
        Err(ServiceError::Search(msg.into()))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
