use thiserror::Error;

pub type RxResult<T> = Result<T, RxError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RxError {
    #[error("Invalid address {input:?}: {reason}")]
    InvalidAddress { input: String, reason: &'static str },
}
