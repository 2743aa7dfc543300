use thiserror::Error;

pub type TmResult<T> = Result<T, TmError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TmError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}
