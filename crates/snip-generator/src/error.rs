use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("invalid code length {0}; expected 1 to 64")]
    InvalidLength(usize),
}
