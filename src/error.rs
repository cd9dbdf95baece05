use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FractionError {
    #[error("cannot parse {input:?} as a fraction")]
    Parse { input: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("value does not fit in a 64-bit fraction")]
    Overflow,
}

impl FractionError {
    pub(crate) fn parse<S: Into<String>>(input: S) -> Self {
        FractionError::Parse {
            input: input.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FractionError>;
