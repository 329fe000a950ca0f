use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("requested vector count {0} out of range (at most {max})", max = crate::slot::NVIC_VECTORS)]
    VectorCountOutOfRange(u16),

    #[error("`{name}` is not a valid identifier for {format} output")]
    InvalidIdentifier {
        name: String,
        format: &'static str,
    },

    #[error("interrupts `{first}` and `{second}` both map to enum variant `{variant}`")]
    DuplicateVariant {
        first: String,
        second: String,
        variant: String,
    },

    #[error("generated module does not parse: {0}")]
    Syntax(#[from] syn::Error),

    #[error("formatting output failed")]
    Write(#[from] std::fmt::Error),
}

impl Error {
    /// True for failures caused by names taken from the header rather than by options.
    pub fn is_format_error(&self) -> bool {
        match self {
            Error::VectorCountOutOfRange(..) | Error::Write(..) => false,
            _ => true,
        }
    }
}
