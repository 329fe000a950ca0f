use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("file not specified")]
    NoInput,

    #[error("{} file not found", .path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create file {}", .path.display())]
    CannotCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Generate(#[from] startup_gen::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NoInput => 1,
            CliError::InputNotFound { .. } | CliError::CannotCreate { .. } => 2,
            CliError::Generate(startup_gen::Error::Write(..)) => 5,
            CliError::Generate(e) if e.is_format_error() => 3,
            CliError::Generate(..) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        let io = || io::Error::new(io::ErrorKind::NotFound, "gone");
        assert_eq!(CliError::NoInput.exit_code(), 1);
        assert_eq!(CliError::InputNotFound { path: "a.h".into(), source: io() }.exit_code(), 2);
        assert_eq!(CliError::CannotCreate { path: "startup_a.c".into(), source: io() }.exit_code(), 2);
        let invalid = startup_gen::Error::InvalidIdentifier {
            name: "Bad-Name".to_string(),
            format: "C",
        };
        assert_eq!(CliError::from(invalid).exit_code(), 3);
        assert_eq!(CliError::from(startup_gen::Error::VectorCountOutOfRange(497)).exit_code(), 4);
    }

    #[test]
    fn rendering_failure_is_not_an_option_error() {
        let err = CliError::from(startup_gen::Error::Write(std::fmt::Error));
        assert_eq!(err.exit_code(), 5);
    }
}
