//! Errors of the plotting pipeline and the process exit codes they map to.

use crate::mpl;

/// Exit code when a comma-separated option has the wrong number of values.
pub const EXIT_ARGUMENT_COUNT: i32 = -1;
/// Exit code when an option value is not a number.
pub const EXIT_ARGUMENT_TYPE: i32 = -2;
/// Exit code when the input cannot be read.
pub const EXIT_INPUT_FILE: i32 = -3;
/// Exit code when h5py is needed but missing.
pub const EXIT_OPTIONAL_DEPENDENCY: i32 = -4;
/// Exit code when the backend cannot write the requested format.
pub const EXIT_OUTPUT_TYPE: i32 = -5;
/// Exit code when Matplotlib or numpy is missing.
pub const EXIT_REQUIRED_DEPENDENCY: i32 = -6;
/// Exit code of any other failure.
pub const EXIT_OTHER: i32 = -7;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{option} expects {expected} comma-separated values, \
             got {count} in {value:?}")]
    ArgumentCount {
        option: &'static str,
        value: String,
        expected: String,
        count: usize,
    },

    #[error("invalid value {value:?} for {option}: {reason}")]
    ArgumentType {
        option: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("cannot read {path}: {reason}")]
    InputFile { path: String, reason: String },

    #[error("{0}")]
    OptionalDependency(mpl::Error),

    #[error("unsupported output format {format:?}; supported formats: {}",
            .supported.join(", "))]
    OutputType { format: String, supported: Vec<String> },

    #[error("{0}")]
    RequiredDependency(mpl::Error),

    #[error("cannot write the figure: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Plot(mpl::Error),
}

impl Error {
    /// The (negative) status the process exits with.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ArgumentCount { .. } => EXIT_ARGUMENT_COUNT,
            Error::ArgumentType { .. } => EXIT_ARGUMENT_TYPE,
            Error::InputFile { .. } => EXIT_INPUT_FILE,
            Error::OptionalDependency(_) => EXIT_OPTIONAL_DEPENDENCY,
            Error::OutputType { .. } => EXIT_OUTPUT_TYPE,
            Error::RequiredDependency(_) => EXIT_REQUIRED_DEPENDENCY,
            Error::Io(_) | Error::Plot(_) => EXIT_OTHER,
        }
    }
}

impl From<mpl::Error> for Error {
    fn from(e: mpl::Error) -> Self {
        match e {
            mpl::Error::NoMatplotlib => Error::RequiredDependency(e),
            mpl::Error::NoH5py => Error::OptionalDependency(e),
            mpl::Error::Python(_) => Error::Plot(e),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
