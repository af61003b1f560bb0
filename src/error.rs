// MIT/Apache2 License

use std::fmt;

/// Sum error type for path subsystem operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// A buffer allocation failed mid-operation. The path is left in a
    /// well-defined partial state; the caller is expected to abort it.
    OutOfMemory,
    /// A precondition wasn't met: no path open/closed, a `BEZIER` entry
    /// where one isn't allowed, widening a cosmetic pen.
    CannotComplete,
    /// A caller-supplied buffer was too small for `get_path`.
    InvalidParameter,
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory => f.write_str("out of memory"),
            Self::CannotComplete => f.write_str("operation cannot be completed"),
            Self::InvalidParameter => f.write_str("invalid parameter"),
        }
    }
}

/// Convenience result type.
pub type Result<T = ()> = std::result::Result<T, Error>;
