use std::{error::Error, fmt::Display};

/// This type gets used to be our catch all error.
/// We implement conversions for all Library errors to ease error management.
#[derive(Debug)]
pub enum SegError {
    /// A range was passed which is reversed or leaves the borders of a tree.
    /// Both ranges are inclusive on both ends.
    OutOfRange {
        /// The offending range as `(left, right)`.
        query: (i64, i64),
        /// The borders of the tree the range was checked against.
        borders: (i64, i64),
    },
    /// A tree was requested over an empty domain, i.e. `lo > hi`.
    InvalidBorders {
        /// Requested lower border.
        lo: i64,
        /// Requested upper border.
        hi: i64,
    },
    /// Allows a generic Error message.
    StringSegError(String),
    /// Anticipated errors, may be rethrown with an additional error message
    RethrowSegError(String, Box<dyn Error>),
    /// All other library Errors get converted to this error.
    OtherSegError(Box<dyn Error>),
}

/// This type is our goto Result, as it allows us to convert between many different errors.
pub type SegResult<O> = Result<O, SegError>;

impl Display for SegError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegError::OutOfRange { query, borders } => write!(
                f,
                "range [{}, {}] is not a valid subrange of [{}, {}]",
                query.0, query.1, borders.0, borders.1
            ),
            SegError::InvalidBorders { lo, hi } => {
                write!(f, "borders [{}, {}] describe an empty domain", lo, hi)
            }
            SegError::StringSegError(str) => str.fmt(f),
            SegError::RethrowSegError(str, err) => {
                str.fmt(f)?;
                " with: ".fmt(f)?;
                err.fmt(f)?;
                Ok(())
            }
            SegError::OtherSegError(err) => err.fmt(f),
        }
    }
}
impl Error for SegError {}

impl SegError {
    /// Allows to annotate a SegError with a message to better detect the origin of errors.
    /// # Usage
    /// ```
    /// # use common::{SegError, SegResult};
    /// # fn fallible_function() -> SegResult<()> {
    /// # Err(SegError::StringSegError("".into()))
    /// # }
    /// # fn container_function() -> SegResult<()> {
    /// fallible_function().map_err(SegError::rethrow_with("function failed"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn rethrow_with(str: &'static str) -> impl Fn(SegError) -> SegError {
        move |err| SegError::RethrowSegError(str.to_string(), Box::new(err))
    }

    /// Returns true if this is an [SegError::OutOfRange], also when it was rethrown.
    pub fn is_out_of_range(&self) -> bool {
        match self {
            SegError::OutOfRange { .. } => true,
            SegError::RethrowSegError(_, inner) => inner
                .downcast_ref::<SegError>()
                .map_or(false, SegError::is_out_of_range),
            _ => false,
        }
    }
}

macro_rules! implement_from {
    ($type:ty) => {
        impl From<$type> for SegError {
            fn from(other: $type) -> Self {
                SegError::OtherSegError(Box::from(other))
            }
        }
    };
}
implement_from!(std::io::Error);
implement_from!(serde_json::Error);
implement_from!(csv::Error);
implement_from!(std::num::ParseIntError);
implement_from!(serde_dhall::Error);
implement_from!(flexi_logger::FlexiLoggerError);

impl<'a> From<&'a str> for SegError {
    fn from(other: &'a str) -> Self {
        SegError::StringSegError(other.to_string())
    }
}
impl From<String> for SegError {
    fn from(other: String) -> Self {
        SegError::StringSegError(other)
    }
}
