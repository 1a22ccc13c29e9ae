use thiserror::Error;

macro_rules! generation_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Generation {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Generation {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all possible error conditions that can occur while describing target
/// interfaces, building descriptors, generating implementation types and assembling instances.
/// Each variant provides specific context about the failure mode to enable appropriate error
/// handling.
///
/// # Error Categories
///
/// ## Descriptor-Build Errors
/// - [`Error::Validation`] - Target type fails structural requirements
/// - [`Error::InvalidAccessor`] - Accessor method has an invalid shape
///
/// ## Generation Errors
/// - [`Error::Parse`] - Malformed source expression, attributed to a property
/// - [`Error::Generation`] - Failure while emitting or loading an implementation type
///
/// ## Evaluation Errors
/// - [`Error::PropertyAccess`] - No matching accessor, or accessor invocation failed
/// - [`Error::Assembly`] - Copy/conversion failure while populating an instance
/// - [`Error::UnsupportedCollection`] - Unrecognized abstract collection target
///
/// ## Usage Errors
/// - [`Error::IllegalArgument`] - Absent or unusable argument to an entry point
/// - [`Error::LockError`] - Thread synchronization failure
#[derive(Error, Debug)]
pub enum Error {
    /// The target type fails its structural requirements.
    ///
    /// Raised at descriptor-build time when a target description is not a marked data
    /// object interface, or when one of its declared methods does not carry the value
    /// marker. Never retried automatically.
    #[error("{0}")]
    Validation(String),

    /// A method does not have the shape of a property accessor.
    ///
    /// One of four distinct conditions: no recognized accessor prefix, a prefix-only
    /// method name, a non-empty parameter list, or a void return type.
    #[error("{0}")]
    InvalidAccessor(String),

    /// A source expression could not be parsed.
    ///
    /// Surfaced at generation time and attributed to the offending property. The
    /// position is a byte offset into the expression text.
    #[error("Parse error in expression '{expression}' at offset {position}: {message}")]
    Parse {
        /// Description of what was malformed
        message: String,
        /// The expression text that failed to parse
        expression: String,
        /// Byte offset of the offending character
        position: usize,
    },

    /// A property could not be evaluated on a source object.
    ///
    /// Raised every time a generated initializer runs against a source that has no
    /// matching accessor, or whose accessor raises when invoked.
    #[error("{0}")]
    PropertyAccess(String),

    /// A runtime copy/conversion failure while populating an instance.
    ///
    /// Covers incompatible collection elements, required-but-null scalar sources and
    /// property-bag assignments targeting an unknown field. An instance is either fully
    /// populated or the assembling call fails entirely.
    #[error("{0}")]
    Assembly(String),

    /// The requested collection target kind is not supported.
    ///
    /// Only the unconstrained collection, list and set abstractions are recognized;
    /// other abstract container kinds are intentionally rejected.
    #[error("Unsupported collection type {0}")]
    UnsupportedCollection(String),

    /// Failure while emitting or finalizing a concrete implementation type.
    ///
    /// Non-recoverable. The error includes the source location where the failure was
    /// detected, plus enough context (property name, expression text, declaring type)
    /// to diagnose without a debugger. A failed type is not cached; a later call
    /// retries generation from scratch.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of the generation failure
    /// * `file` - Source file in which the error was detected
    /// * `line` - Source line in which the error was detected
    #[error("Generation failed - {file}:{line}: {message}")]
    Generation {
        /// The message to be printed for the Generation error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An absent or unusable argument was passed to an entry point.
    #[error("{0}")]
    IllegalArgument(String),

    /// Failed to lock target.
    ///
    /// This error occurs when thread synchronization fails, typically when trying
    /// to acquire a lock that is in an invalid state.
    #[error("Failed to lock target")]
    LockError,
}
