//! Errors and warnings reported while parsing an XPointer.
//!
//! Parsing fails fast: the first syntax problem aborts the whole
//! expression and no parts are produced. Unsupported schemes are not
//! errors; they surface as [`Warning`]s and the part is dropped.

use std::fmt;

use thiserror::Error;

/// Error codes for XPointer failures.
///
/// Each code has a human-readable [`message`](ErrorCode::message) and a
/// stable [`key`](ErrorCode::key) callers can use to look up their own
/// diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    /// Expression is empty or whitespace only
    EmptyXPointerExpression = 0,
    /// Tokens do not form a valid pointer
    InvalidXPointerExpression,
    /// A name could not be scanned where one was required
    InvalidXPointerToken,
    /// The expression does not start with a valid NCName
    InvalidShortHandPointer,
    /// A shorthand pointer was combined with other pointer parts
    MultipleShortHandPointers,
    /// `^` not followed by `(`, `)` or `^`
    InvalidSchemeData,
    /// Scheme data ran to the end of the expression
    SchemeDataNotFollowedByCloseParenthesis,
    /// Open and close parenthesis counts differ within a pointer part
    UnbalancedParenthesis,
    /// `element()` with nothing inside
    EmptyElementSchemeData,
    /// Unexpected token inside `element()` data
    InvalidElementSchemeToken,
    /// Leading name of `element()` data is not an NCName
    InvalidNCNameInElementSchemeData,
    /// Child sequence step is missing, zero, or out of range
    InvalidChildSequenceCharacter,
    /// The traversal finished without the pointer resolving
    ResolutionUnsuccessful,
}

impl ErrorCode {
    /// Get a human-readable message for this error code.
    pub fn message(self) -> &'static str {
        match self {
            Self::EmptyXPointerExpression => "empty xpointer expression",
            Self::InvalidXPointerExpression => "invalid xpointer expression",
            Self::InvalidXPointerToken => "invalid token in xpointer expression",
            Self::InvalidShortHandPointer => "invalid shorthand pointer",
            Self::MultipleShortHandPointers => "shorthand pointer must be the only pointer part",
            Self::InvalidSchemeData => "invalid escape in scheme data",
            Self::SchemeDataNotFollowedByCloseParenthesis => {
                "scheme data not followed by close parenthesis"
            }
            Self::UnbalancedParenthesis => "unbalanced parenthesis",
            Self::EmptyElementSchemeData => "empty element() scheme data",
            Self::InvalidElementSchemeToken => "invalid token in element() scheme data",
            Self::InvalidNCNameInElementSchemeData => "invalid NCName in element() scheme data",
            Self::InvalidChildSequenceCharacter => "invalid child sequence",
            Self::ResolutionUnsuccessful => "xpointer did not resolve",
        }
    }

    /// Stable identifier for this error code.
    pub fn key(self) -> &'static str {
        match self {
            Self::EmptyXPointerExpression => "EmptyXPointerExpression",
            Self::InvalidXPointerExpression => "InvalidXPointerExpression",
            Self::InvalidXPointerToken => "InvalidXPointerToken",
            Self::InvalidShortHandPointer => "InvalidShortHandPointer",
            Self::MultipleShortHandPointers => "MultipleShortHandPointers",
            Self::InvalidSchemeData => "InvalidSchemeDataInXPointer",
            Self::SchemeDataNotFollowedByCloseParenthesis => {
                "SchemeDataNotFollowedByCloseParenthesis"
            }
            Self::UnbalancedParenthesis => "UnbalancedParenthesisInXPointerExpression",
            Self::EmptyElementSchemeData => "EmptyElementSchemeXPointer",
            Self::InvalidElementSchemeToken => "InvalidElementSchemeToken",
            Self::InvalidNCNameInElementSchemeData => "InvalidNCNameInElementSchemeData",
            Self::InvalidChildSequenceCharacter => "InvalidChildSequenceCharacter",
            Self::ResolutionUnsuccessful => "XPointerResolutionUnsuccessful",
        }
    }

    /// Syntax errors are raised at parse time; the rest at resolution time.
    pub fn is_syntax_error(self) -> bool {
        !matches!(self, Self::ResolutionUnsuccessful)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Error carrying the offending expression text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {:?}", .code.message(), .expression)]
pub struct XPointerError {
    pub code: ErrorCode,
    pub expression: String,
}

impl XPointerError {
    pub fn new(code: ErrorCode, expression: impl Into<String>) -> Self {
        Self {
            code,
            expression: expression.into(),
        }
    }

    pub fn is_syntax_error(&self) -> bool {
        self.code.is_syntax_error()
    }
}

pub type Result<T> = std::result::Result<T, XPointerError>;

/// Non-fatal conditions found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Syntactically valid pointer part with a scheme this engine does
    /// not evaluate. The part is dropped.
    UnsupportedScheme {
        scheme_name: String,
        scheme_data: String,
    },
}

impl Warning {
    pub fn key(&self) -> &'static str {
        match self {
            Warning::UnsupportedScheme { .. } => "SchemeUnsupported",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnsupportedScheme { scheme_name, .. } => {
                write!(f, "unsupported xpointer scheme {:?}", scheme_name)
            }
        }
    }
}
