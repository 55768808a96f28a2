//! # Errors and Status Codes
//!
//! Every failure of the attribute-string parser is reported as one of a closed
//! set of [`ParseStatus`] codes. The numeric values are stable and are what
//! callers outside Rust (scripts, exit codes, logs) see.
//!
//! A [`ParseError`] pairs the status with the byte offset of the grammar rule
//! that failed and, for numeric failures, the underlying [`ScanError`], so a
//! message can say *"value out of range"* rather than just *"bad argument"*.

use serde::Serialize;
use thiserror::Error;

/// Outcome of parsing one attribute string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseStatus {
    Success,
    BadArgument,
    EmptyString,
    AttrNameTooLong,
    AttrNameMissing,
    BadDisplayDevice,
    MissingEqualSign,
    NoValue,
    TrailingGarbage,
    UnknownAttrName,
    MissingComma,
    TargetSpecNoColon,
    TargetSpecBadTarget,
    TargetSpecNoTargetId,
    TargetSpecBadTargetId,
    TargetSpecTrailingGarbage,
    TargetSpecNoTargets,
}

impl ParseStatus {
    /// All statuses, ordered by numeric code.
    pub const ALL: [ParseStatus; 17] = [
        ParseStatus::Success,
        ParseStatus::BadArgument,
        ParseStatus::EmptyString,
        ParseStatus::AttrNameTooLong,
        ParseStatus::AttrNameMissing,
        ParseStatus::BadDisplayDevice,
        ParseStatus::MissingEqualSign,
        ParseStatus::NoValue,
        ParseStatus::TrailingGarbage,
        ParseStatus::UnknownAttrName,
        ParseStatus::MissingComma,
        ParseStatus::TargetSpecNoColon,
        ParseStatus::TargetSpecBadTarget,
        ParseStatus::TargetSpecNoTargetId,
        ParseStatus::TargetSpecBadTargetId,
        ParseStatus::TargetSpecTrailingGarbage,
        ParseStatus::TargetSpecNoTargets,
    ];

    /// The stable numeric code of this status.
    pub fn code(self) -> i32 {
        match self {
            ParseStatus::Success => 0,
            ParseStatus::BadArgument => 1,
            ParseStatus::EmptyString => 2,
            ParseStatus::AttrNameTooLong => 3,
            ParseStatus::AttrNameMissing => 4,
            ParseStatus::BadDisplayDevice => 5,
            ParseStatus::MissingEqualSign => 6,
            ParseStatus::NoValue => 7,
            ParseStatus::TrailingGarbage => 8,
            ParseStatus::UnknownAttrName => 9,
            ParseStatus::MissingComma => 10,
            ParseStatus::TargetSpecNoColon => 11,
            ParseStatus::TargetSpecBadTarget => 12,
            ParseStatus::TargetSpecNoTargetId => 13,
            ParseStatus::TargetSpecBadTargetId => 14,
            ParseStatus::TargetSpecTrailingGarbage => 15,
            ParseStatus::TargetSpecNoTargets => 16,
        }
    }

    /// Inverse of [`ParseStatus::code`].
    pub fn from_code(code: i32) -> Option<ParseStatus> {
        ParseStatus::ALL.iter().copied().find(|s| s.code() == code)
    }

    /// Human-readable description of the status.
    pub fn description(self) -> &'static str {
        match self {
            ParseStatus::Success => "No error",
            ParseStatus::BadArgument => "Bad argument",
            ParseStatus::EmptyString => "Empty string",
            ParseStatus::AttrNameTooLong => "The attribute name is too long",
            ParseStatus::AttrNameMissing => "Missing attribute name",
            ParseStatus::BadDisplayDevice => "Malformed display device identification",
            ParseStatus::MissingEqualSign => "Missing equal sign after attribute name",
            ParseStatus::NoValue => "No attribute value specified",
            ParseStatus::TrailingGarbage => "Trailing garbage",
            ParseStatus::UnknownAttrName => "Unrecognized attribute name",
            ParseStatus::MissingComma => "Missing comma in packed integer value",
            ParseStatus::TargetSpecNoColon => "No colon in target specification string",
            ParseStatus::TargetSpecBadTarget => "Bad target in target specification string",
            ParseStatus::TargetSpecNoTargetId => "No target ID in target specification string",
            ParseStatus::TargetSpecBadTargetId => {
                "Bad target ID in target specification string"
            }
            ParseStatus::TargetSpecTrailingGarbage => {
                "Trailing garbage after target specification string"
            }
            ParseStatus::TargetSpecNoTargets => "No targets match target specification",
        }
    }
}

impl std::fmt::Display for ParseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Low-level failures of the scanner primitives and the display-device codec.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    #[error("no digits present")]
    NoDigits,

    #[error("value out of range")]
    OutOfRange,

    #[error("missing '{0}' separator")]
    MissingSeparator(char),

    #[error("range minimum {min} is greater than maximum {max}")]
    InvertedRange { min: f32, max: f32 },

    #[error("display device index {0} is outside 0-7")]
    DeviceIndexOutOfRange(i64),

    #[error("unknown display device '{0}'")]
    UnknownDeviceCategory(String),

    #[error("a value of zero is not allowed")]
    ZeroNotAllowed,

    #[error("unknown color space conversion matrix '{0}'")]
    UnknownMatrix(String),
}

/// A failed parse: which rule failed, where, and why.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{status} (at position {position})")]
pub struct ParseError {
    pub status: ParseStatus,
    /// Byte offset into the input where the failing rule started.
    pub position: usize,
    #[source]
    pub cause: Option<ScanError>,
}

impl ParseError {
    pub fn new(status: ParseStatus, position: usize) -> Self {
        Self {
            status,
            position,
            cause: None,
        }
    }

    pub fn with_cause(status: ParseStatus, position: usize, cause: ScanError) -> Self {
        Self {
            status,
            position,
            cause: Some(cause),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
