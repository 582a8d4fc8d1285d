use std::fmt;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type XResult<T> = Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// An SDK call returned something other than `I_OK`
    #[error("{0}")]
    Sdk(ErrorCode),
    #[error("could not open camera {0}")]
    OpenFailed(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl Error {
    /// Numeric SDK status code, if this error came from the SDK
    pub fn code(&self) -> Option<u64> {
        match self {
            Error::Sdk(code) => Some(code.code()),
            _ => None,
        }
    }
}

impl From<ErrorCode> for Error {
    fn from(value: ErrorCode) -> Self {
        Error::Sdk(value)
    }
}

/// Status codes returned by the Xeneth SDK, `I_OK` excluded.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum ErrorCode {
    /// Generic
    Bug,
    /// Camera was not successfully initialised
    NoInit,
    /// Invalid logic file
    LogicLoadFailed,
    /// Command interface failure
    InterfaceError,
    /// Provided value is incapable of being produced by the hardware
    OutOfRange,
    /// Functionality not supported by this camera
    NotSupported,
    /// File/Data not found
    NotFound,
    /// Filter has finished processing, and will be removed
    FilterDone,
    /// A frame was requested but none was available
    NoFrame,
    /// Couldn't save to file
    SaveError,
    /// Buffer size mismatch
    Mismatched,
    /// The camera is busy and can not read a temperature
    Busy,
    /// An unknown handle was passed to the C API
    InvalidHandle,
    Timeout,
    FrameGrabber,
    /// The frame could not be converted to the requested format
    NoConversion,
    FilterSkipFrame,
    WrongVersion,
    /// At least one packet of the frame has been lost
    PacketError,
    WrongFormat,
    WrongSize,
    CapStop,
    OutOfMemory,
    /// A code this crate does not know about
    Unknown(u64),
}

impl ErrorCode {
    /// Value of the `I_OK` success sentinel
    pub const OK: u64 = 0;

    /// Maps a raw status code to `Ok(())` or the matching error code.
    pub fn check(code: u64) -> Result<(), ErrorCode> {
        if code == Self::OK {
            Ok(())
        } else {
            Err(Self::from(code))
        }
    }

    pub fn code(self) -> u64 {
        use ErrorCode::*;
        match self {
            Bug => 10000,
            NoInit => 10001,
            LogicLoadFailed => 10002,
            InterfaceError => 10003,
            OutOfRange => 10004,
            NotSupported => 10005,
            NotFound => 10006,
            FilterDone => 10007,
            NoFrame => 10008,
            SaveError => 10009,
            Mismatched => 10010,
            Busy => 10011,
            InvalidHandle => 10012,
            Timeout => 10013,
            FrameGrabber => 10014,
            NoConversion => 10015,
            FilterSkipFrame => 10016,
            WrongVersion => 10017,
            PacketError => 10018,
            WrongFormat => 10019,
            WrongSize => 10020,
            CapStop => 10021,
            OutOfMemory => 10022,
            Unknown(code) => code,
        }
    }

    fn description(self) -> &'static str {
        use ErrorCode::*;
        match self {
            Bug => "generic error",
            NoInit => "camera was not successfully initialised",
            LogicLoadFailed => "invalid logic file",
            InterfaceError => "command interface failure",
            OutOfRange => "value cannot be produced by the hardware",
            NotSupported => "not supported by this camera",
            NotFound => "file or data not found",
            FilterDone => "filter has finished processing",
            NoFrame => "no frame available",
            SaveError => "could not save to file",
            Mismatched => "buffer size mismatch",
            Busy => "camera is busy",
            InvalidHandle => "unknown camera handle",
            Timeout => "operation timed out",
            FrameGrabber => "frame grabber error",
            NoConversion => "frame could not be converted",
            FilterSkipFrame => "filter skipped the frame",
            WrongVersion => "version mismatch",
            PacketError => "packet lost",
            WrongFormat => "wrong format",
            WrongSize => "wrong size",
            CapStop => "capture stopped",
            OutOfMemory => "out of memory",
            Unknown(_) => "unknown error",
        }
    }
}

impl From<u64> for ErrorCode {
    fn from(value: u64) -> Self {
        use ErrorCode::*;
        match value {
            10000 => Bug,
            10001 => NoInit,
            10002 => LogicLoadFailed,
            10003 => InterfaceError,
            10004 => OutOfRange,
            10005 => NotSupported,
            10006 => NotFound,
            10007 => FilterDone,
            10008 => NoFrame,
            10009 => SaveError,
            10010 => Mismatched,
            10011 => Busy,
            10012 => InvalidHandle,
            10013 => Timeout,
            10014 => FrameGrabber,
            10015 => NoConversion,
            10016 => FilterSkipFrame,
            10017 => WrongVersion,
            10018 => PacketError,
            10019 => WrongFormat,
            10020 => WrongSize,
            10021 => CapStop,
            10022 => OutOfMemory,
            other => Unknown(other),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (errorCode {})", self.description(), self.code())
    }
}
