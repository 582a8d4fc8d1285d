//! Periodic frame capture for Xenics infrared cameras.
//!
//! A [`CaptureLoop`] drives any [`CameraSession`]: it saves one frame per
//! iteration under a sequential file name, reports the device temperature and
//! waits a fixed number of seconds between frames. With the `sdk` feature,
//! [`XenethCamera`] provides a session backed by the Xeneth SDK.

pub use capture::{
    CaptureConfig, CaptureContext, CaptureEvent, CaptureLoop, CaptureSummary, Pacer, ThreadPacer,
    DEFAULT_EXTENSION, DEFAULT_RECAPTURE_THRESHOLD,
};
pub use error::{Error, ErrorCode, XResult};
pub use frame::FrameBuffer;
pub use session::{CameraSession, FrameType, GetFrameFlags, SaveDataFlags};
pub use settings::{
    ConfigurationSnapshot, DEFAULT_CAMERA, DEFAULT_TEMPERATURE_PROPERTY, INTEGRATION_TIME,
};
pub use simulated::SimulatedCamera;

#[cfg(feature = "sdk")]
pub use camera::XenethCamera;

mod capture;
mod error;
mod frame;
pub mod prompt;
mod session;
mod settings;
mod simulated;

#[cfg(feature = "sdk")]
mod camera;
