use std::ops::BitOr;
use std::path::Path;

use crate::error::XResult;
use crate::frame::FrameBuffer;
use crate::settings::ConfigurationSnapshot;

/// An open connection to a camera.
///
/// The capture loop only talks to the camera through this trait, so the real
/// SDK session can be swapped for the simulated camera or a test double.
pub trait CameraSession {
    /// Whether the session is still initialised
    fn is_initialized(&self) -> bool;

    fn is_capturing(&self) -> bool;

    /// Starts acquisition. Calling it on a session that already captures is allowed.
    fn start_capture(&mut self) -> XResult<()>;

    fn stop_capture(&mut self) -> XResult<()>;

    /// Size in bytes of one frame in the native format
    fn frame_size(&self) -> usize;

    /// Copies the next frame into `buffer`, converted to `frame_type`.
    ///
    /// With [`GetFrameFlags::BLOCKING`] the call waits until a frame is available
    /// or the SDK timeout elapses.
    fn get_frame(
        &mut self,
        frame_type: FrameType,
        flags: GetFrameFlags,
        buffer: &mut FrameBuffer,
    ) -> XResult<()>;

    /// Saves the frame currently buffered by the session to `path`.
    /// The file format follows the extension. An existing file is overwritten.
    fn save_data(&mut self, path: &Path, flags: SaveDataFlags) -> XResult<()>;

    /// Current device temperature in Celsius
    fn temperature(&self) -> XResult<f64>;

    /// All readable properties with their current value
    fn configuration(&self) -> XResult<ConfigurationSnapshot>;
}

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum FrameType {
    /// The camera's own pixel encoding, no conversion
    Native,
    /// 8-bit greyscale
    Gray8,
    /// 16-bit greyscale, the native type of most Xenics cameras
    Gray16,
    /// 32-bit greyscale
    Gray32,
    Rgba32,
    Rgb32,
    Bgra32,
    Bgr32,
}

impl FrameType {
    /// Value of the matching `FT_*` constant
    pub fn raw(self) -> i32 {
        use FrameType::*;
        match self {
            Native => 0,
            Gray8 => 1,
            Gray16 => 2,
            Gray32 => 3,
            Rgba32 => 4,
            Rgb32 => 5,
            Bgra32 => 6,
            Bgr32 => 7,
        }
    }

    /// Returns `None` for `FT_UNKNOWN` and values outside the known range
    pub fn from_raw(value: i32) -> Option<Self> {
        use FrameType::*;
        Some(match value {
            0 => Native,
            1 => Gray8,
            2 => Gray16,
            3 => Gray32,
            4 => Rgba32,
            5 => Rgb32,
            6 => Bgra32,
            7 => Bgr32,
            _ => return None,
        })
    }
}

/// Flags of a frame request (`XGF_*`)
#[derive(Debug, Copy, Clone, Default, Hash, PartialEq, Eq)]
pub struct GetFrameFlags(u32);

impl GetFrameFlags {
    pub const NONE: Self = Self(0);
    /// Wait for a frame instead of returning `E_NO_FRAME`
    pub const BLOCKING: Self = Self(1);
    /// Skip the internal 8-bit conversion. Disables `save_data`.
    pub const NO_CONVERSION: Self = Self(2);
    /// Append the per frame footer
    pub const FETCH_PFF: Self = Self(4);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for GetFrameFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Flags of a save request (`XSD_*`)
#[derive(Debug, Copy, Clone, Default, Hash, PartialEq, Eq)]
pub struct SaveDataFlags(u32);

impl SaveDataFlags {
    pub const NONE: Self = Self(0);
    /// 16-bit output whatever the colour mode, PNG only
    pub const FORCE_16: Self = Self(1);
    pub const FORCE_8: Self = Self(2);
    /// Left align 16-bit output, combine with `FORCE_16`
    pub const ALIGN_LEFT: Self = Self(4);
    /// Embed the thermal conversion structure in 16-bit PNGs
    pub const SAVE_THERMAL_INFO: Self = Self(8);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for SaveDataFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_types_match_sdk_values() {
        for raw in 0..=7 {
            assert_eq!(FrameType::from_raw(raw).map(FrameType::raw), Some(raw));
        }
        assert_eq!(FrameType::from_raw(-1), None);
        assert_eq!(FrameType::Gray16.raw(), 2);
    }

    #[test]
    fn flags_combine() {
        let flags = SaveDataFlags::FORCE_16 | SaveDataFlags::ALIGN_LEFT;
        assert_eq!(flags.bits(), 5);
        assert!(flags.contains(SaveDataFlags::FORCE_16));
        assert!(!flags.contains(SaveDataFlags::FORCE_8));

        assert!(GetFrameFlags::BLOCKING.contains(GetFrameFlags::NONE));
        assert_eq!((GetFrameFlags::BLOCKING | GetFrameFlags::FETCH_PFF).bits(), 5);
    }
}
