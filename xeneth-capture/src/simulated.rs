use std::path::Path;

use image::{GrayImage, ImageBuffer, Luma};
use log::debug;

use crate::error::{ErrorCode, XResult};
use crate::frame::FrameBuffer;
use crate::session::{CameraSession, FrameType, GetFrameFlags, SaveDataFlags};
use crate::settings::{ConfigurationSnapshot, DEFAULT_TEMPERATURE_PROPERTY, INTEGRATION_TIME};

/// In-process camera producing a moving 16-bit gradient.
///
/// Stands in for a real device the way the SDK's `soft://0` virtual camera
/// does, for dry runs of the capture loop without hardware.
#[derive(Debug, Clone)]
pub struct SimulatedCamera {
    width: u32,
    height: u32,
    initialized: bool,
    capturing: bool,
    /// Last frame handed out by get_frame, what save_data writes
    frame: Vec<u16>,
    frames_grabbed: u64,
    base_temperature: f64,
    integration_time_us: u32,
}

impl Default for SimulatedCamera {
    fn default() -> Self {
        Self::new(640, 512)
    }
}

impl SimulatedCamera {
    pub const URL: &'static str = "soft://0";

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            initialized: true,
            capturing: false,
            frame: Vec::new(),
            frames_grabbed: 0,
            base_temperature: 30.0,
            integration_time_us: 1000,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn frames_grabbed(&self) -> u64 {
        self.frames_grabbed
    }

    /// Ends the session, the capture loop stops at its next iteration
    pub fn close(&mut self) {
        self.initialized = false;
        self.capturing = false;
    }

    fn synthesize(&mut self) {
        let (w, h) = (self.width as u64, self.height as u64);
        let span = (w + h).max(1);
        let shift = self.frames_grabbed * 97;

        self.frame.clear();
        self.frame.reserve((w * h) as usize);
        for y in 0..h {
            for x in 0..w {
                let level = ((x + y + shift) % span) * u16::MAX as u64 / span;
                self.frame.push(level as u16);
            }
        }
    }
}

impl CameraSession for SimulatedCamera {
    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn is_capturing(&self) -> bool {
        self.capturing
    }

    fn start_capture(&mut self) -> XResult<()> {
        if !self.initialized {
            return Err(ErrorCode::NoInit.into());
        }
        self.capturing = true;
        Ok(())
    }

    fn stop_capture(&mut self) -> XResult<()> {
        self.capturing = false;
        Ok(())
    }

    fn frame_size(&self) -> usize {
        self.width as usize * self.height as usize * 2
    }

    fn get_frame(
        &mut self,
        frame_type: FrameType,
        _flags: GetFrameFlags,
        buffer: &mut FrameBuffer,
    ) -> XResult<()> {
        if !self.capturing {
            return Err(ErrorCode::NoFrame.into());
        }
        if !matches!(frame_type, FrameType::Native | FrameType::Gray16) {
            return Err(ErrorCode::NoConversion.into());
        }
        if buffer.size_bytes() != self.frame_size() {
            return Err(ErrorCode::Mismatched.into());
        }

        self.synthesize();
        self.frames_grabbed += 1;
        buffer.as_mut_slice()[..self.frame.len()].copy_from_slice(&self.frame);
        Ok(())
    }

    fn save_data(&mut self, path: &Path, flags: SaveDataFlags) -> XResult<()> {
        if self.frame.is_empty() {
            return Err(ErrorCode::NoFrame.into());
        }

        if flags.contains(SaveDataFlags::FORCE_16) {
            let img: ImageBuffer<Luma<u16>, Vec<u16>> =
                ImageBuffer::from_raw(self.width, self.height, self.frame.clone())
                    .ok_or(ErrorCode::Mismatched)?;
            img.save(path)?;
        } else {
            let img: GrayImage = ImageBuffer::from_raw(
                self.width,
                self.height,
                self.frame.iter().map(|&v| (v >> 8) as u8).collect(),
            )
            .ok_or(ErrorCode::Mismatched)?;
            img.save(path)?;
        }

        debug!("simulated camera wrote {}", path.display());
        Ok(())
    }

    fn temperature(&self) -> XResult<f64> {
        let drift = (self.frames_grabbed as f64 / 10.0).sin() * 0.5;
        Ok(self.base_temperature + drift)
    }

    fn configuration(&self) -> XResult<ConfigurationSnapshot> {
        let mut snapshot = ConfigurationSnapshot::new();
        snapshot.push("Width", self.width.to_string());
        snapshot.push("Height", self.height.to_string());
        snapshot.push(INTEGRATION_TIME, self.integration_time_us.to_string());
        snapshot.push(
            DEFAULT_TEMPERATURE_PROPERTY,
            format!("{:.2}", self.temperature()?),
        );
        snapshot.push("FrameCount", self.frames_grabbed.to_string());
        Ok(snapshot)
    }
}
