//! Scripted camera session shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use xeneth_capture::{
    CameraSession, ConfigurationSnapshot, ErrorCode, FrameBuffer, FrameType, GetFrameFlags,
    SaveDataFlags, XResult,
};

pub struct FakeSession {
    /// How many is_initialized() calls answer true
    pub initialized_for: usize,
    /// 1-based start_capture calls that fail
    pub failing_starts: Vec<usize>,
    pub frame_error: Option<ErrorCode>,
    pub save_error: Option<ErrorCode>,
    pub frame_size: usize,
    /// Write a placeholder file for every successful save
    pub write_files: bool,

    pub init_calls: Cell<usize>,
    pub start_calls: usize,
    pub temperature_reads: Cell<usize>,
    pub configuration_reads: Cell<usize>,
    pub frame_requests: Vec<(FrameType, GetFrameFlags, usize)>,
    pub saves: Vec<(PathBuf, SaveDataFlags)>,
    /// FrameBuffer::live_count() seen by each SDK call, tagged with the call name
    pub live_buffers: RefCell<Vec<(&'static str, usize)>>,
}

impl FakeSession {
    pub fn initialized_for(iterations: usize) -> Self {
        Self {
            initialized_for: iterations,
            failing_starts: Vec::new(),
            frame_error: None,
            save_error: None,
            frame_size: 640 * 512 * 2,
            write_files: true,
            init_calls: Cell::new(0),
            start_calls: 0,
            temperature_reads: Cell::new(0),
            configuration_reads: Cell::new(0),
            frame_requests: Vec::new(),
            saves: Vec::new(),
            live_buffers: RefCell::new(Vec::new()),
        }
    }

    fn record_buffers(&self, call: &'static str) {
        self.live_buffers
            .borrow_mut()
            .push((call, FrameBuffer::live_count()));
    }
}

impl CameraSession for FakeSession {
    fn is_initialized(&self) -> bool {
        let calls = self.init_calls.get() + 1;
        self.init_calls.set(calls);
        calls <= self.initialized_for
    }

    fn is_capturing(&self) -> bool {
        self.start_calls > 0
    }

    fn start_capture(&mut self) -> XResult<()> {
        self.start_calls += 1;
        if self.failing_starts.contains(&self.start_calls) {
            return Err(ErrorCode::NoInit.into());
        }
        Ok(())
    }

    fn stop_capture(&mut self) -> XResult<()> {
        Ok(())
    }

    fn frame_size(&self) -> usize {
        self.frame_size
    }

    fn get_frame(
        &mut self,
        frame_type: FrameType,
        flags: GetFrameFlags,
        buffer: &mut FrameBuffer,
    ) -> XResult<()> {
        self.record_buffers("get_frame");
        self.frame_requests
            .push((frame_type, flags, buffer.size_bytes()));
        match self.frame_error {
            Some(code) => Err(code.into()),
            None => Ok(()),
        }
    }

    fn save_data(&mut self, path: &Path, flags: SaveDataFlags) -> XResult<()> {
        self.record_buffers("save_data");
        self.saves.push((path.to_path_buf(), flags));
        if let Some(code) = self.save_error {
            return Err(code.into());
        }
        if self.write_files {
            std::fs::write(path, b"frame")?;
        }
        Ok(())
    }

    fn temperature(&self) -> XResult<f64> {
        self.record_buffers("temperature");
        self.temperature_reads.set(self.temperature_reads.get() + 1);
        Ok(21.5)
    }

    fn configuration(&self) -> XResult<ConfigurationSnapshot> {
        self.configuration_reads
            .set(self.configuration_reads.get() + 1);
        let mut snapshot = ConfigurationSnapshot::new();
        snapshot.push("IntegrationTime", "32");
        Ok(snapshot)
    }
}
