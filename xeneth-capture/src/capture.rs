//! The capture loop: poll the session, persist one frame per iteration and
//! pace acquisition with a countdown.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

use crate::error::{Error, XResult};
use crate::frame::FrameBuffer;
use crate::session::{CameraSession, FrameType, GetFrameFlags, SaveDataFlags};
use crate::settings::ConfigurationSnapshot;

/// Iterations between two forced start-capture requests
pub const DEFAULT_RECAPTURE_THRESHOLD: u32 = 100;

/// Extension of the saved frames, it also selects the file format
pub const DEFAULT_EXTENSION: &str = "png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Existing directory receiving the frames
    pub directory: PathBuf,
    /// Seconds to wait after each frame
    pub delay_secs: u64,
    pub recapture_threshold: u32,
    pub extension: String,
    /// Number of the first saved frame
    pub first_frame: u64,
    /// Stop after this many frames. `None` runs until the session gives up.
    pub max_frames: Option<u64>,
}

impl CaptureConfig {
    pub fn new(directory: impl Into<PathBuf>, delay_secs: u64) -> Self {
        Self {
            directory: directory.into(),
            delay_secs,
            recapture_threshold: DEFAULT_RECAPTURE_THRESHOLD,
            extension: DEFAULT_EXTENSION.to_string(),
            first_frame: 1,
            max_frames: None,
        }
    }

    pub fn with_recapture_threshold(mut self, threshold: u32) -> Self {
        self.recapture_threshold = threshold;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_first_frame(mut self, first_frame: u64) -> Self {
        self.first_frame = first_frame;
        self
    }

    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn validate(&self) -> XResult<()> {
        if self.recapture_threshold == 0 {
            return Err(Error::InvalidArgument(
                "the recapture threshold must be at least 1".to_string(),
            ));
        }
        if self.max_frames == Some(0) {
            return Err(Error::InvalidArgument(
                "the frame limit must be at least 1".to_string(),
            ));
        }
        if self.extension.is_empty() || self.extension.contains(&['/', '\\', '.'][..]) {
            return Err(Error::InvalidArgument(format!(
                "invalid file extension {:?}",
                self.extension
            )));
        }
        if !self.directory.is_dir() {
            return Err(Error::InvalidArgument(format!(
                "{} is not a directory",
                self.directory.display()
            )));
        }
        Ok(())
    }

    /// `<directory>/<frame_number>.<extension>`
    pub fn frame_path(&self, frame_number: u64) -> PathBuf {
        self.directory
            .join(format!("{frame_number}.{}", self.extension))
    }
}

/// Counters owned by one run of the loop.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CaptureContext {
    frame_number: u64,
    recapture_count: u32,
    recapture_threshold: u32,
}

impl CaptureContext {
    pub fn new(first_frame: u64, recapture_threshold: u32) -> Self {
        Self {
            frame_number: first_frame,
            recapture_count: 1,
            recapture_threshold: recapture_threshold.max(1),
        }
    }

    /// Number of the next frame to be saved
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Position of the current iteration in the recapture cycle, in
    /// `1..=threshold`. Iteration i sees `((i-1) mod threshold) + 1`.
    pub fn recapture_count(&self) -> u32 {
        self.recapture_count
    }

    fn recapture_due(&self) -> bool {
        self.recapture_count >= self.recapture_threshold
    }

    /// Moves to the next frame. The recapture cycle restarts at 1 after the
    /// iteration that reached the threshold.
    fn advance(&mut self) {
        self.frame_number += 1;
        self.recapture_count = if self.recapture_due() {
            1
        } else {
            self.recapture_count + 1
        };
    }
}

/// What happened during an iteration, in order of occurrence.
#[derive(Debug)]
pub enum CaptureEvent<'a> {
    /// A forced start-capture was issued
    Recapture {
        frame_number: u64,
        error: Option<&'a Error>,
    },
    Configuration(&'a ConfigurationSnapshot),
    ConfigurationFailed(&'a Error),
    Temperature {
        frame_number: u64,
        celsius: f64,
    },
    TemperatureFailed {
        frame_number: u64,
        error: &'a Error,
    },
    Saving {
        frame_number: u64,
        path: &'a Path,
    },
    FrameFailed {
        frame_number: u64,
        error: &'a Error,
    },
    SaveFailed {
        frame_number: u64,
        path: &'a Path,
        error: &'a Error,
    },
    Saved {
        frame_number: u64,
        path: &'a Path,
    },
    /// Emitted before each second of the inter-frame delay
    Countdown {
        remaining: u64,
    },
}

/// Totals of a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureSummary {
    /// Completed iterations
    pub frames: u64,
    pub recaptures: u64,
    pub frame_failures: u64,
    pub save_failures: u64,
    pub temperature_failures: u64,
    /// Frame number the next run should start at
    pub next_frame_number: u64,
}

/// Waits out the inter-frame delay, one second at a time.
pub trait Pacer {
    fn sleep_one_second(&mut self);
}

#[derive(Debug, Default, Copy, Clone)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn sleep_one_second(&mut self) {
        thread::sleep(Duration::from_secs(1));
    }
}

impl<F: FnMut()> Pacer for F {
    fn sleep_one_second(&mut self) {
        self()
    }
}

pub struct CaptureLoop<P = ThreadPacer> {
    config: CaptureConfig,
    pacer: P,
}

impl CaptureLoop<ThreadPacer> {
    pub fn new(config: CaptureConfig) -> Self {
        Self::with_pacer(config, ThreadPacer)
    }
}

impl<P: Pacer> CaptureLoop<P> {
    pub fn with_pacer(config: CaptureConfig, pacer: P) -> Self {
        Self { config, pacer }
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Captures until the session is no longer initialised or refuses to start
    /// capturing. Both are checked before every iteration.
    ///
    /// SDK failures inside an iteration are reported to `observer` and logged,
    /// they never stop the loop. The session is left open.
    pub fn run<S>(
        &mut self,
        session: &mut S,
        mut observer: impl FnMut(&CaptureEvent<'_>),
    ) -> CaptureSummary
    where
        S: CameraSession + ?Sized,
    {
        let mut ctx =
            CaptureContext::new(self.config.first_frame, self.config.recapture_threshold);
        let mut summary = CaptureSummary::default();

        info!(
            "capturing into {} every {}s",
            self.config.directory.display(),
            self.config.delay_secs
        );

        loop {
            if self.limit_reached(&summary) {
                info!("frame limit of {} reached", summary.frames);
                break;
            }
            if !session.is_initialized() {
                info!("camera session is no longer initialised");
                break;
            }
            if let Err(e) = session.start_capture() {
                warn!("could not start capturing: {e}");
                break;
            }

            if ctx.recapture_due() {
                self.recapture(session, &ctx, &mut summary, &mut observer);
            }

            self.read_temperature(session, &ctx, &mut summary, &mut observer);
            self.persist_frame(session, &ctx, &mut summary, &mut observer);
            ctx.advance();
            summary.frames += 1;

            // no trailing delay after the last allowed frame
            if self.limit_reached(&summary) {
                info!("frame limit of {} reached", summary.frames);
                break;
            }

            self.countdown(&mut observer);
        }

        summary.next_frame_number = ctx.frame_number();
        info!("capture stopped after {} frames", summary.frames);
        summary
    }

    fn limit_reached(&self, summary: &CaptureSummary) -> bool {
        self.config
            .max_frames
            .is_some_and(|max| summary.frames >= max)
    }

    fn recapture<S>(
        &mut self,
        session: &mut S,
        ctx: &CaptureContext,
        summary: &mut CaptureSummary,
        observer: &mut impl FnMut(&CaptureEvent<'_>),
    ) where
        S: CameraSession + ?Sized,
    {
        let frame_number = ctx.frame_number();
        summary.recaptures += 1;

        match session.start_capture() {
            Ok(()) => {
                debug!("forced start-capture before frame {frame_number}");
                observer(&CaptureEvent::Recapture {
                    frame_number,
                    error: None,
                });
            }
            Err(error) => {
                warn!("could not start capturing: {error}");
                observer(&CaptureEvent::Recapture {
                    frame_number,
                    error: Some(&error),
                });
            }
        }

        match session.configuration() {
            Ok(snapshot) => observer(&CaptureEvent::Configuration(&snapshot)),
            Err(error) => {
                warn!("could not read the camera configuration: {error}");
                observer(&CaptureEvent::ConfigurationFailed(&error));
            }
        }
    }

    fn read_temperature<S>(
        &mut self,
        session: &mut S,
        ctx: &CaptureContext,
        summary: &mut CaptureSummary,
        observer: &mut impl FnMut(&CaptureEvent<'_>),
    ) where
        S: CameraSession + ?Sized,
    {
        let frame_number = ctx.frame_number();
        match session.temperature() {
            Ok(celsius) => {
                debug!("temperature {celsius:.2} C before frame {frame_number}");
                observer(&CaptureEvent::Temperature {
                    frame_number,
                    celsius,
                });
            }
            Err(error) => {
                summary.temperature_failures += 1;
                warn!("could not read the temperature: {error}");
                observer(&CaptureEvent::TemperatureFailed {
                    frame_number,
                    error: &error,
                });
            }
        }
    }

    fn persist_frame<S>(
        &mut self,
        session: &mut S,
        ctx: &CaptureContext,
        summary: &mut CaptureSummary,
        observer: &mut impl FnMut(&CaptureEvent<'_>),
    ) where
        S: CameraSession + ?Sized,
    {
        let frame_number = ctx.frame_number();
        let path = self.config.frame_path(frame_number);
        observer(&CaptureEvent::Saving {
            frame_number,
            path: &path,
        });

        // Released at the end of this function on every path.
        let mut buffer = FrameBuffer::new(session.frame_size());

        if let Err(error) =
            session.get_frame(FrameType::Native, GetFrameFlags::BLOCKING, &mut buffer)
        {
            summary.frame_failures += 1;
            warn!("problem while fetching frame {frame_number}: {error}");
            observer(&CaptureEvent::FrameFailed {
                frame_number,
                error: &error,
            });
        }

        match session.save_data(&path, SaveDataFlags::FORCE_16) {
            Ok(()) => {
                debug!("saved {}", path.display());
                observer(&CaptureEvent::Saved {
                    frame_number,
                    path: &path,
                });
            }
            Err(error) => {
                summary.save_failures += 1;
                warn!("could not save {}: {error}", path.display());
                observer(&CaptureEvent::SaveFailed {
                    frame_number,
                    path: &path,
                    error: &error,
                });
            }
        }
    }

    fn countdown(&mut self, observer: &mut impl FnMut(&CaptureEvent<'_>)) {
        for remaining in (1..=self.config.delay_secs).rev() {
            observer(&CaptureEvent::Countdown { remaining });
            self.pacer.sleep_one_second();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recapture_counter_cycles() {
        let threshold = 3;
        let mut ctx = CaptureContext::new(1, threshold);
        let mut due_at = Vec::new();

        for iteration in 1..=9u32 {
            let expected = (iteration - 1) % threshold + 1;
            assert_eq!(ctx.recapture_count(), expected);
            if ctx.recapture_due() {
                due_at.push(iteration);
            }
            // unchanged until the frame is persisted
            assert_eq!(ctx.recapture_count(), expected);
            ctx.advance();
        }

        assert_eq!(due_at, vec![3, 6, 9]);
        assert_eq!(ctx.frame_number(), 10);
    }

    #[test]
    fn frame_paths_use_the_decimal_counter() {
        let config = CaptureConfig::new("/data/gobi", 0);
        assert_eq!(config.frame_path(3), Path::new("/data/gobi/3.png"));

        let config = config.with_extension("tif");
        assert_eq!(config.frame_path(120), Path::new("/data/gobi/120.tif"));
    }

    #[test]
    fn validate_rejects_bad_config() {
        let dir = std::env::temp_dir();

        assert!(CaptureConfig::new(&dir, 1).validate().is_ok());
        assert!(CaptureConfig::new(&dir, 1)
            .with_recapture_threshold(0)
            .validate()
            .is_err());
        assert!(CaptureConfig::new(&dir, 1)
            .with_extension(".png")
            .validate()
            .is_err());
        assert!(CaptureConfig::new(&dir, 1)
            .with_max_frames(Some(0))
            .validate()
            .is_err());
        assert!(CaptureConfig::new(&dir, 1)
            .with_max_frames(Some(1))
            .validate()
            .is_ok());
        assert!(CaptureConfig::new(dir.join("does-not-exist-4b1d"), 1)
            .validate()
            .is_err());
    }
}
