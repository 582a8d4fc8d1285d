use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use log::{info, warn};

use xeneth_capture::prompt::{self, DirectoryChooser, FixedDirectory, PromptDirectoryChooser};
use xeneth_capture::{
    CameraSession, CaptureConfig, CaptureEvent, CaptureLoop, ConfigurationSnapshot,
    SimulatedCamera, DEFAULT_CAMERA, DEFAULT_EXTENSION, DEFAULT_RECAPTURE_THRESHOLD,
    DEFAULT_TEMPERATURE_PROPERTY,
};

/// Saves frames from a Xenics camera at a fixed interval, printing the
/// camera temperature before each frame.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Connection string of the camera.
    #[arg(short, long, default_value = DEFAULT_CAMERA)]
    camera: String,

    /// Directory receiving the frames. Asked for interactively when missing.
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Seconds between two frames. Asked for interactively when missing.
    #[arg(long)]
    delay: Option<u64>,

    /// Xeneth settings file (.xcf) loaded after opening the camera.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Calibration pack (.xca) loaded after opening the camera.
    #[arg(long)]
    calibration: Option<PathBuf>,

    /// Camera property holding the device temperature in Celsius.
    #[arg(long, default_value = DEFAULT_TEMPERATURE_PROPERTY)]
    temperature_property: String,

    /// Frames between two forced capture restarts.
    #[arg(long, default_value_t = DEFAULT_RECAPTURE_THRESHOLD)]
    recapture_every: u32,

    /// Extension of the saved frames, it selects the file format.
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Number of the first frame.
    #[arg(long, default_value_t = 1)]
    start_index: u64,

    /// Stop after this many frames.
    #[arg(long)]
    max_frames: Option<u64>,

    /// Use a simulated camera instead of the SDK.
    #[arg(long)]
    simulate: bool,

    /// Start capturing without waiting for Enter.
    #[arg(short, long)]
    yes: bool,
}

const BANNER: &str = "/----------------------------------------------------------/";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout();

    let delay = match args.delay {
        Some(delay) => delay,
        None => prompt::prompt_delay(&mut stdin, &mut stdout)?,
    };

    let directory = match &args.dir {
        Some(dir) => FixedDirectory(dir.clone()).choose()?,
        None => PromptDirectoryChooser::new(&mut stdin, &mut stdout).choose()?,
    };
    let Some(directory) = directory else {
        bail!("no output directory chosen");
    };
    println!("Output directory: {}", directory.display());

    let config = CaptureConfig::new(directory, delay)
        .with_recapture_threshold(args.recapture_every)
        .with_extension(&args.extension)
        .with_first_frame(args.start_index)
        .with_max_frames(args.max_frames);
    config.validate().context("invalid capture configuration")?;

    let mut session = open_session(&args)?;

    let snapshot = session
        .configuration()
        .context("reading the camera configuration")?;
    print_configuration(&snapshot);

    if !args.yes {
        prompt::wait_for_enter(&mut stdin, &mut stdout)?;
    }

    let mut capture = CaptureLoop::new(config);
    let summary = capture.run(session.as_mut(), print_event);

    info!(
        "{} frames saved ({} fetch failures, {} save failures, {} forced restarts)",
        summary.frames - summary.save_failures,
        summary.frame_failures,
        summary.save_failures,
        summary.recaptures
    );
    Ok(())
}

fn open_session(args: &Args) -> anyhow::Result<Box<dyn CameraSession>> {
    if args.simulate {
        if args.settings.is_some()
            || args.calibration.is_some()
            || args.temperature_property != DEFAULT_TEMPERATURE_PROPERTY
        {
            warn!("settings, calibration and temperature property are ignored by the simulated camera");
        }
        info!("using simulated camera {}", SimulatedCamera::URL);
        return Ok(Box::new(SimulatedCamera::default()));
    }
    open_sdk_camera(args)
}

#[cfg(feature = "sdk")]
fn open_sdk_camera(args: &Args) -> anyhow::Result<Box<dyn CameraSession>> {
    use xeneth_capture::{XenethCamera, INTEGRATION_TIME};

    println!("{BANNER}");
    println!("Opening connection to {}", args.camera);
    println!("{BANNER}");

    let mut camera = XenethCamera::open(&args.camera)?;
    camera.set_temperature_property(&args.temperature_property)?;

    if let Some(settings) = &args.settings {
        camera
            .load_settings(settings)
            .with_context(|| format!("loading settings from {}", settings.display()))?;
        match camera.property_long(INTEGRATION_TIME) {
            Ok(value) => println!("- Loaded {INTEGRATION_TIME} value: {value}"),
            Err(e) => warn!("could not read {INTEGRATION_TIME}: {e}"),
        }
    }

    if let Some(calibration) = &args.calibration {
        camera
            .load_calibration(calibration, true)
            .with_context(|| format!("loading calibration {}", calibration.display()))?;
    }

    Ok(Box::new(camera))
}

#[cfg(not(feature = "sdk"))]
fn open_sdk_camera(args: &Args) -> anyhow::Result<Box<dyn CameraSession>> {
    bail!(
        "cannot open {}: built without the `sdk` feature, use --simulate",
        args.camera
    )
}

fn print_configuration(snapshot: &ConfigurationSnapshot) {
    println!("{BANNER}");
    print!("{snapshot}");
    println!("{BANNER}");
}

fn print_event(event: &CaptureEvent<'_>) {
    match event {
        CaptureEvent::Configuration(snapshot) => print_configuration(snapshot),
        _ => {
            if let Some(message) = event_message(event) {
                println!("{message}");
            }
        }
    }
}

/// Console line for an event, `None` for the silent ones
fn event_message(event: &CaptureEvent<'_>) -> Option<String> {
    let message = match event {
        CaptureEvent::Recapture { error: Some(e), .. } => {
            format!("Could not start capturing, {e}")
        }
        CaptureEvent::Recapture { error: None, .. } | CaptureEvent::Configuration(_) => {
            return None
        }
        CaptureEvent::ConfigurationFailed(error) => {
            format!("Could not read the camera configuration, {error}")
        }
        CaptureEvent::Temperature { celsius, .. } => format!("Camera temperature: {celsius:.2} C"),
        CaptureEvent::TemperatureFailed { error, .. } => {
            format!("Could not read the camera temperature, {error}")
        }
        CaptureEvent::Saving { frame_number, .. } => format!("Saving frame {frame_number}"),
        CaptureEvent::FrameFailed { error, .. } => format!("Problem while fetching frame, {error}"),
        CaptureEvent::SaveFailed { path, error, .. } => {
            format!("Problem while saving {}, {error}\n", path.display())
        }
        CaptureEvent::Saved { path, .. } => format!("Saved {}\n", path.display()),
        CaptureEvent::Countdown { remaining } => format!("Sleeping... remaining {remaining} seconds"),
    };
    Some(message)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use xeneth_capture::{Error, ErrorCode};

    use super::*;

    #[test]
    fn camera_defaults_to_the_first_device() {
        let args = Args::try_parse_from(["xeneth-capture"]).unwrap();
        assert_eq!(args.camera, DEFAULT_CAMERA);
        assert_eq!(args.recapture_every, DEFAULT_RECAPTURE_THRESHOLD);
        assert_eq!(args.max_frames, None);
    }

    #[test]
    fn failures_are_shown_with_their_error_code() {
        let busy = Error::from(ErrorCode::Busy);
        let save = Error::from(ErrorCode::SaveError);
        let path = Path::new("frames/7.png");

        let failures = [
            CaptureEvent::ConfigurationFailed(&busy),
            CaptureEvent::TemperatureFailed {
                frame_number: 7,
                error: &busy,
            },
            CaptureEvent::SaveFailed {
                frame_number: 7,
                path,
                error: &save,
            },
            CaptureEvent::Recapture {
                frame_number: 7,
                error: Some(&busy),
            },
        ];
        for event in &failures {
            let message = event_message(event).unwrap();
            assert!(message.contains("errorCode"), "{message}");
        }
        assert!(event_message(&failures[2]).unwrap().contains("10009"));
        assert!(event_message(&failures[1]).unwrap().contains("10011"));
    }

    #[test]
    fn successful_restart_is_silent() {
        let event = CaptureEvent::Recapture {
            frame_number: 100,
            error: None,
        };
        assert_eq!(event_message(&event), None);
    }
}
