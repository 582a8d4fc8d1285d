use xeneth_capture::{CaptureConfig, CaptureEvent, CaptureLoop, SimulatedCamera};

pub fn main() {
    let dir = std::env::temp_dir().join("xeneth-capture-demo");
    std::fs::create_dir_all(&dir).expect("creating output directory");

    let mut camera = SimulatedCamera::default();
    let config = CaptureConfig::new(&dir, 1).with_max_frames(Some(5));

    let summary = CaptureLoop::new(config).run(&mut camera, |event| match event {
        CaptureEvent::Temperature { celsius, .. } => println!("temperature: {celsius:.2} C"),
        CaptureEvent::Saved { path, .. } => println!("saved {}", path.display()),
        CaptureEvent::Countdown { remaining } => println!("remaining {remaining} seconds"),
        _ => {}
    });

    println!("{} frames in {}", summary.frames, dir.display());
}
