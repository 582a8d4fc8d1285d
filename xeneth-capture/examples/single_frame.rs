use std::path::Path;

use xeneth_capture::{
    CameraSession, FrameBuffer, FrameType, GetFrameFlags, SaveDataFlags, XenethCamera,
};

pub fn main() {
    let mut camera = XenethCamera::open("cam://0").expect("opening camera");

    println!("camera configuration:\n{}", camera.configuration().expect("reading configuration"));
    println!("temperature: {:?}", camera.temperature());

    camera.start_capture().expect("starting capture");

    let mut buffer = FrameBuffer::new(camera.frame_size());
    camera
        .get_frame(FrameType::Native, GetFrameFlags::BLOCKING, &mut buffer)
        .expect("getting frame");

    camera
        .save_data(Path::new("camera_frame.png"), SaveDataFlags::FORCE_16)
        .expect("saving to file failed");

    camera.close().unwrap();
}
