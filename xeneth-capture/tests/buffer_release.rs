//! Kept in its own test binary: FrameBuffer::live_count() is process wide.

mod common;

use common::FakeSession;
use xeneth_capture::{CaptureConfig, CaptureLoop, ErrorCode, FrameBuffer};

fn run(session: &mut FakeSession) {
    let dir = tempfile::tempdir().unwrap();
    CaptureLoop::with_pacer(CaptureConfig::new(dir.path(), 1), || {}).run(session, |_| {});
}

fn assert_released_each_iteration(session: &FakeSession, iterations: usize) {
    let seen = session.live_buffers.borrow();
    let by_call = |call: &str| -> Vec<usize> {
        seen.iter()
            .filter(|(c, _)| *c == call)
            .map(|(_, live)| *live)
            .collect()
    };

    // the scratch buffer exists while the frame is fetched and saved...
    assert_eq!(by_call("get_frame"), vec![1; iterations]);
    assert_eq!(by_call("save_data"), vec![1; iterations]);
    // ...and is gone before the next iteration reads the temperature
    assert_eq!(by_call("temperature"), vec![0; iterations]);
    assert_eq!(FrameBuffer::live_count(), 0);
}

#[test]
fn scratch_buffer_never_outlives_its_iteration() {
    assert_eq!(FrameBuffer::live_count(), 0);

    let mut session = FakeSession::initialized_for(4);
    run(&mut session);
    assert_released_each_iteration(&session, 4);

    let mut session = FakeSession::initialized_for(3);
    session.frame_error = Some(ErrorCode::Timeout);
    run(&mut session);
    assert_released_each_iteration(&session, 3);

    let mut session = FakeSession::initialized_for(3);
    session.frame_error = Some(ErrorCode::Mismatched);
    session.save_error = Some(ErrorCode::SaveError);
    run(&mut session);
    assert_released_each_iteration(&session, 3);
}
