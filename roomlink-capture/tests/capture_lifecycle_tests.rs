/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! End-to-end lifecycle tests driving the adapter the way a pipeline
//! would, including from a thread other than the constructing one.

use roomlink_capture::format::dimensions::{CIF, HD_720P, QCIF, VGA};
use roomlink_capture::{
    CaptureDelegate, CaptureError, CaptureFormat, CaptureLifecycleAdapter, CaptureState,
    VideoConstraints,
};
use std::sync::{Arc, Mutex};

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Fake capturer advertising a fixed format list, in the shape of a real
/// device's (every resolution at 30fps plus a couple of low-rate modes).
struct FakeVideoCapturer {
    formats: Vec<CaptureFormat>,
    log: Arc<Mutex<Vec<String>>>,
}

impl FakeVideoCapturer {
    fn new(formats: Vec<CaptureFormat>) -> (Self, Arc<Mutex<Vec<String>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                formats,
                log: log.clone(),
            },
            log,
        )
    }
}

impl CaptureDelegate for FakeVideoCapturer {
    fn supported_formats(&self) -> Vec<CaptureFormat> {
        self.formats.clone()
    }

    fn start(&mut self, format: &CaptureFormat) {
        self.log.lock().unwrap().push(format!("start {format}"));
    }

    fn stop(&mut self) {
        self.log.lock().unwrap().push("stop".to_string());
    }
}

fn device_formats() -> Vec<CaptureFormat> {
    vec![
        CaptureFormat::from_fps(1920, 1080, 30),
        CaptureFormat::from_fps(HD_720P.0, HD_720P.1, 30),
        CaptureFormat::from_fps(VGA.0, VGA.1, 30),
        CaptureFormat::from_fps(VGA.0, VGA.1, 15),
        CaptureFormat::from_fps(CIF.0, CIF.1, 30),
        CaptureFormat::from_fps(QCIF.0, QCIF.1, 15),
    ]
}

#[test]
fn full_lifecycle_from_a_claiming_thread() {
    init_tracing();
    let (delegate, log) = FakeVideoCapturer::new(device_formats());
    let adapter = CaptureLifecycleAdapter::new(Box::new(delegate));

    // The adapter is constructed here but driven from the capture thread,
    // which claims the detached affinity token on first use.
    let handle = std::thread::spawn(move || {
        let mut adapter = adapter;
        let format = CaptureFormat::from_fps(VGA.0, VGA.1, 30);
        assert_eq!(adapter.start(format), CaptureState::Starting);
        adapter.on_capturer_started(true);
        assert_eq!(adapter.state(), CaptureState::Running);
        adapter.stop();
        assert_eq!(adapter.state(), CaptureState::Stopped);

        // Restart after stop.
        adapter.start(CaptureFormat::from_fps(CIF.0, CIF.1, 30));
        adapter.on_capturer_started(true);
        adapter.stop();
    });
    handle.join().unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "start 640x480@30fps",
            "stop",
            "start 352x288@30fps",
            "stop",
        ]
    );
}

#[test]
fn constraint_selection_over_device_formats() {
    init_tracing();
    let (delegate, _log) = FakeVideoCapturer::new(device_formats());
    let adapter = CaptureLifecycleAdapter::new(Box::new(delegate));

    let constraints = VideoConstraints::new(VGA, HD_720P, 24, 30);
    let chosen = adapter.closest_supported_format(&constraints).unwrap();
    assert_eq!(chosen, CaptureFormat::from_fps(VGA.0, VGA.1, 30));

    let impossible = VideoConstraints::new((4000, 3000), (8000, 6000), 120, 240);
    assert_eq!(
        adapter.closest_supported_format(&impossible),
        Err(CaptureError::NoMatchingFormat)
    );
}

#[test]
fn output_format_request_throttles_downstream() {
    init_tracing();
    let (delegate, _log) = FakeVideoCapturer::new(device_formats());
    let mut adapter = CaptureLifecycleAdapter::new(Box::new(delegate));

    adapter.start(CaptureFormat::from_fps(HD_720P.0, HD_720P.1, 30));
    adapter.on_capturer_started(true);
    adapter.on_output_format_request(VGA.0, VGA.1, 15);

    let adapted = adapter
        .format_adapter()
        .adapt(adapter.capture_format().unwrap());
    assert_eq!((adapted.width, adapted.height), VGA);
    assert_eq!(adapted.fps(), 15);

    adapter.stop();
}
