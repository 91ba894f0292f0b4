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

//! The capture lifecycle state machine.

use crate::constraints::VideoConstraints;
use crate::delegate::CaptureDelegate;
use crate::format::{fps_to_interval, interval_to_fps, CaptureFormat, PixelLayout};
use crate::format_adapter::FormatAdapter;
use crate::thread_checker::ThreadChecker;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CaptureError {
    #[error("no supported capture format satisfies the requested constraints")]
    NoMatchingFormat,
}

/// Capture state as reported to the pipeline. Owned exclusively by the
/// adapter; mutated only by its own methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Starting,
    Running,
    Failed,
    Stopped,
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureState::Idle => write!(f, "idle"),
            CaptureState::Starting => write!(f, "starting"),
            CaptureState::Running => write!(f, "running"),
            CaptureState::Failed => write!(f, "failed"),
            CaptureState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Drives a [`CaptureDelegate`] through the capture lifecycle on behalf of
/// a video pipeline.
///
/// `Idle -> Starting` on [`start`](Self::start); `Starting -> Running` or
/// `Starting -> Failed` when the delegate reports back through
/// [`on_capturer_started`](Self::on_capturer_started); any started state
/// `-> Stopped` on [`stop`](Self::stop); `Stopped` is not terminal, a new
/// `start` reinitializes. Start-while-started and stop-while-stopped are
/// caller bugs and fail the process loudly.
///
/// All control methods assert the owning-thread affinity captured (then
/// detached) at construction; the first caller claims it. The delegate
/// callback is trusted to arrive on the same thread, see
/// [`CaptureDelegate`].
pub struct CaptureLifecycleAdapter {
    state: CaptureState,
    capture_format: Option<CaptureFormat>,
    supported_formats: Vec<CaptureFormat>,
    delegate: Box<dyn CaptureDelegate>,
    format_adapter: FormatAdapter,
    thread_checker: ThreadChecker,
    on_state_change: Option<Box<dyn FnMut(CaptureState) + Send>>,
}

impl CaptureLifecycleAdapter {
    pub fn new(delegate: Box<dyn CaptureDelegate>) -> Self {
        let supported_formats = delegate.supported_formats();
        let thread_checker = ThreadChecker::new();
        // Constructed on one thread, driven from another: release the
        // construction thread's claim so the real owner can take it.
        thread_checker.detach();
        Self {
            state: CaptureState::Idle,
            capture_format: None,
            supported_formats,
            delegate,
            format_adapter: FormatAdapter::new(),
            thread_checker,
            on_state_change: None,
        }
    }

    /// Registers the pipeline's state-transition channel. Transitions out
    /// of `stop` and `on_capturer_started` are reported through it; the
    /// synchronous `Starting` result of `start` is not, since `start`
    /// already returns it.
    pub fn set_state_callback(&mut self, callback: impl FnMut(CaptureState) + Send + 'static) {
        assert!(self.thread_checker.is_current(), "called off the capture thread");
        self.on_state_change = Some(Box::new(callback));
    }

    /// Begins capture at `format` and returns `Starting` synchronously.
    /// The delegate resolves the attempt later via `on_capturer_started`.
    pub fn start(&mut self, format: CaptureFormat) -> CaptureState {
        assert!(self.thread_checker.is_current(), "called off the capture thread");
        assert!(
            !self.is_started(),
            "start called while capture is already started"
        );
        let fps = interval_to_fps(format.interval);
        info!(width = format.width, height = format.height, fps, "starting capture");

        self.state = CaptureState::Starting;
        self.delegate.start(&format);
        self.capture_format = Some(format);
        CaptureState::Starting
    }

    /// Stops capture and transitions to `Stopped` synchronously. The
    /// applied format is cleared before the delegate is told to stop.
    pub fn stop(&mut self) {
        assert!(self.thread_checker.is_current(), "called off the capture thread");
        assert!(self.is_started(), "stop called while capture is not started");
        info!("stopping capture");

        self.capture_format = None;
        self.delegate.stop();
        self.set_state(CaptureState::Stopped);
    }

    /// Whether capture has been started and not yet stopped. True across
    /// `Starting`, `Running`, and `Failed`: a failed start still requires a
    /// `stop` before restarting.
    pub fn is_running(&self) -> bool {
        assert!(self.thread_checker.is_current(), "called off the capture thread");
        self.is_started()
    }

    /// Delegate-driven completion of a start attempt. The only path into
    /// `Running` or `Failed`.
    pub fn on_capturer_started(&mut self, success: bool) {
        assert!(self.thread_checker.is_current(), "called off the capture thread");
        let new_state = if success {
            CaptureState::Running
        } else {
            CaptureState::Failed
        };
        debug!(%new_state, "capturer start resolved");
        self.set_state(new_state);
    }

    /// Forwards a re-negotiated output constraint to the format adapter,
    /// converting fps to a frame interval.
    pub fn on_output_format_request(&mut self, width: u32, height: u32, fps: u32) {
        assert!(self.thread_checker.is_current(), "called off the capture thread");
        let format = CaptureFormat::new(width, height, fps_to_interval(fps));
        self.format_adapter.on_output_format_request(format);
    }

    /// Fixed single-element preference.
    pub fn preferred_pixel_layouts(&self) -> Vec<PixelLayout> {
        assert!(self.thread_checker.is_current(), "called off the capture thread");
        vec![PixelLayout::Yv12]
    }

    /// Returns `desired` unchanged. Format selection is delegated entirely
    /// to the platform start call.
    pub fn best_capture_format(&self, desired: &CaptureFormat) -> CaptureFormat {
        desired.clone()
    }

    /// Cheapest delegate-supported format satisfying `constraints`.
    pub fn closest_supported_format(
        &self,
        constraints: &VideoConstraints,
    ) -> Result<CaptureFormat, CaptureError> {
        constraints
            .closest_supported_format(&self.supported_formats)
            .ok_or(CaptureError::NoMatchingFormat)
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// The format applied by the most recent `start`, cleared by `stop`.
    pub fn capture_format(&self) -> Option<&CaptureFormat> {
        self.capture_format.as_ref()
    }

    pub fn supported_formats(&self) -> &[CaptureFormat] {
        &self.supported_formats
    }

    pub fn format_adapter(&self) -> &FormatAdapter {
        &self.format_adapter
    }

    fn is_started(&self) -> bool {
        matches!(
            self.state,
            CaptureState::Starting | CaptureState::Running | CaptureState::Failed
        )
    }

    fn set_state(&mut self, state: CaptureState) {
        self.state = state;
        if let Some(callback) = &mut self.on_state_change {
            callback(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct FakeDelegate {
        started_with: Option<CaptureFormat>,
        start_calls: usize,
        stop_calls: usize,
    }

    impl CaptureDelegate for FakeDelegate {
        fn supported_formats(&self) -> Vec<CaptureFormat> {
            vec![
                CaptureFormat::from_fps(640, 480, 30),
                CaptureFormat::from_fps(1280, 720, 30),
            ]
        }

        fn start(&mut self, format: &CaptureFormat) {
            self.start_calls += 1;
            self.started_with = Some(format.clone());
        }

        fn stop(&mut self) {
            self.stop_calls += 1;
        }
    }

    fn adapter() -> CaptureLifecycleAdapter {
        CaptureLifecycleAdapter::new(Box::<FakeDelegate>::default())
    }

    #[test]
    fn start_resolves_to_running_then_stop_clears_format() {
        let mut adapter = adapter();
        assert_eq!(adapter.state(), CaptureState::Idle);

        let format = CaptureFormat::from_fps(640, 480, 30);
        assert_eq!(adapter.start(format.clone()), CaptureState::Starting);
        assert_eq!(adapter.state(), CaptureState::Starting);
        assert_eq!(adapter.capture_format(), Some(&format));
        assert!(adapter.is_running());

        adapter.on_capturer_started(true);
        assert_eq!(adapter.state(), CaptureState::Running);

        adapter.stop();
        assert_eq!(adapter.state(), CaptureState::Stopped);
        assert_eq!(adapter.capture_format(), None);
        assert!(!adapter.is_running());
    }

    #[test]
    fn failed_start_still_requires_stop_before_restart() {
        let mut adapter = adapter();
        adapter.start(CaptureFormat::from_fps(640, 480, 30));
        adapter.on_capturer_started(false);
        assert_eq!(adapter.state(), CaptureState::Failed);
        assert!(adapter.is_running());

        adapter.stop();
        assert_eq!(adapter.state(), CaptureState::Stopped);

        // Stopped is not terminal.
        assert_eq!(
            adapter.start(CaptureFormat::from_fps(640, 480, 30)),
            CaptureState::Starting
        );
    }

    #[test]
    fn state_transitions_are_reported_through_the_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut adapter = adapter();
        let sink = seen.clone();
        adapter.set_state_callback(move |state| sink.lock().unwrap().push(state));

        adapter.start(CaptureFormat::from_fps(640, 480, 30));
        adapter.on_capturer_started(true);
        adapter.stop();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![CaptureState::Running, CaptureState::Stopped]
        );
    }

    #[test]
    #[should_panic(expected = "start called while capture is already started")]
    fn start_while_started_is_fatal() {
        let mut adapter = adapter();
        adapter.start(CaptureFormat::from_fps(640, 480, 30));
        adapter.start(CaptureFormat::from_fps(640, 480, 30));
    }

    #[test]
    #[should_panic(expected = "stop called while capture is not started")]
    fn stop_while_not_started_is_fatal() {
        let mut adapter = adapter();
        adapter.stop();
    }

    #[test]
    fn output_format_request_lands_in_the_format_adapter() {
        let mut adapter = adapter();
        adapter.on_output_format_request(320, 240, 15);
        assert_eq!(
            adapter.format_adapter().output_request(),
            Some(&CaptureFormat::from_fps(320, 240, 15))
        );
    }

    #[test]
    fn preferred_layouts_and_best_format_are_fixed() {
        let adapter = adapter();
        assert_eq!(adapter.preferred_pixel_layouts(), vec![PixelLayout::Yv12]);
        let desired = CaptureFormat::from_fps(1920, 1080, 60);
        assert_eq!(adapter.best_capture_format(&desired), desired);
    }
}
