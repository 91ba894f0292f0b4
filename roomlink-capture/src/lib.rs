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

//! Capture lifecycle adapter for the roomlink stack.
//!
//! [`CaptureLifecycleAdapter`] sits between a video pipeline and a platform
//! [`CaptureDelegate`], driving the delegate through a strict state machine
//! (`Idle -> Starting -> Running | Failed`, any started state `-> Stopped`,
//! `Stopped -> Starting` on restart) and converting between frame intervals
//! and frames per second at the boundary.
//!
//! The adapter is single-thread affine: all control methods must run on one
//! logical thread, enforced by assertion rather than locking. The thread
//! identity is detached at construction and claimed by the first caller,
//! because the adapter is typically constructed on one thread and driven
//! from another.

pub mod adapter;
pub mod constraints;
pub mod delegate;
pub mod format;
pub mod format_adapter;
pub mod thread_checker;

pub use adapter::{CaptureError, CaptureLifecycleAdapter, CaptureState};
pub use constraints::VideoConstraints;
pub use delegate::CaptureDelegate;
pub use format::{fps_to_interval, interval_to_fps, CaptureFormat, PixelLayout};
pub use format_adapter::FormatAdapter;
pub use thread_checker::ThreadChecker;
