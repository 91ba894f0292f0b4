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

use crate::format::CaptureFormat;

/// The platform component that actually drives the physical camera.
///
/// The adapter is the delegate's callback target: once the platform start
/// completes, the delegate's completion path must invoke
/// [`CaptureLifecycleAdapter::on_capturer_started`] with the outcome, and
/// must deliver it on the adapter's owning thread. The adapter trusts that
/// contract and does not re-check it beyond its usual affinity assertion.
///
/// [`CaptureLifecycleAdapter::on_capturer_started`]:
/// crate::adapter::CaptureLifecycleAdapter::on_capturer_started
pub trait CaptureDelegate: Send {
    /// The formats the underlying device can deliver. Read once at adapter
    /// construction.
    fn supported_formats(&self) -> Vec<CaptureFormat>;

    /// Begin capturing at `format`. Asynchronous: completion is reported
    /// through `on_capturer_started`, not a return value.
    fn start(&mut self, format: &CaptureFormat);

    /// Stop capturing. Fire and forget; no completion callback is awaited.
    fn stop(&mut self);
}
