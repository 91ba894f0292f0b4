use crate::format::CaptureFormat;
use tracing::debug;

/// Holds the pipeline's most recent output-format constraint and clamps
/// capture formats against it. The lifecycle adapter forwards
/// `on_output_format_request` here after converting fps to an interval;
/// downstream throttling consults [`adapt`](Self::adapt) per frame batch.
#[derive(Debug, Default)]
pub struct FormatAdapter {
    output_request: Option<CaptureFormat>,
}

impl FormatAdapter {
    pub fn new() -> Self {
        Self {
            output_request: None,
        }
    }

    pub fn on_output_format_request(&mut self, format: CaptureFormat) {
        debug!(%format, "output format request");
        self.output_request = Some(format);
    }

    pub fn output_request(&self) -> Option<&CaptureFormat> {
        self.output_request.as_ref()
    }

    /// Clamps `capture` to the requested constraint: resolution capped at
    /// the request, frame interval no shorter than requested. Identity when
    /// no request has arrived.
    pub fn adapt(&self, capture: &CaptureFormat) -> CaptureFormat {
        match &self.output_request {
            None => capture.clone(),
            Some(request) => CaptureFormat::new(
                capture.width.min(request.width),
                capture.height.min(request.height),
                capture.interval.max(request.interval),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fps_to_interval;

    #[test]
    fn adapt_is_identity_without_a_request() {
        let adapter = FormatAdapter::new();
        let capture = CaptureFormat::from_fps(1280, 720, 30);
        assert_eq!(adapter.adapt(&capture), capture);
    }

    #[test]
    fn adapt_caps_resolution_and_rate() {
        let mut adapter = FormatAdapter::new();
        adapter.on_output_format_request(CaptureFormat::from_fps(640, 480, 15));

        let capture = CaptureFormat::from_fps(1280, 720, 30);
        let adapted = adapter.adapt(&capture);
        assert_eq!((adapted.width, adapted.height), (640, 480));
        assert_eq!(adapted.interval, fps_to_interval(15));
    }

    #[test]
    fn latest_request_wins() {
        let mut adapter = FormatAdapter::new();
        adapter.on_output_format_request(CaptureFormat::from_fps(640, 480, 15));
        adapter.on_output_format_request(CaptureFormat::from_fps(1920, 1080, 60));
        assert_eq!(
            adapter.output_request(),
            Some(&CaptureFormat::from_fps(1920, 1080, 60))
        );
    }
}
