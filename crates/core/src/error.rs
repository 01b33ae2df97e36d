//! Error types shared by every landing-motion component.

use thiserror::Error;

/// Errors produced by component construction and operation.
#[derive(Debug, Error, PartialEq)]
pub enum MotionError {
    /// A viewport extent was negative, NaN or infinite.
    #[error("invalid viewport: {width}x{height} (extents must be finite and non-negative)")]
    InvalidViewport { width: f64, height: f64 },

    /// A carousel was built from an empty item list.
    #[error("carousel requires at least one item")]
    EmptyCarousel,

    /// `go_to` was called with an index outside the item list.
    #[error("slide index {index} out of range for carousel of {len} items")]
    SlideOutOfRange { index: usize, len: usize },

    /// A params object could not be decoded into a component config.
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// A component name was not recognised by the registry.
    #[error("unknown component: {0}")]
    UnknownComponent(String),

    /// Snapshot or file output failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for MotionError {
    fn from(e: serde_json::Error) -> Self {
        MotionError::InvalidParams(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_viewport_reports_both_extents() {
        let msg = MotionError::InvalidViewport {
            width: -3.0,
            height: 600.0,
        }
        .to_string();
        assert!(msg.contains("-3"), "missing width in: {msg}");
        assert!(msg.contains("600"), "missing height in: {msg}");
    }

    #[test]
    fn slide_out_of_range_includes_index_and_len() {
        let msg = MotionError::SlideOutOfRange { index: 7, len: 3 }.to_string();
        assert!(msg.contains('7') && msg.contains('3'), "got: {msg}");
    }

    #[test]
    fn unknown_component_includes_name() {
        let msg = MotionError::UnknownComponent("marquee".into()).to_string();
        assert!(msg.contains("marquee"));
    }

    #[test]
    fn serde_error_becomes_invalid_params() {
        let err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        assert!(matches!(
            MotionError::from(err),
            MotionError::InvalidParams(_)
        ));
    }

    #[test]
    fn motion_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + std::error::Error>() {}
        assert_send_sync::<MotionError>();
    }
}
