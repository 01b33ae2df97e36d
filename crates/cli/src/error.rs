//! Failures of a `landing-motion` invocation and the exit code each maps to.
//!
//! | code | meaning |
//! |------|---------|
//! | 2    | bad flags, `--pointer` or `--hover` syntax (reported by clap) |
//! | 10   | a component rejected its configuration or viewport |
//! | 11   | the PNG snapshot could not be written |
//! | 12   | `--params` is not a JSON document |
//! | 13   | the report could not be encoded as JSON |

use landing_motion_core::MotionError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// Rejected by a component: bad params values, viewport, empty carousel.
    Motion(MotionError),
    /// Snapshot output failed.
    Snapshot(String),
    /// `--params` did not parse. Carries the flag's raw text.
    Params { raw: String, source: serde_json::Error },
    /// Report encoding failed.
    Report(serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Motion(_) => 10,
            CliError::Snapshot(_) => 11,
            CliError::Params { .. } => 12,
            CliError::Report(_) => 13,
        }
    }

    /// Machine-readable form printed under `--json`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.to_string(),
            "exit_code": self.exit_code(),
        })
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Motion(e) => write!(f, "{e}"),
            CliError::Snapshot(msg) => write!(f, "cannot write snapshot: {msg}"),
            CliError::Params { raw, source } => {
                write!(f, "--params '{raw}' is not valid JSON: {source}")
            }
            CliError::Report(e) => write!(f, "cannot encode report: {e}"),
        }
    }
}

impl From<MotionError> for CliError {
    fn from(e: MotionError) -> Self {
        match e {
            MotionError::Io(msg) => CliError::Snapshot(msg),
            other => CliError::Motion(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Report(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err()
    }

    #[test]
    fn each_failure_has_its_own_exit_code() {
        let codes = [
            CliError::Motion(MotionError::EmptyCarousel).exit_code(),
            CliError::Snapshot("disk full".into()).exit_code(),
            CliError::Params {
                raw: "{invalid".into(),
                source: json_error(),
            }
            .exit_code(),
            CliError::Report(json_error()).exit_code(),
        ];
        assert_eq!(codes, [10, 11, 12, 13]);
    }

    #[test]
    fn motion_io_becomes_a_snapshot_failure() {
        let err = CliError::from(MotionError::Io("disk full".into()));
        assert_eq!(err.exit_code(), 11);
        assert_eq!(err.to_string(), "cannot write snapshot: disk full");
    }

    #[test]
    fn viewport_rejection_stays_a_motion_error() {
        let err = CliError::from(MotionError::InvalidViewport {
            width: 4.0e9,
            height: 4.0e9,
        });
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("invalid viewport"));
    }

    #[test]
    fn params_message_quotes_the_flag() {
        let err = CliError::Params {
            raw: "{invalid".into(),
            source: json_error(),
        };
        assert!(err.to_string().starts_with("--params '{invalid' is not valid JSON"));
    }

    #[test]
    fn json_form_carries_code_and_message() {
        let j = CliError::Motion(MotionError::UnknownComponent("marquee".into())).to_json();
        assert_eq!(j["exit_code"], 10);
        assert_eq!(j["error"], "unknown component: marquee");
    }
}
