//! The `Component` trait implemented by every interactive engine.
//!
//! The trait is object-safe so the scene registry can hold components as
//! `dyn Component` and introspect them uniformly.

use serde_json::Value;

/// Introspection shared by all landing-page components.
///
/// Behaviour (frame updates, timer ticks, pointer events) lives on each
/// component's own type because the events differ; this trait only exposes
/// what the registry, the CLI and the browser binding need to describe them.
pub trait Component {
    /// Registry name, e.g. `"particles"`.
    fn name(&self) -> &'static str;

    /// Current configuration as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing each parameter's type, default and range.
    fn param_schema(&self) -> Value;

    /// Current runtime state as JSON, for reports and debugging.
    fn state(&self) -> Value {
        Value::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Blinker {
        period_ms: f64,
        on: bool,
    }

    impl Component for Blinker {
        fn name(&self) -> &'static str {
            "blinker"
        }

        fn params(&self) -> Value {
            json!({ "period_ms": self.period_ms })
        }

        fn param_schema(&self) -> Value {
            json!({
                "period_ms": {
                    "type": "number",
                    "default": 500.0,
                    "description": "Blink period"
                }
            })
        }
    }

    #[test]
    fn component_trait_is_object_safe() {
        let c: Box<dyn Component> = Box::new(Blinker {
            period_ms: 250.0,
            on: false,
        });
        assert_eq!(c.name(), "blinker");
        assert_eq!(c.params()["period_ms"], 250.0);
    }

    #[test]
    fn default_state_is_null() {
        let c = Blinker {
            period_ms: 500.0,
            on: true,
        };
        assert!(c.on);
        assert!(c.state().is_null());
    }

    #[test]
    fn schema_entries_have_type_and_default() {
        let c = Blinker {
            period_ms: 500.0,
            on: false,
        };
        let schema = c.param_schema();
        assert_eq!(schema["period_ms"]["type"], "number");
        assert!(schema["period_ms"].get("default").is_some());
    }
}
