//! Minimum-interval gate for high-frequency event handlers.
//!
//! Each use site owns its own [`Throttle`]; nothing is shared between
//! instances. Time is passed in explicitly by the caller.

/// Accepts a call only if `min_interval_ms` has elapsed since the last
/// accepted call. The first call is always accepted.
#[derive(Debug, Clone)]
pub struct Throttle {
    min_interval_ms: f64,
    last_accepted: Option<f64>,
}

impl Throttle {
    pub fn new(min_interval_ms: f64) -> Self {
        Self {
            min_interval_ms,
            last_accepted: None,
        }
    }

    /// Returns true and records `now` if the call passes the gate.
    pub fn accept(&mut self, now: f64) -> bool {
        match self.last_accepted {
            Some(last) if now - last < self.min_interval_ms => false,
            _ => {
                self.last_accepted = Some(now);
                true
            }
        }
    }

    /// Forgets the last accepted call so the next one passes.
    pub fn reset(&mut self) {
        self.last_accepted = None;
    }

    pub fn min_interval_ms(&self) -> f64 {
        self.min_interval_ms
    }

    /// Wraps `callback` behind this gate.
    pub fn wrap<F>(self, callback: F) -> Throttled<F> {
        Throttled {
            gate: self,
            callback,
        }
    }
}

/// A callback that drops invocations arriving too soon after the last
/// accepted one.
#[derive(Debug, Clone)]
pub struct Throttled<F> {
    gate: Throttle,
    callback: F,
}

impl<F> Throttled<F> {
    /// Invokes the callback if the gate accepts `now`. Dropped calls return `None`.
    pub fn call<A, R>(&mut self, now: f64, arg: A) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        if self.gate.accept(now) {
            Some((self.callback)(arg))
        } else {
            None
        }
    }

    pub fn gate(&self) -> &Throttle {
        &self.gate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_is_accepted() {
        let mut t = Throttle::new(100.0);
        assert!(t.accept(0.0));
    }

    #[test]
    fn calls_inside_interval_are_dropped() {
        let mut t = Throttle::new(100.0);
        assert!(t.accept(1000.0));
        assert!(!t.accept(1050.0));
        assert!(!t.accept(1099.9));
        assert!(t.accept(1100.0));
    }

    #[test]
    fn interval_is_measured_from_last_accepted_call() {
        let mut t = Throttle::new(100.0);
        assert!(t.accept(0.0));
        assert!(!t.accept(90.0));
        // 90 was dropped, so 100 is measured from 0 and passes.
        assert!(t.accept(100.0));
        assert!(!t.accept(150.0));
    }

    #[test]
    fn reset_reopens_the_gate() {
        let mut t = Throttle::new(100.0);
        assert!(t.accept(0.0));
        t.reset();
        assert!(t.accept(10.0));
    }

    #[test]
    fn instances_do_not_share_state() {
        let mut a = Throttle::new(100.0);
        let mut b = Throttle::new(100.0);
        assert!(a.accept(0.0));
        assert!(b.accept(5.0));
    }

    #[test]
    fn throttled_callback_only_runs_when_accepted() {
        let mut seen = Vec::new();
        {
            let mut f = Throttle::new(50.0).wrap(|x: i32| seen.push(x));
            assert_eq!(f.call(0.0, 1), Some(()));
            assert_eq!(f.call(10.0, 2), None);
            assert_eq!(f.call(60.0, 3), Some(()));
        }
        assert_eq!(seen, vec![1, 3]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn accepted_calls_are_at_least_interval_apart(
                interval in 1.0_f64..500.0,
                mut times in proptest::collection::vec(0.0_f64..10_000.0, 1..64),
            ) {
                times.sort_by(f64::total_cmp);
                let mut t = Throttle::new(interval);
                let accepted: Vec<f64> = times.into_iter().filter(|&now| t.accept(now)).collect();
                for pair in accepted.windows(2) {
                    prop_assert!(pair[1] - pair[0] >= interval);
                }
            }
        }
    }
}
