//! Property-based integration tests for the provider failure detector.
//!
//! A random sequence of call outcomes is replayed against the meter and
//! compared with a straightforward model of the edge-triggered alert.

use std::sync::Arc;

use proptest::prelude::*;
use autofill_core::constants::FAILURE_ALERT_THRESHOLD;
use autofill_core::telemetry::{CallMeter, InMemoryCallLog, MemoryAlertSink};

// =============================================================================
// Generators
// =============================================================================

/// Status codes a provider call can be recorded with.
fn arb_status() -> impl Strategy<Value = u16> {
    prop_oneof![Just(200u16), Just(404u16), Just(429u16), Just(500u16)]
}

/// Outcomes spread over a few provider keys.
fn arb_outcomes() -> impl Strategy<Value = Vec<(usize, u16)>> {
    proptest::collection::vec((0usize..3, arb_status()), 0..60)
}

fn meter() -> CallMeter {
    CallMeter::new(
        Arc::new(InMemoryCallLog::new()),
        Arc::new(MemoryAlertSink::new()),
    )
}

const KEYS: [&str; 3] = ["plate_registry", "ademe", "mock"];

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Alerts fire exactly when a key's consecutive failure count reaches the threshold.
    #[test]
    fn prop_alert_fires_on_threshold_crossing(outcomes in arb_outcomes()) {
        let meter = meter();
        let mut model = [0u32; 3];

        for (key, status) in outcomes {
            let fired = meter.record_status(KEYS[key], status);
            if status >= 400 {
                model[key] += 1;
            } else {
                model[key] = 0;
            }
            prop_assert_eq!(fired, status >= 400 && model[key] == FAILURE_ALERT_THRESHOLD);
        }

        for (key, expected) in model.iter().enumerate() {
            prop_assert_eq!(meter.consecutive_failures(KEYS[key]), *expected);
        }
    }

    /// Between two successes at most one alert fires for a key.
    #[test]
    fn prop_at_most_one_alert_per_failure_streak(streak in 0usize..20) {
        let meter = meter();
        let fired = (0..streak)
            .filter(|_| meter.record_status("ademe", 503))
            .count();

        let expected = usize::from(streak >= FAILURE_ALERT_THRESHOLD as usize);
        prop_assert_eq!(fired, expected);

        prop_assert!(!meter.record_status("ademe", 200));
        prop_assert_eq!(meter.consecutive_failures("ademe"), 0);
    }
}
