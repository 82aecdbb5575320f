//! Injectable setup failures for exercising backend-unavailable handling.
//!
//! Backends consult a `SetupFault` from `setup()`; production wiring uses
//! `NoFaults`, demos and tests can plug in `RandomFaults` or `AlwaysFail`.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Decides whether a single `setup()` call should fail.
pub trait SetupFault: Send + Sync {
    /// Returns the failure message to report, or `None` to proceed.
    fn check(&self) -> Option<String>;
}

/// Never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFaults;

impl SetupFault for NoFaults {
    fn check(&self) -> Option<String> {
        None
    }
}

/// Always fails with a fixed message.
#[derive(Debug, Clone)]
pub struct AlwaysFail(pub String);

impl Default for AlwaysFail {
    fn default() -> Self {
        Self("backend unavailable".to_string())
    }
}

impl SetupFault for AlwaysFail {
    fn check(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Fails roughly once every `one_in` calls.
#[derive(Debug)]
pub struct RandomFaults {
    one_in: u32,
    rng: Mutex<StdRng>,
}

impl RandomFaults {
    /// `one_in` of 0 or 1 means every call fails.
    pub fn new(one_in: u32) -> Self {
        Self {
            one_in,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic sequence for tests.
    pub fn seeded(one_in: u32, seed: u64) -> Self {
        Self {
            one_in,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl SetupFault for RandomFaults {
    fn check(&self) -> Option<String> {
        if self.one_in <= 1 {
            return Some("random error".to_string());
        }
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        (rng.gen_range(0..self.one_in) == 0).then(|| "random error".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_faults_never_fails() {
        assert!((0..100).all(|_| NoFaults.check().is_none()));
    }

    #[test]
    fn always_fail_reports_message() {
        assert_eq!(AlwaysFail::default().check().as_deref(), Some("backend unavailable"));
    }

    #[test]
    fn random_faults_fail_sometimes() {
        let faults = RandomFaults::seeded(10, 7);
        let failures = (0..1000).filter(|_| faults.check().is_some()).count();
        assert!(failures > 0, "expected at least one injected failure");
        assert!(failures < 1000, "expected at least one success");
    }

    #[test]
    fn one_in_one_always_fails() {
        let faults = RandomFaults::new(1);
        assert_eq!(faults.check().as_deref(), Some("random error"));
    }
}
