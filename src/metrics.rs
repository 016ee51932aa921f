//! Generator activity counters

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free counters shared by every generation call
#[derive(Debug, Default)]
pub struct GeneratorMetrics {
    passwords_issued: AtomicU64,
    attempts: AtomicU64,
    collisions: AtomicU64,
    failures: AtomicU64,
}

impl GeneratorMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_passwords_issued(&self) {
        self.passwords_issued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_attempts(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_collisions(&self) {
        self.collisions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_failures(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            passwords_issued: self.passwords_issued.load(Ordering::Relaxed),
            attempts: self.attempts.load(Ordering::Relaxed),
            collisions: self.collisions.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`GeneratorMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub passwords_issued: u64,
    pub attempts: u64,
    pub collisions: u64,
    pub failures: u64,
}

impl MetricsSnapshot {
    /// Share of attempts that hit an already issued password
    pub fn collision_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.collisions as f64 / self.attempts as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let metrics = GeneratorMetrics::new();
        metrics.increment_attempts();
        metrics.increment_attempts();
        metrics.increment_collisions();
        metrics.increment_passwords_issued();

        let stats = metrics.get_stats();
        assert_eq!(stats.attempts, 2);
        assert_eq!(stats.collisions, 1);
        assert_eq!(stats.passwords_issued, 1);
        assert_eq!(stats.failures, 0);
        assert_eq!(stats.collision_rate(), 0.5);
    }

    #[test]
    fn test_empty_collision_rate() {
        assert_eq!(GeneratorMetrics::new().get_stats().collision_rate(), 0.0);
    }
}
