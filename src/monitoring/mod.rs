//! Scoring metrics
//!
//! Rolling latency window plus lock-free counters. One `RwLock` guards the
//! window; everything else is atomics, so the hot path takes a single lock.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Metrics collector for the scoring path
pub struct ScoreMetrics {
    window_size: usize,
    latencies: RwLock<VecDeque<f64>>,
    total_requests: AtomicU64,
    total_rows: AtomicU64,
    total_errors: AtomicU64,
    start_time: Instant,
}

impl ScoreMetrics {
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            latencies: RwLock::new(VecDeque::with_capacity(window_size)),
            total_requests: AtomicU64::new(0),
            total_rows: AtomicU64::new(0),
            total_errors: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a completed scoring call.
    pub fn record_latency(&self, latency_ms: f64) {
        let mut window = self.latencies.write();
        window.push_back(latency_ms);
        if window.len() > self.window_size {
            window.pop_front();
        }
        drop(window);

        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rows(&self, count: u64) {
        self.total_rows.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.total_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn avg_latency(&self) -> f64 {
        let window = self.latencies.read();
        if window.is_empty() {
            return 0.0;
        }
        window.iter().sum::<f64>() / window.len() as f64
    }

    /// Percentile over the rolling window (e.g. 50.0, 95.0, 99.0).
    pub fn percentile_latency(&self, percentile: f64) -> f64 {
        let window = self.latencies.read();
        if window.is_empty() {
            return 0.0;
        }

        let mut data: Vec<f64> = window.iter().copied().collect();
        let idx = ((percentile / 100.0) * (data.len() - 1) as f64) as usize;
        let idx = idx.min(data.len() - 1);
        data.select_nth_unstable_by(idx, |a, b| {
            a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
        });
        data[idx]
    }

    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(Ordering::Relaxed)
    }

    pub fn total_rows(&self) -> u64 {
        self.total_rows.load(Ordering::Relaxed)
    }

    pub fn total_errors(&self) -> u64 {
        self.total_errors.load(Ordering::Relaxed)
    }

    pub fn uptime_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    pub fn snapshot(&self) -> ScoreStats {
        ScoreStats {
            total_requests: self.total_requests(),
            total_rows: self.total_rows(),
            total_errors: self.total_errors(),
            avg_latency_ms: self.avg_latency(),
            p50_latency_ms: self.percentile_latency(50.0),
            p95_latency_ms: self.percentile_latency(95.0),
            p99_latency_ms: self.percentile_latency(99.0),
            uptime_secs: self.uptime_secs(),
        }
    }
}

impl Default for ScoreMetrics {
    fn default() -> Self {
        Self::new(10_000)
    }
}

/// Point-in-time metrics snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreStats {
    pub total_requests: u64,
    pub total_rows: u64,
    pub total_errors: u64,
    pub avg_latency_ms: f64,
    pub p50_latency_ms: f64,
    pub p95_latency_ms: f64,
    pub p99_latency_ms: f64,
    pub uptime_secs: f64,
}
