// Usage metrics
//
// Lightweight counters for formatting and catalogue lookups

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Session usage metrics
///
/// Uses atomic operations so the counters can be bumped through a shared
/// `Arc` from any task without locking. Logged on shutdown.
#[derive(Debug)]
pub struct Metrics {
    /// Messages passed through the auto-formatter
    pub messages_formatted: AtomicU64,

    /// Job lookups by name
    pub job_lookups: AtomicU64,

    /// Job lookups that found nothing
    pub job_misses: AtomicU64,

    /// Buff lookups by name
    pub buff_lookups: AtomicU64,

    /// Buff lookups that found nothing
    pub buff_misses: AtomicU64,

    /// Settings snapshots handed to the backend
    pub settings_writes: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            messages_formatted: AtomicU64::new(0),
            job_lookups: AtomicU64::new(0),
            job_misses: AtomicU64::new(0),
            buff_lookups: AtomicU64::new(0),
            buff_misses: AtomicU64::new(0),
            settings_writes: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_message_formatted(&self) {
        self.messages_formatted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a job lookup and whether it found anything
    pub fn record_job_lookup(&self, found: bool) {
        self.job_lookups.fetch_add(1, Ordering::Relaxed);
        if !found {
            self.job_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a buff lookup and whether it found anything
    pub fn record_buff_lookup(&self, found: bool) {
        self.buff_lookups.fetch_add(1, Ordering::Relaxed);
        if !found {
            self.buff_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_settings_write(&self) {
        self.settings_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Share of lookups (jobs and buffs together) that found an entry, 0.0 to 1.0
    pub fn lookup_hit_rate(&self) -> f64 {
        let lookups = self.job_lookups.load(Ordering::Relaxed) + self.buff_lookups.load(Ordering::Relaxed);
        let misses = self.job_misses.load(Ordering::Relaxed) + self.buff_misses.load(Ordering::Relaxed);
        if lookups > 0 {
            (lookups - misses) as f64 / lookups as f64
        } else {
            0.0
        }
    }

    pub fn log_summary(&self) {
        tracing::info!("=== Session Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Messages formatted: {}, settings writes: {}",
            self.messages_formatted.load(Ordering::Relaxed),
            self.settings_writes.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Lookups: {} jobs ({} missed), {} buffs ({} missed), hit rate {:.0}%",
            self.job_lookups.load(Ordering::Relaxed),
            self.job_misses.load(Ordering::Relaxed),
            self.buff_lookups.load(Ordering::Relaxed),
            self.buff_misses.load(Ordering::Relaxed),
            self.lookup_hit_rate() * 100.0
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.messages_formatted.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.job_lookups.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.lookup_hit_rate(), 0.0);
    }

    #[test]
    fn test_record_lookups() {
        let metrics = Metrics::new();

        metrics.record_job_lookup(true);
        metrics.record_job_lookup(false);
        metrics.record_buff_lookup(true);
        metrics.record_buff_lookup(true);

        assert_eq!(metrics.job_lookups.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.job_misses.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.buff_lookups.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.buff_misses.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.lookup_hit_rate(), 0.75);
    }

    #[test]
    fn test_formatting_and_write_counters() {
        let metrics = Metrics::new();

        metrics.record_message_formatted();
        metrics.record_message_formatted();
        metrics.record_settings_write();

        assert_eq!(metrics.messages_formatted.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.settings_writes.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_uptime() {
        let metrics = Metrics::new();
        thread::sleep(Duration::from_millis(10));
        assert!(metrics.uptime().as_millis() >= 10);
    }
}
