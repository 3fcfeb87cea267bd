// src/pipeline/pacing.rs

//! Request pacing between units of pipeline work.
//!
//! A `Pacer` owes a pause after each processed unit: an unconditional
//! per-unit delay plus a longer cooldown after every Nth unit. This is
//! a coarse safeguard against the upstream API's rate limit, not a
//! precise token bucket; the cadence (every 5 pages, every 20 contacts)
//! is the observable contract.

use std::time::Duration;

use crate::models::SyncConfig;

/// Fixed-cadence pacing policy.
#[derive(Debug, Clone)]
pub struct Pacer {
    per_unit: Duration,
    cooldown_every: u64,
    cooldown: Duration,
}

impl Pacer {
    pub fn new(per_unit_ms: u64, cooldown_every: u64, cooldown_ms: u64) -> Self {
        Self {
            per_unit: Duration::from_millis(per_unit_ms),
            cooldown_every,
            cooldown: Duration::from_millis(cooldown_ms),
        }
    }

    /// Pacing for contact pages: no per-page delay, cooldown every Nth page.
    pub fn for_pages(config: &SyncConfig) -> Self {
        Self::new(0, config.page_cooldown_every, config.page_cooldown_ms)
    }

    /// Pacing for the per-contact task fan-out: delay after every contact,
    /// extra cooldown every Nth.
    pub fn for_contacts(config: &SyncConfig) -> Self {
        Self::new(
            config.contact_delay_ms,
            config.contact_cooldown_every,
            config.contact_cooldown_ms,
        )
    }

    /// Pause owed after finishing unit number `count` (1-based).
    pub fn delay_after(&self, count: u64) -> Option<Duration> {
        let mut total = self.per_unit;
        if self.cooldown_every > 0 && count % self.cooldown_every == 0 {
            total += self.cooldown;
        }
        (!total.is_zero()).then_some(total)
    }

    /// Sleep for the pause owed after unit number `count`, if any.
    pub async fn pause_after(&self, count: u64) {
        if let Some(delay) = self.delay_after(count) {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_cadence_every_fifth() {
        let pacer = Pacer::new(0, 5, 1000);
        assert_eq!(pacer.delay_after(1), None);
        assert_eq!(pacer.delay_after(4), None);
        assert_eq!(pacer.delay_after(5), Some(Duration::from_millis(1000)));
        assert_eq!(pacer.delay_after(6), None);
        assert_eq!(pacer.delay_after(10), Some(Duration::from_millis(1000)));
    }

    #[test]
    fn test_contact_cadence_every_twentieth_plus_base_delay() {
        let pacer = Pacer::new(300, 20, 1000);
        assert_eq!(pacer.delay_after(1), Some(Duration::from_millis(300)));
        assert_eq!(pacer.delay_after(19), Some(Duration::from_millis(300)));
        assert_eq!(pacer.delay_after(20), Some(Duration::from_millis(1300)));
        assert_eq!(pacer.delay_after(21), Some(Duration::from_millis(300)));
        assert_eq!(pacer.delay_after(40), Some(Duration::from_millis(1300)));
    }

    #[test]
    fn test_zero_policy_never_pauses() {
        let pacer = Pacer::new(0, 5, 0);
        assert_eq!(pacer.delay_after(5), None);
    }

    #[test]
    fn test_defaults_wire_through_config() {
        let config = SyncConfig::default();
        let pages = Pacer::for_pages(&config);
        let contacts = Pacer::for_contacts(&config);
        assert_eq!(pages.delay_after(5), Some(Duration::from_millis(1000)));
        assert_eq!(contacts.delay_after(3), Some(Duration::from_millis(300)));
    }
}
