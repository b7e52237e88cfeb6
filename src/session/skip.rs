use crate::config::SessionConfig;

/// Lifecycle of the lead-in skip affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipState {
    /// Never offered (lead-in too short or skip disabled).
    Withheld,
    Available,
    /// Invoked; permanently disabled.
    Consumed,
    /// Live play time reached the threshold before it was invoked.
    Expired,
}

/// One-shot fast-forward past a long lead-in before the first event.
///
/// Offered only when the first scheduled event sits at or beyond the
/// cutoff; consuming it seeks to `first - cutoff - fade`, and it disables
/// itself on consumption or once play time reaches `first - cutoff`,
/// whichever comes first.
#[derive(Debug)]
pub struct SkipController {
    first_event_us: i64,
    cutoff_us: i64,
    fade_us: i64,
    state: SkipState,
}

impl SkipController {
    pub fn new(first_event_us: Option<i64>, config: &SessionConfig) -> Self {
        let first = first_event_us.unwrap_or(0);
        let state = if config.skip_enabled && first >= config.skip_cutoff_us {
            SkipState::Available
        } else {
            SkipState::Withheld
        };
        Self {
            first_event_us: first,
            cutoff_us: config.skip_cutoff_us,
            fade_us: config.skip_fade_us,
            state,
        }
    }

    pub fn is_available(&self) -> bool {
        self.state == SkipState::Available
    }

    /// Whether the affordance was ever offered.
    pub fn was_offered(&self) -> bool {
        self.state != SkipState::Withheld
    }

    /// Play time past which the affordance expires.
    pub fn threshold_us(&self) -> i64 {
        self.first_event_us - self.cutoff_us
    }

    /// Seek target of the skip, clamped so a first event sitting right at
    /// the cutoff never produces a backwards-past-zero seek.
    pub fn target_us(&self) -> i64 {
        (self.first_event_us - self.cutoff_us - self.fade_us).max(0)
    }

    /// Expire the affordance once live play time reaches the threshold.
    /// Returns true on the tick it expires.
    pub fn update(&mut self, now_us: i64) -> bool {
        if self.state == SkipState::Available && now_us >= self.threshold_us() {
            self.state = SkipState::Expired;
            return true;
        }
        false
    }

    /// Invoke the affordance. Returns the seek target on first use, None
    /// thereafter.
    pub fn consume(&mut self) -> Option<i64> {
        if self.state != SkipState::Available {
            return None;
        }
        self.state = SkipState::Consumed;
        Some(self.target_us())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Offering
    // =========================================================================

    #[test]
    fn short_lead_in_is_never_offered() {
        // First event at 500ms, under the 3000ms cutoff.
        let skip = SkipController::new(Some(500_000), &SessionConfig::default());
        assert!(!skip.is_available());
        assert!(!skip.was_offered());
    }

    #[test]
    fn long_lead_in_is_offered() {
        let skip = SkipController::new(Some(5_000_000), &SessionConfig::default());
        assert!(skip.is_available());
        assert_eq!(skip.target_us(), 1_700_000);
        assert_eq!(skip.threshold_us(), 2_000_000);
    }

    #[test]
    fn disabled_by_config() {
        let config = SessionConfig {
            skip_enabled: false,
            ..SessionConfig::default()
        };
        let skip = SkipController::new(Some(10_000_000), &config);
        assert!(!skip.was_offered());
    }

    #[test]
    fn empty_schedule_is_never_offered() {
        let skip = SkipController::new(None, &SessionConfig::default());
        assert!(!skip.was_offered());
    }

    // =========================================================================
    // Consumption and expiry
    // =========================================================================

    #[test]
    fn consume_is_one_shot() {
        // First event at 5000ms: seek to 5000 - 3000 - 300 = 1700ms.
        let mut skip = SkipController::new(Some(5_000_000), &SessionConfig::default());
        assert_eq!(skip.consume(), Some(1_700_000));
        assert!(!skip.is_available());
        assert_eq!(skip.consume(), None);
    }

    #[test]
    fn boundary_lead_in_clamps_target_at_zero() {
        // First event exactly at the cutoff: still offered, but the seek
        // target clamps to 0 instead of going negative.
        let mut skip = SkipController::new(Some(3_000_000), &SessionConfig::default());
        assert!(skip.is_available());
        assert_eq!(skip.consume(), Some(0));

        // Inside the fade margin the clamp also applies.
        let mut skip = SkipController::new(Some(3_200_000), &SessionConfig::default());
        assert_eq!(skip.consume(), Some(0));
    }

    #[test]
    fn expires_at_threshold() {
        let mut skip = SkipController::new(Some(5_000_000), &SessionConfig::default());
        assert!(!skip.update(1_999_999));
        assert!(skip.is_available());

        assert!(skip.update(2_000_000));
        assert!(!skip.is_available());
        assert_eq!(skip.consume(), None);

        // Expiry fires once.
        assert!(!skip.update(3_000_000));
    }

    #[test]
    fn consumed_skip_does_not_expire() {
        let mut skip = SkipController::new(Some(5_000_000), &SessionConfig::default());
        skip.consume();
        assert!(!skip.update(2_000_000));
    }
}
