/// Running counters for one game session.
///
/// `score <= attempts` holds by construction: a success always records its
/// attempt too. Nothing is ever decremented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    score: u32,
    attempts: u32,
    hints_used: u32,
}

impl SessionStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a completed verification that did not match.
    pub fn record_attempt(&mut self) {
        self.attempts = self.attempts.saturating_add(1);
    }

    /// Count a completed verification that matched. Records the attempt as well.
    pub fn record_success(&mut self) {
        self.record_attempt();
        self.score = self.score.saturating_add(1);
    }

    /// Count a hint the generator actually produced.
    pub fn record_hint(&mut self) {
        self.hints_used = self.hints_used.saturating_add(1);
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    /// `score / attempts`, or `0.0` before the first attempt.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(self.attempts)
    }

    /// Success rate as a whole percentage, rounded half away from zero.
    #[must_use]
    pub fn success_percent(&self) -> u32 {
        // The rate is within 0.0..=1.0, so the product fits in u32.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (self.success_rate() * 100.0).round() as u32;
        percent
    }
}
