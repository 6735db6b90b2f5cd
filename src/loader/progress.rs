use rand::Rng;

/// Loading percentage that climbs by random steps and stops at 100.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    value: f64,
    max_increment: f64,
}

impl Progress {
    pub const COMPLETE: f64 = 100.0;

    pub fn new(max_increment: f64) -> Self {
        Self {
            value: 0.0,
            max_increment,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Rounded percentage for display.
    pub fn percent(&self) -> u8 {
        self.value.round() as u8
    }

    pub fn ratio(&self) -> f64 {
        self.value / Self::COMPLETE
    }

    pub fn is_complete(&self) -> bool {
        self.value >= Self::COMPLETE
    }

    /// Adds one random step. Returns true only on the tick that reaches 100.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.is_complete() {
            return false;
        }
        let step = rng.gen_range(0.0..=self.max_increment);
        self.value = (self.value + step).min(Self::COMPLETE);
        self.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn climbs_monotonically_to_exactly_100() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut progress = Progress::new(5.0);
        let mut last = progress.value();
        let mut completions = 0;

        for _ in 0..10_000 {
            if progress.tick(&mut rng) {
                completions += 1;
            }
            assert!(progress.value() >= last);
            assert!(progress.value() <= Progress::COMPLETE);
            last = progress.value();
        }

        assert_eq!(completions, 1);
        assert_eq!(progress.value(), 100.0);
        assert_eq!(progress.percent(), 100);
        assert_eq!(progress.ratio(), 1.0);
    }

    #[test]
    fn step_never_exceeds_max_increment() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut progress = Progress::new(2.0);
        let mut last = 0.0;
        while !progress.is_complete() {
            progress.tick(&mut rng);
            assert!(progress.value() - last <= 2.0);
            last = progress.value();
        }
    }

    #[test]
    fn percent_rounds() {
        let progress = Progress {
            value: 41.6,
            max_increment: 5.0,
        };
        assert_eq!(progress.percent(), 42);
    }
}
