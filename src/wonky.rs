use rand::Rng;

/// Randomized fault behavior simulated for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WonkyBehavior {
    /// Respond with a 500 regardless of the configured status.
    Error,
    /// Respond with the simulated rate-limit status.
    RateLimit,
    /// Hold the response for a fixed five seconds.
    Delay,
}

/// Decides whether a request gets wonky behavior, drawing from `rng`.
///
/// A roll of 1..=100 at or below `percentage` triggers one of the three
/// behaviors, each equally likely. Decisions are independent per call.
pub fn decide<R: Rng>(percentage: u8, rng: &mut R) -> Option<WonkyBehavior> {
    if percentage == 0 {
        return None;
    }

    let roll = rng.gen_range(1..=100);
    if roll > percentage {
        return None;
    }

    match rng.gen_range(0..3) {
        0 => Some(WonkyBehavior::Error),
        1 => Some(WonkyBehavior::RateLimit),
        _ => Some(WonkyBehavior::Delay),
    }
}

/// Per-request convenience over [`decide`] using the thread-local RNG.
pub fn roll(percentage: u8) -> Option<WonkyBehavior> {
    decide(percentage, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn zero_percentage_never_triggers() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert_eq!(decide(0, &mut rng), None);
        }
    }

    #[test]
    fn full_percentage_always_triggers() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(decide(100, &mut rng).is_some());
        }
    }

    #[test]
    fn full_percentage_produces_every_behavior() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 3];
        for _ in 0..1000 {
            match decide(100, &mut rng) {
                Some(WonkyBehavior::Error) => seen[0] = true,
                Some(WonkyBehavior::RateLimit) => seen[1] = true,
                Some(WonkyBehavior::Delay) => seen[2] = true,
                None => unreachable!("percentage 100 must always trigger"),
            }
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn roll_respects_zero_percentage() {
        for _ in 0..100 {
            assert_eq!(roll(0), None);
        }
    }
}
