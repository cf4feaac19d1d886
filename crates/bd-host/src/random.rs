use bd_engine::RandomSource;
use rand::Rng as _;

/// `RandomSource` backed by the thread-local generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn random_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_in_range() {
        let mut rng = ThreadRandom;
        for _ in 0..1000 {
            assert!((3..8).contains(&rng.random_range(3, 8)));
        }
        assert_eq!(rng.random_range(5, 5), 5);
        assert_eq!(rng.random_range(9, 2), 9);
    }
}
