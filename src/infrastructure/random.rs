//! Dice sources backed by `rand`

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::services::DiceSource;

/// Production dice using the thread-local RNG
#[derive(Debug, Clone, Default)]
pub struct SystemDice;

impl SystemDice {
    pub fn new() -> Self {
        Self
    }
}

impl DiceSource for SystemDice {
    fn roll_die(&self, sides: u32) -> u32 {
        rand::thread_rng().gen_range(1..=sides)
    }
}

/// Reproducible dice for replaying a session from a fixed seed
pub struct SeededDice {
    rng: Mutex<StdRng>,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl DiceSource for SeededDice {
    fn roll_die(&self, sides: u32) -> u32 {
        // A poisoned lock still holds a usable generator
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(1..=sides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_dice_bounds() {
        let dice = SystemDice::new();
        for sides in [2, 6, 20, 100] {
            for _ in 0..200 {
                let face = dice.roll_die(sides);
                assert!((1..=sides).contains(&face), "d{} rolled {}", sides, face);
            }
        }
    }

    #[test]
    fn test_seeded_dice_is_reproducible() {
        let a = SeededDice::new(42);
        let b = SeededDice::new(42);
        let left: Vec<u32> = (0..20).map(|_| a.roll_die(100)).collect();
        let right: Vec<u32> = (0..20).map(|_| b.roll_die(100)).collect();
        assert_eq!(left, right);
        assert!(left.iter().all(|face| (1..=100).contains(face)));
    }
}
