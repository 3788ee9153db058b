//! Deterministic dice for tests

use std::collections::VecDeque;
use std::sync::Mutex;

use super::DiceSource;

/// Hands out pre-scripted faces in order. Panics when the script runs dry.
pub struct ScriptedDice(Mutex<VecDeque<u32>>);

impl ScriptedDice {
    pub fn new(faces: &[u32]) -> Self {
        Self(Mutex::new(faces.iter().copied().collect()))
    }

    pub fn remaining(&self) -> usize {
        self.0.lock().expect("dice script lock").len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&self, sides: u32) -> u32 {
        let face = self
            .0
            .lock()
            .expect("dice script lock")
            .pop_front()
            .expect("dice script exhausted");
        assert!(
            (1..=sides).contains(&face),
            "scripted face {} does not fit a d{}",
            face,
            sides
        );
        face
    }
}
