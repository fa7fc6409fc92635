use std::fmt::{self, Debug, Display};

use rand::{Rng, SeedableRng, rngs::{StdRng, ThreadRng}};
use serde::Serialize;

use crate::ludo::error::DiceError;

/// A single die showing 1..=6.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Die(u8);

impl Die {
    pub const ALL: [Self; 6] = [Die(1), Die(2), Die(3), Die(4), Die(5), Die(6)];

    /// The roll that releases a token from home and grants another roll.
    pub const SIX: Self = Die(6);

    pub fn new(value: u8) -> Result<Self, DiceError> {
        match value {
            1..=6 => Ok(Die(value)),
            _ => Err(DiceError::OutOfRange(value)),
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_six(&self) -> bool {
        self.0 == 6
    }

    pub fn probability(&self) -> f32 {
        1.0 / 6.0
    }

    pub fn roll() -> Self {
        Die(rand::random_range(1..=6))
    }
}

impl TryFrom<u8> for Die {
    type Error = DiceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Die::new(value)
    }
}

impl Debug for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Die({})", self.0)
    }
}

impl Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything that can produce die rolls. Games never roll on their own.
pub trait DiceSource {
    fn roll(&mut self) -> Die;
}

impl<D: DiceSource + ?Sized> DiceSource for &mut D {
    fn roll(&mut self) -> Die {
        (**self).roll()
    }
}

/// Uniform rolls drawn from a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomDice<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomDice<R> {
    pub fn new(rng: R) -> Self {
        RandomDice { rng }
    }
}

impl RandomDice<StdRng> {
    /// Reproducible rolls for a given seed.
    pub fn seeded(seed: u64) -> Self {
        RandomDice::new(StdRng::seed_from_u64(seed))
    }
}

impl RandomDice<ThreadRng> {
    pub fn thread() -> Self {
        RandomDice::new(rand::rng())
    }
}

impl<R: Rng> DiceSource for RandomDice<R> {
    fn roll(&mut self) -> Die {
        Die(self.rng.random_range(1..=6))
    }
}

/// Replays a fixed sequence of rolls, starting over when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    rolls: Vec<Die>,
    next: usize,
}

impl ScriptedDice {
    /// Returns `None` for an empty script, which could never produce a roll.
    pub fn new(rolls: impl IntoIterator<Item = Die>) -> Option<Self> {
        let rolls: Vec<Die> = rolls.into_iter().collect();
        if rolls.is_empty() {
            return None;
        }
        Some(ScriptedDice { rolls, next: 0 })
    }

    pub fn from_values(values: &[u8]) -> Result<Option<Self>, DiceError> {
        let rolls = values.iter().map(|&v| Die::new(v)).collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rolls))
    }

    /// Number of rolls handed out so far.
    pub fn rolled(&self) -> usize {
        self.next
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self) -> Die {
        let die = self.rolls[self.next % self.rolls.len()];
        self.next += 1;
        die
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_die_range() {
        for value in 1..=6 {
            assert_eq!(Die::new(value).unwrap().value(), value);
        }
        assert_eq!(Die::new(0), Err(DiceError::OutOfRange(0)));
        assert_eq!(Die::new(7), Err(DiceError::OutOfRange(7)));
        assert!(Die::try_from(6).unwrap().is_six());
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let sum: f32 = Die::ALL.iter().map(Die::probability).sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_dice_roll() {
        for _ in 1..=100 {
            let die = Die::roll();
            assert!(die.value() >= 1 && die.value() <= 6);
        }
        let mut dice = RandomDice::thread();
        for _ in 1..=100 {
            assert!(Die::ALL.contains(&dice.roll()));
        }
    }

    #[test]
    fn test_seeded_dice_repeat() {
        let mut a = RandomDice::seeded(42);
        let mut b = RandomDice::seeded(42);
        let rolls_a: Vec<Die> = (0..50).map(|_| a.roll()).collect();
        let rolls_b: Vec<Die> = (0..50).map(|_| b.roll()).collect();
        assert_eq!(rolls_a, rolls_b);
    }

    #[test]
    fn test_scripted_dice_cycles() {
        let mut dice = ScriptedDice::from_values(&[6, 2, 3]).unwrap().unwrap();
        let values: Vec<u8> = (0..5).map(|_| dice.roll().value()).collect();
        assert_eq!(values, vec![6, 2, 3, 6, 2]);
        assert_eq!(dice.rolled(), 5);
        assert!(ScriptedDice::new(Vec::new()).is_none());
        assert!(ScriptedDice::from_values(&[3, 9]).is_err());
    }
}
