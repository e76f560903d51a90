//! State generators: where initial and reset states come from.

use crate::core::SimRng;

/// Produces a state on demand.
pub trait StateGenerator<S> {
    fn generate(&mut self) -> S;
}

impl<S, F> StateGenerator<S> for F
where
    F: FnMut() -> S,
{
    fn generate(&mut self) -> S {
        (self)()
    }
}

/// Always generates a copy of one bound state.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantStateGenerator<S> {
    state: S,
}

impl<S> ConstantStateGenerator<S> {
    /// Bind the generator to `state`.
    pub fn new(state: S) -> Self {
        Self { state }
    }

    /// The bound state.
    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }
}

impl<S: Clone> StateGenerator<S> for ConstantStateGenerator<S> {
    fn generate(&mut self) -> S {
        self.state.clone()
    }
}

/// Picks uniformly among a fixed set of states with a seeded RNG.
///
/// Two generators built with the same states and seed produce the same
/// sequence.
#[derive(Clone, Debug)]
pub struct SampledStateGenerator<S> {
    states: Vec<S>,
    rng: SimRng,
}

impl<S> SampledStateGenerator<S> {
    /// Create a sampling generator.
    ///
    /// Returns `None` if `states` is empty.
    #[must_use]
    pub fn new(states: Vec<S>, seed: u64) -> Option<Self> {
        if states.is_empty() {
            return None;
        }
        Some(Self {
            states,
            rng: SimRng::new(seed),
        })
    }

    /// The candidate states.
    #[must_use]
    pub fn states(&self) -> &[S] {
        &self.states
    }
}

impl<S: Clone> StateGenerator<S> for SampledStateGenerator<S> {
    fn generate(&mut self) -> S {
        let index = self.rng.gen_range_usize(0..self.states.len());
        self.states[index].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_generator() {
        let mut generator = ConstantStateGenerator::new(vec![1, 2]);

        let mut first = generator.generate();
        first.push(3);

        assert_eq!(generator.generate(), vec![1, 2]);
        assert_eq!(generator.state(), &vec![1, 2]);
    }

    #[test]
    fn test_closure_generator() {
        let mut counter = 0;
        let mut generator = move || {
            counter += 1;
            counter
        };

        assert_eq!(StateGenerator::generate(&mut generator), 1);
        assert_eq!(StateGenerator::generate(&mut generator), 2);
    }

    #[test]
    fn test_sampled_generator_rejects_empty() {
        assert!(SampledStateGenerator::<i32>::new(Vec::new(), 1).is_none());
    }

    #[test]
    fn test_sampled_generator_is_deterministic() {
        let states = vec!['a', 'b', 'c', 'd'];
        let mut g1 = SampledStateGenerator::new(states.clone(), 42).unwrap();
        let mut g2 = SampledStateGenerator::new(states.clone(), 42).unwrap();

        for _ in 0..50 {
            let s = g1.generate();
            assert_eq!(s, g2.generate());
            assert!(states.contains(&s));
        }
    }

    #[test]
    fn test_sampled_generator_covers_states() {
        let mut generator = SampledStateGenerator::new(vec![0usize, 1, 2], 7).unwrap();
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[generator.generate()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
