//! In-memory experience buffer for self-play cases
//!
//! Each decision point in self-play produces one case: the root state
//! (mover id followed by the encoded cells) and the normalized visit
//! distribution the search produced for it. The buffer is a bounded FIFO;
//! once full, recording a case drops the oldest one.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One (state, distribution) training case.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)] // Fields are read by trainers outside this binary
pub struct ExperienceCase {
    /// Player-to-move id followed by the cell encoding
    pub state: Vec<f32>,
    /// Visit distribution over the full action space
    pub distribution: Vec<f32>,
}

impl ExperienceCase {
    pub fn new(state: Vec<f32>, distribution: Vec<f32>) -> Self {
        Self {
            state,
            distribution,
        }
    }

    /// Player id stored in the first state slot.
    #[allow(dead_code)] // Used in tests
    pub fn player_id(&self) -> Option<u8> {
        self.state.first().map(|&p| p as u8)
    }
}

/// Bounded FIFO of experience cases.
#[derive(Debug, Clone)]
pub struct ExperienceBuffer {
    cases: VecDeque<ExperienceCase>,
    capacity: usize,
}

/// Buffer shared between the self-play writer and any readers.
pub type SharedExperienceBuffer = Arc<Mutex<ExperienceBuffer>>;

impl ExperienceBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            cases: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Wrap a new buffer for shared access.
    pub fn shared(capacity: usize) -> SharedExperienceBuffer {
        Arc::new(Mutex::new(Self::new(capacity)))
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    #[allow(dead_code)] // Used in tests
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a case, dropping the oldest when the buffer is full.
    pub fn record(&mut self, case: ExperienceCase) {
        if self.capacity == 0 {
            return;
        }
        if self.cases.len() == self.capacity {
            self.cases.pop_front();
        }
        self.cases.push_back(case);
    }

    /// Oldest-first view of the stored cases.
    #[allow(dead_code)] // Used in tests
    pub fn iter(&self) -> impl Iterator<Item = &ExperienceCase> {
        self.cases.iter()
    }

    /// Uniformly sample `min(len, batch_size)` cases with replacement.
    pub fn sample<R: Rng + ?Sized>(&self, batch_size: usize, rng: &mut R) -> Vec<ExperienceCase> {
        let len = self.cases.len();
        if len == 0 {
            return Vec::new();
        }

        (0..batch_size.min(len))
            .map(|_| self.cases[rng.gen_range(0..len)].clone())
            .collect()
    }

    /// Sample `min(len, batch_size)` cases with replacement, weighting each
    /// case by its insertion rank so newer cases are drawn more often.
    pub fn sample_weighted<R: Rng + ?Sized>(
        &self,
        batch_size: usize,
        rng: &mut R,
    ) -> Vec<ExperienceCase> {
        let len = self.cases.len();
        if len == 0 {
            return Vec::new();
        }

        // Weights 1..=len are always positive, so construction cannot fail.
        let Ok(weights) = WeightedIndex::new(1..=len) else {
            return self.sample(batch_size, rng);
        };

        (0..batch_size.min(len))
            .map(|_| self.cases[weights.sample(rng)].clone())
            .collect()
    }

    pub fn clear(&mut self) {
        self.cases.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn case(tag: f32) -> ExperienceCase {
        ExperienceCase::new(vec![1.0, tag], vec![1.0])
    }

    #[test]
    fn record_and_len() {
        let mut buffer = ExperienceBuffer::new(3);
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 3);

        buffer.record(case(1.0));
        buffer.record(case(2.0));
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn record_drops_oldest_when_full() {
        let mut buffer = ExperienceBuffer::new(2);
        buffer.record(case(1.0));
        buffer.record(case(2.0));
        buffer.record(case(3.0));

        assert_eq!(buffer.len(), 2);
        let tags: Vec<f32> = buffer.iter().map(|c| c.state[1]).collect();
        assert_eq!(tags, vec![2.0, 3.0]);
    }

    #[test]
    fn sample_caps_at_buffer_len() {
        let mut buffer = ExperienceBuffer::new(10);
        for i in 0..3 {
            buffer.record(case(i as f32));
        }
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        assert_eq!(buffer.sample(64, &mut rng).len(), 3);
        assert_eq!(buffer.sample(2, &mut rng).len(), 2);
    }

    #[test]
    fn sample_returns_stored_cases() {
        let mut buffer = ExperienceBuffer::new(5);
        for i in 0..5 {
            buffer.record(case(i as f32));
        }
        let mut rng = ChaCha20Rng::seed_from_u64(7);

        for _ in 0..10 {
            for sampled in buffer.sample(4, &mut rng) {
                assert!(buffer.iter().any(|c| *c == sampled));
            }
        }
    }

    #[test]
    fn sample_empty_returns_nothing() {
        let buffer = ExperienceBuffer::new(5);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert!(buffer.sample(8, &mut rng).is_empty());
        assert!(buffer.sample_weighted(8, &mut rng).is_empty());
    }

    #[test]
    fn sample_is_reproducible_with_seed() {
        let mut buffer = ExperienceBuffer::new(20);
        for i in 0..20 {
            buffer.record(case(i as f32));
        }

        let a = buffer.sample(8, &mut ChaCha20Rng::seed_from_u64(3));
        let b = buffer.sample(8, &mut ChaCha20Rng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn sample_weighted_favors_recent_cases() {
        let mut buffer = ExperienceBuffer::new(10);
        for i in 0..10 {
            buffer.record(case(i as f32));
        }
        let mut rng = ChaCha20Rng::seed_from_u64(11);

        let mut newest = 0;
        let mut oldest = 0;
        for _ in 0..500 {
            for sampled in buffer.sample_weighted(10, &mut rng) {
                match sampled.state[1] as u32 {
                    0 => oldest += 1,
                    9 => newest += 1,
                    _ => {}
                }
            }
        }
        // Expected ratio is 10:1
        assert!(newest > oldest * 3, "newest={newest} oldest={oldest}");
    }

    #[test]
    fn clear_empties_buffer() {
        let mut buffer = ExperienceBuffer::new(4);
        buffer.record(case(1.0));
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 4);
    }

    #[test]
    fn player_id_reads_prefix() {
        assert_eq!(case(0.0).player_id(), Some(1));
        assert_eq!(ExperienceCase::new(vec![], vec![]).player_id(), None);
    }

    #[test]
    fn shared_buffer_is_visible_across_handles() {
        let shared = ExperienceBuffer::shared(4);
        let reader = Arc::clone(&shared);

        shared.lock().unwrap().record(case(5.0));
        assert_eq!(reader.lock().unwrap().len(), 1);
    }
}
