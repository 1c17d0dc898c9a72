//! Candidate index
//!
//! A fixed ordered list of candidate identities with a constant-time
//! identity-to-position lookup. Every parameter vector in a model is indexed
//! by the positions assigned here.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{ModelError, ModelResult};

/// Ordered candidate list with a built-once position lookup
#[derive(Clone, Debug)]
pub struct CandidateIndex<T> {
    candidates: Vec<T>,
    positions: HashMap<T, usize>,
}

impl<T> CandidateIndex<T>
where
    T: Clone + Eq + Hash + Debug,
{
    /// Build an index from an ordered candidate list
    ///
    /// Fails if the list is empty or contains the same identity twice.
    pub fn new(candidates: Vec<T>) -> ModelResult<Self> {
        if candidates.is_empty() {
            return Err(ModelError::EmptyCandidates);
        }

        let mut positions = HashMap::with_capacity(candidates.len());
        for (i, candidate) in candidates.iter().enumerate() {
            if positions.insert(candidate.clone(), i).is_some() {
                return Err(ModelError::DuplicateCandidate(format!("{:?}", candidate)));
            }
        }

        Ok(Self {
            candidates,
            positions,
        })
    }

    /// Position of a candidate in the canonical order
    pub fn position(&self, candidate: &T) -> ModelResult<usize> {
        self.positions
            .get(candidate)
            .copied()
            .ok_or_else(|| ModelError::UnknownCandidate(format!("{:?}", candidate)))
    }

    /// Check whether a candidate is part of the index
    pub fn contains(&self, candidate: &T) -> bool {
        self.positions.contains_key(candidate)
    }

    /// Candidate at a given position
    pub fn get(&self, position: usize) -> Option<&T> {
        self.candidates.get(position)
    }

    /// Candidates in canonical order
    pub fn as_slice(&self) -> &[T] {
        &self.candidates
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Always false for a constructed index; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Map a full ranking of identities to candidate positions
    ///
    /// The ranking must name every candidate exactly once.
    pub fn positions_of(&self, ranking: &[T]) -> ModelResult<Vec<usize>> {
        if ranking.len() != self.len() {
            return Err(ModelError::InvalidRanking(format!(
                "expected {} candidates, got {}",
                self.len(),
                ranking.len()
            )));
        }

        let mut seen = vec![false; self.len()];
        let mut order = Vec::with_capacity(ranking.len());
        for candidate in ranking {
            let pos = self.position(candidate)?;
            if seen[pos] {
                return Err(ModelError::InvalidRanking(format!(
                    "{:?} appears more than once",
                    candidate
                )));
            }
            seen[pos] = true;
            order.push(pos);
        }
        Ok(order)
    }
}
