//! Preference profiles
//!
//! A profile is a multiset of full rankings (best candidate first). Models
//! produce profiles when sampling and consume them when evaluating
//! likelihoods; a profile never references the model that produced it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{ModelError, ModelResult};

/// Multiset of observed rankings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreferenceProfile<T> {
    rankings: Vec<Vec<T>>,
}

impl<T> Default for PreferenceProfile<T> {
    fn default() -> Self {
        Self {
            rankings: Vec::new(),
        }
    }
}

impl<T> PreferenceProfile<T> {
    /// Create an empty profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty profile with room for `n` rankings
    pub fn with_capacity(n: usize) -> Self {
        Self {
            rankings: Vec::with_capacity(n),
        }
    }

    /// Create a profile from already observed rankings
    pub fn from_rankings(rankings: Vec<Vec<T>>) -> Self {
        Self { rankings }
    }

    /// Add one observed ranking
    pub fn aggregate(&mut self, ranking: Vec<T>) {
        self.rankings.push(ranking);
    }

    /// All rankings in insertion order
    pub fn rankings(&self) -> &[Vec<T>] {
        &self.rankings
    }

    /// Number of rankings
    pub fn len(&self) -> usize {
        self.rankings.len()
    }

    /// Check if the profile holds no rankings
    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }
}

impl<T: Eq + Hash> PreferenceProfile<T> {
    /// Number of rankings in which `a` precedes `b`
    pub fn count_pairwise_wins(&self, a: &T, b: &T) -> usize {
        self.rankings
            .iter()
            .filter(|ranking| {
                let pos_a = ranking.iter().position(|c| c == a);
                let pos_b = ranking.iter().position(|c| c == b);
                matches!((pos_a, pos_b), (Some(i), Some(j)) if i < j)
            })
            .count()
    }

    /// Fraction of rankings in which `a` precedes `b`
    pub fn pairwise_frequency(&self, a: &T, b: &T) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.count_pairwise_wins(a, b) as f64 / self.len() as f64)
        }
    }

    /// Distinct rankings with their multiplicities, in order of first appearance
    pub fn tally(&self) -> Vec<(&[T], usize)> {
        let mut slots: HashMap<&[T], usize> = HashMap::new();
        let mut counts: Vec<(&[T], usize)> = Vec::new();
        for ranking in &self.rankings {
            let key = ranking.as_slice();
            match slots.get(key) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    slots.insert(key, counts.len());
                    counts.push((key, 1));
                }
            }
        }
        counts
    }
}

impl<T: Serialize> PreferenceProfile<T> {
    /// Serialize the profile to JSON
    pub fn to_json(&self) -> ModelResult<String> {
        serde_json::to_string(self).map_err(|e| ModelError::Serialization(e.to_string()))
    }
}

impl<T: DeserializeOwned> PreferenceProfile<T> {
    /// Deserialize a profile from JSON
    pub fn from_json(json: &str) -> ModelResult<Self> {
        serde_json::from_str(json).map_err(|e| ModelError::Serialization(e.to_string()))
    }
}

impl<T> FromIterator<Vec<T>> for PreferenceProfile<T> {
    fn from_iter<I: IntoIterator<Item = Vec<T>>>(iter: I) -> Self {
        Self {
            rankings: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<Vec<T>> for PreferenceProfile<T> {
    fn extend<I: IntoIterator<Item = Vec<T>>>(&mut self, iter: I) {
        self.rankings.extend(iter);
    }
}
