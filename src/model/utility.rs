//! Random utility model
//!
//! A model owns an ordered candidate list and one strength (utility mean) per
//! candidate. A draw perturbs every strength with independent noise from the
//! model's [`NoiseFamily`] and ranks candidates by the perturbed utilities.
//! Model state is fixed at construction, so a model can be shared across
//! threads and sampled concurrently with independent random sources.

use rand::Rng;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{ModelError, ModelResult};
use crate::model::candidates::CandidateIndex;
use crate::model::noise::Noise;
use crate::model::traits::NoiseFamily;
use crate::profile::PreferenceProfile;

/// Random utility model over candidates of type `T` with noise family `N`
#[derive(Clone, Debug)]
pub struct RandomUtilityModel<T, N> {
    candidates: CandidateIndex<T>,
    strengths: Vec<f64>,
    noise: N,
}

impl<T, N> RandomUtilityModel<T, N>
where
    T: Clone + Eq + Hash + Debug,
    N: NoiseFamily,
{
    /// Create a model from explicit strengths
    ///
    /// Fails if the strength vector or any family parameter vector does not
    /// have one entry per candidate.
    pub fn from_parts(candidates: Vec<T>, strengths: Vec<f64>, noise: N) -> ModelResult<Self> {
        let candidates = CandidateIndex::new(candidates)?;
        if strengths.len() != candidates.len() {
            return Err(ModelError::DimensionMismatch {
                what: "strengths",
                expected: candidates.len(),
                actual: strengths.len(),
            });
        }
        if let Some(bad) = strengths.iter().find(|s| !s.is_finite()) {
            return Err(ModelError::Domain(format!(
                "strengths must be finite, got {}",
                bad
            )));
        }
        noise.validate(candidates.len())?;

        Ok(Self {
            candidates,
            strengths,
            noise,
        })
    }

    /// Create a model with an equally spaced strength ladder
    ///
    /// Candidates are taken as ordered strongest first; candidates `k`
    /// positions apart differ in strength by `k * delta`.
    pub fn from_adjacent_difference(candidates: Vec<T>, delta: f64, noise: N) -> ModelResult<Self> {
        let strengths = ladder(candidates.len(), delta);
        Self::from_parts(candidates, strengths, noise)
    }

    /// Candidates in canonical order
    pub fn candidates(&self) -> &[T] {
        self.candidates.as_slice()
    }

    /// Candidate index used for identity lookups
    pub fn candidate_index(&self) -> &CandidateIndex<T> {
        &self.candidates
    }

    /// Strength per candidate, in canonical order
    pub fn strengths(&self) -> &[f64] {
        &self.strengths
    }

    /// The noise family
    pub fn noise(&self) -> &N {
        &self.noise
    }

    /// Number of candidates
    pub fn num_candidates(&self) -> usize {
        self.candidates.len()
    }

    /// Draw one latent utility per candidate
    pub fn sample_utilities<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        self.noise.sample_utilities(&self.strengths, rng)
    }

    /// Draw one ranking, best candidate first
    ///
    /// Ties in utility keep canonical candidate order.
    pub fn sample_ranking<R: Rng>(&self, rng: &mut R) -> Vec<T> {
        let utilities = self.sample_utilities(rng);
        order_by_utility(&utilities)
            .into_iter()
            .map(|i| self.candidates.as_slice()[i].clone())
            .collect()
    }

    /// Draw `n` independent rankings into a profile
    pub fn sample_profile<R: Rng>(&self, n: usize, rng: &mut R) -> PreferenceProfile<T> {
        trace_debug!(
            n,
            family = self.noise.label(),
            candidates = self.num_candidates(),
            "sampling profile"
        );
        let mut profile = PreferenceProfile::with_capacity(n);
        for _ in 0..n {
            profile.aggregate(self.sample_ranking(rng));
        }
        profile
    }

    /// Probability that a single draw ranks `winner` above `loser`
    ///
    /// Computed in closed form by the noise family.
    pub fn marginal_probability(&self, winner: &T, loser: &T) -> ModelResult<f64> {
        let w = self.candidates.position(winner)?;
        let l = self.candidates.position(loser)?;
        self.noise.pairwise_probability(&self.strengths, w, l)
    }

    /// Log-probability of a single full ranking, best candidate first
    pub fn ranking_log_probability(&self, ranking: &[T]) -> ModelResult<f64> {
        let order = self.candidates.positions_of(ranking)?;
        self.noise.ranking_log_probability(&self.strengths, &order)
    }

    /// Log-probability of a profile of independent draws
    ///
    /// Each distinct ranking is evaluated once and weighted by its
    /// multiplicity. May return negative infinity when a ranking has
    /// probability zero in floating point.
    pub fn log_likelihood(&self, profile: &PreferenceProfile<T>) -> ModelResult<f64> {
        let tally = profile.tally();
        let mut total = 0.0;
        for (ranking, count) in &tally {
            let lp = self.ranking_log_probability(ranking)?;
            total += *count as f64 * lp;
        }
        trace_debug!(
            rankings = profile.len(),
            distinct = tally.len(),
            family = self.noise.label(),
            log_likelihood = total,
            "evaluated log-likelihood"
        );
        Ok(total)
    }

    /// Convert into a model over the closed [`Noise`] enum
    pub fn into_any(self) -> RandomUtilityModel<T, Noise>
    where
        N: Into<Noise>,
    {
        RandomUtilityModel {
            candidates: self.candidates,
            strengths: self.strengths,
            noise: self.noise.into(),
        }
    }
}

/// Parallel sampling (requires `parallel` feature)
#[cfg(feature = "parallel")]
impl<T, N> RandomUtilityModel<T, N>
where
    T: Clone + Eq + Hash + Debug + Send + Sync,
    N: NoiseFamily,
{
    /// Rankings drawn per parallel chunk
    pub const PARALLEL_CHUNK: usize = 4096;

    /// Draw `n` independent rankings in parallel
    ///
    /// One seed per chunk is drawn sequentially from `rng`, and each chunk is
    /// sampled with its own `StdRng`. The result depends only on the state
    /// of `rng`, never on thread scheduling.
    pub fn sample_profile_parallel<R: Rng>(&self, n: usize, rng: &mut R) -> PreferenceProfile<T> {
        use rand::rngs::StdRng;
        use rand::SeedableRng;
        use rayon::prelude::*;

        let chunk = Self::PARALLEL_CHUNK;
        let seeds: Vec<u64> = (0..n.div_ceil(chunk)).map(|_| rng.gen()).collect();
        trace_debug!(n, chunks = seeds.len(), "sampling profile in parallel");

        let chunks: Vec<Vec<Vec<T>>> = seeds
            .par_iter()
            .enumerate()
            .map(|(i, &seed)| {
                let mut chunk_rng = StdRng::seed_from_u64(seed);
                let len = chunk.min(n - i * chunk);
                (0..len).map(|_| self.sample_ranking(&mut chunk_rng)).collect()
            })
            .collect();

        chunks.into_iter().flatten().collect()
    }
}

/// Strength ladder `0, -delta, -2 delta, ...`
pub(crate) fn ladder(len: usize, delta: f64) -> Vec<f64> {
    (0..len).map(|j| -(j as f64) * delta).collect()
}

/// Candidate positions sorted by descending utility, stable on ties
pub(crate) fn order_by_utility(utilities: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..utilities.len()).collect();
    order.sort_by(|&a, &b| utilities[b].total_cmp(&utilities[a]));
    order
}
