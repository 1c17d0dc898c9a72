//! Property-based tests for random-utility
//!
//! Uses proptest to verify invariants of both noise families.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use random_utility::prelude::*;

fn candidate_names(m: usize) -> Vec<String> {
    (0..m).map(|i| format!("c{}", i)).collect()
}

proptest! {
    // ==================== Marginal Probabilities ====================

    #[test]
    fn gumbel_marginals_symmetric(
        strengths in prop::collection::vec(-20.0..20.0f64, 2..8),
        scale in 0.05..5.0f64
    ) {
        let names = candidate_names(strengths.len());
        let model = GumbelNoiseModel::with_scale(names.clone(), strengths, scale).unwrap();
        for a in &names {
            for b in &names {
                let p = model.marginal_probability(a, b).unwrap();
                let q = model.marginal_probability(b, a).unwrap();
                prop_assert!((0.0..=1.0).contains(&p));
                prop_assert!((p + q - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn gaussian_marginals_symmetric(
        params in prop::collection::vec((-20.0..20.0f64, 0.01..5.0f64), 2..8)
    ) {
        let names = candidate_names(params.len());
        let (strengths, sds): (Vec<f64>, Vec<f64>) = params.into_iter().unzip();
        let model = NormalNoiseModel::new(names.clone(), strengths, sds).unwrap();
        for a in &names {
            for b in &names {
                let p = model.marginal_probability(a, b).unwrap();
                let q = model.marginal_probability(b, a).unwrap();
                prop_assert!((0.0..=1.0).contains(&p));
                prop_assert!((p + q - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn gumbel_ladder_consistency(delta in -3.0..3.0f64, m in 2usize..8) {
        let names = candidate_names(m);
        let model = GumbelNoiseModel::ladder(names.clone(), delta).unwrap();
        for i in 0..m {
            for j in (i + 1)..m {
                let k = (j - i) as f64;
                let expected = 1.0 / (1.0 + (-k * delta).exp());
                let p = model.marginal_probability(&names[i], &names[j]).unwrap();
                prop_assert!((p - expected).abs() < 1e-12);
            }
        }
    }

    // ==================== Sampling ====================

    #[test]
    fn sampled_rankings_are_permutations(
        strengths in prop::collection::vec(-3.0..3.0f64, 1..10),
        seed in any::<u64>()
    ) {
        let names = candidate_names(strengths.len());
        let gumbel = GumbelNoiseModel::new(names.clone(), strengths.clone()).unwrap();
        let normal = NormalNoiseModel::thurstone_with_strengths(names.clone(), strengths).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);

        let mut expected = names.clone();
        expected.sort();
        for ranking in [gumbel.sample_ranking(&mut rng), normal.sample_ranking(&mut rng)] {
            let mut sorted = ranking.clone();
            sorted.sort();
            prop_assert_eq!(sorted, expected.clone());
        }
    }

    #[test]
    fn profile_size_matches_request(n in 0usize..200, seed in any::<u64>()) {
        let model = GumbelNoiseModel::ladder(candidate_names(3), 0.4).unwrap();
        let profile = model.sample_profile(n, &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(profile.len(), n);
    }

    // ==================== Likelihood ====================

    #[test]
    fn log_likelihood_is_non_positive(
        strengths in prop::collection::vec(-2.0..2.0f64, 2..5),
        seed in any::<u64>()
    ) {
        let names = candidate_names(strengths.len());
        let gumbel = GumbelNoiseModel::new(names.clone(), strengths.clone()).unwrap();
        let normal = NormalNoiseModel::thurstone_with_strengths(names, strengths).unwrap();
        let profile = gumbel.sample_profile(20, &mut StdRng::seed_from_u64(seed));

        prop_assert!(gumbel.log_likelihood(&profile).unwrap() <= 1e-12);
        prop_assert!(normal.log_likelihood(&profile).unwrap() <= 0.0);
    }

    // ==================== Parameter Codec ====================

    #[test]
    fn gaussian_codec_roundtrip(
        params in prop::collection::vec((-100.0..100.0f64, 0.001..10.0f64), 1..10)
    ) {
        let names = candidate_names(params.len());
        let (strengths, sds): (Vec<f64>, Vec<f64>) = params.into_iter().unzip();
        let model = NormalNoiseModel::new(names, strengths, sds).unwrap();

        let text = model.to_param_string().unwrap();
        let parsed = NormalNoiseModel::<String>::parse_params(&text).unwrap();
        prop_assert_eq!(parsed.candidates(), model.candidates());
        for (x, y) in parsed.strengths().iter().zip(model.strengths()) {
            prop_assert!((x - y).abs() < 1e-9);
        }
        for (x, y) in parsed.sigmas().iter().zip(model.sigmas()) {
            prop_assert!((x - y).abs() < 1e-9);
        }
    }

    #[test]
    fn any_family_codec_roundtrip(
        strengths in prop::collection::vec(-10.0..10.0f64, 1..8),
        scale in 0.1..10.0f64
    ) {
        let names = candidate_names(strengths.len());
        let model = GumbelNoiseModel::with_scale(names, strengths, scale).unwrap().into_any();

        let text = model.to_param_string().unwrap();
        let parsed = AnyNoiseModel::<String>::parse_params(&text).unwrap();
        prop_assert_eq!(parsed.candidates(), model.candidates());
        prop_assert_eq!(parsed.strengths(), model.strengths());
        match parsed.noise() {
            Noise::Gumbel(g) => prop_assert!((g.scale() - scale).abs() < 1e-9 * scale),
            other => prop_assert!(false, "unexpected family {:?}", other),
        }
    }
}
