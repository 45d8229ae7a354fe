use minwise::{
    build_exact, build_sketch, exact_jaccard, generate_signatures, Dataset, FeatureVector,
    PermutationPool, SketchConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TRIALS: u64 = 100;

fn random_dataset(rng: &mut StdRng, docs: usize, dimension: usize, density: f64) -> Dataset {
    Dataset::from_documents((0..docs).map(|i| {
        let bits: FeatureVector = (0..dimension).map(|_| rng.gen_bool(density)).collect();
        (format!("doc-{i:02}"), bits)
    }))
    .expect("random dataset")
}

fn sketch_estimate(dataset: &Dataset, k: usize, seed: u64) -> f64 {
    let cfg = SketchConfig::new().with_seed(seed);
    let mut pool = PermutationPool::from_config(dataset.dimension(), &cfg, 0);
    pool.ensure(k).expect("pool growth");
    let signatures = generate_signatures(dataset, &pool, &cfg).expect("signatures");
    build_sketch(&signatures, false)
        .get(&"a".into(), &"b".into())
        .expect("pair score")
}

#[test]
fn estimates_converge_on_exact_jaccard_as_k_grows() {
    // |A| = |B| = 20, |A ∩ B| = 10 within a 40-feature vocabulary.
    let a = FeatureVector::from_indices(40, &(0..20).collect::<Vec<_>>());
    let b = FeatureVector::from_indices(40, &(10..30).collect::<Vec<_>>());
    let exact = exact_jaccard(&a, &b);
    assert!((exact - 1.0 / 3.0).abs() < 1e-12);

    let dataset = Dataset::from_documents([("a", a), ("b", b)]).unwrap();
    let mean_error = |k: usize| -> f64 {
        (0..TRIALS)
            .map(|seed| (sketch_estimate(&dataset, k, seed) - exact).abs())
            .sum::<f64>()
            / TRIALS as f64
    };

    let small = mean_error(16);
    let large = mean_error(256);
    assert!(
        large < small * 0.5,
        "mean |error| at k=256 ({large}) should be well below k=16 ({small})"
    );
    assert!(large < 0.05, "k=256 mean |error| too large: {large}");
}

#[test]
fn matrices_are_bounded_and_cover_every_pair() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for trial in 0..10u64 {
        let docs = rng.gen_range(2..12);
        let dimension = rng.gen_range(5..60);
        let dataset = random_dataset(&mut rng, docs, dimension, 0.3);

        let exact = build_exact(&dataset, false);
        let cfg = SketchConfig::new().with_seed(trial);
        let mut pool = PermutationPool::from_config(dimension, &cfg, 0);
        pool.ensure(32).unwrap();
        let estimate = build_sketch(&generate_signatures(&dataset, &pool, &cfg).unwrap(), false);

        let pairs = docs * (docs - 1) / 2;
        assert_eq!(exact.len(), pairs);
        assert_eq!(estimate.len(), pairs);
        for (a, b, score) in exact.iter().chain(estimate.iter()) {
            assert!(a < b);
            assert!((0.0..=1.0).contains(&score));
        }
    }
}

#[test]
fn pool_holds_distinct_bijections() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..10 {
        let dimension = rng.gen_range(4..40);
        let mut pool = PermutationPool::seeded(dimension, rng.r#gen());
        let k = rng.gen_range(1..20);
        assert_eq!(pool.ensure(k).unwrap(), k);

        let perms = pool.permutations();
        assert!(perms.iter().all(|p| p.len() == dimension && p.is_bijection()));
        for (i, p) in perms.iter().enumerate() {
            assert!(perms[i + 1..].iter().all(|q| q != p));
        }
    }
}

#[test]
fn identical_documents_estimate_one() {
    let mut rng = StdRng::seed_from_u64(3);
    let bits: Vec<bool> = (0..50).map(|_| rng.gen_bool(0.4)).collect();
    let dataset = Dataset::from_documents([
        ("a", FeatureVector::new(bits.clone())),
        ("b", FeatureVector::new(bits)),
    ])
    .unwrap();
    for k in [1, 16, 64] {
        assert_eq!(sketch_estimate(&dataset, k, 21), 1.0);
    }
}
