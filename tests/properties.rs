// tests/properties.rs
//
// Randomised sweeps (seeded, so failures reproduce) over the engine's
// invariants: totality, label range, gate rule, dead zone and idempotence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use mood_personalizer::cluster::{ClusterSettings, KMeans};
use mood_personalizer::gate::SizeGate;
use mood_personalizer::rules::RuleBasedClassifier;
use mood_personalizer::{
    ClassificationMethod, ClusterLabel, DiaryEntry, FeatureSummary, Personalizer,
};

const CATEGORIES: [&str; 6] = ["pleasant", "neutral", "unpleasant", "happy", "", "NEUTRAL"];

fn random_batch(rng: &mut StdRng) -> Vec<DiaryEntry> {
    let n = rng.random_range(0..20);
    (0..n)
        .map(|_| {
            if rng.random_bool(0.1) {
                DiaryEntry::default()
            } else {
                DiaryEntry::new(CATEGORIES[rng.random_range(0..CATEGORIES.len())])
            }
        })
        .collect()
}

#[test]
fn engine_is_total_and_idempotent() {
    let mut rng = StdRng::seed_from_u64(2024);
    let engine = Personalizer::default();

    for _ in 0..300 {
        let entries = random_batch(&mut rng);
        let a = engine.personalize(&entries);
        let b = engine.personalize(&entries);
        assert_eq!(a, b);

        assert!(a.cluster.ordinal() <= 2);
        assert!((-1.0..=1.0).contains(&a.features.average_mood));

        let expected_method = if a.features.entry_count < 5 {
            ClassificationMethod::RuleBased
        } else {
            ClassificationMethod::Clustering
        };
        assert_eq!(a.method, expected_method);
    }
}

#[test]
fn unknown_only_batches_are_neutral_rule_based() {
    let mut rng = StdRng::seed_from_u64(7);
    let engine = Personalizer::default();

    for _ in 0..100 {
        let n = rng.random_range(0..30);
        let entries: Vec<DiaryEntry> = (0..n)
            .map(|i| DiaryEntry::new(format!("mood-{i}")))
            .collect();
        let p = engine.personalize(&entries);
        assert_eq!(p.features.average_mood, 0.0);
        assert_eq!(p.features.entry_count, 0);
        assert_eq!(p.method, ClassificationMethod::RuleBased);
        assert_eq!(p.cluster, ClusterLabel::Neutral);
    }
}

#[test]
fn gate_is_strictly_less_than_threshold() {
    let gate = SizeGate::default();
    for n in 0..50 {
        assert_eq!(gate.is_small(n), n < 5, "n = {n}");
    }
}

#[test]
fn rule_dead_zone_is_closed_interval() {
    let c = RuleBasedClassifier::default();
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..1000 {
        let avg: f64 = rng.random_range(-1.0..=1.0);
        let label = c.classify(&FeatureSummary {
            average_mood: avg,
            entry_count: 1,
        });
        let expected = if avg > 0.3 {
            ClusterLabel::Positive
        } else if avg < -0.3 {
            ClusterLabel::Negative
        } else {
            ClusterLabel::Neutral
        };
        assert_eq!(label, expected, "avg = {avg}");
    }
}

#[test]
fn kmeans_labels_stay_in_range_for_random_points() {
    let mut rng = StdRng::seed_from_u64(5);
    let km = KMeans::new(3, ClusterSettings::default());
    for _ in 0..100 {
        let n = rng.random_range(1..40);
        let pts: Vec<f64> = (0..n).map(|_| rng.random_range(-1.0..=1.0)).collect();
        let fit = km.fit(&pts);
        assert_eq!(fit.labels.len(), n);
        assert!(fit.labels.iter().all(|&l| l < 3));
        assert_eq!(fit.centroids.len(), 3);
        assert!(fit.inertia >= 0.0);
        assert_eq!(km.fit(&pts), fit);
    }
}
