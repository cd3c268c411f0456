use cbir::{rank, without_self, CbirError, CorpusEntry, Metric, Ranker, ScoredMatch};

fn entry(id: &str, vector: &[f32]) -> CorpusEntry {
    CorpusEntry::new(id, vector.to_vec())
}

fn ids(ranked: &[ScoredMatch]) -> Vec<&str> {
    ranked.iter().map(|m| m.id.as_str()).collect()
}

#[test]
fn ssd_ranking_keeps_self_match_first() {
    let target = [1.0f32, 2.0, 3.0];
    let corpus = vec![
        entry("self", &target),
        entry("far", &[10.0, 10.0, 10.0]),
        entry("near", &[1.0, 2.0, 4.0]),
        entry("mid", &[2.0, 3.0, 5.0]),
        entry("farther", &[20.0, 0.0, 0.0]),
    ];

    let ranked = rank(&target, &corpus, Metric::Ssd, 3).unwrap();
    assert_eq!(ranked.len(), 4);
    assert_eq!(ranked[0].id, "self");
    assert_eq!(ranked[0].score, 0.0);
    assert!(ranked.windows(2).all(|w| w[0].score <= w[1].score));
    assert_eq!(ids(&ranked), vec!["self", "near", "mid", "far"]);
}

#[test]
fn similarity_metrics_rank_descending() {
    let target = [0.5f32, 0.5, 0.0, 0.0];
    let corpus = vec![
        entry("disjoint", &[0.0, 0.0, 0.5, 0.5]),
        entry("half", &[0.5, 0.0, 0.5, 0.0]),
        entry("same", &[0.5, 0.5, 0.0, 0.0]),
    ];
    let ranked = rank(&target, &corpus, Metric::Intersection, 5).unwrap();
    assert_eq!(ids(&ranked), vec!["same", "half", "disjoint"]);
    assert_eq!(ranked[0].score, 1.0);
}

#[test]
fn ties_preserve_corpus_order() {
    let target = [0.0f32, 0.0];
    let corpus = vec![
        entry("a", &[1.0, 0.0]),
        entry("b", &[0.0, 1.0]),
        entry("c", &[0.0, 0.0]),
        entry("d", &[-1.0, 0.0]),
        entry("a", &[0.0, -1.0]),
    ];
    let ranked = rank(&target, &corpus, Metric::Ssd, 10).unwrap();
    assert_eq!(ids(&ranked), vec!["c", "a", "b", "d", "a"]);
}

#[test]
fn result_length_is_n_plus_one_capped_by_corpus() {
    let corpus: Vec<CorpusEntry> = (0..10)
        .map(|i| CorpusEntry::new(format!("img{i}"), vec![i as f32]))
        .collect();
    assert_eq!(rank(&[0.0], &corpus, Metric::Ssd, 1).unwrap().len(), 2);
    assert_eq!(rank(&[0.0], &corpus, Metric::Ssd, 9).unwrap().len(), 10);
    assert_eq!(rank(&[0.0], &corpus, Metric::Ssd, 50).unwrap().len(), 10);
}

#[test]
fn invalid_requests_are_rejected() {
    let corpus = vec![entry("a", &[1.0])];
    assert!(matches!(
        rank(&[1.0], &corpus, Metric::Ssd, 0),
        Err(CbirError::InvalidArgument { .. })
    ));
    assert_eq!(
        rank(&[1.0], &[], Metric::Ssd, 3).err().unwrap(),
        CbirError::EmptyCorpus
    );
}

#[test]
fn a_single_mismatched_entry_aborts_ranking() {
    let target = vec![0.0f32; 147];
    let corpus = vec![
        CorpusEntry::new("ok", vec![0.0; 147]),
        CorpusEntry::new("bad", vec![0.0; 150]),
        CorpusEntry::new("ok2", vec![1.0; 147]),
    ];
    assert_eq!(
        rank(&target, &corpus, Metric::Ssd, 2).err().unwrap(),
        CbirError::DimensionMismatch {
            left: 147,
            right: 150
        }
    );
}

#[test]
fn nan_scores_sink_to_the_end() {
    let target = [1.0f32, 0.0];
    let corpus = vec![
        entry("zero", &[0.0, 0.0]),
        entry("orthogonal", &[0.0, 1.0]),
        entry("parallel", &[3.0, 0.0]),
    ];
    let ranked = rank(&target, &corpus, Metric::Cosine, 5).unwrap();
    assert_eq!(ids(&ranked), vec!["parallel", "orthogonal", "zero"]);
    assert!(ranked[2].score.is_nan());
}

#[test]
fn rank_by_id_uses_stored_target_vector() {
    let corpus = vec![
        entry("x.jpg", &[1.0, 0.0, 0.0]),
        entry("y.jpg", &[0.9, 0.1, 0.0]),
        entry("z.jpg", &[0.0, 0.0, 1.0]),
    ];
    let ranker = Ranker::new(Metric::Cosine);
    let ranked = ranker.rank_by_id("y.jpg", &corpus, 1).unwrap();
    assert_eq!(ids(&ranked), vec!["y.jpg", "x.jpg"]);

    assert!(matches!(
        ranker.rank_by_id("missing.jpg", &corpus, 1),
        Err(CbirError::InvalidArgument { .. })
    ));
}

#[test]
fn without_self_drops_only_a_leading_self_match() {
    let ranked = vec![
        ScoredMatch {
            id: "t".into(),
            score: 0.0,
        },
        ScoredMatch {
            id: "u".into(),
            score: 1.0,
        },
        ScoredMatch {
            id: "v".into(),
            score: 2.0,
        },
    ];
    assert_eq!(ids(&without_self(ranked.clone(), "t", 2)), vec!["u", "v"]);
    assert_eq!(ids(&without_self(ranked, "other", 2)), vec!["t", "u"]);
}
