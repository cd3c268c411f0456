use cbir::descriptor::TAGS;
use cbir::{
    color_texture, custom, rank, Bgr, CbirError, CorpusEntry, CustomWeights, Descriptor,
    GaborParams, ImageView, Metric,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_image(seed: u64, width: usize, height: usize) -> Vec<Bgr> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..width * height)
        .map(|_| [rng.random(), rng.random(), rng.random()])
        .collect()
}

#[test]
fn tags_round_trip() {
    for tag in TAGS {
        let descriptor: Descriptor = tag.parse().unwrap();
        assert_eq!(descriptor.tag(), tag);
    }
    assert_eq!(
        Descriptor::from_tag("zz").err().unwrap(),
        CbirError::UnknownDescriptor { tag: "zz".into() }
    );
}

#[test]
fn extracted_lengths_match_declared_lengths() {
    let (width, height) = (40, 32);
    let data = random_image(5, width, height);
    let view = ImageView::from_slice(&data, width, height).unwrap();
    for tag in TAGS.iter().filter(|&&t| t != "e") {
        let descriptor = Descriptor::from_tag(tag).unwrap();
        let vector = descriptor.extract(view).unwrap();
        assert_eq!(Some(vector.len()), descriptor.vector_len(), "tag {tag}");
    }
}

#[test]
fn descriptors_pair_with_expected_metrics() {
    assert_eq!(Descriptor::Baseline.metric(), Metric::Ssd);
    assert_eq!(Descriptor::Chroma2d { bins: 16 }.metric(), Metric::Intersection);
    assert_eq!(
        Descriptor::MultiPart { bins: 8 }.metric(),
        Metric::SplitIntersection { split: 512 }
    );
    assert_eq!(
        Descriptor::ColorTexture {
            color_bins: 4,
            texture_bins: 16
        }
        .metric(),
        Metric::SplitIntersection { split: 64 }
    );
    assert_eq!(Descriptor::Laws.metric(), Metric::Ssd);
    assert_eq!(Descriptor::Gabor(GaborParams::default()).metric(), Metric::Ssd);
    assert_eq!(Descriptor::Embedding.metric(), Metric::Cosine);
}

#[test]
fn embeddings_cannot_be_extracted() {
    let data = random_image(1, 8, 8);
    let view = ImageView::from_slice(&data, 8, 8).unwrap();
    assert!(matches!(
        Descriptor::Embedding.extract(view),
        Err(CbirError::InvalidArgument { .. })
    ));
    assert_eq!(Descriptor::Embedding.vector_len(), None);
}

#[test]
fn color_texture_splits_into_color_then_texture() {
    let data = random_image(2, 16, 12);
    let view = ImageView::from_slice(&data, 16, 12).unwrap();
    let vector = color_texture(view, 4, 8).unwrap();
    assert_eq!(vector.len(), 64 + 8);
    let color: f32 = vector[..64].iter().sum();
    let texture: f32 = vector[64..].iter().sum();
    assert!((color - 1.0).abs() < 1e-5);
    assert!((texture - 1.0).abs() < 1e-5);
}

#[test]
fn custom_presets_are_distinct_weightings() {
    let presets = [
        CustomWeights::SMALL,
        CustomWeights::MEDIUM,
        CustomWeights::LARGE,
    ];
    assert_ne!(presets[0], presets[1]);
    assert_ne!(presets[1], presets[2]);
    assert_eq!(CustomWeights::preset("large"), Some(CustomWeights::LARGE));
    assert_eq!(CustomWeights::preset("huge"), None);

    let data = random_image(3, 24, 24);
    let view = ImageView::from_slice(&data, 24, 24).unwrap();
    let small = custom(view, 4, CustomWeights::SMALL).unwrap();
    let large = custom(view, 4, CustomWeights::LARGE).unwrap();
    assert_eq!(small.len(), 3 * 64 + 4);
    assert_ne!(small, large);
    for vector in [&small, &large] {
        let sum: f32 = vector.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }
}

#[test]
fn custom_rejects_degenerate_weights() {
    let data = random_image(4, 8, 8);
    let view = ImageView::from_slice(&data, 8, 8).unwrap();
    for weights in [[0.0f32; 4], [1.0, -1.0, 1.0, 1.0], [f32::NAN, 1.0, 1.0, 1.0]] {
        assert!(matches!(
            custom(view, 4, CustomWeights(weights)),
            Err(CbirError::InvalidArgument { .. })
        ));
    }
}

#[test]
fn end_to_end_retrieval_finds_the_similar_image() {
    let (width, height) = (32, 24);
    let reddish: Vec<Bgr> = vec![[20, 30, 220]; width * height];
    let mut reddish_noisy = reddish.clone();
    for px in reddish_noisy[(height - 3) * width..].iter_mut() {
        *px = [40, 40, 200];
    }
    let bluish: Vec<Bgr> = vec![[220, 40, 10]; width * height];
    let greenish: Vec<Bgr> = vec![[30, 210, 30]; width * height];

    for tag in ["h2", "h3", "m", "tc", "c"] {
        let descriptor = Descriptor::from_tag(tag).unwrap();
        let extract = |data: &[Bgr]| {
            let view = ImageView::from_slice(data, width, height).unwrap();
            descriptor.extract(view).unwrap()
        };
        let target = extract(&reddish);
        let corpus = vec![
            CorpusEntry::new("target", target.clone()),
            CorpusEntry::new("blue", extract(&bluish)),
            CorpusEntry::new("red", extract(&reddish_noisy)),
            CorpusEntry::new("green", extract(&greenish)),
        ];
        let ranked = rank(&target, &corpus, descriptor.metric(), 1).unwrap();
        assert_eq!(ranked.len(), 2, "tag {tag}");
        assert_eq!(ranked[0].id, "target", "tag {tag}");
        assert_eq!(ranked[1].id, "red", "tag {tag}");
    }
}

#[test]
fn oversized_bins_fail_without_panicking() {
    let data = random_image(6, 8, 8);
    let view = ImageView::from_slice(&data, 8, 8).unwrap();
    let bins = 1usize << 22;
    let descriptors = [
        Descriptor::Chroma2d { bins: usize::MAX },
        Descriptor::Chroma3d { bins },
        Descriptor::MultiPart { bins },
        Descriptor::Texture { bins: usize::MAX },
        Descriptor::ColorTexture {
            color_bins: bins,
            texture_bins: 16,
        },
        Descriptor::Custom {
            bins,
            weights: CustomWeights::default(),
        },
    ];
    for descriptor in descriptors {
        assert_eq!(descriptor.vector_len(), None, "{descriptor:?}");
        assert!(matches!(
            descriptor.extract(view),
            Err(CbirError::InvalidArgument { .. })
        ));
    }
    assert!(matches!(
        cbir::composite::custom_len(bins),
        Err(CbirError::InvalidArgument { .. })
    ));
}
