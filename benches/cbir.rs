use cbir::{CorpusEntry, Descriptor, ImageView, Metric, Ranker};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> Vec<[u8; 3]> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let b = ((x * 13) ^ (y * 7)) & 0xFF;
            let g = ((x * y) ^ (x * 3)) & 0xFF;
            let r = ((y * 11) ^ (x * 5)) & 0xFF;
            data.push([b as u8, g as u8, r as u8]);
        }
    }
    data
}

fn make_corpus(len: usize, dim: usize) -> Vec<CorpusEntry> {
    (0..len)
        .map(|i| {
            let vector = (0..dim)
                .map(|j| (((i * 31 + j * 17) % 97) as f32) / 97.0)
                .collect();
            CorpusEntry::new(format!("img{i:05}.jpg"), vector)
        })
        .collect()
}

fn bench_extract(c: &mut Criterion) {
    let (width, height) = (320, 240);
    let image = make_image(width, height);
    let view = ImageView::from_slice(&image, width, height).unwrap();

    for tag in ["b", "h2", "h3", "m", "t", "tc", "glcm", "laws", "c"] {
        let descriptor = Descriptor::from_tag(tag).unwrap();
        c.bench_function(&format!("extract_{tag}_320x240"), |b| {
            b.iter(|| black_box(descriptor.extract(view).unwrap()));
        });
    }

    let small = make_image(96, 72);
    let small_view = ImageView::from_slice(&small, 96, 72).unwrap();
    let gabor = Descriptor::from_tag("gabor").unwrap();
    c.bench_function("extract_gabor_96x72", |b| {
        b.iter(|| black_box(gabor.extract(small_view).unwrap()));
    });
}

fn bench_rank(c: &mut Criterion) {
    let corpus = make_corpus(2000, 512);
    let target = corpus[123].vector.clone();

    for metric in [Metric::Ssd, Metric::Intersection, Metric::Cosine] {
        let ranker = Ranker::new(metric);
        c.bench_function(&format!("rank_{}_2000x512", metric.name()), |b| {
            b.iter(|| black_box(ranker.rank(&target, &corpus, 10).unwrap()));
        });
    }

    #[cfg(feature = "rayon")]
    {
        let ranker = Ranker::new(Metric::Intersection)
            .with_config(cbir::RankConfig { parallel: true });
        c.bench_function("rank_intersection_2000x512_parallel", |b| {
            b.iter(|| black_box(ranker.rank(&target, &corpus, 10).unwrap()));
        });
    }
}

criterion_group!(benches, bench_extract, bench_rank);
criterion_main!(benches);
