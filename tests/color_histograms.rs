use cbir::{center_patch, chroma_2d, chroma_3d, multi_part_rgb, ssd, Bgr, CbirError, ImageView};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_image(rng: &mut StdRng, width: usize, height: usize) -> Vec<Bgr> {
    (0..width * height)
        .map(|_| {
            [
                rng.random_range(0..=255),
                rng.random_range(0..=255),
                rng.random_range(0..=255),
            ]
        })
        .collect()
}

fn assert_normalized(hist: &[f32]) {
    let sum: f32 = hist.iter().sum();
    assert!((sum - 1.0).abs() < 1e-5, "sum = {sum}");
    assert!(hist.iter().all(|&v| (0.0..=1.0).contains(&v)));
}

#[test]
fn center_patch_is_row_major_channel_minor() {
    let (width, height) = (9, 9);
    let data: Vec<Bgr> = (0..height)
        .flat_map(|y| (0..width).map(move |x| [x as u8, y as u8, 7]))
        .collect();
    let view = ImageView::from_slice(&data, width, height).unwrap();

    let patch = center_patch(view).unwrap();
    assert_eq!(patch.len(), 147);
    // Center (4, 4): the block spans columns and rows 1..8.
    assert_eq!(&patch[0..3], &[1.0, 1.0, 7.0]);
    assert_eq!(&patch[3..6], &[2.0, 1.0, 7.0]);
    let last = (6 * 7 + 6) * 3;
    assert_eq!(&patch[last..last + 3], &[7.0, 7.0, 7.0]);
}

#[test]
fn center_patch_rejects_small_images() {
    let data = vec![[0u8; 3]; 6 * 10];
    let view = ImageView::from_slice(&data, 6, 10).unwrap();
    assert!(matches!(
        center_patch(view),
        Err(CbirError::InvalidInput { .. })
    ));

    let data = vec![[0u8; 3]; 7 * 7];
    let view = ImageView::from_slice(&data, 7, 7).unwrap();
    assert_eq!(center_patch(view).unwrap().len(), 147);
}

#[test]
fn black_images_have_zero_baseline_distance() {
    let data = vec![[0u8; 3]; 100];
    let a = ImageView::from_slice(&data, 10, 10).unwrap();
    let other = data.clone();
    let b = ImageView::from_slice(&other, 10, 10).unwrap();
    let distance = ssd(&center_patch(a).unwrap(), &center_patch(b).unwrap()).unwrap();
    assert_eq!(distance, 0.0);
}

#[test]
fn chroma_histograms_are_normalized_for_all_bin_counts() {
    let mut rng = StdRng::seed_from_u64(7);
    let data = random_image(&mut rng, 23, 17);
    let view = ImageView::from_slice(&data, 23, 17).unwrap();
    for bins in [1usize, 2, 3, 8, 16, 32] {
        let h2 = chroma_2d(view, bins).unwrap();
        assert_eq!(h2.len(), bins * bins);
        assert_normalized(&h2);

        let h3 = chroma_3d(view, bins).unwrap();
        assert_eq!(h3.len(), bins * bins * bins);
        assert_normalized(&h3);
    }
}

#[test]
fn chroma_2d_skips_black_pixels_and_clamps_top_bin() {
    let data: Vec<Bgr> = vec![[0, 0, 0], [0, 0, 100]];
    let view = ImageView::from_slice(&data, 2, 1).unwrap();
    let bins = 4;
    let hist = chroma_2d(view, bins).unwrap();
    // Pure red: r = 1 clamps to the last bin, g = 0.
    assert_eq!(hist[(bins - 1) * bins], 1.0);
    assert_eq!(hist.iter().filter(|&&v| v > 0.0).count(), 1);
}

#[test]
fn chroma_3d_uses_red_major_index() {
    let data: Vec<Bgr> = vec![[0, 128, 255]];
    let view = ImageView::from_slice(&data, 1, 1).unwrap();
    let hist = chroma_3d(view, 4).unwrap();
    // r -> 3, g -> 2, b -> 0.
    assert_eq!(hist[3 * 16 + 2 * 4], 1.0);
}

#[test]
fn zero_bins_is_an_invalid_argument() {
    let data = vec![[1u8; 3]; 4];
    let view = ImageView::from_slice(&data, 2, 2).unwrap();
    assert!(matches!(
        chroma_3d(view, 0),
        Err(CbirError::InvalidArgument { .. })
    ));
    assert!(matches!(
        chroma_2d(view, 0),
        Err(CbirError::InvalidArgument { .. })
    ));
}

#[test]
fn multi_part_concatenates_top_and_bottom_halves() {
    let mut rng = StdRng::seed_from_u64(11);
    let (width, height) = (12, 5);
    let data = random_image(&mut rng, width, height);
    let view = ImageView::from_slice(&data, width, height).unwrap();
    let bins = 3;

    let multi = multi_part_rgb(view, bins).unwrap();
    assert_eq!(multi.len(), 2 * bins * bins * bins);

    let top = chroma_3d(view.roi(0, 0, width, 2).unwrap(), bins).unwrap();
    let bottom = chroma_3d(view.roi(0, 2, width, 3).unwrap(), bins).unwrap();
    let expected: Vec<f32> = top.into_iter().chain(bottom).collect();
    assert_eq!(multi, expected);
}

#[test]
fn multi_part_single_row_has_empty_top() {
    let data = vec![[9u8, 9, 9]; 4];
    let view = ImageView::from_slice(&data, 4, 1).unwrap();
    let multi = multi_part_rgb(view, 2).unwrap();
    assert!(multi[..8].iter().all(|&v| v == 0.0));
    let bottom_sum: f32 = multi[8..].iter().sum();
    assert!((bottom_sum - 1.0).abs() < 1e-6);
}

#[test]
fn oversized_bin_counts_are_rejected() {
    let data = vec![[1u8; 3]; 4];
    let view = ImageView::from_slice(&data, 2, 2).unwrap();
    for bins in [1usize << 22, 257, usize::MAX] {
        assert!(matches!(
            chroma_3d(view, bins),
            Err(CbirError::InvalidArgument { .. })
        ));
        assert!(matches!(
            multi_part_rgb(view, bins),
            Err(CbirError::InvalidArgument { .. })
        ));
    }
    assert!(matches!(
        chroma_2d(view, usize::MAX),
        Err(CbirError::InvalidArgument { .. })
    ));
    assert_eq!(chroma_3d(view, 256).unwrap().len(), 1 << 24);
}
