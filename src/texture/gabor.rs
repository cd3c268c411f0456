//! Gabor filter bank statistics.

use crate::image::{grayscale, Bgr, ImageView};
use crate::texture::filter::{filter_2d, FilterKernel};
use crate::util::math::mean_std;
use crate::util::{CbirError, CbirResult};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Filter bank configuration for [`gabor_features`].
#[derive(Clone, Debug, PartialEq)]
pub struct GaborParams {
    /// Side length of the square kernel (odd).
    pub kernel_size: usize,
    /// Standard deviation of the Gaussian envelope along the carrier.
    pub sigma: f32,
    /// Spatial aspect ratio of the envelope.
    pub gamma: f32,
    /// Phase offset of the carrier in radians.
    pub psi: f32,
    /// Carrier wavelengths in pixels.
    pub wavelengths: Vec<f32>,
    /// Carrier orientations in radians.
    pub orientations: Vec<f32>,
}

impl Default for GaborParams {
    fn default() -> Self {
        Self {
            kernel_size: 31,
            sigma: 2.5,
            gamma: 0.5,
            psi: FRAC_PI_2,
            wavelengths: vec![10.0, 20.0, 30.0],
            orientations: vec![0.0, FRAC_PI_4, FRAC_PI_2, 3.0 * FRAC_PI_4],
        }
    }
}

impl GaborParams {
    /// Number of values produced by [`gabor_features`].
    pub fn feature_len(&self) -> usize {
        2 * self.wavelengths.len() * self.orientations.len()
    }

    fn validate(&self) -> CbirResult<()> {
        check_envelope(self.kernel_size, self.sigma, self.gamma)?;
        self.wavelengths.iter().try_for_each(|&l| check_wavelength(l))
    }
}

fn check_envelope(size: usize, sigma: f32, gamma: f32) -> CbirResult<()> {
    if size % 2 == 0 {
        return Err(CbirError::InvalidArgument {
            reason: "gabor kernel size must be odd",
        });
    }
    if !(sigma > 0.0) || !(gamma > 0.0) {
        return Err(CbirError::InvalidArgument {
            reason: "gabor sigma and gamma must be positive",
        });
    }
    Ok(())
}

fn check_wavelength(lambda: f32) -> CbirResult<()> {
    if !(lambda > 0.0) {
        return Err(CbirError::InvalidArgument {
            reason: "gabor wavelengths must be positive",
        });
    }
    Ok(())
}

/// Generates a real Gabor kernel.
///
/// `g(x, y) = exp(-(x'^2 + gamma^2 y'^2) / (2 sigma^2)) * cos(2 pi x' / lambda + psi)`
/// with `x' = x cos(theta) + y sin(theta)` and `y' = -x sin(theta) + y cos(theta)`.
/// The kernel is stored flipped on both axes so that filtering with it is a
/// convolution with `g`.
///
/// `size` must be odd; `sigma`, `gamma` and `lambda` must be positive.
pub fn gabor_kernel(
    size: usize,
    sigma: f32,
    theta: f32,
    lambda: f32,
    gamma: f32,
    psi: f32,
) -> CbirResult<FilterKernel> {
    check_envelope(size, sigma, gamma)?;
    check_wavelength(lambda)?;
    let half = (size / 2) as isize;
    let sigma_x = f64::from(sigma);
    let sigma_y = f64::from(sigma) / f64::from(gamma);
    let ex = -0.5 / (sigma_x * sigma_x);
    let ey = -0.5 / (sigma_y * sigma_y);
    let (s, c) = f64::from(theta).sin_cos();
    let cscale = 2.0 * f64::from(PI) / f64::from(lambda);
    let psi = f64::from(psi);

    let mut weights = vec![0.0f32; size * size];
    for y in -half..=half {
        for x in -half..=half {
            let (xf, yf) = (x as f64, y as f64);
            let xr = xf * c + yf * s;
            let yr = -xf * s + yf * c;
            let v = (ex * xr * xr + ey * yr * yr).exp() * (cscale * xr + psi).cos();
            let row = (half - y) as usize;
            let col = (half - x) as usize;
            weights[row * size + col] = v as f32;
        }
    }
    FilterKernel::new(weights, size, size)
}

/// Mean and standard deviation of each Gabor response over the luma image.
///
/// Values are ordered wavelength-major, orientation-minor, with the mean
/// before the standard deviation for every pair.
pub fn gabor_features(image: ImageView<'_, Bgr>, params: &GaborParams) -> CbirResult<Vec<f32>> {
    params.validate()?;
    let gray = grayscale(image)?;
    let mut out = Vec::with_capacity(params.feature_len());
    for &lambda in &params.wavelengths {
        for &theta in &params.orientations {
            let kernel = gabor_kernel(
                params.kernel_size,
                params.sigma,
                theta,
                lambda,
                params.gamma,
                params.psi,
            )?;
            let response = filter_2d(gray.view(), &kernel)?;
            let (mean, std) = mean_std(response.data());
            out.push(mean);
            out.push(std);
        }
    }
    Ok(out)
}
