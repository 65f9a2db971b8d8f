//! Preset + overrides → pixel size → latent grid.
//!
//! The two node variants size their latents differently and both behaviours
//! are kept as separate [`LatentSizing`] policies:
//!
//! * [`LatentSizing::Ceil`] rounds the latent grid up (`ceil(dim / factor)`)
//!   and reports the pixel size the grid actually covers.
//! * [`LatentSizing::Aligned64`] first truncates the pixel size to a multiple
//!   of 64, then floor-divides by 8, and reports the truncated size.

use std::fmt;
use std::str::FromStr;

use latent_host::config::MIN_RESOLUTION;
use log::debug;

use crate::error::ResolutionError;
use crate::preset::ResolutionPreset;

/// Which dimension an override pins while the other follows the base ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatioLock {
    #[default]
    Unlocked,
    Width,
    Height,
}

impl AspectRatioLock {
    pub const OPTIONS: [&'static str; 3] = ["Unlocked", "Width", "Height"];

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatioLock::Unlocked => "Unlocked",
            AspectRatioLock::Width => "Width",
            AspectRatioLock::Height => "Height",
        }
    }
}

impl FromStr for AspectRatioLock {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Unlocked" => Ok(AspectRatioLock::Unlocked),
            "Width" => Ok(AspectRatioLock::Width),
            "Height" => Ok(AspectRatioLock::Height),
            other => Err(format!("unknown aspect ratio lock '{}'", other)),
        }
    }
}

impl fmt::Display for AspectRatioLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel-to-latent ratio selected on the extended node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownsampleFactor {
    /// Resolves to 8, the factor of the common image VAEs.
    #[default]
    Auto,
    Four,
    Eight,
}

impl DownsampleFactor {
    pub const OPTIONS: [&'static str; 3] = ["auto", "4", "8"];

    pub fn value(&self) -> u32 {
        match self {
            DownsampleFactor::Auto | DownsampleFactor::Eight => 8,
            DownsampleFactor::Four => 4,
        }
    }
}

impl FromStr for DownsampleFactor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(DownsampleFactor::Auto),
            "4" => Ok(DownsampleFactor::Four),
            "8" => Ok(DownsampleFactor::Eight),
            other => Err(format!("unsupported downsample factor '{}'", other)),
        }
    }
}

/// How pixel dimensions become latent dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatentSizing {
    /// `ceil(dim / factor)`; reported size is `latent * factor`.
    Ceil { factor: u32 },
    /// Truncate to a multiple of 64, then `dim / 8`; reported size is the
    /// truncated one.
    Aligned64,
}

impl LatentSizing {
    const ALIGNMENT: u32 = 64;
    const ALIGNED_FACTOR: u32 = 8;

    fn apply(&self, width: u32, height: u32) -> Result<ResolvedLatent, ResolutionError> {
        match *self {
            LatentSizing::Ceil { factor } => {
                let latent_width = width.div_ceil(factor);
                let latent_height = height.div_ceil(factor);
                let covered = latent_width
                    .checked_mul(factor)
                    .zip(latent_height.checked_mul(factor));
                let (covered_width, covered_height) = covered.ok_or(ResolutionError::TooLarge {
                    width,
                    height,
                    factor,
                })?;
                Ok(ResolvedLatent {
                    width: covered_width,
                    height: covered_height,
                    latent_width,
                    latent_height,
                })
            }
            LatentSizing::Aligned64 => {
                let width = (width / Self::ALIGNMENT) * Self::ALIGNMENT;
                let height = (height / Self::ALIGNMENT) * Self::ALIGNMENT;
                Ok(ResolvedLatent {
                    width,
                    height,
                    latent_width: width / Self::ALIGNED_FACTOR,
                    latent_height: height / Self::ALIGNED_FACTOR,
                })
            }
        }
    }
}

/// Everything the resolver needs besides the host limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub base: ResolutionPreset,
    /// 0 leaves the base width in place.
    pub width_override: u32,
    /// 0 leaves the base height in place.
    pub height_override: u32,
    pub lock: AspectRatioLock,
    pub invert: bool,
}

impl ResolutionRequest {
    pub fn new(base: ResolutionPreset) -> Self {
        Self {
            base,
            width_override: 0,
            height_override: 0,
            lock: AspectRatioLock::Unlocked,
            invert: false,
        }
    }

    pub fn with_overrides(mut self, width: u32, height: u32) -> Self {
        self.width_override = width;
        self.height_override = height;
        self
    }

    pub fn with_lock(mut self, lock: AspectRatioLock) -> Self {
        self.lock = lock;
        self
    }

    pub fn inverted(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }
}

/// Final pixel size reported to the host plus the latent grid behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLatent {
    pub width: u32,
    pub height: u32,
    pub latent_width: u32,
    pub latent_height: u32,
}

impl ResolvedLatent {
    /// `[batch, channels, latent_height, latent_width]`
    pub fn shape(&self, batch_size: usize, channels: usize) -> [usize; 4] {
        [
            batch_size,
            channels,
            self.latent_height as usize,
            self.latent_width as usize,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
    max_resolution: u32,
}

impl Resolver {
    pub fn new(max_resolution: u32) -> Self {
        Self { max_resolution }
    }

    pub fn max_resolution(&self) -> u32 {
        self.max_resolution
    }

    /// Pixel size after overrides, lock, inversion and clamping to
    /// `[64, max_resolution]`.
    pub fn pixel_size(&self, request: &ResolutionRequest) -> (u32, u32) {
        let max = self.max_resolution;
        let base = request.base;
        let (mut width, mut height) = (base.width, base.height);

        match request.lock {
            AspectRatioLock::Width if request.width_override > 0 => {
                width = request.width_override.min(max);
                height = scale(base.height, base.width, width).max(MIN_RESOLUTION);
            }
            AspectRatioLock::Height if request.height_override > 0 => {
                height = request.height_override.min(max);
                width = scale(base.width, base.height, height).max(MIN_RESOLUTION);
            }
            _ => {
                if request.width_override > 0 {
                    width = request.width_override.min(max);
                }
                if request.height_override > 0 {
                    height = request.height_override.min(max);
                }
            }
        }

        if request.invert {
            std::mem::swap(&mut width, &mut height);
        }

        (clamp_dimension(width, max), clamp_dimension(height, max))
    }

    pub fn resolve(
        &self,
        request: &ResolutionRequest,
        sizing: LatentSizing,
    ) -> Result<ResolvedLatent, ResolutionError> {
        let (width, height) = self.pixel_size(request);
        let resolved = sizing.apply(width, height)?;
        debug!(
            "Resolved {}x{} (override {}x{}, lock {}, invert {}) to {}x{}, latent {}x{} via {:?}",
            request.base.width,
            request.base.height,
            request.width_override,
            request.height_override,
            request.lock,
            request.invert,
            resolved.width,
            resolved.height,
            resolved.latent_width,
            resolved.latent_height,
            sizing
        );
        Ok(resolved)
    }
}

/// `round(numerator / denominator * target)` with ties to even.
fn scale(numerator: u32, denominator: u32, target: u32) -> u32 {
    let ratio = numerator as f64 / denominator as f64;
    (ratio * target as f64).round_ties_even() as u32
}

fn clamp_dimension(value: u32, max: u32) -> u32 {
    value.min(max).max(MIN_RESOLUTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: u32 = 16384;

    fn request(preset: &str) -> ResolutionRequest {
        ResolutionRequest::new(ResolutionPreset::parse(preset).unwrap())
    }

    #[test]
    fn width_lock_keeps_square_ratio() {
        let req = request("1024x1024 (1:1)")
            .with_overrides(512, 0)
            .with_lock(AspectRatioLock::Width);
        assert_eq!(Resolver::new(MAX).pixel_size(&req), (512, 512));
    }

    #[test]
    fn height_lock_derives_width_from_base_ratio() {
        let req = request("832x1216 (13:19)")
            .with_overrides(0, 608)
            .with_lock(AspectRatioLock::Height);
        // 832 / 1216 * 608 = 416
        assert_eq!(Resolver::new(MAX).pixel_size(&req), (416, 608));
    }

    #[test]
    fn lock_without_matching_override_applies_overrides_independently() {
        let req = request("1024x1024 (1:1)")
            .with_overrides(0, 768)
            .with_lock(AspectRatioLock::Width);
        assert_eq!(Resolver::new(MAX).pixel_size(&req), (1024, 768));
    }

    #[test]
    fn derived_dimension_never_drops_below_minimum() {
        let req = request("1600x512 (25:8)")
            .with_overrides(64, 0)
            .with_lock(AspectRatioLock::Width);
        // 512 / 1600 * 64 = 20.48
        assert_eq!(Resolver::new(MAX).pixel_size(&req), (64, 64));
    }

    #[test]
    fn lock_rounds_half_to_even() {
        // 1000 / 1600 * 100 = 62.5 -> 62, then lifted to the minimum.
        assert_eq!(scale(1000, 1600, 100), 62);
        // 1 / 2 * 5 = 2.5 -> 2; 1 / 2 * 7 = 3.5 -> 4
        assert_eq!(scale(1, 2, 5), 2);
        assert_eq!(scale(1, 2, 7), 4);
    }

    #[test]
    fn invert_swaps_after_lock() {
        let req = request("1024x512 (2:1)")
            .with_overrides(512, 0)
            .with_lock(AspectRatioLock::Width)
            .inverted(true);
        assert_eq!(Resolver::new(MAX).pixel_size(&req), (256, 512));
    }

    #[test]
    fn overrides_are_capped_at_max_resolution() {
        let req = request("1024x1024 (1:1)").with_overrides(9000, 20000);
        assert_eq!(Resolver::new(8192).pixel_size(&req), (8192, 8192));
    }

    #[test]
    fn dimensions_stay_in_bounds_for_any_override() {
        let resolver = Resolver::new(2048);
        let overrides = [0, 8, 56, 64, 520, 2040, 2048, 4096];
        let locks = [
            AspectRatioLock::Unlocked,
            AspectRatioLock::Width,
            AspectRatioLock::Height,
        ];
        for preset in ["512x512 (1:1)", "1600x512 (25:8)", "640x1536 (5:12)"] {
            for &w in &overrides {
                for &h in &overrides {
                    for lock in locks {
                        for invert in [false, true] {
                            let req = request(preset)
                                .with_overrides(w, h)
                                .with_lock(lock)
                                .inverted(invert);
                            let (width, height) = resolver.pixel_size(&req);
                            assert!((64..=2048).contains(&width), "{preset} {w} {h} {lock}");
                            assert!((64..=2048).contains(&height), "{preset} {w} {h} {lock}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn ceil_sizing_reports_covered_pixels() {
        let resolver = Resolver::new(MAX);
        let resolved = resolver
            .resolve(&request("1024x1024"), LatentSizing::Ceil { factor: 8 })
            .unwrap();
        assert_eq!((resolved.latent_width, resolved.latent_height), (128, 128));
        assert_eq!((resolved.width, resolved.height), (1024, 1024));

        let odd = request("1024x1024").with_overrides(1020, 0);
        let resolved = resolver.resolve(&odd, LatentSizing::Ceil { factor: 8 }).unwrap();
        assert_eq!(resolved.latent_width, 128);
        assert_eq!(resolved.width, 1024);

        let resolved = resolver.resolve(&odd, LatentSizing::Ceil { factor: 4 }).unwrap();
        assert_eq!(resolved.latent_width, 255);
        assert_eq!(resolved.width, 1020);
    }

    #[test]
    fn ceil_sizing_rejects_grid_past_u32() {
        let resolver = Resolver::new(u32::MAX);
        let huge = request("1024x1024").with_overrides(u32::MAX, u32::MAX);

        let err = resolver
            .resolve(&huge, LatentSizing::Ceil { factor: 8 })
            .unwrap_err();
        assert_eq!(
            err,
            ResolutionError::TooLarge {
                width: u32::MAX,
                height: u32::MAX,
                factor: 8
            }
        );

        // Truncation never grows the size, so the aligned policy still resolves.
        let resolved = resolver.resolve(&huge, LatentSizing::Aligned64).unwrap();
        assert_eq!(resolved.width % 64, 0);
    }

    #[test]
    fn aligned_sizing_truncates_to_64() {
        let resolver = Resolver::new(MAX);
        let resolved = resolver
            .resolve(&request("640x1536 (0.98)"), LatentSizing::Aligned64)
            .unwrap();
        assert_eq!((resolved.width, resolved.height), (640, 1536));
        assert_eq!(resolved.shape(1, 4), [1, 4, 192, 80]);

        let odd = request("1024x1024 (1.0)").with_overrides(1016, 600);
        let resolved = resolver.resolve(&odd, LatentSizing::Aligned64).unwrap();
        assert_eq!((resolved.width, resolved.height), (960, 576));
        assert_eq!((resolved.latent_width, resolved.latent_height), (120, 72));
    }

    #[test]
    fn option_strings_round_trip() {
        for option in AspectRatioLock::OPTIONS {
            assert_eq!(option.parse::<AspectRatioLock>().unwrap().as_str(), option);
        }
        assert_eq!("auto".parse::<DownsampleFactor>().unwrap().value(), 8);
        assert_eq!("4".parse::<DownsampleFactor>().unwrap().value(), 4);
        assert!("16".parse::<DownsampleFactor>().is_err());
    }
}
