//! Resolution presets offered in the node dropdowns.

use std::str::FromStr;

use crate::error::ResolutionError;

pub const FLUX_DEFAULT_PRESET: &str = "1024x1024 (1:1)";

/// Extended catalogue, grouped by aspect ratio.
pub const FLUX_PRESETS: &[&str] = &[
    // Square
    "512x512 (1:1)",
    "576x576 (1:1)",
    "640x640 (1:1)",
    "704x704 (1:1)",
    "768x768 (1:1)",
    "832x832 (1:1)",
    "896x896 (1:1)",
    "960x960 (1:1)",
    "1024x1024 (1:1)",
    "1088x1088 (1:1)",
    "1152x1152 (1:1)",
    "1216x1216 (1:1)",
    "1280x1280 (1:1)",
    "1344x1344 (1:1)",
    "1408x1408 (1:1)",
    "1472x1472 (1:1)",
    "1536x1536 (1:1)",
    // Portrait
    "512x768 (2:3)",
    "576x864 (2:3)",
    "640x960 (2:3)",
    "704x1056 (2:3)",
    "768x1152 (2:3)",
    "832x1248 (2:3)",
    "896x1344 (2:3)",
    "960x1440 (2:3)",
    "1024x1536 (2:3)",
    // Landscape
    "768x512 (3:2)",
    "864x576 (3:2)",
    "960x640 (3:2)",
    "1056x704 (3:2)",
    "1152x768 (3:2)",
    "1248x832 (3:2)",
    "1344x896 (3:2)",
    "1440x960 (3:2)",
    "1536x1024 (3:2)",
    // Ultra portrait
    "512x1024 (1:2)",
    "576x1152 (1:2)",
    "640x1280 (1:2)",
    "704x1408 (1:2)",
    "768x1536 (1:2)",
    // Ultra landscape
    "1024x512 (2:1)",
    "1152x576 (2:1)",
    "1280x640 (2:1)",
    "1408x704 (2:1)",
    "1536x768 (2:1)",
    // Mobile / story
    "512x896 (4:7)",
    "576x1008 (4:7)",
    "640x1120 (4:7)",
    "704x1232 (4:7)",
    "768x1344 (4:7)",
    "832x1456 (4:7)",
    // Widescreen
    "1024x576 (16:9)",
    "1152x648 (16:9)",
    "1280x720 (16:9)",
    "1408x792 (16:9)",
    "1536x864 (16:9)",
    "1664x936 (16:9)",
    "1792x1008 (16:9)",
    "1920x1080 (16:9)",
    // Custom ratios
    "640x1536 (5:12)",
    "704x1408 (1:2)",
    "768x1280 (3:5)",
    "832x1216 (13:19)",
    "896x1152 (7:9)",
    "960x1024 (15:16)",
    "1152x896 (9:7)",
    "1216x832 (19:13)",
    "1280x768 (5:3)",
    "1344x704 (21:11)",
    "1408x640 (11:5)",
    "1536x576 (8:3)",
    "1600x512 (25:8)",
];

pub const SD35_DEFAULT_PRESET: &str = "1024x1024 (1.0)";

pub const SD35_PRESETS: &[&str] = &[
    "640x1536 (0.98)",
    "704x1344 (0.94)",
    "768x1280 (0.98)",
    "832x1152 (0.96)",
    "896x1152 (1.03)",
    "960x1024 (0.98)",
    "1024x1024 (1.0)",
    "1152x896 (1.03)",
    "1216x832 (1.01)",
    "1280x768 (0.98)",
    "1344x704 (0.95)",
];

/// Pixel size named by a preset such as `"832x1216 (13:19)"`.
///
/// Only the part before the first space is read; the ratio label is for
/// display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionPreset {
    pub width: u32,
    pub height: u32,
}

impl ResolutionPreset {
    pub fn parse(preset: &str) -> Result<Self, ResolutionError> {
        let invalid = || ResolutionError::InvalidFormat {
            input: preset.to_string(),
        };

        let size = preset.split(' ').next().unwrap_or_default();
        let mut parts = size.split('x');
        let (width, height) = match (parts.next(), parts.next(), parts.next()) {
            (Some(w), Some(h), None) => (w, h),
            _ => return Err(invalid()),
        };
        let width: u32 = width.parse().map_err(|_| invalid())?;
        let height: u32 = height.parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

impl FromStr for ResolutionPreset {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalogue_entry_parses() {
        for preset in FLUX_PRESETS.iter().chain(SD35_PRESETS) {
            let parsed = ResolutionPreset::parse(preset).unwrap();
            let expected = preset.split(' ').next().unwrap();
            assert_eq!(format!("{}x{}", parsed.width, parsed.height), expected);
        }
        assert_eq!(FLUX_PRESETS.len(), 72);
        assert_eq!(SD35_PRESETS.len(), 11);
    }

    #[test]
    fn label_is_ignored() {
        let preset: ResolutionPreset = "832x1216 (13:19)".parse().unwrap();
        assert_eq!(preset, ResolutionPreset { width: 832, height: 1216 });

        let bare = ResolutionPreset::parse("1024x1024").unwrap();
        assert_eq!(bare, ResolutionPreset { width: 1024, height: 1024 });
    }

    #[test]
    fn defaults_are_in_their_catalogues() {
        assert!(FLUX_PRESETS.contains(&FLUX_DEFAULT_PRESET));
        assert!(SD35_PRESETS.contains(&SD35_DEFAULT_PRESET));
    }

    #[test]
    fn malformed_presets_echo_the_input() {
        for bad in ["garbage", "", "1024", "1024x", "x1024", "1024x1024x3", "0x512", "-8x512"] {
            let err = ResolutionPreset::parse(bad).unwrap_err();
            assert_eq!(
                err,
                ResolutionError::InvalidFormat {
                    input: bad.to_string()
                }
            );
        }
        let err = ResolutionPreset::parse("garbage").unwrap_err();
        assert!(err.to_string().contains("garbage"));
    }
}
