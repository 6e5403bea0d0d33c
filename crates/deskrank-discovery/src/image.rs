//! Offline checks on product image URLs.
//!
//! Marketplace image URLs encode their rendition size (`_SX300_`,
//! `_SL1500_`) and placeholder artwork lives at recognisable paths, so most
//! unusable images can be rejected without fetching them.

use std::sync::LazyLock;

use regex::Regex;

static SIZE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_S[XYL](\d+)_").expect("valid size token regex"));

static AC_SIZE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_AC_S[XYL]\d+_").expect("valid ac size token regex"));

static RESIZE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_S[XYLS]\d+_").expect("valid resize token regex"));

/// Result of [`check_image_url`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageCheck {
    Valid,
    Missing,
    Placeholder { pattern: String },
    TooSmall { size: u32 },
}

impl ImageCheck {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, ImageCheck::Valid)
    }
}

impl std::fmt::Display for ImageCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageCheck::Valid => write!(f, "valid"),
            ImageCheck::Missing => write!(f, "URL is missing"),
            ImageCheck::Placeholder { pattern } => write!(f, "placeholder detected: {pattern}"),
            ImageCheck::TooSmall { size } => write!(f, "image too small: {size}px"),
        }
    }
}

/// Rejects missing URLs, URLs containing any of `placeholder_patterns`
/// (case-insensitive), and URLs whose first size token is below `min_size`.
#[must_use]
pub fn check_image_url(
    url: Option<&str>,
    placeholder_patterns: &[String],
    min_size: u32,
) -> ImageCheck {
    let Some(url) = url.filter(|u| !u.trim().is_empty()) else {
        return ImageCheck::Missing;
    };

    let lower = url.to_lowercase();
    if let Some(pattern) = placeholder_patterns
        .iter()
        .find(|pattern| lower.contains(&pattern.to_lowercase()))
    {
        return ImageCheck::Placeholder {
            pattern: pattern.clone(),
        };
    }

    let size = SIZE_TOKEN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok());
    if let Some(size) = size {
        if size < min_size {
            return ImageCheck::TooSmall { size };
        }
    }

    ImageCheck::Valid
}

/// Rewrites the first rendition size token to the 500px variant.
#[must_use]
pub fn high_res_image_url(url: &str) -> String {
    if AC_SIZE_TOKEN.is_match(url) {
        return AC_SIZE_TOKEN.replace(url, "_AC_SL500_").into_owned();
    }
    RESIZE_TOKEN.replace(url, "_SL500_").into_owned()
}
