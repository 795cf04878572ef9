//! Sampling options for the captured desktop texture.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Filtering used when the texture is magnified or minified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureFilter {
    /// Nearest neighbor filtering (sharp, pixelated)
    #[default]
    Nearest,
    /// Linear filtering (smooth, blurred)
    Linear,
}

impl fmt::Display for TextureFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => write!(f, "Nearest"),
            Self::Linear => write!(f, "Linear"),
        }
    }
}

/// What is drawn where the sampled rectangle leaves the texture (zoomed out past its extent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureWrap {
    /// Repeat the edge pixels
    ClampToEdge,
    /// Tile the texture
    Repeat,
    /// Tile the texture, mirroring every other copy
    #[default]
    MirroredRepeat,
}

impl fmt::Display for TextureWrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClampToEdge => write!(f, "Clamp to edge"),
            Self::Repeat => write!(f, "Repeat"),
            Self::MirroredRepeat => write!(f, "Mirrored repeat"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub filter: TextureFilter,
    pub wrap: TextureWrap,
}
