//! On-disk configuration.
//!
//! The file is TOML and optional; every field has a default. It is only ever read.
//!
//! ```toml
//! start_fullscreen = false
//!
//! [camera]
//! min_zoom = 0.1
//! max_zoom = 300.0
//! zoom_factor = 1.05
//! smoothing_rate = 7.5
//!
//! [overlay]
//! visible = true
//! font_size = 20.0
//!
//! [texture]
//! filter = "nearest"
//! wrap = "mirrored_repeat"
//! ```

use mag_display::{CameraConfig, CameraConfigError, OverlayConfig, TextureConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::args::Args;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid camera settings: {0}")]
    Camera(#[from] CameraConfigError),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub start_fullscreen: bool,
    pub camera: CameraConfig,
    pub overlay: OverlayConfig,
    pub texture: TextureConfig,
}

impl AppConfig {
    /// `~/.config/rmagnifier/config.toml`, when a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".config/rmagnifier/config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.camera.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from `--config` or the default location, falling back to defaults.
    ///
    /// A missing default file is normal and only logged at debug level; an explicit path
    /// that cannot be used, or a broken file, is reported as a warning.
    pub fn load_or_default(explicit: Option<&Path>) -> Self {
        let path = match explicit.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => {
                debug!("No home directory, using default configuration");
                return Self::default();
            }
        };

        if explicit.is_none() && !path.exists() {
            debug!("No configuration at {}, using defaults", path.display());
            return Self::default();
        }

        Self::load(&path).unwrap_or_else(|e| {
            warn!("{}; using default configuration", e);
            Self::default()
        })
    }

    /// Apply command line overrides.
    ///
    /// Zoom limits that would invert the range are rejected as a whole and the configured
    /// limits are kept.
    pub fn apply_args(&mut self, args: &Args) {
        let mut camera = self.camera;
        if let Some(min_zoom) = args.min_zoom {
            camera.min_zoom = min_zoom;
        }
        if let Some(max_zoom) = args.max_zoom {
            camera.max_zoom = max_zoom;
        }
        match camera.validate() {
            Ok(()) => self.camera = camera,
            Err(e) => warn!("Ignoring zoom limits from the command line: {}", e),
        }

        self.start_fullscreen |= args.fullscreen;
        if args.no_overlay {
            self.overlay.visible = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mag_display::{TextureFilter, TextureWrap};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_temp(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_temp(
            &dir,
            r#"
            [camera]
            max_zoom = 40.0

            [texture]
            filter = "linear"
            "#,
        );
        let config = AppConfig::load(&path).unwrap();

        assert_eq!(config.camera.max_zoom, 40.0);
        assert_eq!(config.camera.min_zoom, 0.1);
        assert_eq!(config.texture.filter, TextureFilter::Linear);
        assert_eq!(config.texture.wrap, TextureWrap::MirroredRepeat);
        assert!(config.overlay.visible);
        assert!(!config.start_fullscreen);
    }

    #[test]
    fn test_invalid_camera_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_temp(&dir, "[camera]\nmin_zoom = 10.0\nmax_zoom = 2.0\n");
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Camera(_))
        ));
    }

    #[test]
    fn test_broken_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = write_temp(&dir, "camera = [");
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
        assert_eq!(AppConfig::load_or_default(Some(&path)), AppConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_falls_back() {
        // Fresh directory, so the file cannot exist
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Read { .. })
        ));
        assert_eq!(AppConfig::load_or_default(Some(&path)), AppConfig::default());
    }

    #[test]
    fn test_args_override() {
        let mut config = AppConfig::default();
        let args = Args {
            min_zoom: Some(0.5),
            max_zoom: Some(20.0),
            fullscreen: true,
            no_overlay: true,
            ..Args::default()
        };
        config.apply_args(&args);
        assert_eq!(config.camera.min_zoom, 0.5);
        assert_eq!(config.camera.max_zoom, 20.0);
        assert!(config.start_fullscreen);
        assert!(!config.overlay.visible);
    }

    #[test]
    fn test_inverted_args_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_args(&Args {
            min_zoom: Some(50.0),
            max_zoom: Some(5.0),
            ..Args::default()
        });
        assert_eq!(config.camera, CameraConfig::default());
    }
}
