//! # Switchkit
//!
//! `switchkit-core` renders an animated on/off toggle switch built from masked gradient
//! layers, plus an [`InvertedLabel`] that knocks its text out of an opaque white fill.
//!
//! The widget keeps its own small layer tree and draws through the [`compositing::Compositor`]
//! capability, with [Skia](https://skia.org/) as the production backend.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use switchkit_core::{compositing::SkiaCompositor, ToggleSwitchView};
//! use skia_safe::{surfaces, Rect};
//!
//! let mut view = ToggleSwitchView::new(Rect::from_xywh(0.0, 0.0, 100.0, 40.0))?;
//! view.update(2.5);
//!
//! let mut surface = surfaces::raster_n32_premul((106, 46)).expect("surface");
//! view.render(&mut SkiaCompositor::new(surface.canvas()))?;
//! # Ok::<(), switchkit_core::SwitchError>(())
//! ```

/// Time-driven animation primitives, including the one-shot `PathAnimation`.
pub mod animation;

/// The drawing capability backends provide, with Skia and recording implementations.
pub mod compositing;

pub mod config;

/// Defines the base `Element` trait implemented by drawable widgets.
pub mod element;

pub mod errors;

/// Frame-derived shapes of the switch.
pub mod geometry;

/// The retained layer tree.
pub mod layer;

/// Concrete widgets: labels and the toggle switch.
pub mod node;

/// Core systems (asset decoding, rendering).
pub mod systems;

pub mod text;

/// Shared data structures.
pub mod types;

pub use config::SwitchConfig;
pub use element::Element;
pub use errors::SwitchError;
pub use node::{InvertedLabel, ToggleSwitchView};
pub use types::SwitchState;

use anyhow::Result;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::instrument;

/// A trait for abstracting asset access.
///
/// This lets the switch run where assets come from an archive or memory rather than
/// the local filesystem.
pub trait AssetLoader: Send + Sync {
    /// Loads the raw bytes of an asset.
    ///
    /// # Arguments
    /// * `path` - The string path or identifier for the asset.
    fn load_bytes(&self, path: &str) -> Result<Vec<u8>>;
}

/// Environment variable naming an extra directory searched for assets.
pub const ASSET_DIR_ENV: &str = "SWITCHKIT_ASSET_DIR";

/// Filesystem loader.
///
/// Looks for `path` as given, then under `$SWITCHKIT_ASSET_DIR`, then under `assets/`
/// in the working directory, then in this crate's bundled `assets/` directory.
pub struct DefaultAssetLoader;

impl DefaultAssetLoader {
    fn candidates(path: &str) -> Vec<PathBuf> {
        let mut candidates = vec![PathBuf::from(path)];
        if let Ok(dir) = std::env::var(ASSET_DIR_ENV) {
            candidates.push(PathBuf::from(dir).join(path));
        }
        candidates.push(PathBuf::from("assets").join(path));
        candidates.push(PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets")).join(path));
        candidates
    }
}

impl AssetLoader for DefaultAssetLoader {
    #[instrument(level = "debug", skip(self), fields(path = path))]
    fn load_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let candidates = Self::candidates(path);
        for candidate in &candidates {
            if let Ok(bytes) = std::fs::read(candidate) {
                return Ok(bytes);
            }
        }
        let checked: Vec<String> = candidates
            .iter()
            .map(|c| format!("'{}'", c.display()))
            .collect();
        Err(anyhow::anyhow!(
            "Asset not found: {} (checked {})",
            path,
            checked.join(", ")
        ))
    }
}

/// In-memory loader keyed by asset name.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssetLoader {
    assets: HashMap<String, Vec<u8>>,
}

impl MemoryAssetLoader {
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.assets.insert(name.into(), bytes);
    }

    /// Adds the power glyph that ships with this crate under its default name.
    pub fn with_bundled_icon(mut self) -> Self {
        self.insert(
            config::DEFAULT_ICON_ASSET,
            include_bytes!("../assets/power_filled.png").to_vec(),
        );
        self
    }
}

impl AssetLoader for MemoryAssetLoader {
    fn load_bytes(&self, path: &str) -> Result<Vec<u8>> {
        self.assets
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Asset not found: {}", path))
    }
}
