use crate::errors::SwitchError;
use crate::AssetLoader;
use skia_safe::{Data, Image};
use tracing::{debug, instrument};

/// Loads and decodes an image asset.
///
/// A loader failure maps to [`SwitchError::AssetNotFound`]; bytes Skia cannot decode map to
/// [`SwitchError::InvalidImage`].
#[instrument(level = "debug", skip(loader))]
pub fn load_image(loader: &dyn AssetLoader, name: &str) -> Result<Image, SwitchError> {
    let bytes = loader
        .load_bytes(name)
        .map_err(|e| SwitchError::AssetNotFound(format!("{}: {}", name, e)))?;
    let image = Image::from_encoded(Data::new_copy(&bytes))
        .ok_or_else(|| SwitchError::InvalidImage(name.to_string()))?;
    debug!(width = image.width(), height = image.height(), "decoded image");
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryAssetLoader;

    #[test]
    fn test_missing_asset() {
        let loader = MemoryAssetLoader::default();
        let err = load_image(&loader, "nope.png").unwrap_err();
        assert!(matches!(err, SwitchError::AssetNotFound(_)));
    }

    #[test]
    fn test_undecodable_asset() {
        let mut loader = MemoryAssetLoader::default();
        loader.insert("junk.png", b"not an image".to_vec());
        let err = load_image(&loader, "junk.png").unwrap_err();
        assert!(matches!(err, SwitchError::InvalidImage(_)));
    }

    #[test]
    fn test_bundled_icon_decodes() {
        let loader = MemoryAssetLoader::default().with_bundled_icon();
        let image = load_image(&loader, crate::config::DEFAULT_ICON_ASSET).expect("bundled icon");
        assert_eq!((image.width(), image.height()), (64, 64));
    }
}
