//! Background floorplan image

use std::path::Path;

use image::RgbaImage;

/// The decoded floorplan as a display handle
#[derive(Clone, Debug)]
pub struct FloorplanImage {
    /// Native size in pixels
    pub size: (u32, u32),
    pub handle: cosmic::widget::image::Handle,
}

impl FloorplanImage {
    /// Hand the pixel buffer over to the display handle
    pub fn new(rgba: RgbaImage) -> Self {
        let size = rgba.dimensions();
        let handle = cosmic::widget::image::Handle::from_rgba(size.0, size.1, rgba.into_raw());
        Self { size, handle }
    }

    /// Load the floorplan, or `None` with a logged diagnostic
    pub fn load(path: &Path) -> Option<Self> {
        if !path.exists() {
            log::warn!(
                "Missing floorplan image {}, continuing with an empty surface",
                path.display()
            );
            return None;
        }
        match image::open(path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                log::debug!(
                    "Floorplan loaded: {}x{} pixels",
                    rgba.width(),
                    rgba.height()
                );
                Some(Self::new(rgba))
            }
            Err(err) => {
                log::error!("Could not decode floorplan {}: {}", path.display(), err);
                None
            }
        }
    }

}

/// Native size of an optional floorplan, zero when absent
pub fn surface_size(image: Option<&FloorplanImage>) -> (u32, u32) {
    image.map_or((0, 0), |img| img.size)
}
