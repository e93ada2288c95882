use image::RgbImage;

/// A single decoded video frame in 8-bit RGB.
#[derive(Debug, Clone)]
pub struct Frame {
    index: usize,
    image: RgbImage,
}

impl Frame {
    /// Wraps a raw rgb24 buffer, returning `None` if its length does not match the size.
    pub fn from_rgb24(index: usize, width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        RgbImage::from_raw(width, height, data).map(|image| Self { index, image })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgb(
            [self.width() as usize, self.height() as usize],
            self.image.as_raw(),
        )
    }
}

/// Largest size with the frame's aspect ratio that fits inside `region`.
pub fn fit_within(frame_width: u32, frame_height: u32, region: egui::Vec2) -> egui::Vec2 {
    if frame_width == 0 || frame_height == 0 || region.x <= 0.0 || region.y <= 0.0 {
        return egui::Vec2::ZERO;
    }

    let scale = (region.x / frame_width as f32).min(region.y / frame_height as f32);
    egui::Vec2::new(frame_width as f32 * scale, frame_height as f32 * scale)
}
