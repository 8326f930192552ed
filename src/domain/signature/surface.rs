//! Backing raster for the capture session.
//!
//! Strokes are rasterised by stamping anti-aliased discs at one-pixel steps
//! along each segment, which gives round caps and joins for free.

use image::{Rgba, RgbaImage};

use super::coordinates::{BackingSize, CanvasPoint};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Pixel rows kept by a crop: `offset..offset + height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBand {
    pub offset: u32,
    pub height: u32,
}

impl CropBand {
    /// Computes the band for a surface `height` pixels tall.
    ///
    /// Offset and band height are each rounded to the nearest row, halves
    /// away from zero, so an odd height can keep one row more than half
    /// (101 rows give rows 25..76).
    pub fn for_height(height: u32, top_ratio: f64, height_ratio: f64) -> Self {
        let total = f64::from(height);
        let offset = ((total * top_ratio).round() as u32).min(height);
        let band = ((total * height_ratio).round() as u32).min(height - offset);
        Self {
            offset,
            height: band,
        }
    }
}

/// The mutable drawing raster.
#[derive(Debug, Clone)]
pub struct InkSurface {
    pixels: RgbaImage,
    ink: Rgba<u8>,
}

impl InkSurface {
    pub fn new(size: BackingSize) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(size.width, size.height, TRANSPARENT),
            ink: INK,
        }
    }

    pub fn size(&self) -> BackingSize {
        BackingSize::new(self.pixels.width(), self.pixels.height())
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Erases all ink.
    pub fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = TRANSPARENT;
        }
    }

    /// Returns true if any pixel carries ink.
    pub fn has_visible_ink(&self) -> bool {
        self.pixels.pixels().any(|p| p.0[3] > 0)
    }

    /// Draws a segment of the given width.
    pub fn draw_segment(&mut self, from: CanvasPoint, to: CanvasPoint, width: f64) {
        let distance = from.distance_to(&to);
        if distance < 0.1 {
            self.stamp(to, width / 2.0);
            return;
        }

        let steps = distance.ceil() as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let p = CanvasPoint::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
            self.stamp(p, width / 2.0);
        }
    }

    /// Stamps one disc, keeping the stronger alpha where discs overlap.
    fn stamp(&mut self, center: CanvasPoint, radius: f64) {
        let (w, h) = (i64::from(self.pixels.width()), i64::from(self.pixels.height()));
        let min_x = ((center.x - radius).floor() as i64).max(0);
        let max_x = ((center.x + radius).ceil() as i64).min(w - 1);
        let min_y = ((center.y - radius).floor() as i64).max(0);
        let max_y = ((center.y + radius).ceil() as i64).min(h - 1);
        if min_x > max_x || min_y > max_y {
            return;
        }

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f64 + 0.5 - center.x;
                let dy = y as f64 + 0.5 - center.y;
                let coverage = (radius + 0.5 - dx.hypot(dy)).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let alpha = (coverage * f64::from(self.ink.0[3])).round() as u8;
                let pixel = self.pixels.get_pixel_mut(x as u32, y as u32);
                if alpha > pixel.0[3] {
                    *pixel = Rgba([self.ink.0[0], self.ink.0[1], self.ink.0[2], alpha]);
                }
            }
        }
    }

    /// Copies out the horizontal band between the guide zones.
    pub fn crop(&self, top_ratio: f64, height_ratio: f64) -> (CropBand, RgbaImage) {
        let band = CropBand::for_height(self.pixels.height(), top_ratio, height_ratio);
        let view = image::imageops::crop_imm(
            &self.pixels,
            0,
            band.offset,
            self.pixels.width(),
            band.height,
        );
        (band, view.to_image())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_blank() {
        let surface = InkSurface::new(BackingSize::new(40, 20));
        assert_eq!(surface.size(), BackingSize::new(40, 20));
        assert!(!surface.has_visible_ink());
    }

    #[test]
    fn segment_leaves_ink_along_its_path() {
        let mut surface = InkSurface::new(BackingSize::new(100, 100));
        surface.draw_segment(CanvasPoint::new(10.0, 50.0), CanvasPoint::new(90.0, 50.0), 4.0);

        assert_eq!(surface.pixels().get_pixel(50, 50).0[3], 255);
        assert_eq!(surface.pixels().get_pixel(50, 10).0[3], 0);
    }

    #[test]
    fn clear_erases_ink() {
        let mut surface = InkSurface::new(BackingSize::new(50, 50));
        surface.draw_segment(CanvasPoint::new(0.0, 0.0), CanvasPoint::new(49.0, 49.0), 3.0);
        assert!(surface.has_visible_ink());
        surface.clear();
        assert!(!surface.has_visible_ink());
    }

    #[test]
    fn off_surface_segment_is_harmless() {
        let mut surface = InkSurface::new(BackingSize::new(20, 20));
        surface.draw_segment(
            CanvasPoint::new(-100.0, -100.0),
            CanvasPoint::new(-50.0, -80.0),
            5.0,
        );
        assert!(!surface.has_visible_ink());
    }

    #[test]
    fn crop_band_takes_middle_half() {
        assert_eq!(
            CropBand::for_height(200, 0.25, 0.5),
            CropBand {
                offset: 50,
                height: 100
            }
        );
        assert_eq!(
            CropBand::for_height(1000, 0.25, 0.5),
            CropBand {
                offset: 250,
                height: 500
            }
        );
    }

    #[test]
    fn crop_band_rounds_odd_heights() {
        assert_eq!(
            CropBand::for_height(101, 0.25, 0.5),
            CropBand {
                offset: 25,
                height: 51
            }
        );
        assert_eq!(
            CropBand::for_height(99, 0.25, 0.5),
            CropBand {
                offset: 25,
                height: 50
            }
        );
        assert_eq!(
            CropBand::for_height(7, 0.25, 0.5),
            CropBand {
                offset: 2,
                height: 4
            }
        );
    }

    #[test]
    fn crop_of_odd_surface_matches_band() {
        let surface = InkSurface::new(BackingSize::new(30, 101));
        let (band, image) = surface.crop(0.25, 0.5);
        assert_eq!(band.offset, 25);
        assert_eq!(image.dimensions(), (30, 51));
    }

    #[test]
    fn crop_band_never_exceeds_surface() {
        let band = CropBand::for_height(3, 0.9, 0.9);
        assert!(band.offset + band.height <= 3);
    }

    #[test]
    fn crop_keeps_band_pixels() {
        let mut surface = InkSurface::new(BackingSize::new(40, 40));
        // ink at row 20 only, inside the band
        surface.draw_segment(CanvasPoint::new(0.0, 20.5), CanvasPoint::new(39.0, 20.5), 1.0);
        let (band, image) = surface.crop(0.25, 0.5);
        assert_eq!(band.offset, 10);
        assert_eq!(image.dimensions(), (40, 20));
        assert!(image.get_pixel(20, 10).0[3] > 0);
    }
}
