//! Raster drawing primitives over an RGB image buffer.
//!
//! Coordinates are inclusive pixel bounds `(x0, y0, x1, y1)` and may extend
//! past the canvas; anything outside is clipped.

use image::{DynamicImage, Pixel, Rgb, RgbImage, Rgba};

/// Opaque RGB drawing surface.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// Creates a canvas filled with a solid color.
    pub fn new(width: u32, height: u32, fill: [u8; 3]) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, Rgb(fill)),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.image.get_pixel(x, y).0
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Fills one full scanline.
    pub fn fill_row(&mut self, y: u32, color: [u8; 3]) {
        if y >= self.height() {
            return;
        }
        for x in 0..self.width() {
            self.image.put_pixel(x, y, Rgb(color));
        }
    }

    /// Filled axis-aligned rectangle.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: [u8; 3]) {
        let Some((xa, ya, xb, yb)) = self.clip(x0, y0, x1, y1) else {
            return;
        };
        for y in ya..=yb {
            for x in xa..=xb {
                self.image.put_pixel(x, y, Rgb(color));
            }
        }
    }

    /// Filled rectangle with circular corners of `radius`.
    pub fn fill_rounded_rect(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        radius: i32,
        color: [u8; 3],
    ) {
        let Some((xa, ya, xb, yb)) = self.clip(x0, y0, x1, y1) else {
            return;
        };
        let r = radius.clamp(0, (x1 - x0).min(y1 - y0) / 2) as f64;
        let (left, right) = (x0 as f64 + r, x1 as f64 - r);
        let (top, bottom) = (y0 as f64 + r, y1 as f64 - r);
        let reach = (r + 0.5) * (r + 0.5);

        for y in ya..=yb {
            for x in xa..=xb {
                // Distance to the nearest point of the inner (corner-center) rectangle.
                let (px, py) = (x as f64, y as f64);
                let dx = px - px.clamp(left, right);
                let dy = py - py.clamp(top, bottom);
                if dx * dx + dy * dy <= reach {
                    self.image.put_pixel(x, y, Rgb(color));
                }
            }
        }
    }

    /// Filled ellipse inscribed in the bounding box.
    pub fn fill_ellipse(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: [u8; 3]) {
        self.draw_ellipse(x0, y0, x1, y1, color, None);
    }

    /// Filled ellipse with an outline band `width` pixels thick.
    pub fn fill_ellipse_outlined(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        fill: [u8; 3],
        outline: [u8; 3],
        width: i32,
    ) {
        self.draw_ellipse(x0, y0, x1, y1, fill, Some((outline, width.max(1))));
    }

    fn draw_ellipse(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        fill: [u8; 3],
        outline: Option<([u8; 3], i32)>,
    ) {
        let Some((xa, ya, xb, yb)) = self.clip(x0, y0, x1, y1) else {
            return;
        };
        let cx = (x0 + x1) as f64 / 2.0;
        let cy = (y0 + y1) as f64 / 2.0;
        let rx = (x1 - x0) as f64 / 2.0 + 0.5;
        let ry = (y1 - y0) as f64 / 2.0 + 0.5;

        for y in ya..=yb {
            for x in xa..=xb {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                if !inside_ellipse(dx, dy, rx, ry) {
                    continue;
                }
                let color = match outline {
                    Some((edge, w)) => {
                        let (irx, iry) = (rx - w as f64, ry - w as f64);
                        if irx <= 0.0 || iry <= 0.0 || !inside_ellipse(dx, dy, irx, iry) {
                            edge
                        } else {
                            fill
                        }
                    }
                    None => fill,
                };
                self.image.put_pixel(x, y, Rgb(color));
            }
        }
    }

    /// Alpha-composites a uniform translucent color over the whole canvas,
    /// then flattens back to opaque RGB.
    pub fn overlay(&mut self, color: [u8; 4]) {
        let rgb = std::mem::replace(&mut self.image, RgbImage::new(0, 0));
        let mut rgba = DynamicImage::ImageRgb8(rgb).into_rgba8();
        let tint = Rgba(color);
        for px in rgba.pixels_mut() {
            px.blend(&tint);
        }
        self.image = DynamicImage::ImageRgba8(rgba).into_rgb8();
    }

    /// Intersects inclusive bounds with the canvas. `None` when empty.
    fn clip(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> Option<(u32, u32, u32, u32)> {
        let max_x = self.width() as i32 - 1;
        let max_y = self.height() as i32 - 1;
        let (xa, xb) = (x0.max(0), x1.min(max_x));
        let (ya, yb) = (y0.max(0), y1.min(max_y));
        if xa > xb || ya > yb {
            return None;
        }
        Some((xa as u32, ya as u32, xb as u32, yb as u32))
    }
}

#[inline]
fn inside_ellipse(dx: f64, dy: f64, rx: f64, ry: f64) -> bool {
    (dx / rx).powi(2) + (dy / ry).powi(2) <= 1.0
}
