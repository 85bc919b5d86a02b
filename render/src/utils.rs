//! Small pixel helpers shared by the canvas

use aarshjul_types::Rgba;
use tiny_skia::{Color, Pixmap};

/// Convert [u8; 4] RGBA array to tiny_skia Color
#[inline]
pub fn color_from_rgba(rgba: Rgba) -> Color {
    Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// Inclusive-exclusive pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Bounds {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Bounding box of every pixel with non-zero alpha, `None` for a blank pixmap
pub fn content_bounds(pixmap: &Pixmap) -> Option<Bounds> {
    let width = pixmap.width();
    let mut bounds: Option<Bounds> = None;

    for (i, pixel) in pixmap.pixels().iter().enumerate() {
        if pixel.alpha() == 0 {
            continue;
        }
        let x = i as u32 % width;
        let y = i as u32 / width;
        bounds = Some(match bounds {
            None => Bounds {
                left: x,
                top: y,
                right: x + 1,
                bottom: y + 1,
            },
            Some(b) => Bounds {
                left: b.left.min(x),
                top: b.top.min(y),
                right: b.right.max(x + 1),
                bottom: b.bottom.max(y + 1),
            },
        });
    }

    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::{Paint, Rect, Transform};

    #[test]
    fn test_blank_pixmap_has_no_bounds() {
        let pixmap = Pixmap::new(8, 8).unwrap();
        assert_eq!(content_bounds(&pixmap), None);
    }

    #[test]
    fn test_bounds_of_filled_rect() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();
        let mut paint = Paint::default();
        paint.set_color(color_from_rgba([0, 0, 0, 255]));
        paint.anti_alias = false;
        let rect = Rect::from_xywh(3.0, 5.0, 4.0, 2.0).unwrap();
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);

        let bounds = content_bounds(&pixmap).unwrap();
        assert_eq!(
            bounds,
            Bounds {
                left: 3,
                top: 5,
                right: 7,
                bottom: 7
            }
        );
        assert_eq!((bounds.width(), bounds.height()), (4, 2));
    }
}
