use image::{Rgb, RgbImage};
use rasterpath_core::{Grid, Point};

const WALKABLE: [u8; 3] = [255, 255, 0];
const BLOCKED: [u8; 3] = [255, 0, 0];
const EXPANDED: [u8; 3] = [255, 255, 0];
const PATH: [u8; 3] = [0, 255, 255];
const START: [u8; 3] = [0, 0, 255];
const GOAL: [u8; 3] = [255, 0, 0];
const TRAVELLER: [u8; 3] = [255, 0, 0];

/// Layers drawn over a grayscale image, bottom to top.
///
/// The mask is tinted lightly (walkable yellow, blocked red), expanded cells
/// are drawn semi-transparent yellow, the path opaque cyan, and the start and
/// goal blue and red. The traveller, if any, is a red 3×3 marker on top.
#[derive(Debug, Clone, Copy)]
pub struct Overlay<'a> {
    pub gray: &'a Grid<u8>,
    pub mask: Option<&'a Grid<bool>>,
    pub expanded: &'a [Point],
    pub path: &'a [Point],
    pub start: Option<Point>,
    pub goal: Option<Point>,
    pub traveller: Option<Point>,
}

impl<'a> Overlay<'a> {
    /// Just the image.
    pub fn new(gray: &'a Grid<u8>) -> Self {
        Self {
            gray,
            mask: None,
            expanded: &[],
            path: &[],
            start: None,
            goal: None,
            traveller: None,
        }
    }

    /// Render to an RGB image of the same size as `gray`.
    pub fn render(&self) -> RgbImage {
        let w = self.gray.width() as u32;
        let h = self.gray.height() as u32;
        let mut img = RgbImage::from_fn(w, h, |x, y| {
            let v = self.gray.cells()[y as usize * self.gray.width() + x as usize];
            Rgb([v, v, v])
        });

        if let Some(mask) = self.mask {
            for (p, &walkable) in mask.iter() {
                let tint = if walkable { WALKABLE } else { BLOCKED };
                paint(&mut img, p, tint, 0.15);
            }
        }
        for &p in self.expanded {
            paint(&mut img, p, EXPANDED, 0.6);
        }
        for &p in self.path {
            paint(&mut img, p, PATH, 1.0);
        }
        if let Some(p) = self.start {
            paint(&mut img, p, START, 1.0);
        }
        if let Some(p) = self.goal {
            paint(&mut img, p, GOAL, 1.0);
        }
        if let Some(p) = self.traveller {
            for dr in -1..=1 {
                for dc in -1..=1 {
                    paint(&mut img, p.shift(dr, dc), TRAVELLER, 1.0);
                }
            }
        }
        img
    }
}

/// Alpha-blend `color` over the pixel at `p`. Points outside are ignored.
fn paint(img: &mut RgbImage, p: Point, color: [u8; 3], alpha: f32) {
    if p.row < 0 || p.col < 0 {
        return;
    }
    let (x, y) = (p.col as u32, p.row as u32);
    if x >= img.width() || y >= img.height() {
        return;
    }
    let px = img.get_pixel_mut(x, y);
    for (c, &fg) in px.0.iter_mut().zip(color.iter()) {
        *c = blend(*c, fg, alpha);
    }
}

/// Simple alpha-blend of two u8 color channels.
pub fn blend(bg: u8, fg: u8, alpha: f32) -> u8 {
    ((1.0 - alpha) * bg as f32 + alpha * fg as f32).round() as u8
}
