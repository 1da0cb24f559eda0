use std::fmt;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma};
use rasterpath_core::{Grid, GridError};

/// Longest side, in pixels, kept after decoding.
pub const DEFAULT_MAX_DIM: u32 = 1024;

/// Decoding options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoadConfig {
    /// Images whose longest side exceeds this are downscaled to it.
    /// `0` disables downscaling.
    pub max_dim: u32,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            max_dim: DEFAULT_MAX_DIM,
        }
    }
}

/// Errors that can occur while turning an image into an intensity grid.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read or decoded.
    Image(image::ImageError),
    /// The decoded image has no pixels.
    Grid(GridError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Image(e) => write!(f, "cannot decode image: {e}"),
            LoadError::Grid(e) => write!(f, "unusable image: {e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Image(e) => Some(e),
            LoadError::Grid(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for LoadError {
    fn from(e: image::ImageError) -> Self {
        LoadError::Image(e)
    }
}

impl From<GridError> for LoadError {
    fn from(e: GridError) -> Self {
        LoadError::Grid(e)
    }
}

/// Decode the image at `path` into 8-bit intensities.
pub fn load_gray(path: impl AsRef<Path>, cfg: &LoadConfig) -> Result<Grid<u8>, LoadError> {
    let path = path.as_ref();
    let img = image::open(path)?;
    log::debug!("decoded {} ({}x{})", path.display(), img.width(), img.height());
    prepare(img, cfg)
}

/// Decode an in-memory encoded image into 8-bit intensities.
pub fn load_gray_from_memory(bytes: &[u8], cfg: &LoadConfig) -> Result<Grid<u8>, LoadError> {
    let img = image::load_from_memory(bytes)?;
    prepare(img, cfg)
}

/// Wrap a grayscale image as an intensity grid (rows = image rows).
pub fn gray_from_image(img: GrayImage) -> Result<Grid<u8>, GridError> {
    let (w, h) = img.dimensions();
    Grid::from_vec(h as usize, w as usize, img.into_raw())
}

fn prepare(img: DynamicImage, cfg: &LoadConfig) -> Result<Grid<u8>, LoadError> {
    let gray = downscale(to_luma(img), cfg.max_dim);
    Ok(gray_from_image(gray)?)
}

/// Grayscale conversion with ITU-R 601-2 luma weights.
fn to_luma(img: DynamicImage) -> GrayImage {
    match img {
        DynamicImage::ImageLuma8(gray) => gray,
        other => {
            let rgb = other.to_rgb8();
            GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                let [r, g, b] = rgb.get_pixel(x, y).0;
                Luma([luma(r, g, b)])
            })
        }
    }
}

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    // 0.299, 0.587, 0.114 in 16.16 fixed point, rounded.
    ((u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000) >> 16) as u8
}

fn downscale(gray: GrayImage, max_dim: u32) -> GrayImage {
    let (w, h) = gray.dimensions();
    let longest = w.max(h);
    if max_dim == 0 || longest <= max_dim {
        return gray;
    }
    let scale = f64::from(max_dim) / f64::from(longest);
    let nw = ((f64::from(w) * scale) as u32).max(1);
    let nh = ((f64::from(h) * scale) as u32).max(1);
    log::info!("downscaling {w}x{h} image to {nw}x{nh}");
    imageops::resize(&gray, nw, nh, FilterType::Lanczos3)
}
