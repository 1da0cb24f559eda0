//! Image collaborator for rasterpath: decodes raster files into intensity
//! grids and renders search results back onto the image.

mod load;
mod overlay;

pub use load::{
    DEFAULT_MAX_DIM, LoadConfig, LoadError, gray_from_image, load_gray, load_gray_from_memory,
};
pub use overlay::{Overlay, blend};
