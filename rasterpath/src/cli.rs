//! Command-line arguments and how they resolve into library settings.

use std::path::PathBuf;

use clap::Parser;
use rasterpath_core::{MaskConfig, Point};
use rasterpath_image::{DEFAULT_MAX_DIM, LoadConfig};
use rasterpath_replay::ReplayConfig;

/// Shortest 8-connected path between two pixels of an image.
///
/// Pixels brighter than the threshold are walkable (darker with --invert).
/// Without --threshold, the threshold is the 60th intensity percentile.
#[derive(Parser, Debug)]
#[command(name = "rasterpath", version, about, long_about = None)]
pub struct Args {
    /// Image to search on
    #[arg(name = "IMAGE")]
    pub image: PathBuf,

    /// Start cell as ROW,COL
    #[arg(long, value_parser = parse_point)]
    pub start: Point,

    /// Goal cell as ROW,COL
    #[arg(long, value_parser = parse_point)]
    pub goal: Point,

    /// Treat dark pixels as walkable
    #[arg(long)]
    pub invert: bool,

    /// Fixed intensity threshold, clamped to 0..=255 (disables the
    /// percentile threshold)
    #[arg(long, allow_negative_numbers = true)]
    pub threshold: Option<i32>,

    /// JSON file holding mask settings; flags given here take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Downscale images whose longest side exceeds this (0 keeps full size)
    #[arg(long, default_value_t = DEFAULT_MAX_DIM)]
    pub max_dim: u32,

    /// Cells revealed per replay frame
    #[arg(long, default_value_t = ReplayConfig::default().speed)]
    pub speed: u32,

    /// Write the final overlay to this PNG
    #[arg(long, value_name = "PNG")]
    pub output: Option<PathBuf>,

    /// Write one overlay PNG per replay frame into this directory
    #[arg(long, value_name = "DIR")]
    pub frames: Option<PathBuf>,

    /// Print the path, trace and cost as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Apply the mask flags on top of `base` (defaults or a config file).
    pub fn mask_config(&self, base: MaskConfig) -> MaskConfig {
        let mut cfg = base;
        if self.invert {
            cfg.invert = true;
        }
        if let Some(t) = self.threshold {
            cfg.auto_threshold = false;
            cfg.threshold = t;
        }
        cfg
    }

    pub fn load_config(&self) -> LoadConfig {
        LoadConfig {
            max_dim: self.max_dim,
        }
    }

    pub fn replay_config(&self) -> ReplayConfig {
        ReplayConfig {
            speed: self.speed,
            ..ReplayConfig::default()
        }
    }
}

/// Parse `ROW,COL` (spaces around either number are allowed).
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {s:?}"))?;
    let row = row
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad row {row:?}: {e}"))?;
    let col = col
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad column {col:?}: {e}"))?;
    Ok(Point::new(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("rasterpath").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn points_parse() {
        assert_eq!(parse_point("3,7"), Ok(Point::new(3, 7)));
        assert_eq!(parse_point(" 12 , 0"), Ok(Point::new(12, 0)));
        assert_eq!(parse_point("-1,4"), Ok(Point::new(-1, 4)));
        assert!(parse_point("3;7").is_err());
        assert!(parse_point("a,1").is_err());
        assert!(parse_point("1,").is_err());
    }

    #[test]
    fn defaults() {
        let args = parse(&["map.png", "--start", "0,0", "--goal", "5,9"]);
        assert_eq!(args.start, Point::new(0, 0));
        assert_eq!(args.goal, Point::new(5, 9));
        assert_eq!(args.mask_config(MaskConfig::default()), MaskConfig::default());
        assert_eq!(args.load_config(), LoadConfig::default());
        assert_eq!(args.replay_config(), ReplayConfig::default());
        assert!(!args.json);
    }

    #[test]
    fn flags_override_base_settings() {
        let args = parse(&[
            "map.png", "--start", "0,0", "--goal", "1,1", "--invert", "--threshold", "90",
        ]);
        let cfg = args.mask_config(MaskConfig::auto(false));
        assert!(cfg.invert);
        assert!(!cfg.auto_threshold);
        assert_eq!(cfg.threshold, 90);

        // Without flags the base wins.
        let args = parse(&["map.png", "--start", "0,0", "--goal", "1,1"]);
        let base = MaskConfig::fixed(40, true);
        assert_eq!(args.mask_config(base), base);
    }

    #[test]
    fn threshold_accepts_out_of_range_values() {
        let args = parse(&[
            "map.png", "--start", "0,0", "--goal", "1,1", "--threshold", "-20",
        ]);
        assert_eq!(args.mask_config(MaskConfig::default()).threshold, -20);
        assert!(Args::try_parse_from(["rasterpath", "map.png", "--start", "0,0"]).is_err());
    }
}
