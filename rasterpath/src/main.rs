//! rasterpath: find, report and replay the shortest walkable path between
//! two pixels of an image.

mod cli;
mod report;

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use rasterpath_core::MaskConfig;
use rasterpath_image::{Overlay, load_gray};
use rasterpath_paths::{Search, cost_map};
use rasterpath_replay::{Pick, ReplaySession, Session};

use cli::Args;
use report::{AppError, Report};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let res = run(&args);
    if let Err(e) = &res {
        log::error!("{e}");
    }
    ExitCode::from(exit_status(&res))
}

/// 0 when a path was found, 2 when none exists, 1 on error.
fn exit_status(res: &Result<bool, AppError>) -> u8 {
    match res {
        Ok(true) => 0,
        Ok(false) => 2,
        Err(_) => 1,
    }
}

/// Returns whether a path was found.
fn run(args: &Args) -> Result<bool, AppError> {
    let base = match &args.config {
        Some(path) => read_mask_config(path)?,
        None => MaskConfig::default(),
    };
    let mask_cfg = args.mask_config(base);

    let gray = load_gray(&args.image, &args.load_config())?;
    log::info!(
        "loaded {} as {}x{} grid",
        args.image.display(),
        gray.width(),
        gray.height()
    );

    let mut session = Session::new(gray, mask_cfg, args.replay_config());
    let threshold = rasterpath_core::threshold(session.gray(), &mask_cfg);
    session.pick(args.start);
    let found = matches!(session.pick(args.goal), Pick::Goal { found: true });

    let Some(search) = session.search() else {
        return Ok(false);
    };
    match search.path() {
        Some(path) => {
            log::info!(
                "path of {} cells, cost {:.3}, {} cells expanded",
                path.len(),
                path.cost(),
                search.trace.len()
            );
            if log::log_enabled!(log::Level::Debug) {
                let costs = cost_map(session.mask(), &[args.start]);
                log::debug!(
                    "{} cells reachable from start, distance to goal {:.3}",
                    costs.reached().count(),
                    costs.at(args.goal)
                );
            }
        }
        None => {
            if let Some(reason) = search.no_path() {
                log::warn!("no path: {reason} ({} cells expanded)", search.trace.len());
            }
        }
    }

    if let Some(dir) = &args.frames {
        write_frames(&mut session, dir)?;
    }
    if let Some(out) = &args.output {
        write_final(&session, out)?;
    }
    if let (true, Some(search)) = (args.json, session.search()) {
        let report = Report::new(args.start, args.goal, threshold, search);
        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
    }
    Ok(found)
}

fn read_mask_config(path: &Path) -> Result<MaskConfig, AppError> {
    let text = fs::read_to_string(path).map_err(|source| AppError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AppError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

/// Play the running replay to the end, one PNG per frame.
fn write_frames(session: &mut Session, dir: &Path) -> Result<(), AppError> {
    if !session.is_running() {
        log::warn!("nothing to replay");
        return Ok(());
    }
    fs::create_dir_all(dir)?;
    let mut frame = 0usize;
    while session.is_running() {
        session.step();
        let Some(replay) = session.replay() else {
            break;
        };
        let out = dir.join(format!("frame_{frame:05}.png"));
        save(&frame_overlay(session, replay), &out)?;
        frame += 1;
    }
    log::info!("wrote {frame} frames to {}", dir.display());
    Ok(())
}

fn frame_overlay<'a>(session: &'a Session, replay: &'a ReplaySession) -> Overlay<'a> {
    Overlay {
        mask: Some(session.mask()),
        expanded: replay.expanded(),
        path: replay.path(),
        start: session.start(),
        goal: session.goal(),
        traveller: replay.traveller(),
        ..Overlay::new(session.gray())
    }
}

/// Everything the search produced, fully revealed.
fn write_final(session: &Session, out: &Path) -> Result<(), AppError> {
    let search = session.search();
    let overlay = Overlay {
        mask: Some(session.mask()),
        expanded: search.map(|s| s.trace.as_slice()).unwrap_or_default(),
        path: search
            .and_then(Search::path)
            .map(rasterpath_paths::Path::cells)
            .unwrap_or_default(),
        start: session.start(),
        goal: session.goal(),
        ..Overlay::new(session.gray())
    };
    save(&overlay, out)?;
    log::info!("wrote {}", out.display());
    Ok(())
}

fn save(overlay: &Overlay<'_>, out: &Path) -> Result<(), AppError> {
    overlay.render().save(out).map_err(|source| AppError::Write {
        path: out.to_path_buf(),
        source,
    })
}
