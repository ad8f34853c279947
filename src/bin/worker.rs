//! The server worker (§1, §5): performs one authoritative planning tick for
//! one or more cells. Loads a `CellSnapshot` per cell, runs its
//! `CellPlanner` up to the requested horizon, and writes back the
//! finalized `CellState` — the same deterministic core the client links
//! for prediction, run here as the authority.
//!
//! Usage: `cellplan-worker <horizon_ms> <snapshot.json> [<snapshot2.json> ...] <output-dir>`
//!
//! Independent cells never share state (§5), so when more than one
//! snapshot is given each cell is planned on its own thread via
//! `std::thread::scope` and the results written out as the threads finish.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use cellplan::planner::{CellPlanner, CellSnapshot};
use cellplan::{build_info, PlannerError};

fn usage() -> ! {
    eprintln!("usage: cellplan-worker <horizon_ms> <snapshot.json>... <output-dir>");
    std::process::exit(2);
}

fn init_logging() {
    tracing_subscriber::fmt().with_target(false).with_level(true).compact().init();
}

#[derive(Debug, thiserror::Error)]
enum WorkerError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("malformed snapshot at {path}: {source}")]
    Decode { path: PathBuf, source: serde_json::Error },
    #[error("failed to encode planner output: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Planner(#[from] PlannerError),
}

fn plan_one_cell(horizon_ms: i64, snapshot_path: &Path, output_dir: &Path) -> Result<(), WorkerError> {
    let span = tracing::info_span!("plan_cell", snapshot = %snapshot_path.display());
    let _enter = span.enter();

    let raw = fs::read_to_string(snapshot_path).map_err(|source| WorkerError::Read {
        path: snapshot_path.to_path_buf(),
        source,
    })?;
    let snapshot: CellSnapshot = serde_json::from_str(&raw).map_err(|source| WorkerError::Decode {
        path: snapshot_path.to_path_buf(),
        source,
    })?;

    tracing::debug!(now_ms = snapshot.now_ms, npcs = snapshot.npcs.len(), "snapshot loaded");

    let mut planner = CellPlanner::new(snapshot);
    planner.run(horizon_ms)?;
    let state = planner.get_state()?;

    tracing::info!(now_ms = state.now_ms, "cell advanced");

    let file_name = snapshot_path.file_name().unwrap_or_default();
    let output_path = output_dir.join(file_name);
    let encoded = serde_json::to_string(&state)?;
    fs::write(&output_path, encoded).map_err(|source| WorkerError::Write {
        path: output_path.clone(),
        source,
    })?;

    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    tracing::info!(commit = build_info::BUILD_COMMIT, built_at = build_info::BUILD_TIMESTAMP, "cellplan-worker starting");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        usage();
    }

    let Ok(horizon_ms) = args[0].parse::<i64>() else {
        eprintln!("horizon_ms must be an integer, got {:?}", args[0]);
        return ExitCode::FAILURE;
    };
    let output_dir = PathBuf::from(args.last().expect("checked len >= 3"));
    let snapshot_paths: Vec<PathBuf> = args[1..args.len() - 1].iter().map(PathBuf::from).collect();

    if let Err(err) = fs::create_dir_all(&output_dir) {
        eprintln!("failed to create output dir {}: {err}", output_dir.display());
        return ExitCode::FAILURE;
    }

    let results: Vec<Result<(), WorkerError>> = std::thread::scope(|scope| {
        let handles: Vec<_> = snapshot_paths
            .iter()
            .map(|path| scope.spawn(|| plan_one_cell(horizon_ms, path, &output_dir)))
            .collect();
        handles.into_iter().map(|h| h.join().expect("cell-planning thread panicked")).collect()
    });

    let mut failed = false;
    for (path, result) in snapshot_paths.iter().zip(results) {
        if let Err(err) = result {
            tracing::error!(snapshot = %path.display(), error = %err, "cell planning failed");
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
