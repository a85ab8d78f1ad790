use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
    thread,
};

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::bounded;
use panel_core::{Disposition, PanelController, PanelGesture, PanelSessionState};
use shared::MemorySnapshot;
use storage::{FileStore, MemoryMirror};
use tracing_subscriber::EnvFilter;

mod bench;
mod config;
mod input;
mod surface;

use bench::BenchCore;
use config::load_settings;
use surface::TextSurface;

const GESTURE_QUEUE_DEPTH: usize = 256;

/// Headless front panel: reads gestures, drives the bench core, prints the lights.
#[derive(Parser, Debug)]
struct Args {
    /// Config file (defaults to ./panel.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory holding the persisted memory mirror.
    #[arg(long)]
    store_dir: Option<PathBuf>,
    /// Gesture script; stdin when omitted.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Start from zeroed memory instead of the persisted mirror.
    #[arg(long)]
    fresh: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref());
    if let Some(store_dir) = args.store_dir {
        settings.store_dir = store_dir;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let store = FileStore::new(&settings.store_dir)?;
    let mirror = MemoryMirror::new(settings.memory_key.clone());
    let memory = if args.fresh {
        MemorySnapshot::zeroed()
    } else {
        mirror.load(&store)
    };
    tracing::info!(store = %store.root().display(), key = mirror.key(), "memory restored");

    let mut controller = PanelController::new(
        BenchCore::with_memory(memory),
        store,
        TextSurface::new(io::stdout()),
        mirror,
    );
    let mut session = PanelSessionState::new();
    controller.power_on(&mut session);

    let reader: Box<dyn BufRead + Send> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open script '{}'", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let (gesture_tx, gesture_rx) = bounded::<PanelGesture>(GESTURE_QUEUE_DEPTH);
    let intake = thread::spawn(move || input::read_gestures(reader, gesture_tx));

    for gesture in gesture_rx {
        let summary = format!("{gesture:?}");
        match controller.handle(&mut session, gesture) {
            Disposition::Applied => tracing::debug!(gesture = %summary, "applied"),
            Disposition::IgnoredRepeat => tracing::debug!(gesture = %summary, "ignored repeat"),
            Disposition::Ignored => tracing::info!(gesture = %summary, "no panel response"),
        }
    }

    let queued = intake
        .join()
        .map_err(|_| anyhow::anyhow!("gesture intake thread panicked"))?;
    tracing::info!(
        gestures = queued,
        clicks = controller.surface().clicks(),
        printed_lines = session.paper().line_count(),
        "panel session finished"
    );
    Ok(())
}
