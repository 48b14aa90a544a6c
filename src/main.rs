use cutline::app::EditorApp;
use cutline::cli::Args;
use cutline::core::follower::RenderSurface;
use cutline::entities::ClipKind;
use cutline::paths;

use clap::Parser;
use log::{info, warn};
use std::time::{Duration, Instant};

/// Headless render surface for the CLI: every command becomes a log line.
#[derive(Default)]
struct ConsoleSurface {
    position: f64,
}

impl RenderSurface for ConsoleSurface {
    fn set_source(&mut self, kind: ClipKind, source: &str) {
        info!("[surface] source -> {} ({})", if source.is_empty() { "<empty>" } else { source }, kind);
        self.position = 0.0;
    }

    fn play(&mut self) -> Result<(), String> {
        info!("[surface] play");
        Ok(())
    }

    fn pause(&mut self) {
        info!("[surface] pause");
    }

    fn set_muted(&mut self, muted: bool) {
        info!("[surface] muted={}", muted);
    }

    fn set_volume(&mut self, volume: f64) {
        info!("[surface] volume={:.2}", volume);
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn seek(&mut self, seconds: f64) -> Result<(), String> {
        info!("[surface] seek -> {:.2}", seconds);
        self.position = seconds;
        Ok(())
    }

    fn has_ended(&self) -> bool {
        false
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Create path configuration from CLI args and environment
    let path_config = paths::PathConfig::from_env_and_cli(args.config_dir.clone());
    if let Err(e) = paths::ensure_dirs(&path_config) {
        eprintln!("Warning: Failed to create application directories: {}", e);
    }

    // Determine log level based on verbosity flags
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    // Initialize logger based on --log flag
    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .as_ref()
            .cloned()
            .unwrap_or_else(|| paths::data_file("cutline.log", &path_config));

        let file = std::fs::File::create(&log_path)?;
        env_logger::Builder::new()
            .filter_level(log_level)
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!("Logging to file: {} (level: {:?})", log_path.display(), log_level);
    } else {
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .format_timestamp_millis()
            .init();
    }

    let mut app = EditorApp::new();

    if let Some(path) = &args.project {
        app.load_project(path)
            .map_err(|e| anyhow::anyhow!("{}", e))?;
    }

    print_summary(&app);

    if let Some(time) = args.seek {
        app.seek(time);
    }

    if let Some(secs) = args.play {
        run_playback(&mut app, secs);
    }

    if let Some(path) = &args.output {
        app.save_project(path).map_err(|e| anyhow::anyhow!("{}", e))?;
        println!("Saved project to {}", path.display());
    }

    Ok(())
}

fn print_summary(app: &EditorApp) {
    let Some(project) = app.store.project() else {
        println!("No project loaded");
        return;
    };
    println!(
        "{} ({}): {}s @ {:.0} fps, {}",
        project.name, project.id, project.duration, project.fps, project.resolution
    );
    for track in &project.tracks {
        println!(
            "  [{}] {} - {} clip(s){}",
            track.kind,
            track.name,
            track.clips.len(),
            if track.muted { ", muted" } else { "" }
        );
        for clip in &track.clips {
            println!(
                "      {} {} [{:.1}s..{:.1}s) {}",
                clip.kind,
                clip.id,
                clip.position,
                clip.end(),
                if clip.source.is_empty() { "<empty>" } else { clip.source.as_str() }
            );
        }
    }
}

/// Drive the transport for up to `secs` wall-clock seconds, mirroring the
/// active clip onto a console surface.
fn run_playback(app: &mut EditorApp, secs: f64) {
    let mut surface = ConsoleSurface::default();
    println!("Playing from t={:.1}s for {:.1}s...", app.transport.time(), secs);
    app.play();

    let deadline = Instant::now() + Duration::from_secs_f64(secs.max(0.0));
    while app.transport.is_playing() && Instant::now() < deadline {
        if app.pump() > 0 {
            app.sync_follower(&mut surface);
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    if app.transport.is_playing() {
        app.pause();
    } else {
        warn!("playback auto-stopped at project end");
    }
    println!("Stopped at t={:.1}s", app.transport.time());
}
