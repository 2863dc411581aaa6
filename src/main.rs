mod animate;
mod obj;
mod scene;
mod watch;

use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use blobs_runtime::Engine;
use clap::Parser;
use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode, WriteLogger};

use crate::scene::{SceneConfig, load_scene_from_path};

#[derive(Parser, Debug)]
#[command(name = "blobs")]
#[command(about = "Extract an animated metaball isosurface with marching cubes", long_about = None)]
struct Cli {
    /// Scene file (TOML). The built-in five-blob scene is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Frames to extract; 0 runs until interrupted
    #[arg(short = 'n', long, default_value = "120")]
    frames: u64,

    /// Lattice cubes per axis, overriding the scene, e.g. `40,40,40`
    #[arg(long, value_parser = parse_dims)]
    dims: Option<[u32; 3]>,

    /// Iso level, overriding the scene
    #[arg(long)]
    iso: Option<f32>,

    /// Write the last frame as Wavefront OBJ
    #[arg(long)]
    obj: Option<PathBuf>,

    /// Reload the scene file when it changes; frames are paced at the animation time step
    #[arg(long, requires = "config")]
    watch: bool,

    /// Also log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level used with --log-file
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Log frame statistics every N frames; 0 disables
    #[arg(long, default_value = "30")]
    stats_every: u64,
}

fn parse_dims(s: &str) -> Result<[u32; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected X,Y,Z, got '{}'", s));
    };
    let n = |v: &str| v.parse::<u32>().map_err(|e| format!("'{}': {}", v, e));
    Ok([n(x)?, n(y)?, n(z)?])
}

fn init_logging(cli: &Cli) -> Result<(), Box<dyn Error>> {
    match &cli.log_file {
        Some(path) => {
            CombinedLogger::init(vec![
                TermLogger::new(
                    cli.log_level,
                    Config::default(),
                    TerminalMode::Mixed,
                    ColorChoice::Auto,
                ),
                WriteLogger::new(cli.log_level, Config::default(), File::create(path)?),
            ])?;
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .init();
        }
    }
    Ok(())
}

/// Scene with command-line overrides applied.
fn effective_scene(cli: &Cli, mut scene: SceneConfig) -> SceneConfig {
    if let Some(dims) = cli.dims {
        scene.lattice.dims = dims;
    }
    if let Some(iso) = cli.iso {
        scene.lattice.iso_level = iso;
    }
    scene
}

fn load_scene(cli: &Cli) -> Result<SceneConfig, Box<dyn Error>> {
    let scene = match &cli.config {
        Some(path) => load_scene_from_path(path)?,
        None => SceneConfig::default(),
    };
    Ok(effective_scene(cli, scene))
}

/// Applies a reloaded scene. Lattice rebuilds only happen when dimensions or
/// the iso level changed; a rejected scene leaves the engine as it was.
fn apply_scene(engine: &mut Engine, old: &SceneConfig, new: &SceneConfig) -> Result<(), Box<dyn Error>> {
    if new.lattice.dims != old.lattice.dims || new.lattice.iso_level != old.lattice.iso_level {
        let [x, y, z] = new.lattice.dims;
        engine.configure(x, y, z, new.lattice.iso_level)?;
    }
    engine.set_winding(new.lattice.winding.into());
    engine.set_blobs(&new.blob_list());
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut scene = load_scene(&cli)?;
    let mut engine = Engine::new(scene.engine_config())?;
    engine.set_blobs(&scene.blob_list());

    let reload_rx = match (&cli.config, cli.watch) {
        (Some(path), true) => Some(watch::spawn_scene_watcher(path.clone())),
        _ => None,
    };

    let mut frame: u64 = 0;
    while cli.frames == 0 || frame < cli.frames {
        if let (Some(rx), Some(path)) = (&reload_rx, &cli.config) {
            if watch::drain(rx) {
                match load_scene_from_path(path) {
                    Ok(fresh) => {
                        let fresh = effective_scene(&cli, fresh);
                        match apply_scene(&mut engine, &scene, &fresh) {
                            Ok(()) => {
                                log::info!("scene reloaded from {}", path.display());
                                scene = fresh;
                            }
                            Err(e) => log::warn!("scene rejected, keeping previous: {}", e),
                        }
                    }
                    Err(e) => log::warn!("scene reload failed: {}", e),
                }
            }
        }

        if scene.animation.enabled {
            let t = frame as f32 * scene.animation.time_step;
            animate::legacy_motion(engine.blobs_mut(), t);
        }

        let view = engine.advance_frame()?;
        frame += 1;
        if cli.stats_every > 0 && frame % cli.stats_every == 0 {
            log::info!(target: "frame", "{}", view.stats);
        }

        if reload_rx.is_some() {
            std::thread::sleep(Duration::from_secs_f32(scene.animation.time_step.max(0.0)));
        }
    }

    log::info!(target: "frame", "final {}", engine.stats());
    if let Some(path) = &cli.obj {
        obj::save_obj(engine.mesh(), path)?;
        log::info!(
            "wrote {} ({} vertices, {} triangles)",
            path.display(),
            engine.mesh().vertex_count(),
            engine.mesh().triangle_count()
        );
    }
    Ok(())
}
