use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};

use desk_scene::app::DeskSceneApp;
use desk_scene::config::AppConfig;
use desk_scene::gfx::resources::{HeadlessTextureStore, ImageFileDecoder};
use desk_scene::gfx::scene::Scene;
use desk_scene::gfx::shader::UniformTrace;
use desk_scene::logging::init_logging;

fn main() -> Result<()> {
    let matches = Command::new("desk_scene")
        .about("Renders a static desk, PC and monitor scene")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("texture-dir")
                .long("texture-dir")
                .value_name("DIR")
                .help("Directory the scene textures are loaded from (overrides the config)"),
        )
        .arg(
            Arg::new("dump-trace")
                .long("dump-trace")
                .help(
                    "Run setup and one render without a window and print every uniform \
                     upload and draw",
                )
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let mut config = AppConfig::load_or_default(config_path.as_deref())
        .context("failed to load configuration")?;
    if let Some(dir) = matches.get_one::<String>("texture-dir") {
        config.assets.texture_dir = PathBuf::from(dir);
    }

    init_logging(config.logging_config());

    if matches.get_flag("dump-trace") {
        dump_trace(&config);
        return Ok(());
    }

    DeskSceneApp::new(config)?.run()
}

/// Prints setup uploads followed by one frame's uploads and draws
fn dump_trace(config: &AppConfig) {
    let mut scene = Scene::desk();
    let mut store = HeadlessTextureStore::new();
    let mut trace = UniformTrace::new();

    let report = scene.prepare(
        &config.assets.texture_dir,
        &ImageFileDecoder,
        &mut store,
        &mut trace,
    );
    scene.render(&mut trace);
    print!("{}", trace);

    scene.teardown(&mut store);
    log::info!(
        "{} textures loaded, {} failed, {} unresolved references, {} draws",
        report.loaded,
        report.failed.len(),
        report.unresolved.len(),
        trace.draw_count()
    );
}
