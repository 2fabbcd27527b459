use std::{io::Write, time::Instant};

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use rtc::{
    cli::{Cli, Command, DumpArgs, RenderArgs},
    scene::yaml,
    utils::{default_image_path, new_buffered_output_stream},
};

type Error = anyhow::Error;

fn main() -> Result<(), Error> {
    let args = Cli::parse();

    match args.command {
        Command::Render(args) => render(args),
        Command::Dump(args) => dump(args),
    }
}

#[derive(Debug, Serialize)]
struct RenderStats {
    width: usize,
    height: usize,
    intersections: usize,
    duration_ms: u128,
}

fn render(args: RenderArgs) -> Result<(), Error> {
    let scene = yaml::parse_file(&args.scene_path)?;

    let mut camera = scene
        .camera
        .clone()
        .with_size(
            scene.camera.h_size() * args.factor,
            scene.camera.v_size() * args.factor,
        );
    if let Some(level) = args.anti_aliasing {
        camera = camera.with_anti_aliasing(level);
    }

    let start = Instant::now();
    let canvas = if args.sequential {
        camera.render_sequential(&scene.world)
    } else {
        camera.render(&scene.world)
    };
    let duration = start.elapsed();

    let output_path = args
        .output_path
        .unwrap_or_else(|| default_image_path(&args.scene_path));
    canvas.export(&output_path)?;

    if args.stats {
        let stats = RenderStats {
            width: camera.h_size(),
            height: camera.v_size(),
            intersections: scene.world.nb_intersections(),
            duration_ms: duration.as_millis(),
        };
        println!(
            "{}",
            serde_json::to_string(&stats).context("failed to serialize render statistics")?
        );
    }

    Ok(())
}

fn dump(args: DumpArgs) -> Result<(), Error> {
    let scene = yaml::parse_file(&args.scene_path)?;

    let mut writer = new_buffered_output_stream(&args.output_path)?;
    serde_json::to_writer_pretty(&mut writer, &scene.world)
        .context("failed to serialize the world")?;
    serde_json::to_writer_pretty(&mut writer, &scene.camera)
        .context("failed to serialize the camera")?;
    writer.flush().context("failed to flush output")?;

    Ok(())
}
