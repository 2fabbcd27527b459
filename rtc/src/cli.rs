use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version)]
#[command(max_term_width = 80)]
#[command(about = "Renders YAML scene descriptions with a ray tracer.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    #[command(about = "Render a scene to an image file.")]
    Render(RenderArgs),
    #[command(about = "Write a scene's world and camera as JSON.")]
    Dump(DumpArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    #[arg(value_name = "SCENE", help = "Path to the YAML scene file")]
    pub scene_path: PathBuf,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Where to write the image (default: the scene path with a png extension)"
    )]
    pub output_path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        default_value_t = 1,
        value_name = "FACTOR",
        help = "Multiply the camera width and height"
    )]
    pub factor: usize,

    #[arg(
        long = "aa",
        value_name = "LEVEL",
        help = "Anti-aliasing level, 2 to 5 rays per pixel axis"
    )]
    pub anti_aliasing: Option<usize>,

    #[arg(long, help = "Render on a single thread")]
    pub sequential: bool,

    #[arg(long, help = "Print render statistics as a JSON line")]
    pub stats: bool,
}

#[derive(Debug, Clone, Args)]
pub struct DumpArgs {
    #[arg(value_name = "SCENE", help = "Path to the YAML scene file")]
    pub scene_path: PathBuf,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Where to write the JSON (default: stdout)"
    )]
    pub output_path: Option<PathBuf>,
}
