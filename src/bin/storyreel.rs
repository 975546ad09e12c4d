use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use storyreel::{
    AuthoringOptions, BackgroundPolicy, ENTRY_STAGGER_FRAMES, FrameDescription, FrameIndex,
    FrameRange, Prompter, Rasterizer, SegmentKind, StoryDocument, Storyboard, StoryboardOptions,
};

#[derive(Parser, Debug)]
#[command(name = "storyreel", version, about = "Compose and inspect animated story timelines")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Author a new story interactively and write it as JSON.
    New(NewArgs),
    /// Validate a story document.
    Check(StoryArgs),
    /// Print the timeline segments of a story.
    Schedule(ScheduleArgs),
    /// Describe or draw a single frame (.json, .svg or .png, chosen by extension).
    Frame(FrameArgs),
    /// Describe or draw a frame range into a directory.
    Frames(FramesArgs),
}

#[derive(Args, Debug)]
struct NewArgs {
    /// Output path (defaults to `<slug-of-title>.story.json`).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Frame rate of the new story.
    #[arg(long, default_value_t = 30)]
    fps: u32,
}

#[derive(Args, Debug)]
struct StoryArgs {
    /// Input story JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Storyboard options JSON (schedule and render settings).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Title card length in frames.
    #[arg(long)]
    title_frames: Option<u64>,

    /// End card length in frames.
    #[arg(long)]
    end_frames: Option<u64>,

    /// Draw unknown backgrounds with the fallback fill instead of failing.
    #[arg(long)]
    fallback_backgrounds: bool,

    /// Output width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels.
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Args, Debug)]
struct ScheduleArgs {
    #[command(flatten)]
    story: StoryArgs,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    story: StoryArgs,

    /// Global frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output path; the extension picks the format.
    #[arg(long)]
    out: PathBuf,

    /// Extra directory of .ttf/.otf fonts for PNG output.
    #[arg(long)]
    font_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    story: StoryArgs,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last frame (exclusive); defaults to the end of the timeline.
    #[arg(long)]
    end: Option<u64>,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Worker threads (defaults to one per core).
    #[arg(long)]
    threads: Option<usize>,

    /// Extra directory of .ttf/.otf fonts for PNG output.
    #[arg(long)]
    font_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Svg,
    Png,
}

impl OutputFormat {
    fn from_path(path: &Path) -> anyhow::Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("svg") => Ok(Self::Svg),
            Some("png") => Ok(Self::Png),
            _ => anyhow::bail!(
                "cannot infer output format from '{}' (use .json, .svg or .png)",
                path.display()
            ),
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::New(args) => cmd_new(args),
        Command::Check(args) => cmd_check(args),
        Command::Schedule(args) => cmd_schedule(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn read_story(path: &Path) -> anyhow::Result<StoryDocument> {
    StoryDocument::from_path(path).with_context(|| format!("load story '{}'", path.display()))
}

fn load_options(args: &StoryArgs) -> anyhow::Result<StoryboardOptions> {
    let mut opts = match &args.config {
        Some(path) => {
            let f = File::open(path)
                .with_context(|| format!("open options '{}'", path.display()))?;
            serde_json::from_reader(BufReader::new(f))
                .with_context(|| format!("parse options '{}'", path.display()))?
        }
        None => StoryboardOptions::default(),
    };
    if let Some(n) = args.title_frames {
        opts.schedule.title_frames = n;
    }
    if let Some(n) = args.end_frames {
        opts.schedule.end_frames = n;
    }
    if args.fallback_backgrounds {
        opts.schedule.unknown_background = BackgroundPolicy::FallbackToDefault;
    }
    if let Some(w) = args.width {
        opts.render.canvas.width = w;
    }
    if let Some(h) = args.height {
        opts.render.canvas.height = h;
    }
    Ok(opts)
}

fn load_board(args: &StoryArgs) -> anyhow::Result<(StoryDocument, StoryboardOptions, Storyboard)> {
    let doc = read_story(&args.in_path)?;
    let opts = load_options(args)?;
    let board = Storyboard::build(&doc, &opts)
        .with_context(|| format!("validate story '{}'", args.in_path.display()))?;
    Ok((doc, opts, board))
}

fn build_board(args: &StoryArgs) -> anyhow::Result<Storyboard> {
    load_board(args).map(|(_, _, board)| board)
}

fn cmd_new(args: NewArgs) -> anyhow::Result<()> {
    let opts = AuthoringOptions {
        frame_rate: args.fps,
        ..AuthoringOptions::default()
    };
    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
    let doc = storyreel::run_interactive(&mut prompter, &opts).context("author story")?;

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(storyreel::story_filename(&doc.title)));
    doc.write_to_path(&out)
        .with_context(|| format!("write story '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_check(args: StoryArgs) -> anyhow::Result<()> {
    let (doc, opts, board) = load_board(&args)?;
    let secs = board.fps().frames_to_secs(board.total_frames() as f64);
    println!(
        "ok: '{}' has {} scenes, {} frames ({secs:.1} s at {} fps)",
        board.title(),
        doc.scenes.len(),
        board.total_frames(),
        board.fps().as_f64()
    );

    let settle = opts
        .render
        .spring
        .settle_frames(board.fps())
        .context("entry spring")?;
    println!("entrances settle within {settle} frames");
    for (i, scene) in doc.scenes.iter().enumerate() {
        let Some(segment) = board.schedule().scene_segment(i) else {
            continue;
        };
        let stagger = scene.characters.len().saturating_sub(1) as u64 * ENTRY_STAGGER_FRAMES;
        let finish = stagger + settle;
        if finish > segment.range.len_frames() {
            println!(
                "note: scene {} lasts {} frames but its last entrance settles at frame {finish}",
                scene.id,
                segment.range.len_frames()
            );
        }
    }
    Ok(())
}

fn cmd_schedule(args: ScheduleArgs) -> anyhow::Result<()> {
    let board = build_board(&args.story)?;
    let schedule = board.schedule();
    if args.json {
        let text = serde_json::to_string_pretty(schedule).context("serialize schedule")?;
        println!("{text}");
        return Ok(());
    }
    for seg in schedule.segments() {
        let label = match seg.kind {
            SegmentKind::TitleCard => "title".to_owned(),
            SegmentKind::Scene { id, .. } => format!("scene {id}"),
            SegmentKind::EndCard => "end".to_owned(),
        };
        println!(
            "{label:<10} {:>6} .. {:>6}  ({} frames)",
            seg.range.start.0,
            seg.range.end.0,
            seg.range.len_frames()
        );
    }
    println!("total      {:>6} frames", schedule.total_frames());
    Ok(())
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_frame(
    board: &Storyboard,
    desc: &FrameDescription,
    format: OutputFormat,
    out: &Path,
    raster: Option<&Rasterizer>,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let f = File::create(out).with_context(|| format!("create '{}'", out.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, desc)
                .with_context(|| format!("write json '{}'", out.display()))?;
            w.flush()
                .with_context(|| format!("flush json '{}'", out.display()))?;
        }
        OutputFormat::Svg => {
            let svg = storyreel::to_svg(desc, board.canvas());
            std::fs::write(out, svg).with_context(|| format!("write svg '{}'", out.display()))?;
        }
        OutputFormat::Png => {
            let raster = raster.context("png output needs a rasterizer")?;
            let svg = storyreel::to_svg(desc, board.canvas());
            let frame = raster
                .rasterize(&svg, board.canvas())
                .with_context(|| format!("rasterize frame {}", desc.frame.0))?;
            image::save_buffer_with_format(
                out,
                &frame.data,
                frame.width,
                frame.height,
                image::ColorType::Rgba8,
                image::ImageFormat::Png,
            )
            .with_context(|| format!("write png '{}'", out.display()))?;
        }
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let format = OutputFormat::from_path(&args.out)?;
    let board = build_board(&args.story)?;
    let desc = board.render(FrameIndex(args.frame))?;
    let raster = (format == OutputFormat::Png).then(|| Rasterizer::new(args.font_dir.as_deref()));

    ensure_parent(&args.out)?;
    write_frame(&board, &desc, format, &args.out, raster.as_ref())?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let board = build_board(&args.story)?;
    let end = args.end.unwrap_or(board.total_frames());
    let range = FrameRange::new(FrameIndex(args.start), FrameIndex(end))?;
    let descs = board.describe_range(range, args.threads)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let raster =
        (args.format == OutputFormat::Png).then(|| Rasterizer::new(args.font_dir.as_deref()));

    descs.par_iter().try_for_each(|desc| {
        let out = args
            .out_dir
            .join(format!("frame_{:05}.{}", desc.frame.0, args.format.extension()));
        write_frame(&board, desc, args.format, &out, raster.as_ref())
    })?;

    eprintln!(
        "wrote {} frames to {}",
        descs.len(),
        args.out_dir.display()
    );
    Ok(())
}
