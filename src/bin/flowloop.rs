use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flowloop", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay an event script and render the canvas as a PNG.
    Frame(FrameArgs),
    /// Replay an event script and export the path animation as a looping GIF.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Event script (JSON array of input events) to replay first.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Background image; the canvas takes its size.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Canvas width when no background is given.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Canvas height when no background is given.
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// TTF/OTF font for node id labels; nodes are unlabeled without one.
    #[arg(long)]
    label_font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Simulated playback before the frame is taken, in milliseconds.
    #[arg(long, default_value_t = 0.0)]
    play_ms: f64,

    /// Display refresh step used to simulate playback, in milliseconds.
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    step_ms: f64,

    /// Canvas clear color.
    #[arg(long, default_value = "#ffffff")]
    clear: String,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Cpu)]
    backend: BackendChoice,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Frames per second.
    #[arg(long, default_value_t = flowloop::EXPORT_FPS)]
    fps: u32,

    /// GIF quantizer quality, 1 (best) to 30 (fastest).
    #[arg(long, default_value_t = 10)]
    quality: u8,

    /// Color transparent areas are flattened over.
    #[arg(long, default_value = "#ffffff")]
    bg: String,

    /// Draw nodes and the path polyline too, not just the markers.
    #[arg(long)]
    with_scene: bool,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Cpu)]
    backend: BackendChoice,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Cpu,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn parse_color(s: &str) -> anyhow::Result<flowloop::Rgba8> {
    s.parse()
        .map_err(|e: String| anyhow::anyhow!(e))
        .with_context(|| format!("parse color '{s}'"))
}

fn make_backend(
    choice: BackendChoice,
    opts: &flowloop::RenderOpts,
) -> anyhow::Result<Box<dyn flowloop::RenderBackend>> {
    let kind = match choice {
        BackendChoice::Cpu => flowloop::BackendKind::Cpu,
    };
    Ok(flowloop::create_backend(kind, opts)?)
}

fn build_editor(args: &SceneArgs) -> anyhow::Result<flowloop::Editor> {
    let canvas = flowloop::Canvas::new(args.width, args.height)?;
    let mut editor = flowloop::Editor::new(canvas);

    if let Some(path) = &args.background {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read background '{}'", path.display()))?;
        editor.load_background(&bytes)?;
    }

    if let Some(path) = &args.script {
        let script = flowloop::EventScript::from_path(path)?;
        let report = script.replay(&mut editor)?;
        tracing::info!(
            events = report.events,
            redraws = report.redraws,
            "script replayed"
        );
    }
    Ok(editor)
}

fn render_opts(args: &SceneArgs) -> anyhow::Result<flowloop::RenderOpts> {
    let opts = flowloop::RenderOpts::default();
    let Some(path) = &args.label_font else {
        return Ok(opts);
    };
    let bytes =
        std::fs::read(path).with_context(|| format!("read label font '{}'", path.display()))?;
    Ok(opts.with_label_font(bytes))
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut editor = build_editor(&args.scene)?;

    if args.play_ms > 0.0 {
        if !editor.is_animating() {
            tracing::warn!("--play-ms given but the script never starts the animation");
        }
        anyhow::ensure!(
            args.step_ms.is_finite() && args.step_ms > 0.0,
            "--step-ms must be > 0"
        );
        let mut elapsed = 0.0;
        while elapsed < args.play_ms {
            let step = args.step_ms.min(args.play_ms - elapsed);
            editor.tick(step);
            elapsed += step;
        }
    }

    let opts = render_opts(&args.scene)?.with_clear_rgba(parse_color(&args.clear)?);
    let mut backend = make_backend(args.backend, &opts)?;
    let frame = editor.render(backend.as_mut())?;

    ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut editor = build_editor(&args.scene)?;
    let mut backend = make_backend(args.backend, &render_opts(&args.scene)?)?;

    ensure_parent_dir(&args.out)?;
    let file = File::create(&args.out)
        .with_context(|| format!("create gif '{}'", args.out.display()))?;
    let mut sink = flowloop::GifSink::new(
        BufWriter::new(file),
        flowloop::GifSinkOpts::default().with_bg_rgba(parse_color(&args.bg)?),
    );

    let opts = flowloop::ExportOpts::default()
        .with_fps(flowloop::Fps::new(args.fps, 1)?)
        .with_quality(args.quality)
        .with_scene(args.with_scene);
    let outcome = editor.export(backend.as_mut(), &mut sink, &opts)?;

    use std::io::Write as _;
    sink.into_inner()
        .flush()
        .with_context(|| format!("flush gif '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} frames, {:.2} ms/frame)",
        args.out.display(),
        outcome.frames,
        outcome.frame_delay_ms
    );
    Ok(())
}
