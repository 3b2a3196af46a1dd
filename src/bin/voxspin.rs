use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "voxspin", version)]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a scene and stream it to the panel.
    Play(PlayArgs),
    /// Compile a scene and print timeline statistics.
    Compile(CompileArgs),
    /// Rasterize one timeline frame to a PNG preview.
    Frame(FrameArgs),
    /// Send a bring-up test pattern.
    Pattern(PatternArgs),
    /// Write the built-in demo scene as JSON.
    DemoScene(DemoSceneArgs),
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Panel controller host.
    #[arg(long)]
    host: Option<String>,

    /// Panel controller port.
    #[arg(long)]
    port: Option<u16>,

    /// Arm rotation speed (revolutions per minute).
    #[arg(long)]
    rpm: Option<f64>,

    /// Radial pixel count N (scene cross-section is 2N x 2N).
    #[arg(long)]
    radial_pixels: Option<u32>,

    /// Cross-section sampling step.
    #[arg(long)]
    spacing: Option<u32>,

    /// Frame transport.
    #[arg(long, value_enum)]
    transport: Option<TransportChoice>,
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Input scene JSON (`[column][layer][row]` of null or [r, g, b]).
    #[arg(long, required_unless_present = "demo", conflicts_with = "demo")]
    scene: Option<PathBuf>,

    /// Use the built-in demo scene instead of a file.
    #[arg(long)]
    demo: bool,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    cfg: ConfigArgs,

    #[command(flatten)]
    scene: SceneArgs,

    /// Stop after this many half-rotation passes (default: stream until disconnected).
    #[arg(long)]
    passes: Option<u64>,
}

#[derive(Args, Debug)]
struct CompileArgs {
    #[command(flatten)]
    cfg: ConfigArgs,

    #[command(flatten)]
    scene: SceneArgs,

    /// Also write the full timeline as JSON.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    cfg: ConfigArgs,

    #[command(flatten)]
    scene: SceneArgs,

    /// Timeline frame index (0-based).
    #[arg(long)]
    index: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Rasterize as on a mirrored pass.
    #[arg(long)]
    mirror: bool,

    /// Preview pixels per panel pixel.
    #[arg(long, default_value_t = 8)]
    scale: u32,
}

#[derive(Args, Debug)]
struct PatternArgs {
    #[command(flatten)]
    cfg: ConfigArgs,

    /// Pattern to send.
    #[arg(long, value_enum, default_value_t = PatternKind::Lines)]
    kind: PatternKind,

    /// Number of frames to send.
    #[arg(long, default_value_t = 32)]
    count: usize,

    /// Pause between frames in milliseconds.
    #[arg(long, default_value_t = 0)]
    interval_ms: u64,
}

#[derive(Args, Debug)]
struct DemoSceneArgs {
    /// Output scene JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Radial pixel count N of the target arm.
    #[arg(long, default_value_t = 24)]
    radial_pixels: u32,

    /// Number of layers (panel rows).
    #[arg(long, default_value_t = 32)]
    layers: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TransportChoice {
    Tcp,
    Udp,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PatternKind {
    /// Alternating lit and dark rows.
    Lines,
    /// One full row at a time, cycling through the slices.
    Slices,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Play(args) => cmd_play(args),
        Command::Compile(args) => cmd_compile(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Pattern(args) => cmd_pattern(args),
        Command::DemoScene(args) => cmd_demo_scene(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &ConfigArgs) -> anyhow::Result<voxspin::PlayerConfig> {
    let mut cfg = match &args.config {
        Some(path) => voxspin::PlayerConfig::from_path(path)?,
        None => voxspin::PlayerConfig::default(),
    };
    if let Some(host) = &args.host {
        cfg.host = host.clone();
    }
    if let Some(port) = args.port {
        cfg.port = port;
    }
    if let Some(rpm) = args.rpm {
        cfg.rpm = rpm;
    }
    if let Some(n) = args.radial_pixels {
        cfg.radial_pixels = n;
    }
    if let Some(d) = args.spacing {
        cfg.spacing = d;
    }
    if let Some(t) = args.transport {
        cfg.transport = match t {
            TransportChoice::Tcp => voxspin::TransportKind::Tcp,
            TransportChoice::Udp => voxspin::TransportKind::Udp,
        };
    }
    cfg.validate()?;
    Ok(cfg)
}

fn load_scene(args: &SceneArgs, cfg: &voxspin::PlayerConfig) -> anyhow::Result<voxspin::Scene> {
    match &args.scene {
        Some(path) => Ok(voxspin::Scene::from_path(path)?),
        None => Ok(voxspin::Scene::demo(
            cfg.radial_pixels,
            voxspin::PANEL_HEIGHT,
        )),
    }
}

fn compile(cfg: &voxspin::PlayerConfig, scene: &SceneArgs) -> anyhow::Result<voxspin::Timeline> {
    let table = voxspin::GeometryTable::build(&cfg.physical()?);
    let scene = load_scene(scene, cfg)?;
    Ok(voxspin::compile_timeline(&scene, &table))
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.cfg)?;
    let timeline = compile(&cfg, &args.scene)?;
    if timeline.is_empty() {
        anyhow::bail!("scene compiles to an empty timeline; nothing to play");
    }

    let transport = cfg.connect()?;
    let opts = voxspin::PlaybackOpts {
        max_passes: args.passes,
    };
    let stats = voxspin::play(&timeline, transport, voxspin::RealtimePacer, opts)?;

    eprintln!(
        "played {} passes ({} frames, {} mirror flips)",
        stats.passes, stats.frames_sent, stats.mirror_flips
    );
    Ok(())
}

fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.cfg)?;
    let timeline = compile(&cfg, &args.scene)?;

    println!("{}", serde_json::to_string_pretty(&timeline.stats())?);

    if let Some(out) = &args.out {
        ensure_parent_dir(out)?;
        std::fs::write(out, timeline.to_json_string()?)
            .with_context(|| format!("write timeline '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.cfg)?;
    let timeline = compile(&cfg, &args.scene)?;

    let frame = timeline.frames().get(args.index).with_context(|| {
        format!(
            "frame index {} out of range (timeline has {} frames)",
            args.index,
            timeline.len()
        )
    })?;
    let buffer = voxspin::rasterize(&frame.panel_activations(), args.mirror);

    ensure_parent_dir(&args.out)?;
    buffer
        .to_luma_image(args.scale)
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} (offset {} ticks, {} pixels lit)",
        args.out.display(),
        frame.offset.0,
        buffer.count_lit()
    );
    Ok(())
}

fn cmd_pattern(args: PatternArgs) -> anyhow::Result<()> {
    use voxspin::{FrameTransport as _, Pacer as _};

    let cfg = load_config(&args.cfg)?;
    let mut transport = cfg.connect()?;
    let mut pacer = voxspin::RealtimePacer;
    let interval = voxspin::Tick::from_millis(args.interval_ms);

    for i in 0..args.count {
        let frame = match args.kind {
            PatternKind::Lines => voxspin::alternating_lines(),
            PatternKind::Slices => voxspin::slice_row(i),
        };
        transport
            .send_frame(&frame)
            .with_context(|| format!("send pattern frame {i}"))?;
        tracing::debug!(frame = i, lit = frame.count_lit(), "sent pattern frame");
        pacer.pause(interval);
    }
    transport.close()?;

    eprintln!("sent {} {:?} frames", args.count, args.kind);
    Ok(())
}

fn cmd_demo_scene(args: DemoSceneArgs) -> anyhow::Result<()> {
    let scene = voxspin::Scene::demo(args.radial_pixels, args.layers);
    ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, scene.to_json_string()?)
        .with_context(|| format!("write scene '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
