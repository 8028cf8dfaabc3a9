use std::{
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use frameline::cursor::TargetLookup;
use frameline::timeline::snap::{SnapOpts, snap_span_drag};

#[derive(Parser, Debug)]
#[command(name = "frameline", version)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a single frame and print it as JSON.
    Frame(FrameArgs),
    /// Evaluate a frame range and print it as a JSON array.
    Range(RangeArgs),
    /// Snap a dragged item against the timeline and print the result.
    Snap(SnapArgs),
}

#[derive(Args, Debug)]
struct CompArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Layout snapshot JSON used to resolve cursor targets.
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Skip composition validation.
    #[arg(long)]
    no_validate: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    comp: CompArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct RangeArgs {
    #[command(flatten)]
    comp: CompArgs,

    /// First frame (inclusive). Defaults to 0.
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// End frame (exclusive). Defaults to the composition duration.
    #[arg(long)]
    end: Option<u64>,

    /// Evaluate chunks on a worker pool.
    #[arg(long)]
    parallel: bool,

    /// Worker count for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per parallel chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Write JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SnapArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Id of the item being dragged.
    #[arg(long)]
    item: String,

    /// Horizontal drag distance in pixels.
    #[arg(long, allow_hyphen_values = true)]
    delta_px: f64,

    /// Timeline zoom.
    #[arg(long, default_value_t = 4.0)]
    px_per_frame: f64,

    /// Current playhead frame.
    #[arg(long, default_value_t = 0.0)]
    playhead: f64,

    /// Capture distance in pixels.
    #[arg(long, default_value_t = SnapOpts::default().threshold_px)]
    threshold_px: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Range(args) => cmd_range(args),
        Command::Snap(args) => cmd_snap(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_comp(path: &Path, validate: bool) -> anyhow::Result<frameline::Composition> {
    let comp = frameline::Composition::from_path(path)
        .with_context(|| format!("load composition '{}'", path.display()))?;
    if validate {
        comp.validate()
            .with_context(|| format!("validate composition '{}'", path.display()))?;
    }
    Ok(comp)
}

fn resolve_targets(
    comp: &frameline::Composition,
    layout: Option<&Path>,
) -> anyhow::Result<Arc<TargetLookup>> {
    let Some(path) = layout else {
        return Ok(Arc::new(TargetLookup::new()));
    };
    let snapshot = frameline::LayoutSnapshot::from_path(path)
        .with_context(|| format!("load layout snapshot '{}'", path.display()))?;
    let mut cache = frameline::TargetCache::default();
    let lookup = cache.get_or_resolve(comp, &snapshot, 0);
    let found = lookup.values().filter(|p| p.found).count();
    tracing::debug!(targets = lookup.len(), found, "resolved cursor targets");
    Ok(lookup)
}

fn write_json<T: serde::Serialize>(value: &T, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = std::fs::File::create(path)
                .with_context(|| format!("create '{}'", path.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, value).context("serialize JSON")?;
            w.flush().with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = BufWriter::new(stdout.lock());
            serde_json::to_writer_pretty(&mut w, value).context("serialize JSON")?;
            writeln!(w).context("write stdout")?;
            w.flush().context("write stdout")?;
        }
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let comp = read_comp(&args.comp.in_path, !args.comp.no_validate)?;
    if args.frame >= comp.duration_in_frames {
        anyhow::bail!(
            "frame {} is outside the composition (duration {})",
            args.frame,
            comp.duration_in_frames
        );
    }
    let targets = resolve_targets(&comp, args.comp.layout.as_deref())?;
    let evaluator = frameline::FrameEvaluator::new(&comp).with_targets(targets);
    write_json(&evaluator.evaluate(args.frame), None)
}

fn cmd_range(args: RangeArgs) -> anyhow::Result<()> {
    let comp = read_comp(&args.comp.in_path, !args.comp.no_validate)?;
    let targets = resolve_targets(&comp, args.comp.layout.as_deref())?;
    let evaluator = frameline::FrameEvaluator::new(&comp).with_targets(targets);

    let end = args.end.unwrap_or(comp.duration_in_frames);
    let range = frameline::FrameRange::new(
        frameline::FrameIndex(args.start),
        frameline::FrameIndex(end),
    )?;
    let opts = frameline::EvalOpts {
        parallel: args.parallel,
        threads: args.threads,
        chunk_size: args.chunk_size,
    };
    let frames = frameline::evaluate_range(&evaluator, range, &opts)?;
    write_json(&frames, args.out.as_deref())
}

fn cmd_snap(args: SnapArgs) -> anyhow::Result<()> {
    let comp = read_comp(&args.in_path, true)?;
    let item = comp
        .tracks
        .iter()
        .flat_map(|t| t.items.iter())
        .find(|i| i.id == args.item)
        .with_context(|| format!("no item '{}' in composition", args.item))?;

    let points = frameline::collect_snap_points(&comp, args.playhead, Some(&item.id));
    let result = snap_span_drag(
        &points,
        item.from as f64,
        item.duration_in_frames as f64,
        args.delta_px,
        args.px_per_frame,
        SnapOpts {
            threshold_px: args.threshold_px,
        },
    );
    write_json(&result, None)
}
