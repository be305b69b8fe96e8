use std::{
    io::{BufWriter, Write as _},
    path::PathBuf,
    str::FromStr,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use play_indicator::{
    Clock, IndicatorConfig, IndicatorEngine, IndicatorSnapshot, IndicatorView, ManualClock,
    MediaTime, PlaybackState, Rect,
};
use rand::{SeedableRng, rngs::StdRng};

#[derive(Parser, Debug)]
#[command(name = "play-indicator", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drive an indicator through a script and print one JSON snapshot per frame.
    Simulate(SimulateArgs),
    /// Print the effective configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Comma separated `action@seconds` steps, e.g. `play@0,pause@1.5,stop@2.5`.
    #[arg(long, value_delimiter = ',', default_value = "play@0,pause@1.5,stop@2.5")]
    script: Vec<ScriptStep>,

    /// Seconds of timeline to simulate.
    #[arg(long, default_value_t = 3.0)]
    duration: f64,

    /// Snapshots per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Seed for waypoint generation.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Indicator width.
    #[arg(long, default_value_t = 100.0)]
    width: f64,

    /// Indicator height.
    #[arg(long, default_value_t = 100.0)]
    height: f64,

    /// Optional JSON config overriding the default timings.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Config file to validate and echo; defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Action {
    Play,
    Pause,
    Stop,
    Reset,
}

#[derive(Clone, Copy, Debug)]
struct ScriptStep {
    action: Action,
    at: f64,
}

impl FromStr for ScriptStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (action, at) = s
            .trim()
            .split_once('@')
            .ok_or_else(|| format!("expected `action@seconds`, got `{s}`"))?;
        let action = Action::from_str(action, true)?;
        let at: f64 = at
            .parse()
            .map_err(|e| format!("bad time in `{s}`: {e}"))?;
        if !at.is_finite() || at < 0.0 {
            return Err(format!("time must be >= 0 in `{s}`"));
        }
        Ok(Self { action, at })
    }
}

#[derive(serde::Serialize)]
struct FrameLine {
    index: u64,
    completed: bool,
    #[serde(flatten)]
    snapshot: IndicatorSnapshot,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<IndicatorConfig> {
    match path {
        Some(p) => IndicatorConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(IndicatorConfig::default()),
    }
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_ref())?;
    println!("{}", serde_json::to_string_pretty(&cfg)?);
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.fps > 0, "--fps must be > 0");
    anyhow::ensure!(
        args.duration.is_finite() && args.duration >= 0.0,
        "--duration must be >= 0"
    );

    let config = load_config(args.config.as_ref())?;
    let clock = ManualClock::new();
    let engine =
        IndicatorEngine::with_parts(config, StdRng::seed_from_u64(args.seed), clock.clone())?;
    let mut view = IndicatorView::with_engine(engine);
    view.layout(Rect::new(0.0, 0.0, args.width, args.height));

    let mut script = args.script;
    script.sort_by(|a, b| a.at.total_cmp(&b.at));
    let mut pending = script.into_iter().peekable();

    let fps = f64::from(args.fps);
    let frames = (args.duration * fps).floor() as u64 + 1;
    let mut out = BufWriter::new(std::io::stdout().lock());

    for frame in 0..frames {
        let t = frame as f64 / fps;
        clock.set(MediaTime(t));

        while let Some(step) = pending.next_if(|s| s.at <= t) {
            apply(&mut view, step.action, &clock);
        }

        let completed = view.tick();
        let line = FrameLine {
            index: frame,
            completed,
            snapshot: view.snapshot(),
        };
        serde_json::to_writer(&mut out, &line).context("write snapshot")?;
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}

fn apply(view: &mut IndicatorView, action: Action, clock: &ManualClock) {
    tracing::info!(?action, time = clock.now().as_secs(), "script step");
    match action {
        Action::Play => view.set_state(PlaybackState::Playing),
        Action::Pause => view.set_state(PlaybackState::Paused),
        Action::Stop => {
            view.set_completion(|engine| {
                tracing::info!(time = engine.now().as_secs(), "stop completed");
            });
            view.set_state(PlaybackState::Stopped);
        }
        Action::Reset => view.reset(),
    }
}
