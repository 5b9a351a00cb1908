//! twostep CLI
//!
//! Compare explicit Euler and midpoint RK2 against exact solutions, from the
//! terminal or in a live window.

use std::{path::PathBuf, thread};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use twostep_core::Observer;
use twostep_lab::{
    catalog::{self, CUSTOM_DEFAULTS, CUSTOM_ID},
    config::Settings,
    playback::{Action, Frame, Tick},
    render::{ChartRecorder, Charts},
    report::{Metrics, SampleTable},
    session::{RunOutcome, Session},
};

#[derive(Parser)]
#[command(name = "twostep")]
#[command(about = "Compare Euler and RK2 against exact solutions of y' = f(t, y)")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in problems
    List,

    /// Compute a comparison and print the metrics
    Run {
        #[command(flatten)]
        run: RunArgs,

        /// Print the rendered charts as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Replay a comparison sample by sample in the terminal
    Animate {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Open a live plot window
    #[cfg(feature = "plot")]
    Plot {
        #[command(flatten)]
        run: RunArgs,

        /// Start playback as soon as the window opens
        #[arg(long)]
        autoplay: bool,
    },
}

/// Run settings, layered over an optional settings file.
#[derive(Args)]
struct RunArgs {
    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Problem id from `list`, or `custom`
    #[arg(short, long)]
    problem: Option<String>,

    /// Start of the interval
    #[arg(long, allow_hyphen_values = true)]
    t0: Option<f64>,

    /// End of the interval
    #[arg(long, allow_hyphen_values = true)]
    tf: Option<f64>,

    /// Initial value y(t0)
    #[arg(long, allow_hyphen_values = true)]
    y0: Option<f64>,

    /// Requested step size
    #[arg(long, allow_hyphen_values = true)]
    h: Option<f64>,

    /// Custom right-hand side f(t, y)
    #[arg(long, allow_hyphen_values = true)]
    rhs: Option<String>,

    /// Custom exact solution y(t) over t, y0, t0
    #[arg(long, allow_hyphen_values = true)]
    exact: Option<String>,

    /// Playback rate multiplier
    #[arg(short, long)]
    rate: Option<f64>,
}

impl RunArgs {
    /// Loads the settings file, if any, and applies command-line overrides.
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => Settings::default(),
        };

        if let Some(problem) = &self.problem {
            settings.problem.clone_from(problem);
        }
        if self.rhs.is_some() && self.problem.is_none() && self.config.is_none() {
            settings.problem = CUSTOM_ID.to_owned();
        }
        settings.t0 = self.t0.or(settings.t0);
        settings.tf = self.tf.or(settings.tf);
        settings.y0 = self.y0.or(settings.y0);
        settings.h = self.h.or(settings.h);
        settings.rhs = self.rhs.clone().or(settings.rhs);
        settings.exact = self.exact.clone().or(settings.exact);
        settings.rate = self.rate.unwrap_or(settings.rate);

        settings.validate()?;
        Ok(settings)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::List => list(),
        Commands::Run { run: args, json } => run(&args.settings()?, json)?,
        Commands::Animate { run: args } => animate(&args.settings()?)?,
        #[cfg(feature = "plot")]
        Commands::Plot { run: args, autoplay } => plot(&args.settings()?, autoplay)?,
    }

    Ok(())
}

fn list() {
    for problem in catalog::all() {
        let d = problem.defaults;
        println!("{:<12} {}", problem.id, problem.name);
        println!("{:<12} {}", "", problem.description);
        println!(
            "{:<12} defaults: t0 = {}, tf = {}, y0 = {}, h = {}",
            "", d.t0, d.tf, d.y0, d.h
        );
    }
    let d = CUSTOM_DEFAULTS;
    println!("{CUSTOM_ID:<12} user-defined f(t, y) via --rhs, optional exact y(t) via --exact");
    println!(
        "{:<12} defaults: t0 = {}, tf = {}, y0 = {}, h = {}",
        "", d.t0, d.tf, d.y0, d.h
    );
}

/// Runs the settings once and reports a dropped exact solution.
fn start(settings: &Settings, observer: &mut ChartRecorder) -> Result<Session> {
    let mut session = Session::new(settings.rate);
    let RunOutcome { exact_error } = session.run(settings, observer)?;
    if let Some(error) = exact_error {
        warn!("exact solution ignored: {error}");
    }
    Ok(session)
}

fn run(settings: &Settings, json: bool) -> Result<()> {
    let mut recorder = ChartRecorder::new(settings.visibility);
    let session = start(settings, &mut recorder)?;
    let Some(comparison) = session.playback().comparison() else {
        bail!("no comparison was loaded");
    };
    let frame = Frame::full(comparison);

    if json {
        let charts: Option<&Charts> = recorder.last();
        let output = serde_json::json!({
            "params": comparison.params,
            "cost": comparison.cost,
            "metrics": Metrics::from_frame(&frame),
            "charts": charts,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", Metrics::from_frame(&frame));
        println!();
        print!("{}", SampleTable::new(frame));
    }
    Ok(())
}

/// Prints the metrics of every rendered frame.
struct Printer;

impl Observer<Frame<'_>, Action> for Printer {
    fn observe(&mut self, event: &Frame<'_>) -> Option<Action> {
        println!("{}", Metrics::from_frame(event));
        None
    }
}

fn animate(settings: &Settings) -> Result<()> {
    let mut session = start(settings, &mut ChartRecorder::default())?;
    let playback = session.playback_mut();

    let Some(timer) = playback.play() else {
        bail!("nothing to animate");
    };
    info!(interval = ?timer.interval, "animating");

    let mut printer = Printer;
    while let Some(timer) = playback.timer() {
        thread::sleep(timer.interval);
        if playback.tick(timer.token, &mut printer) == Tick::Finished {
            info!("finished");
        }
    }
    Ok(())
}

#[cfg(feature = "plot")]
fn plot(settings: &Settings, autoplay: bool) -> Result<()> {
    use twostep_lab::render::{ShowConfig, show};

    let session = start(settings, &mut ChartRecorder::default())?;
    let mut config = ShowConfig::new()
        .title(format!("twostep: {}", settings.problem))
        .visibility(settings.visibility);
    if autoplay {
        config = config.autoplay();
    }

    let playback = session.into_playback();
    show(playback, config).map_err(|e| anyhow::anyhow!("plot window failed: {e}"))
}
