use arena_skirmish::config::TacticsConfig;
use arena_skirmish::game_loop::Bot;
use arena_skirmish::logging;
use arena_skirmish::model::Snapshot;
use arena_skirmish::pathing::gridexecutor::GridExecutor;
use arena_skirmish::spawnsystem::RecordingProduction;
use arena_skirmish::visualize::*;
use clap::Parser;
use log::*;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Runs one tick of the tactics core against a snapshot file and prints the
/// resulting intents as JSON.
#[derive(Parser)]
#[command(name = "skirmish")]
#[command(version)]
struct Cli {
    /// Snapshot of the arena to decide for
    #[arg(long)]
    scenario: PathBuf,

    /// Tactics configuration, defaults apply to anything left out
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the flanker cost matrix to stderr
    #[arg(long)]
    visualize: bool,

    /// One of off, error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn read_file<P>(path: P) -> Result<String, String>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let mut file = File::open(path).map_err(|err| format!("Failed to open {}: {}", path.display(), err))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|err| format!("Failed to read {}: {}", path.display(), err))?;

    Ok(contents)
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = match &cli.config {
        Some(path) => TacticsConfig::from_json(&read_file(path)?)?,
        None => TacticsConfig::default(),
    };

    info!("Loading scenario {}", cli.scenario.display());
    let snapshot = Snapshot::from_json(&read_file(&cli.scenario)?)?;

    let first_free_id = snapshot.agents.iter().map(|a| a.id.0.saturating_add(1)).max().unwrap_or(1);

    let mut production = RecordingProduction::new(first_free_id);
    let mut executor = GridExecutor::new(&snapshot, config.grid_width, config.grid_height);
    let mut visualizer = AsciiCostMatrixVisualizer::new();

    let mut bot = Bot::new(config);

    let visualizer_sink: Option<&mut dyn CostMatrixVisualizer> = if cli.visualize { Some(&mut visualizer) } else { None };

    let summary = bot.tick(&snapshot, &mut production, &mut executor, visualizer_sink);

    if cli.visualize {
        eprint!("{}", visualizer.rendered());
    }

    for (role, body) in production.requests() {
        info!("Spawn requested: {:?} {:?}", role, body);
    }

    let output = serde_json::json!({
        "summary": summary,
        "intents": executor.intents(),
    });

    let text = serde_json::to_string_pretty(&output).map_err(|err| format!("Failed to serialize intents: {}", err))?;

    println!("{}", text);

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let level = cli.log_level.parse::<LevelFilter>().unwrap_or_else(|_| {
        eprintln!("Unknown log level {}, using info", cli.log_level);
        logging::Info
    });

    if let Err(err) = logging::setup_logging(level) {
        eprintln!("Failed to set up logging: {}", err);
    }

    if let Err(err) = run(&cli) {
        error!("{}", err);

        std::process::exit(1);
    }
}
