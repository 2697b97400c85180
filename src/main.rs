use clap::Parser;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use soaring::config::ConfigOverrides;
use soaring::game::types::CollisionPolicy;
use soaring::ui::terminal::TerminalFrontend;
use soaring::{build_info, game_loop, logging, paths};
use soaring::{AssetCatalog, Assets, App, GameConfig, RunSummary};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, about, long_about = None, disable_version_flag = true)]
struct Args {
    /// JSON config file (default: the per-user config.json, if present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON asset pack replacing or adding sprites
    #[arg(long, value_name = "PATH")]
    assets: Option<PathBuf>,

    /// Velocity added per frame
    #[arg(long)]
    gravity: Option<f64>,

    /// Upward velocity set by a flap
    #[arg(long)]
    flap_power: Option<f64>,

    /// Tree scroll per frame
    #[arg(long)]
    scroll_speed: Option<f64>,

    /// Horizontal distance between tree spawns
    #[arg(long)]
    spawn_interval: Option<f64>,

    /// Fixed sleep per frame in milliseconds
    #[arg(long)]
    frame_delay_ms: Option<u64>,

    /// Collision rule: full-rect or threshold
    #[arg(long)]
    collision: Option<CollisionPolicy>,

    /// Don't count trees passed
    #[arg(long)]
    no_scoring: bool,

    /// Skip the title screen
    #[arg(long)]
    no_start_screen: bool,

    /// Seed for reproducible tree heights
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print version information
    #[arg(short = 'V', long)]
    version: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            gravity: self.gravity,
            flap_power: self.flap_power,
            scroll_speed: self.scroll_speed,
            spawn_interval: self.spawn_interval,
            frame_delay_ms: self.frame_delay_ms,
            collision: self.collision,
            no_scoring: self.no_scoring,
            no_start_screen: self.no_start_screen,
        }
    }
}

fn main() {
    let args = Args::parse();

    if args.version {
        println!("soaring {}", build_info::version_line());
        return;
    }

    let log_path = paths::log_path().ok();
    logging::init(args.verbose, log_path.as_deref());

    match run(&args) {
        Ok(summary) => {
            if let Some(score) = summary.last_score {
                println!("Last score: {}", score);
            }
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("soaring: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> soaring::Result<RunSummary> {
    let mut config = GameConfig::load_or_default(args.config.as_deref())?;
    args.overrides().apply(&mut config);
    config.validate()?;
    info!("starting with {:?}", config);

    let mut catalog = AssetCatalog::builtin();
    if let Some(path) = &args.assets {
        catalog.merge(AssetCatalog::load(path)?);
        info!("merged asset pack {}", path.display());
    }
    let assets = Assets::resolve(&catalog)?;

    let mut app = App::new(config, &assets);
    let mut frontend = TerminalFrontend::new()?;

    let summary = match args.seed {
        Some(seed) => game_loop::run_and_restore(
            &mut app,
            &assets,
            &mut frontend,
            &mut StdRng::seed_from_u64(seed),
        ),
        None => game_loop::run_and_restore(
            &mut app,
            &assets,
            &mut frontend,
            &mut rand::thread_rng(),
        ),
    }?;
    Ok(summary)
}
