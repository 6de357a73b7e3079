//! extform CLI - inspect games and evaluate behavior profiles
//!
//! Reads a YAML game description, builds the game tree and prints either a
//! summary of the game or the equilibrium measures of a profile.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use extform_engine::BehavProfile;
use extform_tree::GameConfig;

#[derive(Parser)]
#[command(name = "extform")]
#[command(about = "Behavior profile evaluation for extensive-form games")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Print players, information sets, actions and the tree
    Info {
        /// YAML game file
        game: PathBuf,
    },
    /// Evaluate the file's profile, or the centroid when it has none
    Eval {
        /// YAML game file
        game: PathBuf,
        /// Logit precision for the QRE value
        #[arg(long, default_value_t = 1.0)]
        lambda: f64,
        /// Also print every cached quantity
        #[arg(long)]
        dump: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Info { game } => run_info(&game),
        Commands::Eval { game, lambda, dump } => run_eval(&game, lambda, dump),
    }
}

fn load(path: &Path) -> Result<GameConfig> {
    log::info!("{:<24}{}", "loading game", path.display());
    GameConfig::load(path).with_context(|| format!("cannot load {}", path.display()))
}

fn run_info(path: &Path) -> Result<()> {
    let config = load(path)?;
    let tree = config.build_tree()?;
    println!("game      {}", config.name);
    println!("nodes     {}", tree.len());
    println!("terminals {}", tree.terminals().count());
    for (pl, player) in tree.players().iter().enumerate() {
        println!("player {} {}", pl, player.name());
        for iset in player.infosets() {
            println!(
                "  [{}] {} member(s), actions {}",
                iset.label(),
                iset.members().len(),
                iset.actions().join(" ")
            );
        }
    }
    println!();
    print!("{}", tree);
    Ok(())
}

fn run_eval(path: &Path, lambda: f64, dump: bool) -> Result<()> {
    let config = load(path)?;
    let tree = config.build_tree()?;
    let profile: BehavProfile<'_, f64> = config.profile(&tree)?;
    log::info!("{:<24}{}", "evaluating profile", profile);

    for (pl, player) in tree.players().iter().enumerate() {
        println!("payoff {:<12} {:>12.6}", player.name(), profile.payoff(pl));
    }
    println!("max regret          {:>12.6}", profile.max_regret());
    println!("liapunov value      {:>12.6}", profile.liap_value());
    let qre = profile.qre_value(lambda);
    if qre.overflow {
        log::warn!("QRE value overflowed at lambda {}", lambda);
        println!("qre value           {:>12}", "overflow");
    } else {
        println!("qre value           {:>12.6}", qre.value);
    }

    if dump {
        let mut out = String::new();
        profile.dump(&mut out)?;
        println!();
        print!("{}", out);
    }
    Ok(())
}
