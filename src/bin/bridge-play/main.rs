//! bridge-play - Play out a bridge deal with computer players
//!
//! All four seats are played by the engine, declarer also playing dummy's
//! cards. Each trick is printed as it completes, followed by the result and
//! the duplicate score.
//!
//! Usage: bridge-play --deal "<PBN>" --contract "4♠ by N" [--difficulty expert]

use bridge_play::{
    choose_with_fallback, parse_contract, DifficultyTier, EngineConfig, Hands, HeuristicAi,
    PlayState, PlayStrategy, Vulnerability, NUM_SEATS,
};
use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bridge-play")]
#[command(about = "Play out a bridge deal with computer players")]
#[command(version)]
struct Args {
    /// Deal in PBN form, e.g. "N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 ..."
    #[arg(short = 'd', long = "deal", required = true)]
    deal: String,

    /// Contract, e.g. "3NT by S" or "4♠X by N"
    #[arg(short = 'c', long = "contract", required = true)]
    contract: String,

    /// Vulnerability: None, NS, EW or Both
    #[arg(long = "vulnerability", default_value = "None")]
    vulnerability: String,

    /// Difficulty: beginner, intermediate, advanced or expert
    #[arg(long = "difficulty", env = "BRIDGE_PLAY_DIFFICULTY")]
    difficulty: Option<String>,

    /// Search depth in plies, overriding the difficulty preset
    #[arg(long = "depth", env = "BRIDGE_PLAY_MAX_DEPTH")]
    depth: Option<u8>,

    /// Verbose output - explain every card and log at debug level
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "bridge_play=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = EngineConfig::from_env()?;
    if let Some(difficulty) = &args.difficulty {
        config.difficulty = difficulty.parse::<DifficultyTier>()?;
    }
    if args.depth.is_some() {
        config.max_depth = args.depth;
    }

    let contract = parse_contract(&args.contract)?;
    let hands = Hands::from_pbn(&args.deal)?;
    let vulnerability: Vulnerability = args.vulnerability.parse()?;
    let mut state = PlayState::new(contract, hands, vulnerability)?;

    println!("Contract: {}  Vulnerable: {}", contract, args.vulnerability);
    println!("Deal: {}", state.hands().to_pbn());
    println!("{}", state.hands());
    println!("Difficulty: {}", config.difficulty);
    println!();

    // One player per seat; dummy's slot is never asked since declarer plays it
    let mut players: Vec<Box<dyn PlayStrategy>> =
        (0..NUM_SEATS).map(|_| config.build_strategy()).collect();
    let mut fallback = HeuristicAi::new();

    while !state.is_complete() {
        let seat = state.next_to_play();
        let player = &mut players[state.controller_of(seat).index()];
        let card = choose_with_fallback(player.as_mut(), &mut fallback, &state, seat)?;
        if args.verbose {
            if let Some(why) = player.explain_last_choice() {
                println!("  {}", why);
            }
        }

        let outcome = state.play(seat, card)?;
        if let (Some(winner), Some(trick)) = (outcome.trick_winner, state.history().last()) {
            let cards: Vec<String> = trick
                .trick
                .plays()
                .map(|p| format!("{} {}", p.seat, p.card))
                .collect();
            println!(
                "Trick {:>2}: {}  -> {}",
                state.tricks_played(),
                cards.join("  "),
                winner.name()
            );
        }
    }

    println!();
    println!(
        "{}: declarer {} tricks, defenders {}",
        contract,
        state.declarer_tricks(),
        state.defender_tricks()
    );
    if let Some(result) = state.final_score() {
        let outcome = if result.made {
            format!("made with {} overtrick(s)", result.overtricks)
        } else {
            format!("down {}", result.undertricks)
        };
        println!("Result: {}, score {:+}", outcome, result.score);
    }
    Ok(())
}
