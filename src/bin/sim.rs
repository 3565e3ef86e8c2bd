use rand::{rngs::SmallRng, SeedableRng};
use reversi::{init_logging, run_session, GameEngine, RandomController};
use serde_json::json;

/// Play one random game and print a JSON summary.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <seed>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut engine = GameEngine::new();
    let mut controller = RandomController::new();
    let mut out = std::io::sink();
    let summary = run_session(&mut engine, &mut controller, &mut rng, &mut out).await?;

    let state = summary.final_state;
    let winner = state.leader().map(|p| p.name());
    let result = json!({
        "seed": seed,
        "moves": summary.moves_played,
        "skipped_turns": summary.skipped_turns,
        "game_over": state.game_over,
        "black": state.black_score,
        "white": state.white_score,
        "winner": winner,
        "board": state.board.to_string(),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
