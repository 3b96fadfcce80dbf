use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use blast_engine::GameConfig;
use blast_sim::{play_game_with, run_games, GreedyPlayer};
use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    /// 8x8, lines clear in place, only placeable pieces dealt
    Classic,
    /// 10x10, rows collapse, pieces dealt blind
    Legacy,
}

#[derive(Parser, Debug)]
#[command(name = "blast_sim", about = "Greedy self-play for the block-placement puzzle")]
struct Args {
    /// Number of games to play.
    #[arg(long, default_value_t = 100)]
    games: u64,

    /// Base seed; game i uses seed + i.
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = Preset::Classic)]
    preset: Preset,

    /// Override the preset's grid size.
    #[arg(long)]
    size: Option<usize>,

    /// Override the preset's pieces per batch.
    #[arg(long)]
    batch_size: Option<usize>,

    /// Stop a game after this many placements.
    #[arg(long, default_value_t = 10_000)]
    max_moves: u64,

    /// Play only the first game, printing the grid after every move with
    /// this many ms between frames.
    #[arg(long, value_name = "ms")]
    render: Option<u64>,
}

fn config_from(args: &Args) -> GameConfig {
    let mut config = match args.preset {
        Preset::Classic => GameConfig::classic(),
        Preset::Legacy => GameConfig::legacy(),
    };
    if let Some(size) = args.size {
        config = config.with_size(size);
    }
    if let Some(batch_size) = args.batch_size {
        config = config.with_batch_size(batch_size);
    }
    config
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = config_from(&args);
    let player = GreedyPlayer::default();

    if let Some(ms) = args.render {
        let result = play_game_with(&config, args.seed, &player, args.max_moves, |session, outcome| {
            println!("{}", session.grid());
            let note = outcome.feedback.as_ref().map(|f| f.message).unwrap_or("");
            println!(
                "move +{} (x{}) total={} {}",
                outcome.score.points, outcome.score.multiplier, outcome.total_score, note
            );
            thread::sleep(Duration::from_millis(ms));
        });
        return match result {
            Ok(summary) => {
                println!(
                    "DONE: seed={} score={} moves={} lines={} game_over={}",
                    summary.seed, summary.score, summary.moves, summary.lines, summary.game_over
                );
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("invalid config: {err}");
                ExitCode::FAILURE
            }
        };
    }

    let seeds: Vec<u64> = (0..args.games).map(|i| args.seed.wrapping_add(i)).collect();
    eprintln!(
        "playing {} games on a {}x{} grid ({:?})",
        seeds.len(),
        config.size,
        config.size,
        args.preset
    );
    let (summaries, stats) = match run_games(&config, &seeds, &player, args.max_moves) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("invalid config: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(best) = summaries.iter().max_by_key(|s| s.score) {
        eprintln!("best game: seed={} score={} moves={}", best.seed, best.score, best.moves);
    }
    println!(
        "DONE: games={} games_over={} elapsed={:.3}s moves/s={:.1} avg_score={:.1} best={} worst={} avg_moves={:.1} lines/move={:.3} perfect_clears={} best_multiplier={}",
        stats.games,
        stats.games_over,
        stats.elapsed.as_secs_f64(),
        stats.moves_per_sec(),
        stats.avg_score(),
        stats.best_score,
        stats.worst_score,
        stats.avg_moves(),
        stats.lines_per_move(),
        stats.perfect_clears,
        stats.best_multiplier,
    );
    ExitCode::SUCCESS
}
