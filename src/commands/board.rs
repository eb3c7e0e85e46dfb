//! `crewscore board` command - ranked leaderboard for one round/age-group
//!
//! Prints the full ranked table plus the progression view: for the heat
//! round the top-N direct finalists and the intermediate-round remainder,
//! for the intermediate round the sole winner.

use crate::cli::Cli;
use crewscore_core::error::Result;
use crewscore_core::format::OutputFormat;
use crewscore_core::leaderboard::{self, LeaderboardRow};
use crewscore_core::scoring::Round;
use crewscore_core::store::Store;

/// Execute the board command
pub fn execute(
    cli: &Cli,
    store: &Store,
    round: Round,
    age_group: &str,
    finalists_n: Option<usize>,
) -> Result<()> {
    let slice = store.ledger().slice(round, age_group);
    let board = leaderboard::compute(&slice);
    let finalists_n = finalists_n.unwrap_or(store.config().finalists_n);

    match cli.format {
        OutputFormat::Json => print_json(round, age_group, &board, finalists_n)?,
        OutputFormat::Human => print_human(round, age_group, &board, finalists_n),
    }

    Ok(())
}

fn print_json(
    round: Round,
    age_group: &str,
    board: &[LeaderboardRow],
    finalists_n: usize,
) -> Result<()> {
    let mut output = serde_json::json!({
        "round": round.to_string(),
        "age_group": age_group,
        "rows": board,
    });

    match round {
        Round::Round1 => {
            let split = leaderboard::split_heat(board, finalists_n);
            output["finalists"] = serde_json::to_value(&split.finalists)?;
            output["intermediate"] = serde_json::to_value(&split.intermediate)?;
        }
        Round::Intermediate => {
            output["winner"] = serde_json::to_value(leaderboard::intermediate_winner(board))?;
        }
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_human(round: Round, age_group: &str, board: &[LeaderboardRow], finalists_n: usize) {
    println!("Leaderboard - {} / {}", round, age_group);
    print_table(board);

    if board.is_empty() {
        return;
    }

    match round {
        Round::Round1 => {
            let split = leaderboard::split_heat(board, finalists_n);
            println!();
            println!("Direct finalists (top {}):", finalists_n);
            for row in &split.finalists {
                println!("  {:>2}. {} (total {})", row.rank, row.crew, row.total);
            }
            if !split.intermediate.is_empty() {
                println!("Intermediate round:");
                for row in &split.intermediate {
                    println!("  {:>2}. {} (total {})", row.rank, row.crew, row.total);
                }
            }
        }
        Round::Intermediate => {
            if let Some(winner) = leaderboard::intermediate_winner(board) {
                println!();
                println!(
                    "Intermediate winner: {} (total {}) -> final",
                    winner.crew, winner.total
                );
            }
        }
    }
}

fn print_table(board: &[LeaderboardRow]) {
    // Header always prints, so an empty slice still shows the full schema
    println!(
        "{:>4}  {:<24} {:>6} {:>6} {:>5} {:>7} {:>7} {:>4}",
        "Rank", "Crew", "Judges", "Total", "Tens", "DblSum", "Median", "Max"
    );
    for row in board {
        println!(
            "{:>4}  {:<24} {:>6} {:>6} {:>5} {:>7} {:>7.1} {:>4}",
            row.rank,
            row.crew,
            row.judge_count,
            row.total,
            row.tens,
            row.double_sum,
            row.median_judge,
            row.max_judge
        );
    }
}
