//! Deterministic ranking of crews from a ledger slice.
//!
//! Input is the already-filtered set of records for one round and one age
//! group. Aggregation is pure: repeated computation over the same slice
//! yields identical output.

use serde::Serialize;

use crate::ledger::ScoreRecord;
use crate::scoring::{double_category_sum, tens_count, weighted_total};

/// One ranked leaderboard row. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    /// 1-based rank after sorting
    pub rank: usize,
    pub crew: String,
    /// Number of judges who scored this crew
    pub judge_count: usize,
    /// Sum of weighted judge totals
    pub total: u32,
    /// Total count of categories scored exactly 10
    pub tens: u32,
    /// Sum of the raw (unweighted) weighted-category values
    pub double_sum: u32,
    /// Median of the per-judge weighted totals
    pub median_judge: f64,
    /// Highest single per-judge weighted total
    pub max_judge: u32,
}

/// Split of a heat-round leaderboard into direct finalists and
/// intermediate-round candidates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatSplit {
    pub finalists: Vec<LeaderboardRow>,
    pub intermediate: Vec<LeaderboardRow>,
}

/// Compute the ranked leaderboard for a ledger slice.
///
/// Totals are recomputed from the raw category values (stored totals are
/// not trusted); non-numeric cells were already coerced to 0 on load.
/// An empty slice yields an empty table, not an error.
pub fn compute(records: &[ScoreRecord]) -> Vec<LeaderboardRow> {
    struct CrewAgg {
        crew: String,
        judge_totals: Vec<u32>,
        tens: u32,
        double_sum: u32,
    }

    let mut crews: Vec<CrewAgg> = Vec::new();

    for record in records {
        let judge_total = weighted_total(&record.scores);
        let idx = match crews.iter().position(|c| c.crew == record.crew) {
            Some(idx) => idx,
            None => {
                crews.push(CrewAgg {
                    crew: record.crew.clone(),
                    judge_totals: Vec::new(),
                    tens: 0,
                    double_sum: 0,
                });
                crews.len() - 1
            }
        };
        let agg = &mut crews[idx];
        agg.judge_totals.push(judge_total);
        agg.tens += tens_count(&record.scores);
        agg.double_sum += double_category_sum(&record.scores);
    }

    let mut rows: Vec<LeaderboardRow> = crews
        .into_iter()
        .map(|agg| LeaderboardRow {
            rank: 0,
            judge_count: agg.judge_totals.len(),
            total: agg.judge_totals.iter().sum(),
            tens: agg.tens,
            double_sum: agg.double_sum,
            median_judge: median(&agg.judge_totals),
            max_judge: agg.judge_totals.iter().copied().max().unwrap_or(0),
            crew: agg.crew,
        })
        .collect();

    // Strict descending on every score key; crew name ascending fully
    // disambiguates, so the order is deterministic.
    rows.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| b.tens.cmp(&a.tens))
            .then_with(|| b.double_sum.cmp(&a.double_sum))
            .then_with(|| b.median_judge.total_cmp(&a.median_judge))
            .then_with(|| b.max_judge.cmp(&a.max_judge))
            .then_with(|| a.crew.cmp(&b.crew))
    });

    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }

    rows
}

/// Heat-round progression: the top `finalists_n` rows advance directly to
/// the final, the remainder to the intermediate round.
pub fn split_heat(board: &[LeaderboardRow], finalists_n: usize) -> HeatSplit {
    let cut = finalists_n.min(board.len());
    HeatSplit {
        finalists: board[..cut].to_vec(),
        intermediate: board[cut..].to_vec(),
    }
}

/// Intermediate-round progression: rank 1 is the sole winner advancing to
/// the final. `None` on an empty board.
pub fn intermediate_winner(board: &[LeaderboardRow]) -> Option<&LeaderboardRow> {
    board.first()
}

fn median(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        f64::from(sorted[mid])
    } else {
        f64::from(sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::ScoreRecord;
    use crate::scoring::Round;

    fn record(crew: &str, judge: &str, scores: [u8; 5]) -> ScoreRecord {
        ScoreRecord {
            timestamp: "2026-06-20T14:00:00".to_string(),
            round: Round::Round1,
            age_group: "Juniors".to_string(),
            crew: crew.to_string(),
            judge: judge.to_string(),
            scores,
            weighted_total: weighted_total(&scores),
        }
    }

    #[test]
    fn test_empty_slice_yields_empty_board() {
        assert!(compute(&[]).is_empty());
    }

    #[test]
    fn test_single_crew_aggregation() {
        let board = compute(&[
            record("Aces", "Kim", [8, 9, 7, 6, 10]), // 57
            record("Aces", "Lee", [10, 10, 10, 10, 10]), // 70
            record("Aces", "Pat", [5, 5, 5, 5, 5]),  // 35
        ]);

        assert_eq!(board.len(), 1);
        let row = &board[0];
        assert_eq!(row.rank, 1);
        assert_eq!(row.crew, "Aces");
        assert_eq!(row.judge_count, 3);
        assert_eq!(row.total, 162);
        assert_eq!(row.tens, 6);
        assert_eq!(row.double_sum, 17 + 20 + 10);
        assert_eq!(row.median_judge, 57.0);
        assert_eq!(row.max_judge, 70);
    }

    #[test]
    fn test_median_even_judge_count() {
        let board = compute(&[
            record("Aces", "Kim", [5, 5, 5, 5, 5]), // 35
            record("Aces", "Lee", [8, 9, 7, 6, 10]), // 57
        ]);
        assert_eq!(board[0].median_judge, 46.0);
    }

    #[test]
    fn test_ranking_by_total() {
        let board = compute(&[
            record("Aces", "Kim", [5, 5, 5, 5, 5]),
            record("Bees", "Kim", [9, 9, 9, 9, 9]),
            record("Cats", "Kim", [7, 7, 7, 7, 7]),
        ]);

        let order: Vec<&str> = board.iter().map(|r| r.crew.as_str()).collect();
        assert_eq!(order, ["Bees", "Cats", "Aces"]);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[1].rank, 2);
        assert_eq!(board[2].rank, 3);
    }

    #[test]
    fn test_tie_break_tens() {
        // Equal totals (49); Bees carries a ten
        let board = compute(&[
            record("Aces", "Kim", [7, 7, 7, 7, 7]),  // 49, no tens
            record("Bees", "Kim", [7, 7, 8, 10, 3]), // 49, one ten
        ]);
        assert_eq!(board[0].crew, "Bees");
    }

    #[test]
    fn test_tie_break_double_sum() {
        // Equal totals, equal tens; Bees scored higher in weighted categories
        let board = compute(&[
            record("Aces", "Kim", [6, 6, 8, 8, 9]), // 49, double_sum 12
            record("Bees", "Kim", [7, 7, 7, 7, 7]), // 49, double_sum 14
        ]);
        assert_eq!(board[0].crew, "Bees");
    }

    #[test]
    fn test_tie_break_median() {
        // Three judges each; equal totals (126), tens (0) and double sums
        // (30); Bees has the higher median judge total (45 vs 44)
        let board = compute(&[
            record("Aces", "Kim", [5, 5, 5, 5, 5]), // 35
            record("Aces", "Lee", [5, 5, 9, 9, 9]), // 47
            record("Aces", "Pat", [5, 5, 8, 8, 8]), // 44
            record("Bees", "Kim", [5, 5, 5, 5, 5]), // 35
            record("Bees", "Lee", [5, 5, 9, 8, 8]), // 45
            record("Bees", "Pat", [5, 5, 9, 9, 8]), // 46
        ]);
        assert_eq!(board[0].total, board[1].total);
        assert_eq!(board[0].tens, board[1].tens);
        assert_eq!(board[0].double_sum, board[1].double_sum);
        assert_eq!(board[0].crew, "Bees");
        assert_eq!(board[0].median_judge, 45.0);
        assert_eq!(board[1].median_judge, 44.0);
    }

    #[test]
    fn test_tie_break_max() {
        // Two judges each: medians are forced equal (total/2), so the
        // higher single judge total decides; name order would say Aces
        let board = compute(&[
            record("Bees", "Kim", [9, 9, 8, 8, 8]), // 60
            record("Bees", "Lee", [9, 9, 2, 1, 1]), // 40
            record("Aces", "Kim", [9, 9, 7, 6, 6]), // 55
            record("Aces", "Pat", [9, 9, 3, 3, 3]), // 45
        ]);
        assert_eq!(board[0].total, board[1].total);
        assert_eq!(board[0].median_judge, board[1].median_judge);
        assert_eq!(board[0].crew, "Bees");
        assert_eq!(board[0].max_judge, 60);
    }

    #[test]
    fn test_full_tie_breaks_by_crew_name() {
        let board = compute(&[
            record("Bees", "Kim", [7, 7, 7, 7, 7]),
            record("Aces", "Kim", [7, 7, 7, 7, 7]),
        ]);
        assert_eq!(board[0].crew, "Aces");
        assert_eq!(board[1].crew, "Bees");
    }

    #[test]
    fn test_determinism() {
        let records = vec![
            record("Cats", "Kim", [7, 8, 6, 9, 5]),
            record("Aces", "Kim", [8, 9, 7, 6, 10]),
            record("Bees", "Kim", [9, 7, 8, 5, 6]),
            record("Cats", "Lee", [6, 6, 6, 6, 6]),
            record("Aces", "Lee", [7, 7, 7, 7, 7]),
        ];
        let first = compute(&records);
        for _ in 0..10 {
            assert_eq!(compute(&records), first);
        }
    }

    #[test]
    fn test_zero_coerced_scores_still_rank() {
        // A row loaded with coerced zeros participates instead of failing
        let board = compute(&[
            record("Aces", "Kim", [0, 0, 0, 0, 0]),
            record("Bees", "Kim", [1, 1, 1, 1, 1]),
        ]);
        assert_eq!(board[0].crew, "Bees");
        assert_eq!(board[1].total, 0);
    }

    #[test]
    fn test_heat_split_advancement() {
        let records: Vec<ScoreRecord> = (0..10)
            .map(|i| record(&format!("Crew {:02}", i), "Kim", [1 + i as u8 % 9, 5, 5, 5, 5]))
            .collect();
        let board = compute(&records);
        assert_eq!(board.len(), 10);

        let split = split_heat(&board, 5);
        assert_eq!(split.finalists.len(), 5);
        assert_eq!(split.intermediate.len(), 5);
        assert_eq!(split.finalists[0].rank, 1);
        assert_eq!(split.intermediate[0].rank, 6);
        assert_eq!(split.intermediate[4].rank, 10);
    }

    #[test]
    fn test_heat_split_fewer_crews_than_n() {
        let board = compute(&[record("Aces", "Kim", [5; 5])]);
        let split = split_heat(&board, 5);
        assert_eq!(split.finalists.len(), 1);
        assert!(split.intermediate.is_empty());
    }

    #[test]
    fn test_intermediate_winner() {
        let board = compute(&[
            record("Aces", "Kim", [5; 5]),
            record("Bees", "Kim", [9; 5]),
        ]);
        assert_eq!(intermediate_winner(&board).unwrap().crew, "Bees");
        assert!(intermediate_winner(&[]).is_none());
    }
}
