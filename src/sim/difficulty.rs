//! Score-based difficulty tiers
//!
//! An ordered table of tiers, each taking effect once the score reaches its
//! `min_score`. Later tiers may only narrow the pipe gap and shorten the spawn
//! interval; the constructor rejects tables that would make the game easier
//! as the score grows.

use serde::{Deserialize, Serialize};

use crate::error::MatrixError;

/// One difficulty bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// Score at which this tier starts
    pub min_score: u32,
    /// Vertical gap between paired pipes (pixels)
    pub gap_height: u32,
    /// Frames between pipe spawns
    pub spawn_interval: u64,
    /// Spawn top+bottom pairs instead of a single half-height pipe
    pub paired: bool,
}

/// Ordered tier lookup table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tier>", into = "Vec<Tier>")]
pub struct DifficultyTable {
    tiers: Vec<Tier>,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        let tier = |min_score, gap_height, spawn_interval, paired| Tier {
            min_score,
            gap_height,
            spawn_interval,
            paired,
        };
        Self {
            tiers: vec![
                tier(0, 42, 48, false),
                tier(10, 42, 48, true),
                tier(20, 32, 48, true),
                tier(30, 32, 32, true),
                tier(40, 24, 32, true),
                tier(50, 24, 28, true),
            ],
        }
    }
}

impl DifficultyTable {
    pub fn new(tiers: Vec<Tier>) -> Result<Self, MatrixError> {
        let first = tiers
            .first()
            .ok_or_else(|| MatrixError::InvalidDifficulty("no tiers".into()))?;
        if first.min_score != 0 {
            return Err(MatrixError::InvalidDifficulty(
                "first tier must start at score 0".into(),
            ));
        }
        if tiers.iter().any(|t| t.spawn_interval == 0) {
            return Err(MatrixError::InvalidDifficulty(
                "spawn interval must be at least one frame".into(),
            ));
        }
        for pair in tiers.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if hi.min_score <= lo.min_score {
                return Err(MatrixError::InvalidDifficulty(format!(
                    "tier at score {} is out of order",
                    hi.min_score
                )));
            }
            if hi.gap_height > lo.gap_height || hi.spawn_interval > lo.spawn_interval {
                return Err(MatrixError::InvalidDifficulty(format!(
                    "tier at score {} is easier than the one before it",
                    hi.min_score
                )));
            }
        }
        Ok(Self { tiers })
    }

    /// Tier in effect at `score`
    pub fn tier_for(&self, score: u32) -> Tier {
        let idx = self.tiers.partition_point(|t| t.min_score <= score);
        // first tier starts at 0, so idx >= 1
        self.tiers[idx.saturating_sub(1)]
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }
}

impl TryFrom<Vec<Tier>> for DifficultyTable {
    type Error = MatrixError;

    fn try_from(tiers: Vec<Tier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<DifficultyTable> for Vec<Tier> {
    fn from(table: DifficultyTable) -> Self {
        table.tiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_boundaries() {
        let table = DifficultyTable::default();
        assert_eq!(table.tier_for(0).gap_height, 42);
        assert!(!table.tier_for(9).paired);
        assert!(table.tier_for(10).paired);
        assert_eq!(table.tier_for(19).gap_height, 42);
        assert_eq!(table.tier_for(20).gap_height, 32);
        assert_eq!(table.tier_for(29).spawn_interval, 48);
        assert_eq!(table.tier_for(30).spawn_interval, 32);
        assert_eq!(table.tier_for(40).gap_height, 24);
        assert_eq!(table.tier_for(50).spawn_interval, 28);
        assert_eq!(table.tier_for(u32::MAX).spawn_interval, 28);
    }

    #[test]
    fn test_default_table_is_valid() {
        let table = DifficultyTable::default();
        assert_eq!(DifficultyTable::new(table.tiers().to_vec()), Ok(table));
    }

    #[test]
    fn test_rejects_bad_tables() {
        let base = Tier {
            min_score: 0,
            gap_height: 30,
            spawn_interval: 40,
            paired: true,
        };
        assert!(DifficultyTable::new(Vec::new()).is_err());
        assert!(DifficultyTable::new(vec![Tier { min_score: 5, ..base }]).is_err());
        assert!(DifficultyTable::new(vec![Tier { spawn_interval: 0, ..base }]).is_err());
        let wider = Tier {
            min_score: 10,
            gap_height: 40,
            ..base
        };
        assert!(DifficultyTable::new(vec![base, wider]).is_err());
        let unsorted = Tier {
            min_score: 0,
            gap_height: 20,
            ..base
        };
        assert!(DifficultyTable::new(vec![base, unsorted]).is_err());
    }

    #[test]
    fn test_serde_validates() {
        let json = r#"[{"min_score":0,"gap_height":20,"spawn_interval":30,"paired":true},
                       {"min_score":5,"gap_height":40,"spawn_interval":30,"paired":true}]"#;
        assert!(serde_json::from_str::<DifficultyTable>(json).is_err());
        let ok = serde_json::to_string(&DifficultyTable::default()).unwrap();
        assert_eq!(
            serde_json::from_str::<DifficultyTable>(&ok).unwrap(),
            DifficultyTable::default()
        );
    }

    proptest! {
        #[test]
        fn harder_with_score(a in 0u32..200, b in 0u32..200) {
            let table = DifficultyTable::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let (easy, hard) = (table.tier_for(lo), table.tier_for(hi));
            prop_assert!(hard.gap_height <= easy.gap_height);
            prop_assert!(hard.spawn_interval <= easy.spawn_interval);
        }
    }
}
