use super::round::{MusRound, RoundError};
use crate::error::RuleError;
use crate::model::hand::Hand;
use crate::rules::RoundOutcome;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundSnapshot {
    pub seed: u64,
    pub mano: usize,
    pub hands: Vec<Hand>,
    /// Winners at capture time; ignored when restoring. Absent in hand-written snapshots.
    #[serde(default)]
    pub outcome: Option<RoundOutcome>,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("round could not be evaluated: {0}")]
    Rule(#[from] RuleError),
    #[error("snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl RoundSnapshot {
    /// Records the table together with its winners. Fails if the hands cannot
    /// be evaluated instead of storing a snapshot without an outcome.
    pub fn capture(round: &MusRound) -> Result<Self, RuleError> {
        Ok(RoundSnapshot {
            seed: round.seed(),
            mano: round.mano(),
            hands: round.hands().to_vec(),
            outcome: Some(round.evaluate()?),
        })
    }

    pub fn restore(self) -> Result<MusRound, RoundError> {
        MusRound::from_hands(self.seed, self.mano, self.hands)
    }

    pub fn to_json(round: &MusRound) -> Result<String, SnapshotError> {
        let snapshot = Self::capture(round)?;
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::RoundSnapshot;
    use crate::error::{HandDefect, RuleError};
    use crate::game::round::{MusRound, RoundError};

    #[test]
    fn snapshot_serializes_to_json() {
        let round = MusRound::with_seed(99, 4, 2).unwrap();
        let json = RoundSnapshot::to_json(&round).unwrap();
        assert!(json.contains("\"seed\": 99"));
        assert!(json.contains("\"mano\": 2"));
        assert!(json.contains("\"grande\""));
    }

    #[test]
    fn capture_records_the_evaluated_outcome() {
        let round = MusRound::with_seed(31, 3, 1).unwrap();
        let snapshot = RoundSnapshot::capture(&round).unwrap();
        assert_eq!(snapshot.outcome, Some(round.evaluate().unwrap()));
        assert_eq!(snapshot.hands, round.hands());
    }

    #[test]
    fn snapshot_roundtrip_restores_hands_and_outcome() {
        let mut round = MusRound::with_seed(123, 4, 0).unwrap();
        round.discard(2, &[1, 2]).unwrap();
        let json = RoundSnapshot::to_json(&round).unwrap();

        let snapshot = RoundSnapshot::from_json(&json).unwrap();
        let outcome = snapshot.outcome.clone();
        let restored = snapshot.restore().unwrap();
        assert_eq!(restored.seed(), 123);
        assert_eq!(restored.hands(), round.hands());
        assert_eq!(restored.evaluate().ok(), outcome);
    }

    #[test]
    fn hand_written_snapshot_without_outcome_loads() {
        let json = r#"{
            "seed": 7,
            "mano": 1,
            "hands": [
                [{"rank": 12, "suit": "oros"}, {"rank": 11, "suit": "copas"},
                 {"rank": 7, "suit": "espadas"}, {"rank": 1, "suit": "bastos"}],
                [{"rank": 3, "suit": "oros"}, {"rank": 11, "suit": "espadas"},
                 {"rank": 6, "suit": "copas"}, {"rank": 2, "suit": "bastos"}]
            ]
        }"#;
        let snapshot = RoundSnapshot::from_json(json).unwrap();
        assert!(snapshot.outcome.is_none());
        let round = snapshot.restore().unwrap();
        assert_eq!(round.stock_remaining(), 32);
        assert_eq!(round.evaluate().unwrap().grande, 0);
    }

    #[test]
    fn restoring_short_hand_fails() {
        let json = r#"{"seed": 1, "mano": 0, "hands": [[{"rank": 12, "suit": "oros"}]]}"#;
        let err = RoundSnapshot::from_json(json).unwrap().restore().unwrap_err();
        assert_eq!(
            err,
            RoundError::Rule(RuleError::MalformedHand {
                player: 0,
                defect: HandDefect::CardCount(1)
            })
        );
    }
}
