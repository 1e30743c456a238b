//! Heuristic evaluation function for Isolation positions
//!
//! Each heuristic is a named scoring strategy over [`MobilityFeatures`].
//! The strategy is chosen once, when the evaluator is built; evaluation
//! itself only applies the selected formula.

use std::fmt;
use std::str::FromStr;

use super::features::MobilityFeatures;
use crate::error::ConfigError;
use crate::rules::{GameState, PlayerId};

/// Ply from which `DefensiveToOffensive` switches to offense
const GAME_CHANGE_POINT: u32 = 10;

/// Scores frontier states for the search.
pub trait Evaluate<S: GameState> {
    /// Score a non-terminal state; higher is better for the evaluating player
    fn evaluate(&self, state: &S) -> f64;
}

/// Named mobility scoring strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// own - opponent
    Baseline,
    /// own - 2 * opponent
    WeightedOffensive,
    /// own * ply - opponent
    ProgressivelyDefensive,
    /// own - ply * opponent
    #[default]
    ProgressivelyOffensive,
    /// 2 * own - opponent early, own - 2 * opponent from ply 10
    DefensiveToOffensive,
}

impl Heuristic {
    pub const ALL: [Heuristic; 5] = [
        Heuristic::Baseline,
        Heuristic::WeightedOffensive,
        Heuristic::ProgressivelyDefensive,
        Heuristic::ProgressivelyOffensive,
        Heuristic::DefensiveToOffensive,
    ];

    /// Apply the formula to extracted features.
    #[must_use]
    pub fn score(self, f: &MobilityFeatures) -> f64 {
        let own = f.own_liberties as f64;
        let opp = f.opponent_liberties as f64;
        let ply = f64::from(f.ply_count);

        match self {
            Heuristic::Baseline => own - opp,
            Heuristic::WeightedOffensive => own - 2.0 * opp,
            Heuristic::ProgressivelyDefensive => own * ply - opp,
            Heuristic::ProgressivelyOffensive => own - ply * opp,
            Heuristic::DefensiveToOffensive => {
                if f.ply_count < GAME_CHANGE_POINT {
                    2.0 * own - opp
                } else {
                    own - 2.0 * opp
                }
            }
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Baseline => "baseline",
            Heuristic::WeightedOffensive => "weighted-offensive",
            Heuristic::ProgressivelyDefensive => "progressively-defensive",
            Heuristic::ProgressivelyOffensive => "progressively-offensive",
            Heuristic::DefensiveToOffensive => "defensive-to-offensive",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Heuristic::ALL
            .into_iter()
            .find(|h| h.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownHeuristic(s.to_string()))
    }
}

/// Mobility evaluator bound to one player and one strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MobilityEvaluator {
    player: PlayerId,
    heuristic: Heuristic,
}

impl MobilityEvaluator {
    #[must_use]
    pub fn new(player: PlayerId, heuristic: Heuristic) -> Self {
        Self { player, heuristic }
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }
}

impl<S: GameState> Evaluate<S> for MobilityEvaluator {
    fn evaluate(&self, state: &S) -> f64 {
        self.heuristic.score(&MobilityFeatures::extract(state, self.player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Pos};
    use std::convert::Infallible;

    /// State exposing fixed liberty counts, nothing else
    struct Fixed {
        ply: u32,
        own: usize,
        opp: usize,
    }

    impl GameState for Fixed {
        type Action = u8;
        type Location = PlayerId;
        type Error = Infallible;

        fn ply_count(&self) -> u32 {
            self.ply
        }
        fn location(&self, player: PlayerId) -> Option<PlayerId> {
            Some(player)
        }
        fn liberties(&self, loc: Option<PlayerId>) -> Vec<PlayerId> {
            let n = match loc {
                Some(PlayerId::First) => self.own,
                _ => self.opp,
            };
            vec![PlayerId::First; n]
        }
        fn actions(&self) -> Result<Vec<u8>, Infallible> {
            Ok(Vec::new())
        }
        fn result(&self, _action: &u8) -> Result<Self, Infallible> {
            Ok(Fixed {
                ply: self.ply + 1,
                own: self.own,
                opp: self.opp,
            })
        }
        fn terminal_test(&self) -> Result<bool, Infallible> {
            Ok(false)
        }
        fn utility(&self, _player: PlayerId) -> Result<f64, Infallible> {
            Ok(0.0)
        }
    }

    fn features(own: usize, opp: usize, ply: u32) -> MobilityFeatures {
        MobilityFeatures {
            own_liberties: own,
            opponent_liberties: opp,
            ply_count: ply,
        }
    }

    #[test]
    fn test_default_formula_exact() {
        let state = Fixed {
            ply: 3,
            own: 5,
            opp: 2,
        };
        let eval = MobilityEvaluator::new(PlayerId::First, Heuristic::default());
        assert_eq!(eval.evaluate(&state), -1.0);
    }

    #[test]
    fn test_all_formulas() {
        let f = features(5, 2, 3);
        assert_eq!(Heuristic::Baseline.score(&f), 3.0);
        assert_eq!(Heuristic::WeightedOffensive.score(&f), 1.0);
        assert_eq!(Heuristic::ProgressivelyDefensive.score(&f), 13.0);
        assert_eq!(Heuristic::ProgressivelyOffensive.score(&f), -1.0);
        assert_eq!(Heuristic::DefensiveToOffensive.score(&f), 8.0);
        assert_eq!(Heuristic::DefensiveToOffensive.score(&features(5, 2, 10)), 1.0);
    }

    #[test]
    fn test_evaluate_on_board() {
        // First: corner, 2 liberties; Second: center, 8 liberties; ply 4
        let board = Board::from_parts(&[], [Some(Pos::new(0, 0)), Some(Pos::new(4, 5))], 4);
        let first = MobilityEvaluator::new(PlayerId::First, Heuristic::ProgressivelyOffensive);
        let second = MobilityEvaluator::new(PlayerId::Second, Heuristic::ProgressivelyOffensive);
        assert_eq!(first.evaluate(&board), 2.0 - 4.0 * 8.0);
        assert_eq!(second.evaluate(&board), 8.0 - 4.0 * 2.0);
    }

    #[test]
    fn test_heuristic_names_round_trip() {
        for h in Heuristic::ALL {
            assert_eq!(h.to_string().parse::<Heuristic>(), Ok(h));
        }
        assert_eq!("Weighted_Offensive".parse(), Ok(Heuristic::WeightedOffensive));
        assert_eq!(
            "weighted liberty".parse::<Heuristic>(),
            Err(ConfigError::UnknownHeuristic("weighted liberty".into()))
        );
    }
}
