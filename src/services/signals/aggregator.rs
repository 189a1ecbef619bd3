//! Group averaging of indicator votes.

use crate::types::{round4, GroupScope, Rating, VoteSet};

/// Group means and the selected overall score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    pub ma_score: f64,
    pub osc_score: f64,
    pub overall: f64,
}

impl Scores {
    /// Rating of the unrounded overall score.
    pub fn rating(&self) -> Rating {
        Rating::from_score(self.overall)
    }

    /// Copy with every score rounded to four decimals for output.
    pub fn rounded(&self) -> Self {
        Self {
            ma_score: round4(self.ma_score),
            osc_score: round4(self.osc_score),
            overall: round4(self.overall),
        }
    }
}

/// Mean of present votes per group, combined according to `scope`.
///
/// An empty group scores 0.0. `All` averages the two group means, so each
/// group carries half the weight regardless of how many indicators voted.
pub fn aggregate(votes: &VoteSet, scope: GroupScope) -> Scores {
    let ma_score = votes.moving_averages.mean();
    let osc_score = votes.oscillators.mean();
    let overall = match scope {
        GroupScope::MovingAverages => ma_score,
        GroupScope::Oscillators => osc_score,
        GroupScope::All => (ma_score + osc_score) / 2.0,
    };

    Scores {
        ma_score,
        osc_score,
        overall,
    }
}
