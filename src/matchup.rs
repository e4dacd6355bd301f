use serde::{Deserialize, Serialize};

use crate::errors::FeatureError;
use crate::params::FeatureParams;
use crate::team_form::{SmoothedTeamStats, TeamHistories, smooth};

pub const FEATURE_COUNT: usize = 12;

/// Versioned feature schema shared with the model trainer. Order here, the
/// field order of [`MatchupFeatureRow`], and [`MatchupFeatureRow::to_vector`]
/// must all agree; the downstream model is fit against exactly these columns.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "pts_diff",
    "epa_diff",
    "success_diff",
    "turnover_diff",
    "t1_epa",
    "t2_epa",
    "t1_success",
    "t2_success",
    "def_epa_diff",
    "pts_allowed_diff",
    "sacks_diff",
    "net_pts_diff",
];

// Team1-minus-team2 differentials of current form, plus a few absolute
// values so the model can learn non-relative effects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchupFeatureRow {
    pub pts_diff: f64,
    pub epa_diff: f64,
    pub success_diff: f64,
    pub turnover_diff: f64,
    pub t1_epa: f64,
    pub t2_epa: f64,
    pub t1_success: f64,
    pub t2_success: f64,
    // Weighted by FeatureParams::defensive_weight.
    pub def_epa_diff: f64,
    pub pts_allowed_diff: f64,
    pub sacks_diff: f64,
    pub net_pts_diff: f64,
}

impl MatchupFeatureRow {
    // Values in FEATURE_COLUMNS order.
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.pts_diff,
            self.epa_diff,
            self.success_diff,
            self.turnover_diff,
            self.t1_epa,
            self.t2_epa,
            self.t1_success,
            self.t2_success,
            self.def_epa_diff,
            self.pts_allowed_diff,
            self.sacks_diff,
            self.net_pts_diff,
        ]
    }
}

/// Build the feature row for one matchup from each team's most recent
/// smoothed form. Exactly one row per call.
pub fn build_matchup_features(
    team1: &SmoothedTeamStats,
    team2: &SmoothedTeamStats,
    params: &FeatureParams,
) -> Result<MatchupFeatureRow, FeatureError> {
    let t1 = team1.latest().ok_or(FeatureError::EmptyHistory)?.form;
    let t2 = team2.latest().ok_or(FeatureError::EmptyHistory)?.form;
    let w = params.defensive_weight;

    Ok(MatchupFeatureRow {
        pts_diff: t1.points - t2.points,
        epa_diff: t1.epa - t2.epa,
        success_diff: t1.success - t2.success,
        turnover_diff: t1.turnovers - t2.turnovers,
        t1_epa: t1.epa,
        t2_epa: t2.epa,
        t1_success: t1.success,
        t2_success: t2.success,
        def_epa_diff: (t1.def_epa - t2.def_epa) * w,
        pts_allowed_diff: (t1.pts_allowed - t2.pts_allowed) * w,
        sacks_diff: (t1.sacks - t2.sacks) * w,
        net_pts_diff: (t1.points - t1.pts_allowed) - (t2.points - t2.pts_allowed),
    })
}

// Prediction-path variant: same column shape as the training rows, built
// from each side's full history.
pub fn live_matchup_row(
    histories: &TeamHistories,
    home: &str,
    away: &str,
    params: &FeatureParams,
) -> Result<MatchupFeatureRow, FeatureError> {
    params.validate()?;
    let home_series = histories
        .get(home)
        .ok_or_else(|| FeatureError::UnknownTeam(home.to_string()))?;
    let away_series = histories
        .get(away)
        .ok_or_else(|| FeatureError::UnknownTeam(away.to_string()))?;

    let home_form = smooth(home_series, params.window)?;
    let away_form = smooth(away_series, params.window)?;
    build_matchup_features(&home_form, &away_form, params)
}
