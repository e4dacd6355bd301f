use serde::{Deserialize, Serialize};

use crate::errors::FeatureError;
use crate::matchup::{FEATURE_COUNT, MatchupFeatureRow, build_matchup_features};
use crate::params::FeatureParams;
use crate::team_form::{TeamHistories, TeamWeekStat, smooth};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameType {
    Preseason,
    RegularSeason,
    Postseason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledGame {
    pub week: u32,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub game_type: GameType,
}

impl ScheduledGame {
    // A tie is labeled as a home loss.
    pub fn home_win(&self) -> bool {
        self.home_score > self.away_score
    }

    pub fn point_diff(&self) -> i32 {
        self.home_score as i32 - self.away_score as i32
    }
}

// One labeled example: matchup features plus the known outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    pub week: u32,
    pub home_team: String,
    pub away_team: String,
    #[serde(flatten)]
    pub features: MatchupFeatureRow,
    pub home_win: bool,
    pub point_diff: i32,
}

// Rows plus counts of the games deliberately left out, so a caller can tell
// a thin schedule from an over-aggressive skip policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrainingSet {
    pub rows: Vec<TrainingRow>,
    pub skipped_short_history: usize,
    pub skipped_game_type: usize,
}

impl TrainingSet {
    // Trainer-facing split: feature vectors in FEATURE_COLUMNS order plus the
    // win/loss and point-differential label columns.
    pub fn feature_matrix(&self) -> (Vec<[f64; FEATURE_COUNT]>, Vec<f64>, Vec<f64>) {
        let features = self.rows.iter().map(|row| row.features.to_vector()).collect();
        let home_win = self
            .rows
            .iter()
            .map(|row| if row.home_win { 1.0 } else { 0.0 })
            .collect();
        let point_diff = self.rows.iter().map(|row| row.point_diff as f64).collect();
        (features, home_win, point_diff)
    }
}

/// Assemble labeled rows from every eligible regular-season game. Each
/// team's history is restricted to weeks strictly before the game week and
/// re-smoothed from those weeks alone, so no feature can see the game being
/// predicted or anything after it.
pub fn build_training_set(
    histories: &TeamHistories,
    schedule: &[ScheduledGame],
    params: &FeatureParams,
) -> Result<TrainingSet, FeatureError> {
    params.validate()?;

    let mut out = TrainingSet::default();
    for game in schedule {
        if game.game_type != GameType::RegularSeason {
            out.skipped_game_type += 1;
            continue;
        }

        let home_prior = prior_weeks(histories, &game.home_team, game.week)?;
        let away_prior = prior_weeks(histories, &game.away_team, game.week)?;
        if home_prior.len() < params.min_history_weeks
            || away_prior.len() < params.min_history_weeks
        {
            out.skipped_short_history += 1;
            continue;
        }

        let home_form = smooth(&home_prior, params.window)?;
        let away_form = smooth(&away_prior, params.window)?;
        let features = build_matchup_features(&home_form, &away_form, params)?;

        out.rows.push(TrainingRow {
            week: game.week,
            home_team: game.home_team.clone(),
            away_team: game.away_team.clone(),
            features,
            home_win: game.home_win(),
            point_diff: game.point_diff(),
        });
    }
    Ok(out)
}

fn prior_weeks(
    histories: &TeamHistories,
    team: &str,
    before_week: u32,
) -> Result<Vec<TeamWeekStat>, FeatureError> {
    let series = histories
        .get(team)
        .ok_or_else(|| FeatureError::UnknownTeam(team.to_string()))?;
    Ok(series
        .iter()
        .filter(|row| row.week < before_week)
        .cloned()
        .collect())
}
