use std::collections::HashMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::FeatureError;

// One row per team per week, as supplied by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamWeekStat {
    pub week: u32,
    pub points: f64,
    pub epa: f64,
    pub success: f64,
    pub def_epa: f64,
    pub pts_allowed: f64,
    pub turnovers: f64,
    pub sacks: f64,
}

// Trailing-window means of every raw stat, as of one week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingForm {
    pub points: f64,
    pub epa: f64,
    pub success: f64,
    pub def_epa: f64,
    pub pts_allowed: f64,
    pub turnovers: f64,
    pub sacks: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothedWeek {
    pub raw: TeamWeekStat,
    pub form: RollingForm,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmoothedTeamStats {
    pub weeks: Vec<SmoothedWeek>,
}

impl SmoothedTeamStats {
    pub fn latest(&self) -> Option<&SmoothedWeek> {
        self.weeks.last()
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

// Keys are stable team identifiers; a team missing from the map is a caller
// error, never an implicit empty history.
pub type TeamHistories = HashMap<String, Vec<TeamWeekStat>>;

/// Smooth one team's weekly series with a trailing mean over `window` weeks.
/// The window shrinks at the start of the series, so every week gets a form
/// snapshot built only from weeks at or before it.
pub fn smooth(series: &[TeamWeekStat], window: usize) -> Result<SmoothedTeamStats, FeatureError> {
    if window == 0 {
        return Err(FeatureError::InvalidWindow(window));
    }
    if series.is_empty() {
        return Ok(SmoothedTeamStats::default());
    }

    // Callers may hand us weeks in any order.
    let mut sorted = series.to_vec();
    sorted.sort_by_key(|row| row.week);

    let forms: Vec<RollingForm> = (0..sorted.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            window_form(&sorted[start..=i])
        })
        .collect();

    let weeks = sorted
        .into_iter()
        .zip(forms)
        .map(|(raw, form)| SmoothedWeek { raw, form })
        .collect();

    Ok(SmoothedTeamStats { weeks })
}

// Teams have no mutual dependency, so per-team smoothing fans out across
// the rayon pool.
pub fn smooth_all_teams(
    histories: &TeamHistories,
    window: usize,
) -> Result<HashMap<String, SmoothedTeamStats>, FeatureError> {
    if window == 0 {
        return Err(FeatureError::InvalidWindow(window));
    }
    histories
        .par_iter()
        .map(|(team, series)| Ok((team.clone(), smooth(series, window)?)))
        .collect()
}

fn window_form(span: &[TeamWeekStat]) -> RollingForm {
    let n = span.len() as f64;
    let mut sum = RollingForm {
        points: 0.0,
        epa: 0.0,
        success: 0.0,
        def_epa: 0.0,
        pts_allowed: 0.0,
        turnovers: 0.0,
        sacks: 0.0,
    };
    for row in span {
        sum.points += row.points;
        sum.epa += row.epa;
        sum.success += row.success;
        sum.def_epa += row.def_epa;
        sum.pts_allowed += row.pts_allowed;
        sum.turnovers += row.turnovers;
        sum.sacks += row.sacks;
    }
    RollingForm {
        points: sum.points / n,
        epa: sum.epa / n,
        success: sum.success / n,
        def_epa: sum.def_epa / n,
        pts_allowed: sum.pts_allowed / n,
        turnovers: sum.turnovers / n,
        sacks: sum.sacks / n,
    }
}

#[cfg(test)]
mod tests {
    use super::{TeamWeekStat, smooth, smooth_all_teams};
    use crate::errors::FeatureError;

    fn week(week: u32, points: f64) -> TeamWeekStat {
        TeamWeekStat {
            week,
            points,
            epa: points / 100.0,
            success: 0.45,
            def_epa: -points / 200.0,
            pts_allowed: points / 2.0,
            turnovers: 1.0,
            sacks: 2.0,
        }
    }

    #[test]
    fn short_series_averages_everything_available() {
        let series = vec![week(1, 20.0), week(2, 24.0), week(3, 16.0)];
        let smoothed = smooth(&series, 5).unwrap();

        assert_eq!(smoothed.len(), 3);
        let last = smoothed.latest().unwrap();
        assert!((last.form.points - 20.0).abs() < 1e-9);
        assert!((last.form.pts_allowed - 10.0).abs() < 1e-9);
    }

    #[test]
    fn full_window_drops_older_weeks() {
        let series: Vec<TeamWeekStat> = (1..=6).map(|w| week(w, w as f64 * 10.0)).collect();
        let smoothed = smooth(&series, 5).unwrap();

        // Week 6 form averages weeks 2..=6 only.
        let last = smoothed.latest().unwrap();
        assert_eq!(last.raw.week, 6);
        assert!((last.form.points - 40.0).abs() < 1e-9);
    }

    #[test]
    fn unsorted_input_is_resorted_and_left_untouched() {
        let series = vec![week(3, 30.0), week(1, 10.0), week(2, 20.0)];
        let before = series.clone();
        let smoothed = smooth(&series, 5).unwrap();

        assert_eq!(series, before);
        let weeks: Vec<u32> = smoothed.weeks.iter().map(|w| w.raw.week).collect();
        assert_eq!(weeks, vec![1, 2, 3]);
        assert!((smoothed.weeks[1].form.points - 15.0).abs() < 1e-9);
    }

    #[test]
    fn zero_window_fails_fast() {
        let series = vec![week(1, 10.0)];
        assert_eq!(smooth(&series, 0), Err(FeatureError::InvalidWindow(0)));
    }

    #[test]
    fn empty_series_yields_empty_result() {
        let smoothed = smooth(&[], 5).unwrap();
        assert!(smoothed.is_empty());
        assert!(smoothed.latest().is_none());
    }

    #[test]
    fn league_fanout_matches_single_team_smoothing() {
        let mut histories = super::TeamHistories::new();
        histories.insert("SEA".to_string(), (1..=8).map(|w| week(w, 21.0)).collect());
        histories.insert("NE".to_string(), (1..=8).map(|w| week(w, 17.0)).collect());

        let all = smooth_all_teams(&histories, 5).unwrap();
        assert_eq!(all.len(), 2);
        for (team, series) in &histories {
            assert_eq!(all[team], smooth(series, 5).unwrap());
        }
    }
}
