//! Typed feature inputs for the trained model.
//!
//! Callers send per-team fields, any of which may be omitted. A matchup row
//! is built from team A's stats plus team B's identifier, with every gap
//! filled from [`FeatureDefaults`].

use serde::{Deserialize, Serialize};

/// Column names a matchup row can supply, in canonical order.
pub const COLUMNS: [&str; 7] = [
    "home",
    "rest_days",
    "back_to_back",
    "win_pct_10",
    "goal_diff_pg_10",
    "team",
    "opp",
];

/// Whether a known column carries a number or a category label.
pub fn is_categorical(column: &str) -> Option<bool> {
    match column {
        "home" | "rest_days" | "back_to_back" | "win_pct_10" | "goal_diff_pg_10" => Some(false),
        "team" | "opp" => Some(true),
        _ => None,
    }
}

/// Per-team fields as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamFeatures {
    /// 1 if this team is at home, 0 otherwise
    pub home: Option<f64>,
    /// Days since the team's previous game
    pub rest_days: Option<f64>,
    /// 1 if the previous game was yesterday
    pub back_to_back: Option<f64>,
    /// Win percentage over the last 10 games
    pub win_pct_10: Option<f64>,
    /// Goal differential per game over the last 10 games
    pub goal_diff_pg_10: Option<f64>,
    pub team: Option<String>,
}

/// Values used for any field a client leaves out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureDefaults {
    pub home: f64,
    pub rest_days: f64,
    pub back_to_back: f64,
    pub win_pct_10: f64,
    pub goal_diff_pg_10: f64,
    pub team: String,
    pub opp: String,
}

impl Default for FeatureDefaults {
    fn default() -> Self {
        Self {
            home: 1.0,
            rest_days: 2.0,
            back_to_back: 0.0,
            win_pct_10: 0.6,
            goal_diff_pg_10: 0.5,
            team: "Panthers".to_string(),
            opp: "Oilers".to_string(),
        }
    }
}

/// A single fully-populated model input row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupFeatures {
    pub home: f64,
    pub rest_days: f64,
    pub back_to_back: f64,
    pub win_pct_10: f64,
    pub goal_diff_pg_10: f64,
    pub team: String,
    pub opp: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue<'a> {
    Numeric(f64),
    Categorical(&'a str),
}

impl MatchupFeatures {
    /// Build the row for "team A beats team B".
    ///
    /// Only B's identifier is used: the model was fit on A's form against
    /// a named opponent.
    pub fn combine(
        team_a: &TeamFeatures,
        team_b: &TeamFeatures,
        defaults: &FeatureDefaults,
    ) -> Self {
        Self {
            home: team_a.home.unwrap_or(defaults.home),
            rest_days: team_a.rest_days.unwrap_or(defaults.rest_days),
            back_to_back: team_a.back_to_back.unwrap_or(defaults.back_to_back),
            win_pct_10: team_a.win_pct_10.unwrap_or(defaults.win_pct_10),
            goal_diff_pg_10: team_a.goal_diff_pg_10.unwrap_or(defaults.goal_diff_pg_10),
            team: team_a.team.clone().unwrap_or_else(|| defaults.team.clone()),
            opp: team_b.team.clone().unwrap_or_else(|| defaults.opp.clone()),
        }
    }

    /// Look up a column by name; `None` for columns this row does not carry.
    pub fn value(&self, column: &str) -> Option<FeatureValue<'_>> {
        let v = match column {
            "home" => FeatureValue::Numeric(self.home),
            "rest_days" => FeatureValue::Numeric(self.rest_days),
            "back_to_back" => FeatureValue::Numeric(self.back_to_back),
            "win_pct_10" => FeatureValue::Numeric(self.win_pct_10),
            "goal_diff_pg_10" => FeatureValue::Numeric(self.goal_diff_pg_10),
            "team" => FeatureValue::Categorical(&self.team),
            "opp" => FeatureValue::Categorical(&self.opp),
            _ => return None,
        };
        Some(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_takes_every_default() {
        let row = MatchupFeatures::combine(
            &TeamFeatures::default(),
            &TeamFeatures::default(),
            &FeatureDefaults::default(),
        );
        assert_eq!(row.home, 1.0);
        assert_eq!(row.rest_days, 2.0);
        assert_eq!(row.back_to_back, 0.0);
        assert_eq!(row.win_pct_10, 0.6);
        assert_eq!(row.goal_diff_pg_10, 0.5);
        assert_eq!(row.team, "Panthers");
        assert_eq!(row.opp, "Oilers");
    }

    #[test]
    fn opponent_is_team_b_identifier_only() {
        let a = TeamFeatures {
            win_pct_10: Some(0.7),
            team: Some("Rangers".into()),
            ..Default::default()
        };
        let b = TeamFeatures {
            win_pct_10: Some(0.1),
            rest_days: Some(9.0),
            team: Some("Stars".into()),
            ..Default::default()
        };
        let row = MatchupFeatures::combine(&a, &b, &FeatureDefaults::default());
        assert_eq!(row.win_pct_10, 0.7);
        assert_eq!(row.rest_days, 2.0);
        assert_eq!(row.team, "Rangers");
        assert_eq!(row.opp, "Stars");
    }

    #[test]
    fn every_canonical_column_resolves() {
        let row = MatchupFeatures::combine(
            &TeamFeatures::default(),
            &TeamFeatures::default(),
            &FeatureDefaults::default(),
        );
        for column in COLUMNS {
            let value = row.value(column).expect(column);
            let categorical = matches!(value, FeatureValue::Categorical(_));
            assert_eq!(is_categorical(column), Some(categorical), "{}", column);
        }
        assert_eq!(row.value("shots_on_goal"), None);
    }

    #[test]
    fn defaults_partially_overridable_from_json() {
        let d: FeatureDefaults = serde_json::from_str(r#"{"rest_days": 3, "opp": "Bruins"}"#).unwrap();
        assert_eq!(d.rest_days, 3.0);
        assert_eq!(d.opp, "Bruins");
        assert_eq!(d.team, "Panthers");
    }
}
