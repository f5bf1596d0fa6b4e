pub mod features;
pub mod locator;
pub mod pipeline;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::Result;
use features::{MatchupFeatures, TeamFeatures};
use pipeline::Pipeline;

/// A loaded pipeline plus where and when it came from.
///
/// Built once at startup and shared read-only with request handlers.
#[derive(Debug)]
pub struct TrainedModel {
    pipeline: Pipeline,
    path: PathBuf,
    loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub pipeline_type: String,
    pub estimator_type: String,
    pub model_path: String,
    pub has_predict_proba: bool,
    pub feature_names_in: Vec<String>,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelPrediction {
    /// Probability that team A wins a single game
    pub p_win: f64,
    pub features_used: MatchupFeatures,
    pub expected: Vec<String>,
}

impl TrainedModel {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let pipeline = Pipeline::from_file(path)?;
        info!(
            "Loaded {} ({}) from {} with {} input columns",
            pipeline.pipeline_type,
            pipeline.estimator_type,
            path.display(),
            pipeline.columns.len()
        );
        Ok(Self::from_pipeline(pipeline, path))
    }

    pub fn from_pipeline(pipeline: Pipeline, path: impl Into<PathBuf>) -> Self {
        let unsupplied = pipeline.unsupplied_columns();
        if !unsupplied.is_empty() {
            warn!(
                "Model expects columns with no request field, fill values will be used: {}",
                unsupplied.join(", ")
            );
        }
        Self {
            pipeline,
            path: path.into(),
            loaded_at: Utc::now(),
        }
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            pipeline_type: self.pipeline.pipeline_type.clone(),
            estimator_type: self.pipeline.estimator_type.clone(),
            model_path: self.path.display().to_string(),
            has_predict_proba: true,
            feature_names_in: self.pipeline.feature_names(),
            loaded_at: self.loaded_at,
        }
    }

    /// Probability that team A beats team B in one game.
    pub fn predict(&self, team_a: &TeamFeatures, team_b: &TeamFeatures) -> ModelPrediction {
        let features = MatchupFeatures::combine(team_a, team_b, &self.pipeline.defaults);
        let p_win = self.pipeline.predict_proba(&features)[self.pipeline.positive_index()];
        debug!("Model prediction {:.4} for {} vs {}", p_win, features.team, features.opp);
        ModelPrediction {
            p_win,
            features_used: features,
            expected: self.pipeline.feature_names(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::PredictError;

    pub(crate) const SAMPLE_ARTIFACT: &str = r#"{
        "pipeline_type": "Pipeline",
        "estimator_type": "LogisticRegression",
        "columns": [
            { "kind": "numeric", "name": "home", "mean": 0.5, "scale": 0.5 },
            { "kind": "numeric", "name": "rest_days", "mean": 2.0, "scale": 1.0 },
            { "kind": "numeric", "name": "back_to_back", "mean": 0.2, "scale": 0.4 },
            { "kind": "numeric", "name": "win_pct_10", "mean": 0.5, "scale": 0.15 },
            { "kind": "numeric", "name": "goal_diff_pg_10", "mean": 0.0, "scale": 1.0 },
            { "kind": "categorical", "name": "team", "categories": ["Oilers", "Panthers"] },
            { "kind": "categorical", "name": "opp", "categories": ["Oilers", "Panthers"] }
        ],
        "coefficients": [0.15, 0.05, -0.1, 0.6, 0.4, -0.05, 0.05, 0.05, -0.05],
        "intercept": 0.0
    }"#;

    pub(crate) fn sample_model() -> TrainedModel {
        let pipeline = Pipeline::from_json(SAMPLE_ARTIFACT).expect("sample artifact is valid");
        TrainedModel::from_pipeline(pipeline, "memory/clf.json")
    }

    #[test]
    fn load_from_disk_and_describe() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clf.json");
        std::fs::write(&path, SAMPLE_ARTIFACT).unwrap();

        let model = TrainedModel::load(&path).unwrap();
        let info = model.info();
        assert_eq!(info.estimator_type, "LogisticRegression");
        assert_eq!(info.model_path, path.display().to_string());
        assert!(info.has_predict_proba);
        assert_eq!(info.feature_names_in.len(), 7);
        assert_eq!(info.feature_names_in[0], "home");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TrainedModel::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, PredictError::Io(_)));
    }

    #[test]
    fn prediction_reports_features_used() {
        let model = sample_model();
        let a = TeamFeatures {
            win_pct_10: Some(0.8),
            ..Default::default()
        };
        let prediction = model.predict(&a, &TeamFeatures::default());
        assert!(prediction.p_win > 0.5 && prediction.p_win < 1.0);
        assert_eq!(prediction.features_used.win_pct_10, 0.8);
        assert_eq!(prediction.features_used.opp, "Oilers");
        assert_eq!(prediction.expected, model.info().feature_names_in);
    }
}
