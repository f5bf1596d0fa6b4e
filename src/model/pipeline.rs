//! Fitted binary classification pipeline, stored as JSON.
//!
//! The artifact describes a standardise/one-hot preprocessing stage followed
//! by a logistic-regression estimator:
//!
//! ```json
//! {
//!   "pipeline_type": "Pipeline",
//!   "estimator_type": "LogisticRegression",
//!   "columns": [
//!     { "kind": "numeric", "name": "win_pct_10", "mean": 0.5, "scale": 0.15 },
//!     { "kind": "categorical", "name": "team", "categories": ["Oilers", "Panthers"] }
//!   ],
//!   "coefficients": [1.8, 0.1, -0.1],
//!   "intercept": 0.05,
//!   "classes": [0, 1]
//! }
//! ```
//!
//! Numeric columns contribute `coef * (x - mean) / scale`. Categorical
//! columns one-hot encode in `categories` order; labels outside the list
//! encode as all zeros. Either kind may carry a `fill` used when the input
//! row has no such column.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::features::{is_categorical, FeatureDefaults, FeatureValue, MatchupFeatures, COLUMNS};
use crate::error::{PredictError, Result};

/// Label of the "team A wins" class.
pub const POSITIVE_CLASS: i64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Column {
    Numeric {
        name: String,
        #[serde(default)]
        mean: f64,
        #[serde(default = "unit_scale")]
        scale: f64,
        /// Value used when the input row has no such column
        #[serde(default)]
        fill: f64,
    },
    Categorical {
        name: String,
        categories: Vec<String>,
        /// Label used when the input row has no such column
        #[serde(default)]
        fill: Option<String>,
    },
}

fn unit_scale() -> f64 {
    1.0
}

impl Column {
    pub fn name(&self) -> &str {
        match self {
            Column::Numeric { name, .. } | Column::Categorical { name, .. } => name,
        }
    }

    /// Number of encoded inputs this column feeds the estimator.
    fn width(&self) -> usize {
        match self {
            Column::Numeric { .. } => 1,
            Column::Categorical { categories, .. } => categories.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default = "default_pipeline_type")]
    pub pipeline_type: String,
    #[serde(default = "default_estimator_type")]
    pub estimator_type: String,
    pub columns: Vec<Column>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_classes")]
    pub classes: Vec<i64>,
    #[serde(default)]
    pub defaults: FeatureDefaults,
}

fn default_pipeline_type() -> String {
    "Pipeline".to_string()
}

fn default_estimator_type() -> String {
    "LogisticRegression".to_string()
}

fn default_classes() -> Vec<i64> {
    vec![0, POSITIVE_CLASS]
}

impl Pipeline {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let pipeline: Pipeline = serde_json::from_str(content)?;
        pipeline.validate()?;
        Ok(pipeline)
    }

    fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(PredictError::invalid_model("pipeline has no input columns"));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name()) {
                return Err(PredictError::invalid_model(format!(
                    "duplicate column '{}'",
                    column.name()
                )));
            }
            let categorical = matches!(column, Column::Categorical { .. });
            if let Some(expected) = is_categorical(column.name()) {
                if expected != categorical {
                    return Err(PredictError::invalid_model(format!(
                        "column '{}' has the wrong kind",
                        column.name()
                    )));
                }
            }
            if let Column::Numeric {
                name,
                mean,
                scale,
                fill,
            } = column
            {
                if !mean.is_finite() || !fill.is_finite() || !scale.is_finite() || *scale == 0.0 {
                    return Err(PredictError::invalid_model(format!(
                        "column '{}' needs a finite mean/fill and a finite non-zero scale",
                        name
                    )));
                }
            }
        }

        let width: usize = self.columns.iter().map(Column::width).sum();
        if self.coefficients.len() != width {
            return Err(PredictError::invalid_model(format!(
                "expected {} coefficients for the encoded columns, found {}",
                width,
                self.coefficients.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(PredictError::invalid_model("non-finite coefficient"));
        }

        if self.classes.len() != 2 || !self.classes.contains(&POSITIVE_CLASS) {
            return Err(PredictError::invalid_model(format!(
                "expected two classes including {}, found {:?}",
                POSITIVE_CLASS, self.classes
            )));
        }
        if self.classes[0] == self.classes[1] {
            return Err(PredictError::invalid_model("classes must be distinct"));
        }
        Ok(())
    }

    /// Input columns in the order the estimator expects them.
    pub fn feature_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    /// Expected columns a [`MatchupFeatures`] row cannot supply.
    pub fn unsupplied_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(Column::name)
            .filter(|name| !COLUMNS.contains(name))
            .collect()
    }

    /// Index of the positive class within `classes`.
    pub fn positive_index(&self) -> usize {
        if self.classes[0] == POSITIVE_CLASS {
            0
        } else {
            1
        }
    }

    /// Class probabilities, ordered like `classes`.
    pub fn predict_proba(&self, row: &MatchupFeatures) -> [f64; 2] {
        let p = self.probability_of_win(row);
        let mut proba = [1.0 - p; 2];
        proba[self.positive_index()] = p;
        proba
    }

    /// Probability of the positive class.
    pub fn probability_of_win(&self, row: &MatchupFeatures) -> f64 {
        sigmoid(self.decision_function(row))
    }

    fn decision_function(&self, row: &MatchupFeatures) -> f64 {
        let mut z = self.intercept;
        let mut offset = 0;
        for column in &self.columns {
            match column {
                Column::Numeric {
                    name,
                    mean,
                    scale,
                    fill,
                } => {
                    let x = match row.value(name) {
                        Some(FeatureValue::Numeric(v)) => v,
                        _ => *fill,
                    };
                    z += self.coefficients[offset] * (x - mean) / scale;
                }
                Column::Categorical {
                    name,
                    categories,
                    fill,
                } => {
                    let label = match row.value(name) {
                        Some(FeatureValue::Categorical(label)) => Some(label),
                        _ => fill.as_deref(),
                    };
                    if let Some(label) = label {
                        if let Some(i) = categories.iter().position(|c| c == label) {
                            z += self.coefficients[offset + i];
                        }
                    }
                }
            }
            offset += column.width();
        }
        z
    }
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}
