//! Vitals submission interface
//!
//! Shapes exchanged with the prediction service and the mapping from its
//! answer to what the page shows. No transport lives here: a
//! `PredictionClient` implementation does the actual request. The scene
//! side of the crate does not depend on this module.

use serde::{Deserialize, Serialize};
use crate::error::Result;
use crate::{scene_bail, scene_err, scene_warn};

const SOURCE: &str = "heartcare::Vitals";

/// Label shown when no prediction could be obtained
pub const UNKNOWN_RISK: &str = "unknown";

/// Patient measurements posted to the prediction service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsRecord {
    /// Years, 0..=120
    pub age: i32,
    /// 0 = female, 1 = male
    pub sex: i32,
    /// Chest pain type, 0..=3
    pub cp: i32,
    /// Resting blood pressure (mm Hg)
    pub trestbps: i32,
    /// Serum cholesterol (mg/dl)
    pub chol: i32,
    /// Fasting blood sugar > 120 mg/dl
    pub fbs: i32,
    /// Resting ECG result, 0..=2
    pub restecg: i32,
    /// Maximum heart rate achieved
    pub thalach: i32,
    /// Exercise induced angina
    pub exang: i32,
    /// ST depression induced by exercise
    pub oldpeak: f64,
    /// Slope of the peak exercise ST segment, 0..=2
    pub slope: i32,
    /// Major vessels colored by fluoroscopy, 0..=4
    pub ca: i32,
    /// Thalassemia, 0..=3
    pub thal: i32,
}

impl VitalsRecord {
    /// Reject values the service would refuse
    pub fn validate(&self) -> Result<()> {
        let ranged = [
            ("age", self.age, 0, 120),
            ("sex", self.sex, 0, 1),
            ("cp", self.cp, 0, 3),
            ("fbs", self.fbs, 0, 1),
            ("restecg", self.restecg, 0, 2),
            ("exang", self.exang, 0, 1),
            ("slope", self.slope, 0, 2),
            ("ca", self.ca, 0, 4),
            ("thal", self.thal, 0, 3),
        ];
        for (name, value, min, max) in ranged {
            if !(min..=max).contains(&value) {
                scene_bail!(InvalidConfig, SOURCE, "{} must be in {}..={}, got {}", name, min, max, value);
            }
        }
        for (name, value) in [("trestbps", self.trestbps), ("chol", self.chol), ("thalach", self.thalach)] {
            if value < 0 {
                scene_bail!(InvalidConfig, SOURCE, "{} must be >= 0, got {}", name, value);
            }
        }
        if !self.oldpeak.is_finite() {
            scene_bail!(InvalidConfig, SOURCE, "oldpeak must be a finite number");
        }
        Ok(())
    }

    /// JSON request body
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| scene_err!(BackendError, SOURCE, "failed to encode vitals: {}", e))
    }
}

/// Answer of the prediction service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// 1 = heart disease predicted, 0 = not
    pub prediction: i32,
    /// Probability of heart disease, 0..=1
    pub probability: f64,
    pub prediction_label: String,
}

impl PredictionResponse {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| scene_err!(BackendError, SOURCE, "malformed prediction response: {}", e))
    }

    /// Label the service uses for a prediction value
    pub fn label_for(prediction: i32) -> &'static str {
        if prediction == 1 {
            "Heart Disease"
        } else {
            "No Heart Disease"
        }
    }
}

/// Transport to the prediction service
pub trait PredictionClient {
    fn predict(&self, vitals: &VitalsRecord) -> Result<PredictionResponse>;
}

/// What the page displays after a submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub risk: String,
    /// Probability as a percentage, three decimals
    pub percentage: f64,
}

impl RiskAssessment {
    pub fn unknown() -> Self {
        Self {
            risk: UNKNOWN_RISK.to_string(),
            percentage: 0.0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.risk == UNKNOWN_RISK
    }
}

/// Submit `vitals` and turn the answer into a display value
///
/// Invalid input, transport errors and out-of-range probabilities all map
/// to the unknown assessment.
pub fn assess(client: &dyn PredictionClient, vitals: &VitalsRecord) -> RiskAssessment {
    let response = match vitals.validate().and_then(|_| client.predict(vitals)) {
        Ok(response) => response,
        Err(e) => {
            scene_warn!(SOURCE, "Prediction unavailable: {}", e);
            return RiskAssessment::unknown();
        }
    };

    if !(0.0..=1.0).contains(&response.probability) {
        scene_warn!(SOURCE, "Probability {} outside [0, 1]", response.probability);
        return RiskAssessment::unknown();
    }

    RiskAssessment {
        risk: response.prediction_label,
        percentage: (response.probability * 100_000.0).round() / 1000.0,
    }
}

#[cfg(test)]
#[path = "vitals_tests.rs"]
mod tests;
