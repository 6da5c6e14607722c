use super::*;
use crate::error::Error;

struct FixedClient(Result<PredictionResponse>);

impl PredictionClient for FixedClient {
    fn predict(&self, _vitals: &VitalsRecord) -> Result<PredictionResponse> {
        self.0.clone()
    }
}

fn sample_vitals() -> VitalsRecord {
    VitalsRecord {
        age: 54,
        sex: 1,
        cp: 0,
        trestbps: 130,
        chol: 246,
        fbs: 0,
        restecg: 1,
        thalach: 150,
        exang: 0,
        oldpeak: 1.4,
        slope: 1,
        ca: 0,
        thal: 2,
    }
}

fn response(prediction: i32, probability: f64) -> PredictionResponse {
    PredictionResponse {
        prediction,
        probability,
        prediction_label: PredictionResponse::label_for(prediction).to_string(),
    }
}

// ============================================================================
// VitalsRecord
// ============================================================================

#[test]
fn test_valid_vitals() {
    assert!(sample_vitals().validate().is_ok());
}

#[test]
fn test_out_of_range_fields_rejected() {
    let cases = [
        VitalsRecord { age: 121, ..sample_vitals() },
        VitalsRecord { sex: 2, ..sample_vitals() },
        VitalsRecord { cp: 4, ..sample_vitals() },
        VitalsRecord { ca: 5, ..sample_vitals() },
        VitalsRecord { thal: -1, ..sample_vitals() },
        VitalsRecord { chol: -3, ..sample_vitals() },
        VitalsRecord { oldpeak: f64::NAN, ..sample_vitals() },
    ];
    for vitals in cases {
        assert!(matches!(vitals.validate(), Err(Error::InvalidConfig(_))), "{:?}", vitals);
    }
}

#[test]
fn test_to_json_field_names() {
    let json = sample_vitals().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["age"], 54);
    assert_eq!(value["trestbps"], 130);
    assert_eq!(value["oldpeak"], 1.4);
    assert_eq!(value.as_object().unwrap().len(), 13);
}

// ============================================================================
// PredictionResponse
// ============================================================================

#[test]
fn test_response_from_json() {
    let parsed = PredictionResponse::from_json(
        r#"{"prediction": 1, "probability": 0.8731, "prediction_label": "Heart Disease"}"#,
    ).unwrap();
    assert_eq!(parsed, response(1, 0.8731));
}

#[test]
fn test_malformed_response() {
    assert!(matches!(
        PredictionResponse::from_json("{\"prediction\": \"yes\"}"),
        Err(Error::BackendError(_))
    ));
}

// ============================================================================
// assess
// ============================================================================

#[test]
fn test_assess_maps_probability_to_percentage() {
    let client = FixedClient(Ok(response(1, 0.87314)));
    let assessment = assess(&client, &sample_vitals());
    assert_eq!(assessment.risk, "Heart Disease");
    assert!((assessment.percentage - 87.314).abs() < 1e-9);
}

#[test]
fn test_assess_low_risk() {
    let client = FixedClient(Ok(response(0, 0.05)));
    let assessment = assess(&client, &sample_vitals());
    assert_eq!(assessment.risk, "No Heart Disease");
    assert!((assessment.percentage - 5.0).abs() < 1e-9);
}

#[test]
fn test_transport_failure_is_unknown() {
    let client = FixedClient(Err(Error::BackendError("connection refused".to_string())));
    let assessment = assess(&client, &sample_vitals());
    assert!(assessment.is_unknown());
    assert_eq!(assessment, RiskAssessment::unknown());
}

#[test]
fn test_invalid_vitals_never_reach_client() {
    struct PanickingClient;
    impl PredictionClient for PanickingClient {
        fn predict(&self, _vitals: &VitalsRecord) -> Result<PredictionResponse> {
            panic!("client must not be called");
        }
    }
    let assessment = assess(&PanickingClient, &VitalsRecord { age: 500, ..sample_vitals() });
    assert!(assessment.is_unknown());
}

#[test]
fn test_probability_out_of_range_is_unknown() {
    let client = FixedClient(Ok(response(1, 1.5)));
    assert!(assess(&client, &sample_vitals()).is_unknown());
}
