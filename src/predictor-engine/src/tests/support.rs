//! In-process `PredictorApi` fake that counts calls.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use predictor_client::{PredictorApi, PredictorError, Result};
use predictor_protocol::{
    ConfidenceTier, ExplainResponse, FactorDto, FormRecord, Impact, PredictRequest,
    PredictionSummary, ReferenceKind,
};

/// Canned reply of the fake.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Api(u16, String),
    Invalid(String),
}

impl<T: Clone> Reply<T> {
    fn produce(&self) -> Result<T> {
        match self {
            Reply::Ok(v) => Ok(v.clone()),
            Reply::Api(status, message) => Err(PredictorError::Api {
                status: *status,
                message: message.clone(),
            }),
            Reply::Invalid(msg) => Err(PredictorError::InvalidResponse(msg.clone())),
        }
    }
}

pub struct FakeApi {
    pub references: HashMap<ReferenceKind, Reply<Vec<String>>>,
    pub prediction: Reply<ExplainResponse>,
    pub reference_calls: AtomicUsize,
    pub predict_calls: AtomicUsize,
    pub last_request: parking_lot::Mutex<Option<PredictRequest>>,
}

impl FakeApi {
    pub fn new(prediction: Reply<ExplainResponse>) -> Self {
        let references = HashMap::from([
            (
                ReferenceKind::Regions,
                Reply::Ok(vec!["California".to_string(), "New York".to_string()]),
            ),
            (
                ReferenceKind::Cities,
                Reply::Ok(vec!["New York".to_string(), "San Francisco".to_string()]),
            ),
            (
                ReferenceKind::Categories,
                Reply::Ok(vec!["ai".to_string(), "fintech".to_string(), "software".to_string()]),
            ),
        ]);
        Self {
            references,
            prediction,
            reference_calls: AtomicUsize::new(0),
            predict_calls: AtomicUsize::new(0),
            last_request: parking_lot::Mutex::new(None),
        }
    }

    pub fn with_reference(mut self, kind: ReferenceKind, reply: Reply<Vec<String>>) -> Self {
        self.references.insert(kind, reply);
        self
    }

    pub fn predict_calls(&self) -> usize {
        self.predict_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PredictorApi for FakeApi {
    async fn fetch_reference(&self, kind: ReferenceKind) -> Result<Vec<String>> {
        self.reference_calls.fetch_add(1, Ordering::SeqCst);
        match self.references.get(&kind) {
            Some(reply) => reply.produce(),
            None => Ok(Vec::new()),
        }
    }

    async fn predict_explain(&self, request: &PredictRequest) -> Result<ExplainResponse> {
        self.predict_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock() = Some(request.clone());
        self.prediction.produce()
    }
}

pub fn explain_response(probability: f64, confidence: ConfidenceTier) -> ExplainResponse {
    ExplainResponse {
        prediction: PredictionSummary {
            success_probability: probability,
            prediction: u8::from(probability >= 0.5),
            model_used: "xgboost".to_string(),
            confidence,
        },
        feature_importance: BTreeMap::from([
            ("founded_year".to_string(), 0.21),
            ("category_software".to_string(), 0.12),
            ("region_other".to_string(), -0.04),
        ]),
        top_factors: vec![
            FactorDto {
                feature: "founded_year".to_string(),
                importance: 0.21,
                impact: Impact::Positive,
            },
            FactorDto {
                feature: "region_other".to_string(),
                importance: -0.04,
                impact: Impact::Negative,
            },
        ],
    }
}

/// A record that passes validation.
pub fn complete_record() -> FormRecord {
    FormRecord {
        region: "California".to_string(),
        city: "San Francisco".to_string(),
        categories: vec!["software".to_string()],
        founded_year: 2010,
        ..Default::default()
    }
}
