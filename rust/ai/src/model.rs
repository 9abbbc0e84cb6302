//! Learned-model policy.
//!
//! A [`ModelPolicy`] turns a hand into a fixed 7-feature vector, hands it to
//! an [`InferenceBackend`] and picks the most probable of the three actions.
//! Training and model storage are the backend's business; [`LinearModel`] is
//! a small bundled backend that reads its weights from JSON.

use std::fs;
use std::path::Path;

use fivedraw_engine::hand::{Hand, evaluate};
use fivedraw_engine::policy::{Decision, DecisionPolicy, PotContext, select_action};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::PolicyError;
use crate::fallback::RandomFallback;

pub const FEATURE_COUNT: usize = 7;

pub type Features = [f32; FEATURE_COUNT];

/// Maps a feature vector to `[fold, call, bet]` probabilities.
pub trait InferenceBackend: Send {
    fn infer(&mut self, features: &Features) -> Result<[f32; 3], PolicyError>;
}

/// `[category, pot, tb0, tb1, tb2, tb3, tb4]`, tie-break zero-padded.
///
/// ```
/// use fivedraw_ai::model::features;
/// use fivedraw_engine::hand::Hand;
///
/// let hand: Hand = "Ks Kh Kd 2c 2s".parse().unwrap();
/// assert_eq!(features(&hand, 40), [7.0, 40.0, 11.0, 0.0, 0.0, 0.0, 0.0]);
/// ```
pub fn features(hand: &Hand, pot: u32) -> Features {
    let eval = evaluate(hand);
    let tb = eval.tiebreak.padded();
    [
        eval.category.value() as f32,
        pot as f32,
        tb[0] as f32,
        tb[1] as f32,
        tb[2] as f32,
        tb[3] as f32,
        tb[4] as f32,
    ]
}

pub struct ModelPolicy<B: InferenceBackend> {
    backend: B,
    fallback: RandomFallback,
    failures: u64,
}

impl<B: InferenceBackend> ModelPolicy<B> {
    pub fn new(backend: B, seed: Option<u64>) -> Self {
        Self {
            backend,
            fallback: RandomFallback::new(seed),
            failures: 0,
        }
    }

    /// Inference calls that failed and were answered at random.
    pub fn failures(&self) -> u64 {
        self.failures
    }
}

impl<B: InferenceBackend> DecisionPolicy for ModelPolicy<B> {
    fn decide(&mut self, hand: &Hand, ctx: &PotContext) -> Decision {
        let input = features(hand, ctx.pot);
        let result = self.backend.infer(&input).and_then(|probs| {
            if probs.iter().all(|p| p.is_finite()) {
                Ok(probs)
            } else {
                Err(PolicyError::Inference(format!("non-finite output {probs:?}")))
            }
        });
        match result {
            Ok(probs) => select_action(&probs),
            Err(e) => {
                self.failures += 1;
                error!(error = %e, "model inference failed, acting at random");
                self.fallback.decide()
            }
        }
    }

    fn name(&self) -> &str {
        "ModelPolicy"
    }
}

/// One dense layer followed by softmax.
///
/// ```json
/// { "weights": [[...7 floats...], [...], [...]], "bias": [0.0, 0.0, 0.0] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub weights: [Features; 3],
    pub bias: [f32; 3],
}

impl LinearModel {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PolicyError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, PolicyError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl InferenceBackend for LinearModel {
    fn infer(&mut self, features: &Features) -> Result<[f32; 3], PolicyError> {
        let mut logits = self.bias;
        for (logit, row) in logits.iter_mut().zip(&self.weights) {
            *logit += row.iter().zip(features).map(|(w, x)| w * x).sum::<f32>();
        }
        softmax(logits)
    }
}

fn softmax(logits: [f32; 3]) -> Result<[f32; 3], PolicyError> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if !max.is_finite() {
        return Err(PolicyError::Inference(format!("bad logits {logits:?}")));
    }
    let exp = logits.map(|l| (l - max).exp());
    let sum: f32 = exp.iter().sum();
    Ok(exp.map(|e| e / sum))
}
