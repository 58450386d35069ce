use super::scoring::ScoreResult;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AuthenticityReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub score: u8,
    /// Feature document as an ordered JSON object of key to number.
    pub features: serde_json::Value,
    pub explanations: Vec<String>,
}

impl AuthenticityReport {
    pub fn new<F: Serialize>(
        user: Option<String>,
        features: &F,
        result: ScoreResult,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            user,
            score: result.score,
            features: serde_json::to_value(features)?,
            explanations: result.explanations,
        })
    }
}
