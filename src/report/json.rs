use crate::types::report::AuthenticityReport;

pub fn to_json(report: &AuthenticityReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
