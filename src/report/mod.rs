pub mod json;
pub mod text;

use crate::error::GpasError;
use crate::types::report::AuthenticityReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Text,
}

pub fn render(report: &AuthenticityReport, format: OutputFormat) -> Result<String, GpasError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(GpasError::Json),
        OutputFormat::Text => Ok(text::to_text(report)),
    }
}
