use crate::types::report::AuthenticityReport;

pub fn to_text(report: &AuthenticityReport) -> String {
    let mut output = String::new();
    if let Some(user) = &report.user {
        output.push_str(&format!("User: {user}\n"));
    }
    output.push_str(&format!("Authenticity score: {}/100\n\n", report.score));

    output.push_str("Signals:\n");
    match report.features.as_object() {
        Some(features) if !features.is_empty() => {
            for (key, value) in features {
                output.push_str(&format!("  - {key}: {value}\n"));
            }
        }
        _ => output.push_str("  - none\n"),
    }

    output.push_str("\nWhy:\n");
    if report.explanations.is_empty() {
        output.push_str("  - none\n");
    } else {
        for explanation in &report.explanations {
            output.push_str(&format!("  {explanation}\n"));
        }
    }

    output
}
