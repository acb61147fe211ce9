//! Canned reviews used when the AI service can't be asked or didn't answer.

use super::ReviewRecord;

/// No credential configured.
pub fn unconfigured(app_name: &str, platform: &str) -> ReviewRecord {
    ReviewRecord {
        summary: format!(
            "A comprehensive review for {app_name} is currently unavailable. However, this is a popular application on {platform}."
        ),
        pros: strings(&["User-friendly interface", "Regular updates", "Widely used"]),
        cons: strings(&["Requires system resources", "Some features may require account"]),
        safety_score: 90,
        alternative_apps: strings(&["Alternative 1", "Alternative 2"]),
        technical_opinion: "Solid performance for general users.".into(),
    }
}

/// The request failed or the answer couldn't be used.
pub fn unavailable(app_name: &str) -> ReviewRecord {
    ReviewRecord {
        summary: format!(
            "Could not load AI review for {app_name}. It is generally considered a reliable tool in its category."
        ),
        pros: strings(&["Reliable functionality", "Standard features"]),
        cons: strings(&["Could not fetch detailed analysis"]),
        safety_score: 85,
        alternative_apps: Vec::new(),
        technical_opinion: "Unable to generate real-time technical opinion.".into(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
