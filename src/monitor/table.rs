use tabled::Tabled;
use super::pipeline::MonitorEntry;

#[derive(Debug, Clone, Tabled)]
pub struct AssessmentTableRow {
    #[tabled(rename = "URL")]
    pub url: String,
    #[tabled(rename = "Extracted")]
    pub extracted: String,
    #[tabled(rename = "Tier")]
    pub tier: String,
    #[tabled(rename = "Magnitude")]
    pub magnitude: String,
    #[tabled(rename = "Notify")]
    pub notify: String,
    #[tabled(rename = "Description")]
    pub description: String,
}

impl From<&MonitorEntry> for AssessmentTableRow {
    fn from(entry: &MonitorEntry) -> Self {
        let assessment = &entry.assessment;

        let magnitude = if assessment.magnitude > 0 {
            assessment.magnitude.to_string()
        } else {
            "-".to_string()
        };

        AssessmentTableRow {
            url: entry.url.clone(),
            extracted: entry.extracted_at.format("%Y-%m-%d %H:%M").to_string(),
            tier: format!("{} {}", assessment.tier.symbol(), assessment.tier.as_str()),
            magnitude,
            notify: if assessment.should_notify() { "yes" } else { "no" }.to_string(),
            description: truncate_description(&assessment.description, 72),
        }
    }
}

fn truncate_description(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
