use super::BoilerplateRule;

pub const STRUCTURAL_THRESHOLD: f64 = 0.90;
pub const GENERAL_MATCH_THRESHOLD: f64 = 0.7;
pub const STRICT_MATCH_THRESHOLD: f64 = 0.8;
pub const VERIFIER_THRESHOLD: f64 = 0.8;
pub const MIN_SENTENCE_CHARS: usize = 20;
pub const BREADCRUMB_MAX_WORDS: usize = 4;
pub const MAX_CONTENT_BYTES: usize = 4 * 1024 * 1024;

pub const MAJOR_MAGNITUDE: usize = 20;
pub const MODERATE_MAGNITUDE: usize = 10;
pub const MINOR_MAGNITUDE: usize = 5;

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";

/// One written or numeric date with an optional trailing clock time.
/// Matches "[date]" too, so a label survives its date being genericized.
/// A following full stop is left alone: it may end the previous sentence.
fn date_pattern() -> String {
    let day = r"\d{1,2}(?:st|nd|rd|th)?";
    format!(
        concat!(
            r"(?:\[date\]",
            r"|\d{{4}}-\d{{2}}-\d{{2}}(?:[t ]\d{{2}}:\d{{2}}(?::\d{{2}}(?:\.\d+)?)?(?:z|[+-]\d{{2}}:?\d{{2}})?)?",
            r"|\d{{1,2}}[/.]\d{{1,2}}[/.]\d{{2,4}}",
            r"|{month}\s+{day}(?:,?\s+\d{{4}})?",
            r"|{day}\s+{month}(?:,?\s+\d{{4}})?",
            r"|{month}\s+\d{{4}})",
            r"(?:,?\s+(?:at\s+)?(?:\[time\]|\d{{1,2}}:\d{{2}}(?::\d{{2}})?(?:\s*[ap]\.?m\b\.?)?))?",
        ),
        month = MONTH,
        day = day,
    )
}

/// Generic page chrome found on most hosted help centres. Applied in order,
/// case-insensitively, to the raw extraction and again to the collapsed
/// single-line text, so no rule may lean on line anchors or run unbounded
/// to the end of a line.
pub fn boilerplate_rules() -> Vec<BoilerplateRule> {
    let date = date_pattern();
    vec![
        (r"skip to (?:main )?content".to_string(), ""),
        (r"was this (?:page|article|answer|information) helpful\??(?:\s*(?:yes|no)\b)*".to_string(), ""),
        (r"(?:send|give us|share your|leave) feedback(?: (?:about|on) this (?:page|article))?".to_string(), ""),
        (format!(r"\blast (?:updated|modified|reviewed)(?:\s+on)?(?:\s*:)?(?:\s*{})?", date), ""),
        (format!(r"\b(?:updated|modified|reviewed|published)(?:\s+on)?\s*:\s*{}", date), ""),
        (r"[?&](?:v|ver|version|cb|cachebust|_|t|ts)=[\w.-]+".to_string(), ""),
        (r"\b\d{4}-\d{2}-\d{2}(?:[t ]\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?(?:z|[+-]\d{2}:?\d{2})?)?\b".to_string(), "[date]"),
        (r"\b\d{1,2}[/.]\d{1,2}[/.]\d{2,4}\b".to_string(), "[date]"),
        (r"\b\d{1,2}:\d{2}(?::\d{2})?(?:\s*[ap]\.?m\b\.?)?".to_string(), "[time]"),
        (r"back to top".to_string(), ""),
        (r"(?:print|share) this (?:page|article)".to_string(), ""),
        (r"we use cookies[^.\n]{0,120}\.?".to_string(), ""),
        (r"©\s*\d{4}(?:\s*-\s*\d{4})?".to_string(), ""),
        (r"all rights reserved\.?".to_string(), ""),
    ]
    .into_iter()
    .map(|(pattern, replace_with)| BoilerplateRule {
        pattern,
        replace_with: replace_with.to_string(),
    })
    .collect()
}

/// Navigation and footer phrase groups stripped only when computing the
/// structural core of a page.
pub fn navigation_patterns() -> Vec<String> {
    [
        r"\b(?:home|menu|search|close|back|next|previous|print|share)\b",
        r"\b(?:sign (?:in|out|up)|log (?:in|out)|my account)\b",
        r"\b(?:contact us|help cent(?:er|re)|support|community|get started)\b",
        r"\b(?:on this page|table of contents|expand all|collapse all|jump to)\b",
        r"\b(?:related (?:articles|links|topics)|see also|learn more|read more)\b",
        r"\b(?:sitemap|careers|about us|accessibility|newsroom|press)\b",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Pipes and slashes are left out: they also delimit table cells and
/// "allowed / not allowed" columns.
pub fn breadcrumb_separators() -> Vec<String> {
    [">", "»", "›"].into_iter().map(String::from).collect()
}

/// Obligation, prohibition, scope and commercial vocabulary that marks a
/// sentence as carrying policy substance.
pub fn policy_terms() -> Vec<String> {
    [
        "must", "must not", "shall", "required", "require", "requires", "requirement",
        "requirements", "prohibited", "prohibit", "prohibits", "not allowed", "not permitted",
        "allowed", "permitted", "restricted", "restriction", "restrictions", "banned",
        "comply", "compliance", "violation", "violations", "policy", "policies",
        "advertiser", "advertisers", "ads", "advertising", "promote", "promotion",
        "effective", "country", "countries", "region", "regions", "local law", "local laws",
        "license", "licensed", "certification", "certified", "age", "years of age",
        "under 18", "minors", "adult", "adults", "alcohol", "gambling", "pharmaceutical",
        "pharmaceuticals", "healthcare", "financial", "fee", "fees", "payment", "payments",
        "price", "pricing",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// High-consequence vocabulary. "May" is left out of the months: it collides
/// with the modal verb.
pub fn critical_terms() -> Vec<String> {
    [
        // legal and enforcement
        "prohibited", "banned", "ban", "not allowed", "not permitted", "mandatory",
        "must not", "required", "penalty", "penalties", "suspension", "suspended",
        "termination", "terminated", "enforcement", "illegal", "unlawful", "legal action",
        // temporal
        "effective", "starting", "beginning", "no longer", "january", "february", "march",
        "april", "june", "july", "august", "september", "october", "november", "december",
        "2024", "2025", "2026", "2027",
        // geographic scope
        "worldwide", "globally", "all countries", "european union", "eu", "united states",
        "united kingdom", "india", "brazil", "canada", "australia",
        // business impact
        "fee", "fees", "commission", "surcharge", "age restriction", "age-restricted",
        "under 18", "minors", "18+", "21+", "gambling", "alcohol", "tobacco", "cannabis",
        "weapons", "firearms", "dangerous products", "cryptocurrency", "prescription drugs",
        "political",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
