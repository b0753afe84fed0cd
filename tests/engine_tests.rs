use policydrift::{ChangeEngine, EngineConfig, Snapshot, Tier};

const URL: &str = "https://example.com/policies/advertising";

fn engine() -> ChangeEngine {
    ChangeEngine::new(EngineConfig::default()).unwrap()
}

fn snapshot(content: &str) -> Snapshot {
    Snapshot::new(URL, "Advertising policies", content)
}

const POLICY_BODY: &str = "\
Ads must not promote gambling services without a valid license.
Alcohol ads are allowed in Canada.
Advertisers must verify their business identity before campaigns launch.
Healthcare advertisers need certification from the regional regulator.
Financial products require clear disclosure of interest rates and repayment terms.
Political content requires a paid-for-by statement on every creative.
Landing pages should load quickly and work well on mobile devices.";

fn numbered_policy_sentences(count: usize) -> String {
    (1..=count)
        .map(|i| format!("Advertisers in territory number {} must submit compliance form {} first.", i, i))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_first_sighting() {
    let a = engine().assess(None, &snapshot(POLICY_BODY));
    assert!(a.is_new);
    assert!(!a.has_changes);
    assert_eq!(a.tier, Tier::NewPolicy);
    assert!(a.should_persist());
}

#[test]
fn test_identity() {
    let s = snapshot(POLICY_BODY);
    let a = engine().assess(Some(&s), &s);
    assert!(!a.has_changes);
    assert_eq!(a.tier, Tier::NoChange);
    assert!(!a.should_persist());
}

#[test]
fn test_determinism() {
    let engine = engine();
    let previous = snapshot(POLICY_BODY);
    let current = snapshot(&format!("{}\nTobacco ads are banned worldwide starting March 2026.", POLICY_BODY));
    let first = engine.assess(Some(&previous), &current);
    for _ in 0..5 {
        assert_eq!(engine.assess(Some(&previous), &current), first);
    }
}

#[test]
fn test_no_op_reformat() {
    let previous = snapshot("Ads must not promote gambling services.");
    let current = snapshot("  Ads must not\n   promote gambling\n\n services. \n");
    let a = engine().assess(Some(&previous), &current);
    assert!(matches!(a.tier, Tier::FormattingOnly | Tier::StructuralOnly));
    assert!(a.skip_notification);
    assert!(!a.has_changes);
    assert!(!a.should_persist());
}

#[test]
fn test_new_critical_clause() {
    let previous = snapshot("Ads must not promote gambling services.");
    let current = snapshot(
        "Ads must not promote gambling services. Dangerous products are now prohibited effective January 2026.",
    );
    let a = engine().assess(Some(&previous), &current);
    assert!(matches!(a.tier, Tier::CriticalMinorChange | Tier::MajorAddition));
    assert!(!a.skip_notification);
    assert!(a.has_changes);

    let signals = a.signals.unwrap();
    assert!(signals.critical_terms.contains("dangerous products"));
    assert!(signals.critical_terms.contains("january"));
}

#[test]
fn test_breadcrumb_only_diff() {
    let previous = snapshot(&format!("Home > Policies > Ads\n{}", POLICY_BODY));
    let current = snapshot(&format!("Home > Help > Ads\n{}", POLICY_BODY));
    let a = engine().assess(Some(&previous), &current);
    assert_eq!(a.tier, Tier::StructuralOnly);
    assert!(a.skip_notification);
    assert!(!a.has_changes);
}

#[test]
fn test_navigation_and_timestamp_churn() {
    let previous = snapshot(&format!(
        "Skip to main content\nMenu Search Sign in\n{}\nLast updated: 2025-03-01\nWas this page helpful? Yes No",
        POLICY_BODY
    ));
    let current = snapshot(&format!(
        "Skip to content\nMenu Sign in\n{}\nLast updated: 2025-06-11\nSend feedback\nBack to top",
        POLICY_BODY
    ));
    let a = engine().assess(Some(&previous), &current);
    assert!(a.skip_notification);
    assert!(!a.has_changes);
}

#[test]
fn test_critical_term_inside_structural_update() {
    let previous = snapshot(POLICY_BODY);
    let current = snapshot(&POLICY_BODY.replace(
        "Alcohol ads are allowed in Canada.",
        "Alcohol ads are prohibited in Canada.",
    ));
    let a = engine().assess(Some(&previous), &current);
    assert_eq!(a.tier, Tier::CriticalPolicyInStructural);
    assert!(a.has_changes);
    assert!(!a.skip_notification);

    let signals = a.signals.unwrap();
    assert!(signals.structural_only);
    assert!(!signals.real_change_confirmed);
    assert!(signals.policy_similarity.unwrap() > 0.9);
    assert!(signals.critical_terms.contains("prohibited"));
}

#[test]
fn test_critical_terms_outside_policy_text_are_suppressed() {
    let previous = snapshot("Ads must not promote gambling services. Our offices are closed in December for the holidays.");
    let current = snapshot("Ads must not promote gambling services. Our offices reopen in January after the holidays.");
    let a = engine().assess(Some(&previous), &current);
    assert_eq!(a.tier, Tier::StructuralWithKeywords);
    assert!(a.skip_notification);
    assert!(!a.has_changes);
}

#[test]
fn test_non_policy_rewording_is_formatting_only() {
    let previous = snapshot("Ads must not promote gambling services. Contact our team for help with your account.");
    let current = snapshot("Ads must not promote gambling services. Reach our friendly team for help with your account settings.");
    let a = engine().assess(Some(&previous), &current);
    assert_eq!(a.tier, Tier::FormattingOnly);
    assert_eq!(a.magnitude, 0);
    assert!(a.skip_notification);
}

#[test]
fn test_magnitude_bands() {
    let previous = snapshot("Ads must not promote gambling services.");
    let engine = engine();

    let cases = [(8, Tier::MinorModification), (15, Tier::ModerateChange), (25, Tier::MajorAddition)];
    for (count, expected) in cases {
        let current = snapshot(&format!("Ads must not promote gambling services. {}", numbered_policy_sentences(count)));
        let a = engine.assess(Some(&previous), &current);
        assert_eq!(a.magnitude, count, "magnitude for {} added sentences", count);
        assert_eq!(a.tier, expected);
        assert!(a.has_changes);
        assert!(!a.skip_notification);
    }
}

#[test]
fn test_removed_sentences_count_toward_magnitude() {
    let previous = snapshot(&format!("Ads must not promote gambling services. {}", numbered_policy_sentences(12)));
    let current = snapshot("Ads must not promote gambling services.");
    let a = engine().assess(Some(&previous), &current);
    assert_eq!(a.magnitude, 12);
    assert_eq!(a.tier, Tier::ModerateChange);
    assert_eq!(a.signals.unwrap().removed, 12);
}

#[test]
fn test_emptied_document_notifies() {
    let previous = snapshot(&numbered_policy_sentences(7));
    let current = snapshot("");
    let a = engine().assess(Some(&previous), &current);
    assert_eq!(a.tier, Tier::MinorModification);
    assert!(!a.skip_notification);
}

#[test]
fn test_oversized_content_fails_safe() {
    let config = EngineConfig {
        max_content_bytes: 64,
        ..EngineConfig::default()
    };
    let engine = ChangeEngine::new(config).unwrap();
    let previous = snapshot(POLICY_BODY);
    let current = snapshot(&format!("{} Extra.", POLICY_BODY));
    let a = engine.assess(Some(&previous), &current);
    assert_eq!(a.tier, Tier::Unclassified);
    assert!(a.has_changes);
    assert!(!a.skip_notification);
}

#[test]
fn test_retuned_structural_threshold() {
    let previous = snapshot(POLICY_BODY);
    let current = snapshot(&POLICY_BODY.replace(
        "Alcohol ads are allowed in Canada.",
        "Alcohol ads are prohibited in Canada.",
    ));

    let config = EngineConfig {
        structural_threshold: 0.99,
        ..EngineConfig::default()
    };
    let a = ChangeEngine::new(config.clone()).unwrap().assess(Some(&previous), &current);
    assert_eq!(a.tier, Tier::StructuralWithKeywords);
    assert!(!a.has_changes);

    let config = EngineConfig {
        verifier_threshold: 0.97,
        ..config
    };
    let a = ChangeEngine::new(config).unwrap().assess(Some(&previous), &current);
    assert_eq!(a.tier, Tier::CriticalMinorChange);
    assert_eq!(a.magnitude, 0);
    assert!(a.has_changes);
}

#[test]
fn test_single_line_timestamp_churn() {
    let previous = snapshot("Last updated: January 5, 2025. Ads must not promote gambling services.");
    let current = snapshot("Last updated: February 9, 2025. Ads must not promote gambling services.");
    let a = engine().assess(Some(&previous), &current);
    assert_eq!(a.tier, Tier::StructuralOnly);
    assert!(!a.has_changes);
}

#[test]
fn test_single_line_document_gains_critical_clause() {
    let previous = snapshot("Last updated: January 5, 2025. Ads must not promote gambling services.");
    let current = snapshot(
        "Last updated: February 9, 2025. Ads must not promote gambling services. \
         Weapons and firearms are banned worldwide starting March 2027.",
    );
    let a = engine().assess(Some(&previous), &current);
    assert_eq!(a.tier, Tier::CriticalMinorChange);
    assert_eq!(a.magnitude, 1);
    assert!(a.has_changes);

    let signals = a.signals.unwrap();
    assert!(signals.critical_terms.contains("weapons"));
    assert!(signals.real_change_confirmed);
}

#[test]
fn test_inline_breadcrumb_change() {
    let body = POLICY_BODY.replace('\n', " ");
    let previous = snapshot(&format!("Home > Policies > Ads {}", body));
    let current = snapshot(&format!("Home > Help > Ads {}", body));
    let a = engine().assess(Some(&previous), &current);
    assert_eq!(a.tier, Tier::StructuralOnly);
    assert_eq!(a.signals.unwrap().structural_similarity, Some(1.0));
}

#[test]
fn test_inline_breadcrumb_with_critical_clause() {
    let body = POLICY_BODY.replace('\n', " ");
    let previous = snapshot(&format!("Home > Policies > Ads {}", body));
    let current = snapshot(&format!(
        "Home > Help > Ads {} Tobacco ads are banned worldwide starting March 2026.",
        body
    ));
    let a = engine().assess(Some(&previous), &current);
    assert_eq!(a.tier, Tier::CriticalPolicyInStructural);
    assert!(a.signals.unwrap().critical_terms.contains("tobacco"));
}

#[test]
fn test_table_row_edit_is_critical() {
    let previous = snapshot(&format!("{}\nAlcohol | Allowed | All countries", POLICY_BODY));
    let current = snapshot(&format!("{}\nAlcohol | Prohibited | All countries", POLICY_BODY));
    let a = engine().assess(Some(&previous), &current);
    assert_eq!(a.tier, Tier::CriticalPolicyInStructural);
    assert!(a.has_changes);

    let signals = a.signals.unwrap();
    assert!(signals.critical_terms.contains("prohibited"));
    assert!(signals.critical_terms.contains("all countries"));
}

#[test]
fn test_critical_clause_diluted_by_long_policy() {
    let previous = snapshot(&numbered_policy_sentences(30));
    let current = snapshot(&format!(
        "{} Gambling ads are prohibited effective January 2026.",
        numbered_policy_sentences(30)
    ));

    let a = engine().assess(Some(&previous), &current);
    assert_eq!(a.tier, Tier::StructuralWithKeywords);
    assert_eq!(a.magnitude, 1);
    let signals = a.signals.unwrap();
    let similarity = signals.policy_similarity.unwrap();
    assert!(similarity > 0.8 && similarity < 0.9, "policy similarity {}", similarity);
    assert!(!signals.real_change_confirmed);

    let config = EngineConfig {
        verifier_threshold: 0.9,
        ..EngineConfig::default()
    };
    let a = ChangeEngine::new(config).unwrap().assess(Some(&previous), &current);
    assert_eq!(a.tier, Tier::CriticalMinorChange);
}
