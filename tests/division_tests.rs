use game_swap_finder::division::{DivisionEntry, DivisionRegistry, STANDARD_DIVISIONS};
use game_swap_finder::error::{RegistryError, SwapError};

fn registry() -> DivisionRegistry {
    DivisionRegistry::standard().expect("standard registry should validate")
}

#[test]
fn every_label_resolves_to_itself() {
    let registry = registry();
    assert_eq!(registry.rules().len(), STANDARD_DIVISIONS.len());
    for entry in STANDARD_DIVISIONS {
        let rule = registry.resolve(entry.label).expect("label should resolve");
        assert_eq!(rule.label(), entry.label);
    }
}

#[test]
fn compatibility_is_reflexive() {
    for rule in registry().rules() {
        assert!(rule.is_compatible(rule.label()), "{} not compatible with itself", rule.label());
    }
}

#[test]
fn resolves_realistic_division_fields() {
    let registry = registry();
    let cases = [
        ("U13 Girls B1", "U13 B"),
        ("U15A", "U15 A"),
        ("U18 B2", "U18 B"),
        ("U9 C", "U9 C"),
        ("GHA U11 A3", "U11 A"),
        ("U13 BANTAM A", "U13 A"),
    ];
    for (field, expected) in cases {
        let rule = registry.resolve(field).unwrap_or_else(|e| panic!("{field}: {e}"));
        assert_eq!(rule.label(), expected, "division field {field:?}");
    }
}

#[test]
fn unknown_or_overlapping_division_is_ambiguous() {
    let registry = registry();

    match registry.resolve("U7 A") {
        Err(SwapError::AmbiguousDivision { division, matches }) => {
            assert_eq!(division, "U7 A");
            assert!(matches.is_empty());
        }
        other => panic!("expected AmbiguousDivision, got {other:?}"),
    }

    match registry.resolve("U13 A/B") {
        Err(SwapError::AmbiguousDivision { matches, .. }) => {
            assert_eq!(matches, ["U13 A", "U13 B"]);
        }
        other => panic!("expected AmbiguousDivision, got {other:?}"),
    }

    // Age groups are whole numbers
    assert!(registry.resolve("U130 A").is_err());
}

fn compatible_labels(registry: &DivisionRegistry, label: &str) -> Vec<&'static str> {
    let rule = registry.get(label).expect("known label");
    STANDARD_DIVISIONS
        .iter()
        .map(|e| e.label)
        .filter(|other| rule.is_compatible(other))
        .collect()
}

#[test]
fn swap_policy_table() {
    let registry = registry();
    let u9 = ["U9 A", "U9 B", "U9 C"];
    let u11 = ["U11 A", "U11 B", "U11 C", "U13 B", "U13 C"];
    let u13bc = ["U11 A", "U11 B", "U11 C", "U13 B", "U13 C"];
    let u15 = ["U13 A", "U15 A", "U15 B", "U18 A", "U18 B"];
    let u18 = ["U15 A", "U15 B", "U18 A", "U18 B"];

    for label in u9 {
        assert_eq!(compatible_labels(&registry, label), u9, "{label}");
    }
    for label in ["U11 A", "U11 B", "U11 C"] {
        assert_eq!(compatible_labels(&registry, label), u11, "{label}");
    }
    assert_eq!(compatible_labels(&registry, "U13 A"), ["U13 A", "U15 A", "U15 B"]);
    for label in ["U13 B", "U13 C"] {
        assert_eq!(compatible_labels(&registry, label), u13bc, "{label}");
    }
    for label in ["U15 A", "U15 B"] {
        assert_eq!(compatible_labels(&registry, label), u15, "{label}");
    }
    for label in ["U18 A", "U18 B"] {
        assert_eq!(compatible_labels(&registry, label), u18, "{label}");
    }
}

#[test]
fn compatibility_applies_to_free_text_fields() {
    let registry = registry();
    let u13a = registry.get("U13 A").unwrap();
    assert!(u13a.is_compatible("U15 Girls B2"));
    assert!(!u13a.is_compatible("U13 Girls B1"));
    assert!(!u13a.is_compatible("U11 A"));

    let u11 = registry.get("U11 B").unwrap();
    assert!(u11.is_compatible("U13 C1"));
    assert!(!u11.is_compatible("U13 A1"));
}

#[test]
fn overlapping_table_is_rejected() {
    const SWAPS: &[(&str, &str)] = &[("U13", "A-B")];
    let entries = [
        DivisionEntry { label: "U13 A", age: "U13", tier: "A", swaps: SWAPS },
        DivisionEntry { label: "U13 AB", age: "U13", tier: "A-B", swaps: SWAPS },
    ];
    match DivisionRegistry::from_entries(&entries) {
        Err(RegistryError::NotExclusive { label, matches }) => {
            assert_eq!(label, "U13 A");
            assert_eq!(matches, ["U13 A", "U13 AB"]);
        }
        other => panic!("expected NotExclusive, got {other:?}"),
    }
}

#[test]
fn non_reflexive_table_is_rejected() {
    const SWAPS: &[(&str, &str)] = &[("U15", "A-B")];
    let entries = [DivisionEntry { label: "U13 A", age: "U13", tier: "A", swaps: SWAPS }];
    assert!(matches!(
        DivisionRegistry::from_entries(&entries),
        Err(RegistryError::NotReflexive { .. })
    ));
}

#[test]
fn invalid_pattern_is_rejected() {
    const SWAPS: &[(&str, &str)] = &[("U13", "A")];
    let entries = [DivisionEntry { label: "U13 A", age: "U13", tier: "Z-A", swaps: SWAPS }];
    assert!(matches!(
        DivisionRegistry::from_entries(&entries),
        Err(RegistryError::InvalidPattern { .. })
    ));
}
