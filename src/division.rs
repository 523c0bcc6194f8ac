use regex::Regex;
use tracing::{debug, instrument};

use crate::error::{RegistryError, SwapError};

/// One row of the league swap policy.
///
/// `tier` and the second element of each `swaps` pair are regex character
/// class bodies, e.g. `"A"` or `"A-C"`.
#[derive(Debug, Clone, Copy)]
pub struct DivisionEntry {
    pub label: &'static str,
    pub age: &'static str,
    pub tier: &'static str,
    pub swaps: &'static [(&'static str, &'static str)],
}

const U9_SWAPS: &[(&str, &str)] = &[("U9", "A-C")];
const U11_SWAPS: &[(&str, &str)] = &[("U11", "A-C"), ("U13", "B-C")];
const U13A_SWAPS: &[(&str, &str)] = &[("U13", "A"), ("U15", "A-B")];
const U13BC_SWAPS: &[(&str, &str)] = &[("U13", "B-C"), ("U11", "A-C")];
const U15_SWAPS: &[(&str, &str)] = &[("U13", "A"), ("U15", "A-B"), ("U18", "A-B")];
const U18_SWAPS: &[(&str, &str)] = &[("U15", "A-B"), ("U18", "A-B")];

const fn entry(
    label: &'static str,
    age: &'static str,
    tier: &'static str,
    swaps: &'static [(&'static str, &'static str)],
) -> DivisionEntry {
    DivisionEntry { label, age, tier, swaps }
}

/// Divisions and swap rules used by the league.
pub const STANDARD_DIVISIONS: &[DivisionEntry] = &[
    entry("U9 A", "U9", "A", U9_SWAPS),
    entry("U9 B", "U9", "B", U9_SWAPS),
    entry("U9 C", "U9", "C", U9_SWAPS),
    entry("U11 A", "U11", "A", U11_SWAPS),
    entry("U11 B", "U11", "B", U11_SWAPS),
    entry("U11 C", "U11", "C", U11_SWAPS),
    entry("U13 A", "U13", "A", U13A_SWAPS),
    entry("U13 B", "U13", "B", U13BC_SWAPS),
    entry("U13 C", "U13", "C", U13BC_SWAPS),
    entry("U15 A", "U15", "A", U15_SWAPS),
    entry("U15 B", "U15", "B", U15_SWAPS),
    entry("U18 A", "U18", "A", U18_SWAPS),
    entry("U18 B", "U18", "B", U18_SWAPS),
];

/// Pattern matching a division field in the given age group whose tier falls in
/// `tiers`. The age must not be followed by another digit and the tier letter
/// must stand alone (optionally followed by a number, as in "B1").
fn tier_pattern(age: &str, tiers: &str) -> String {
    format!(r"\b{age}(?:[^0-9].*[^A-Za-z]|[^0-9A-Za-z])?[{tiers}]\d*(?:[^A-Za-z0-9]|$)")
}

fn swap_description(swaps: &[(&str, &str)]) -> String {
    swaps
        .iter()
        .map(|(age, tiers)| format!("{age} {tiers}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A compiled registry entry.
#[derive(Debug, Clone)]
pub struct DivisionRule {
    label: &'static str,
    description: String,
    membership: Regex,
    compatibility: Regex,
}

impl DivisionRule {
    fn compile(entry: &DivisionEntry) -> Result<Self, RegistryError> {
        let invalid = |source| RegistryError::InvalidPattern {
            label: entry.label.to_string(),
            source,
        };
        let membership = Regex::new(&tier_pattern(entry.age, entry.tier)).map_err(invalid)?;
        let compatibility = entry
            .swaps
            .iter()
            .map(|(age, tiers)| format!("(?:{})", tier_pattern(age, tiers)))
            .collect::<Vec<_>>()
            .join("|");
        let compatibility = Regex::new(&compatibility).map_err(invalid)?;

        Ok(Self {
            label: entry.label,
            description: format!("{} -> {}", entry.label, swap_description(entry.swaps)),
            membership,
            compatibility,
        })
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// e.g. `U13 A -> U13 A, U15 A-B`
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether a game's division field belongs to this division.
    pub fn is_member(&self, division: &str) -> bool {
        self.membership.is_match(division)
    }

    /// Whether a game in `division` may be offered as a swap for this division.
    pub fn is_compatible(&self, division: &str) -> bool {
        self.compatibility.is_match(division)
    }
}

/// Immutable, validated set of division rules.
#[derive(Debug, Clone)]
pub struct DivisionRegistry {
    rules: Vec<DivisionRule>,
}

impl DivisionRegistry {
    /// Build the registry for the league's standard divisions.
    pub fn standard() -> Result<Self, RegistryError> {
        Self::from_entries(STANDARD_DIVISIONS)
    }

    /// Compile and validate a table of entries.
    #[instrument(level = "debug", skip(entries), fields(count = entries.len()))]
    pub fn from_entries(entries: &[DivisionEntry]) -> Result<Self, RegistryError> {
        let rules = entries
            .iter()
            .map(DivisionRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        let registry = Self { rules };
        registry.validate()?;
        debug!("Division registry validated");
        Ok(registry)
    }

    /// Every label must be claimed by exactly its own rule and every rule must
    /// accept swaps within its own division.
    fn validate(&self) -> Result<(), RegistryError> {
        for rule in &self.rules {
            let matches = self.matching_labels(rule.label);
            if matches != [rule.label] {
                return Err(RegistryError::NotExclusive {
                    label: rule.label.to_string(),
                    matches: matches.into_iter().map(str::to_string).collect(),
                });
            }
            if !rule.is_compatible(rule.label) {
                return Err(RegistryError::NotReflexive {
                    label: rule.label.to_string(),
                });
            }
        }
        Ok(())
    }

    fn matching_labels(&self, division: &str) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|rule| rule.is_member(division))
            .map(|rule| rule.label)
            .collect()
    }

    /// Find the single rule whose membership predicate matches a game's
    /// division field.
    pub fn resolve(&self, division: &str) -> Result<&DivisionRule, SwapError> {
        let mut matching = self.rules.iter().filter(|rule| rule.is_member(division));
        match (matching.next(), matching.next()) {
            (Some(rule), None) => Ok(rule),
            _ => Err(SwapError::AmbiguousDivision {
                division: division.to_string(),
                matches: self
                    .matching_labels(division)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            }),
        }
    }

    pub fn get(&self, label: &str) -> Option<&DivisionRule> {
        self.rules.iter().find(|rule| rule.label == label)
    }

    pub fn rules(&self) -> &[DivisionRule] {
        &self.rules
    }
}
