use serde::{Deserialize, Serialize};

use super::model::{Experiment, ExperimentSet};

// ---------------------------------------------------------------------------
// Group rule: which instruments are overlaid together
// ---------------------------------------------------------------------------

/// Assigns instruments to a named group by a case-insensitive substring
/// match on the instrument name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRule {
    pub name: String,
    pub pattern: String,
}

impl GroupRule {
    pub fn new(name: &str, pattern: &str) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
        }
    }

    pub fn matches(&self, instrument_name: &str) -> bool {
        instrument_name
            .to_lowercase()
            .contains(&self.pattern.to_lowercase())
    }

    /// Burettes and pipettes, the two families of the reference data set.
    pub fn defaults() -> Vec<Self> {
        vec![Self::new("Burettes", "burette"), Self::new("Pipettes", "pipette")]
    }
}

/// A named selection of experiments, in data-set order.
#[derive(Debug, Clone)]
pub struct InstrumentGroup<'a> {
    pub name: &'a str,
    pub members: Vec<&'a Experiment>,
}

/// Partition a data set by the given rules.
///
/// * One group per rule, in rule order.
/// * Rules that match nothing are dropped.
/// * An instrument matching several rules appears in each of those groups.
pub fn partition<'a>(set: &'a ExperimentSet, rules: &'a [GroupRule]) -> Vec<InstrumentGroup<'a>> {
    rules
        .iter()
        .map(|rule| InstrumentGroup {
            name: &rule.name,
            members: set
                .experiments
                .iter()
                .filter(|exp| rule.matches(exp.name()))
                .collect(),
        })
        .filter(|group| !group.members.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_set_splits_into_burettes_and_pipettes() {
        let set = ExperimentSet::builtin();
        let rules = GroupRule::defaults();
        let groups = partition(&set, &rules);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Burettes");
        assert_eq!(groups[0].members.len(), 2);
        assert_eq!(groups[1].name, "Pipettes");
        // graduated pipettes plus the micropipette
        assert_eq!(groups[1].members.len(), 3);
    }

    #[test]
    fn match_is_case_insensitive() {
        assert!(GroupRule::new("B", "burette").matches("10mL Burette"));
        assert!(!GroupRule::new("B", "burette").matches("pipette"));
    }

    #[test]
    fn empty_groups_are_dropped() {
        let set = ExperimentSet::builtin();
        let rules = vec![GroupRule::new("Flasks", "flask")];
        assert!(partition(&set, &rules).is_empty());
    }
}
