//! Commune: top-level administrative unit of the registry.

use aquareg_core::{DomainError, DomainResult, Record, RecordId};

/// A commune (municipality) covered by the water/sanitation programme.
#[derive(Debug, Clone, PartialEq)]
pub struct Commune {
    pub id: Option<RecordId>,
    /// Display name; required.
    pub name: String,
    /// Administrative code; required, unique by convention (not enforced).
    pub code: String,
    pub population: Option<i64>,
}

impl Commune {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            code: code.into(),
            population: None,
        }
    }
}

/// Sparse attribute set for partial commune updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommunePatch {
    pub name: Option<String>,
    pub code: Option<String>,
    pub population: Option<i64>,
}

impl Record for Commune {
    type Patch = CommunePatch;

    const KIND: &'static str = "commune";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.code.trim().is_empty() {
            return Err(DomainError::validation("code cannot be empty"));
        }
        Ok(())
    }

    fn merge(&mut self, patch: CommunePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(code) = patch.code {
            self.code = code;
        }
        if let Some(population) = patch.population {
            self.population = Some(population);
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("name", self.name.clone()), ("code", self.code.clone())];
        if let Some(population) = self.population {
            fields.push(("population", population.to_string()));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_requires_name_and_code() {
        let commune = Commune::new("Grand-Popo", "GP-01");
        assert!(commune.validate().is_ok());

        let blank_name = Commune::new("   ", "GP-01");
        assert!(matches!(
            blank_name.validate(),
            Err(DomainError::Validation(_))
        ));

        let blank_code = Commune::new("Grand-Popo", "");
        assert!(matches!(
            blank_code.validate(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn merge_overlays_only_present_fields() {
        let mut commune = Commune::new("Grand-Popo", "GP-01");
        commune.population = Some(57_636);

        commune.merge(CommunePatch {
            name: Some("Grand-Popo Centre".to_string()),
            ..CommunePatch::default()
        });

        assert_eq!(commune.name, "Grand-Popo Centre");
        assert_eq!(commune.code, "GP-01");
        assert_eq!(commune.population, Some(57_636));
    }

    #[test]
    fn merge_with_empty_patch_is_a_no_op() {
        let mut commune = Commune::new("Athieme", "AT-02");
        let before = commune.clone();
        commune.merge(CommunePatch::default());
        assert_eq!(commune, before);
    }

    #[test]
    fn fields_omit_unset_optionals() {
        let commune = Commune::new("Athieme", "AT-02");
        let fields = commune.fields();
        assert!(fields.iter().all(|(name, _)| *name != "population"));

        let mut commune = commune;
        commune.population = Some(1_000);
        assert!(
            commune
                .fields()
                .iter()
                .any(|(name, value)| *name == "population" && value == "1000")
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: merging a name-only patch never disturbs other fields.
            #[test]
            fn name_patch_leaves_other_fields_alone(
                name in "[A-Za-z][A-Za-z -]{0,40}",
                new_name in "[A-Za-z][A-Za-z -]{0,40}",
                code in "[A-Z]{2}-[0-9]{2}",
                population in proptest::option::of(0i64..10_000_000),
            ) {
                let mut commune = Commune::new(name, code.clone());
                commune.population = population;

                commune.merge(CommunePatch {
                    name: Some(new_name.clone()),
                    ..CommunePatch::default()
                });

                prop_assert_eq!(commune.name, new_name);
                prop_assert_eq!(commune.code, code);
                prop_assert_eq!(commune.population, population);
            }
        }
    }
}
