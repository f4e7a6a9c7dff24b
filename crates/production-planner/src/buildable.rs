//! Buildable Items
//!
//! What a settlement can put into production: units, buildings, districts,
//! wonders and projects, each with its own flavors and build time.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strategy_types::{Flavor, FlavorType, FlavorVector};
use thiserror::Error;

/// Errors from loading a production menu.
#[derive(Debug, Error)]
pub enum BuildableError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("duplicate buildable name: {0}")]
    DuplicateName(String),
}

/// Category of a buildable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildableKind {
    Unit,
    Building,
    District,
    Wonder,
    Project,
}

/// What a unit is for once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitTask {
    Settle,
    Work,
    Explore,
    Attack,
    Defend,
}

/// One production option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buildable {
    pub name: String,
    pub kind: BuildableKind,
    #[serde(default)]
    pub flavors: FlavorVector,
    /// Estimated turns until complete in the producing settlement
    pub turns_to_complete: i32,
    #[serde(default)]
    pub task: Option<UnitTask>,
}

impl Buildable {
    pub fn new(name: impl Into<String>, kind: BuildableKind, turns_to_complete: i32) -> Self {
        Self {
            name: name.into(),
            kind,
            flavors: FlavorVector::new(),
            turns_to_complete,
            task: None,
        }
    }

    pub fn unit(name: impl Into<String>, task: UnitTask, turns_to_complete: i32) -> Self {
        Self {
            task: Some(task),
            ..Self::new(name, BuildableKind::Unit, turns_to_complete)
        }
    }

    pub fn with_flavor(mut self, flavor_type: FlavorType, value: i32) -> Self {
        self.flavors += Flavor::new(flavor_type, value);
        self
    }

    pub fn flavor(&self, flavor_type: FlavorType) -> i32 {
        self.flavors.value(flavor_type)
    }

    pub fn is_settler(&self) -> bool {
        self.task == Some(UnitTask::Settle)
    }

    pub fn is_builder(&self) -> bool {
        self.task == Some(UnitTask::Work)
    }
}

/// Buildables listed in a TOML file as `[[buildable]]` tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildableList {
    #[serde(default)]
    pub buildable: Vec<Buildable>,
}

impl BuildableList {
    /// Parses `[[buildable]]` tables. Names must be unique.
    pub fn from_toml_str(content: &str) -> Result<Self, BuildableError> {
        let list: Self = toml::from_str(content)?;
        let mut seen = BTreeSet::new();
        for item in &list.buildable {
            if !seen.insert(item.name.as_str()) {
                return Err(BuildableError::DuplicateName(item.name.clone()));
            }
        }
        Ok(list)
    }
}

/// A small early-era production menu.
pub fn starter_buildables() -> Vec<Buildable> {
    use FlavorType::*;

    vec![
        Buildable::unit("settler", UnitTask::Settle, 8)
            .with_flavor(Expansion, 9)
            .with_flavor(Growth, 2),
        Buildable::unit("builder", UnitTask::Work, 5)
            .with_flavor(TileImprovement, 10)
            .with_flavor(Growth, 2),
        Buildable::unit("scout", UnitTask::Explore, 3)
            .with_flavor(Recon, 8)
            .with_flavor(Defense, 1),
        Buildable::unit("warrior", UnitTask::Attack, 4)
            .with_flavor(Offense, 3)
            .with_flavor(Defense, 3),
        Buildable::unit("slinger", UnitTask::Defend, 4)
            .with_flavor(Ranged, 8)
            .with_flavor(Defense, 2),
        Buildable::new("monument", BuildableKind::Building, 6)
            .with_flavor(Culture, 7)
            .with_flavor(Tourism, 3),
        Buildable::new("granary", BuildableKind::Building, 8)
            .with_flavor(Growth, 10)
            .with_flavor(Amenities, 2),
        Buildable::new("campus", BuildableKind::District, 12).with_flavor(Science, 8),
        Buildable::new("pyramids", BuildableKind::Wonder, 30)
            .with_flavor(Wonder, 8)
            .with_flavor(TileImprovement, 2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_task_helpers() {
        let settler = Buildable::unit("settler", UnitTask::Settle, 8);
        assert!(settler.is_settler());
        assert!(!settler.is_builder());
        assert_eq!(settler.kind, BuildableKind::Unit);
        assert!(Buildable::unit("builder", UnitTask::Work, 5).is_builder());
    }

    #[test]
    fn test_with_flavor_accumulates() {
        let item = Buildable::new("granary", BuildableKind::Building, 8)
            .with_flavor(FlavorType::Growth, 6)
            .with_flavor(FlavorType::Growth, 4);
        assert_eq!(item.flavor(FlavorType::Growth), 10);
        assert_eq!(item.task, None);
    }

    #[test]
    fn test_starter_menu_names_unique() {
        let items = starter_buildables();
        let mut names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), items.len());
    }

    #[test]
    fn test_buildable_list_from_toml() {
        let toml = r#"
[[buildable]]
name = "galley"
kind = "unit"
turns_to_complete = 6
task = "explore"

[buildable.flavors]
naval = 8
naval_recon = 4

[[buildable]]
name = "lighthouse"
kind = "building"
turns_to_complete = 9
"#;
        let list = BuildableList::from_toml_str(toml).unwrap();
        assert_eq!(list.buildable.len(), 2);
        assert_eq!(list.buildable[0].task, Some(UnitTask::Explore));
        assert_eq!(list.buildable[0].flavor(FlavorType::Naval), 8);
        assert!(list.buildable[1].flavors.is_zero());
    }

    #[test]
    fn test_buildable_list_rejects_duplicate_names() {
        let toml = r#"
[[buildable]]
name = "galley"
kind = "unit"
turns_to_complete = 6

[[buildable]]
name = "galley"
kind = "unit"
turns_to_complete = 3
"#;
        let error = BuildableList::from_toml_str(toml).unwrap_err();
        assert!(matches!(error, BuildableError::DuplicateName(ref name) if name == "galley"));
        assert!(matches!(BuildableList::from_toml_str("buildable = 3"), Err(BuildableError::Toml(_))));
    }
}
