//! Flavor Types
//!
//! Flavors are the preference axes an actor uses to bias every downstream
//! weighted decision. A [`FlavorVector`] holds one integer per axis; unset
//! axes read as zero.
//!
//! # Example
//!
//! ```
//! use strategy_types::{Flavor, FlavorType, FlavorVector};
//!
//! let mut flavors = FlavorVector::new();
//! flavors += Flavor::new(FlavorType::Offense, 15);
//! flavors.add(FlavorType::Offense, -5);
//! assert_eq!(flavors.value(FlavorType::Offense), 10);
//! assert_eq!(flavors.value(FlavorType::Gold), 0);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

/// Number of preference axes.
pub const FLAVOR_COUNT: usize = 29;

/// A single preference axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlavorType {
    Production,
    TileImprovement,
    Mobile,
    Growth,
    Naval,
    NavalTileImprovement,
    Wonder,
    NavalRecon,
    Amenities,
    Science,
    Culture,
    Diplomacy,
    CityDefense,
    Ranged,
    Offense,
    Defense,
    MilitaryTraining,
    Infrastructure,
    Gold,
    NavalGrowth,
    Energy,
    Expansion,
    GreatPeople,
    Religion,
    Tourism,
    Recon,
    Air,
    WaterConnection,
    UseNuke,
}

impl FlavorType {
    /// All axes in declaration order.
    pub const ALL: [FlavorType; FLAVOR_COUNT] = [
        FlavorType::Production,
        FlavorType::TileImprovement,
        FlavorType::Mobile,
        FlavorType::Growth,
        FlavorType::Naval,
        FlavorType::NavalTileImprovement,
        FlavorType::Wonder,
        FlavorType::NavalRecon,
        FlavorType::Amenities,
        FlavorType::Science,
        FlavorType::Culture,
        FlavorType::Diplomacy,
        FlavorType::CityDefense,
        FlavorType::Ranged,
        FlavorType::Offense,
        FlavorType::Defense,
        FlavorType::MilitaryTraining,
        FlavorType::Infrastructure,
        FlavorType::Gold,
        FlavorType::NavalGrowth,
        FlavorType::Energy,
        FlavorType::Expansion,
        FlavorType::GreatPeople,
        FlavorType::Religion,
        FlavorType::Tourism,
        FlavorType::Recon,
        FlavorType::Air,
        FlavorType::WaterConnection,
        FlavorType::UseNuke,
    ];

    /// Position of this axis inside a [`FlavorVector`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Snake-case name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            FlavorType::Production => "production",
            FlavorType::TileImprovement => "tile_improvement",
            FlavorType::Mobile => "mobile",
            FlavorType::Growth => "growth",
            FlavorType::Naval => "naval",
            FlavorType::NavalTileImprovement => "naval_tile_improvement",
            FlavorType::Wonder => "wonder",
            FlavorType::NavalRecon => "naval_recon",
            FlavorType::Amenities => "amenities",
            FlavorType::Science => "science",
            FlavorType::Culture => "culture",
            FlavorType::Diplomacy => "diplomacy",
            FlavorType::CityDefense => "city_defense",
            FlavorType::Ranged => "ranged",
            FlavorType::Offense => "offense",
            FlavorType::Defense => "defense",
            FlavorType::MilitaryTraining => "military_training",
            FlavorType::Infrastructure => "infrastructure",
            FlavorType::Gold => "gold",
            FlavorType::NavalGrowth => "naval_growth",
            FlavorType::Energy => "energy",
            FlavorType::Expansion => "expansion",
            FlavorType::GreatPeople => "great_people",
            FlavorType::Religion => "religion",
            FlavorType::Tourism => "tourism",
            FlavorType::Recon => "recon",
            FlavorType::Air => "air",
            FlavorType::WaterConnection => "water_connection",
            FlavorType::UseNuke => "use_nuke",
        }
    }
}

impl fmt::Display for FlavorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FlavorType {
    type Err = ParseFlavorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FlavorType::ALL
            .iter()
            .copied()
            .find(|flavor| flavor.name() == s)
            .ok_or_else(|| ParseFlavorError(s.to_string()))
    }
}

/// Error returned when a string does not name a flavor axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFlavorError(pub String);

impl fmt::Display for ParseFlavorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown flavor axis: {}", self.0)
    }
}

impl std::error::Error for ParseFlavorError {}

/// One (axis, delta) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flavor {
    pub flavor_type: FlavorType,
    pub value: i32,
}

impl Flavor {
    pub fn new(flavor_type: FlavorType, value: i32) -> Self {
        Self { flavor_type, value }
    }
}

/// Fixed-key preference vector with one integer per [`FlavorType`].
///
/// Serializes as a map holding only the non-zero axes, so catalog files can
/// list just the flavors a strategy touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, i32>",
    into = "BTreeMap<String, i32>"
)]
pub struct FlavorVector {
    values: [i32; FLAVOR_COUNT],
}

impl Default for FlavorVector {
    fn default() -> Self {
        Self::new()
    }
}

impl FlavorVector {
    /// Creates a vector with every axis at zero.
    pub fn new() -> Self {
        Self {
            values: [0; FLAVOR_COUNT],
        }
    }

    /// Builds a vector from a list of flavors; repeated axes accumulate.
    pub fn from_flavors(flavors: &[Flavor]) -> Self {
        flavors.iter().copied().collect()
    }

    /// Sums any number of vectors axis by axis.
    pub fn sum_of<'a>(vectors: impl IntoIterator<Item = &'a FlavorVector>) -> Self {
        let mut total = Self::new();
        for vector in vectors {
            total += vector;
        }
        total
    }

    pub fn value(&self, flavor_type: FlavorType) -> i32 {
        self.values[flavor_type.index()]
    }

    pub fn set(&mut self, flavor_type: FlavorType, value: i32) {
        self.values[flavor_type.index()] = value;
    }

    pub fn add(&mut self, flavor_type: FlavorType, delta: i32) {
        self.values[flavor_type.index()] += delta;
    }

    /// Zeroes every axis.
    pub fn reset(&mut self) {
        self.values = [0; FLAVOR_COUNT];
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0)
    }

    /// Sum over all axes of `self[axis] * other[axis]`.
    pub fn dot(&self, other: &FlavorVector) -> i64 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| i64::from(*a) * i64::from(*b))
            .sum()
    }

    /// Copy with negative axes raised to zero.
    pub fn clamped_non_negative(&self) -> Self {
        let mut clamped = *self;
        for value in clamped.values.iter_mut() {
            *value = (*value).max(0);
        }
        clamped
    }

    /// Iterates every axis with its value, zero axes included.
    pub fn iter(&self) -> impl Iterator<Item = Flavor> + '_ {
        FlavorType::ALL
            .iter()
            .map(move |flavor_type| Flavor::new(*flavor_type, self.value(*flavor_type)))
    }

    /// Iterates only the axes with a non-zero value.
    pub fn non_zero(&self) -> impl Iterator<Item = Flavor> + '_ {
        self.iter().filter(|flavor| flavor.value != 0)
    }
}

impl AddAssign<&FlavorVector> for FlavorVector {
    fn add_assign(&mut self, other: &FlavorVector) {
        for (value, delta) in self.values.iter_mut().zip(other.values.iter()) {
            *value += *delta;
        }
    }
}

impl AddAssign<FlavorVector> for FlavorVector {
    fn add_assign(&mut self, other: FlavorVector) {
        *self += &other;
    }
}

impl AddAssign<Flavor> for FlavorVector {
    fn add_assign(&mut self, flavor: Flavor) {
        self.add(flavor.flavor_type, flavor.value);
    }
}

impl FromIterator<Flavor> for FlavorVector {
    fn from_iter<I: IntoIterator<Item = Flavor>>(iter: I) -> Self {
        let mut vector = FlavorVector::new();
        for flavor in iter {
            vector += flavor;
        }
        vector
    }
}

impl TryFrom<BTreeMap<String, i32>> for FlavorVector {
    type Error = ParseFlavorError;

    fn try_from(map: BTreeMap<String, i32>) -> Result<Self, Self::Error> {
        let mut vector = FlavorVector::new();
        for (name, value) in map {
            let flavor_type = FlavorType::from_str(&name)?;
            vector.set(flavor_type, value);
        }
        Ok(vector)
    }
}

impl From<FlavorVector> for BTreeMap<String, i32> {
    fn from(vector: FlavorVector) -> Self {
        vector
            .non_zero()
            .map(|flavor| (flavor.flavor_type.name().to_string(), flavor.value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_axes_default_to_zero() {
        let flavors = FlavorVector::new();
        for flavor_type in FlavorType::ALL {
            assert_eq!(flavors.value(flavor_type), 0);
        }
        assert!(flavors.is_zero());
    }

    #[test]
    fn test_all_axes_have_distinct_indices() {
        for (position, flavor_type) in FlavorType::ALL.iter().enumerate() {
            assert_eq!(flavor_type.index(), position);
        }
    }

    #[test]
    fn test_add_assign_vector() {
        let mut a = FlavorVector::from_flavors(&[
            Flavor::new(FlavorType::Offense, 15),
            Flavor::new(FlavorType::Wonder, -10),
        ]);
        let b = FlavorVector::from_flavors(&[
            Flavor::new(FlavorType::Offense, -5),
            Flavor::new(FlavorType::Gold, 25),
        ]);

        a += &b;

        assert_eq!(a.value(FlavorType::Offense), 10);
        assert_eq!(a.value(FlavorType::Wonder), -10);
        assert_eq!(a.value(FlavorType::Gold), 25);
    }

    #[test]
    fn test_repeated_axes_accumulate() {
        let flavors = FlavorVector::from_flavors(&[
            Flavor::new(FlavorType::Recon, 10),
            Flavor::new(FlavorType::Recon, -25),
        ]);
        assert_eq!(flavors.value(FlavorType::Recon), -15);
    }

    #[test]
    fn test_dot_product() {
        let personality = FlavorVector::from_flavors(&[
            Flavor::new(FlavorType::Amenities, 6),
            Flavor::new(FlavorType::Gold, 4),
        ]);
        let modifiers = FlavorVector::from_flavors(&[
            Flavor::new(FlavorType::Amenities, 1),
            Flavor::new(FlavorType::NavalRecon, -1),
        ]);
        assert_eq!(personality.dot(&modifiers), 6);
    }

    #[test]
    fn test_clamped_non_negative() {
        let flavors = FlavorVector::from_flavors(&[
            Flavor::new(FlavorType::Offense, -30),
            Flavor::new(FlavorType::Gold, 15),
        ]);
        let clamped = flavors.clamped_non_negative();
        assert_eq!(clamped.value(FlavorType::Offense), 0);
        assert_eq!(clamped.value(FlavorType::Gold), 15);
    }

    #[test]
    fn test_flavor_name_round_trip() {
        for flavor_type in FlavorType::ALL {
            assert_eq!(flavor_type.name().parse::<FlavorType>(), Ok(flavor_type));
        }
        assert!("spice".parse::<FlavorType>().is_err());
    }

    #[test]
    fn test_serializes_only_non_zero_axes() {
        let flavors = FlavorVector::from_flavors(&[Flavor::new(FlavorType::CityDefense, 25)]);
        let json = serde_json::to_string(&flavors).unwrap();
        assert_eq!(json, r#"{"city_defense":25}"#);
    }

    #[test]
    fn test_deserialize_from_toml_table() {
        #[derive(Deserialize)]
        struct Wrapper {
            flavors: FlavorVector,
        }

        let parsed: Wrapper = toml::from_str(
            r#"
            [flavors]
            expansion = 75
            naval_growth = -5
            "#,
        )
        .unwrap();

        assert_eq!(parsed.flavors.value(FlavorType::Expansion), 75);
        assert_eq!(parsed.flavors.value(FlavorType::NavalGrowth), -5);
    }

    #[test]
    fn test_deserialize_rejects_unknown_axis() {
        let result: Result<FlavorVector, _> = serde_json::from_str(r#"{"spice": 3}"#);
        assert!(result.is_err());
    }
}
