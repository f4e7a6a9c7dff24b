//! Military Strategies
//!
//! Army composition and war-footing strategies of an actor.

use strategy_types::FlavorType::*;

use crate::catalog::{StrategyCatalog, StrategyCatalogEntry, StrategyCatalogEntryBuilder};
use crate::error::CatalogError;

strategy_ids! {
    /// Military strategy identity.
    MilitaryStrategy {
        NeedRanged => "need_ranged",
        EnoughRanged => "enough_ranged",
        NeedMilitaryUnits => "need_military_units",
        EnoughMilitaryUnits => "enough_military_units",
        NeedNavalUnits => "need_naval_units",
        NeedNavalUnitsCritical => "need_naval_units_critical",
        EnoughNavalUnits => "enough_naval_units",
        EmpireDefense => "empire_defense",
        EmpireDefenseCritical => "empire_defense_critical",
        AtWar => "at_war",
        WarMobilization => "war_mobilization",
        EradicateBarbarians => "eradicate_barbarians",
        WinningWars => "winning_wars",
        LosingWars => "losing_wars",
    }
}

fn timed(label: &str, not_before: i32, recheck: i32, minimum: i32) -> StrategyCatalogEntryBuilder {
    StrategyCatalogEntry::builder(label)
        .not_before_turn(not_before)
        .recheck_interval(recheck)
        .minimum_adoption(minimum)
}

impl MilitaryStrategy {
    pub fn catalog() -> Result<StrategyCatalog<Self>, CatalogError> {
        use MilitaryStrategy::*;

        Ok(StrategyCatalog::builder()
            .entry(
                NeedRanged,
                timed("Need Ranged", 25, 2, 2)
                    .flavor(Offense, -5)
                    .flavor(Defense, -5)
                    .flavor(Ranged, 20)
                    .build()?,
            )
            .entry(
                EnoughRanged,
                timed("Enough Ranged", 25, 2, 2)
                    .flavor(Offense, 5)
                    .flavor(Defense, 5)
                    .flavor(Ranged, -20)
                    .build()?,
            )
            .entry(NeedMilitaryUnits, timed("Need Military Units", 25, 2, 2).build()?)
            .entry(
                EnoughMilitaryUnits,
                timed("Enough Military Units", 25, 2, 2)
                    .major_only()
                    .flavor(Offense, -50)
                    .flavor(Defense, -50)
                    .flavor(Ranged, -50)
                    .build()?,
            )
            .entry(NeedNavalUnits, timed("Need Naval Units", 50, 2, 2).major_only().build()?)
            .entry(
                NeedNavalUnitsCritical,
                timed("Need Naval Units Critical", 50, 2, 2).major_only().build()?,
            )
            .entry(EnoughNavalUnits, timed("Enough Naval Units", 50, 2, 2).major_only().build()?)
            .entry(EmpireDefense, timed("Empire Defense", 25, 2, 2).major_only().build()?)
            .entry(EmpireDefenseCritical, timed("Empire Defense Critical", 25, 2, 5).build()?)
            .entry(
                AtWar,
                timed("At War", 0, 1, 5)
                    .major_only()
                    .flavor(Offense, 15)
                    .flavor(Defense, 15)
                    .flavor(Ranged, 15)
                    .flavor(CityDefense, 10)
                    .flavor(Wonder, -10)
                    .build()?,
            )
            .entry(
                WarMobilization,
                timed("War Mobilization", 0, 5, 15)
                    .major_only()
                    .flavor(Offense, 10)
                    .flavor(Defense, 10)
                    .flavor(Ranged, 10)
                    .flavor(MilitaryTraining, 10)
                    .build()?,
            )
            .entry(
                EradicateBarbarians,
                timed("Eradicate Barbarians", 25, 5, 5)
                    .major_only()
                    .flavor(Offense, 5)
                    .build()?,
            )
            .entry(
                WinningWars,
                timed("Winning Wars", 0, 2, 2)
                    .major_only()
                    .flavor(Offense, 5)
                    .flavor(Defense, -5)
                    .build()?,
            )
            .entry(
                LosingWars,
                timed("Losing Wars", 0, 2, 2)
                    .major_only()
                    .flavor(Offense, -5)
                    .flavor(Defense, 5)
                    .flavor(CityDefense, 25)
                    .flavor(Expansion, -15)
                    .flavor(TileImprovement, -10)
                    .flavor(Recon, -15)
                    .flavor(Wonder, -15)
                    .build()?,
            )
            .build()?)
    }
}
