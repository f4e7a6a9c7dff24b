//! City Strategies
//!
//! Per-settlement strategies. They carry no flavors of their own; the
//! settlement's build planner reads them directly. Terrain strategies are
//! permanent once the city is known to have the feature.

use crate::catalog::{StrategyCatalog, StrategyCatalogEntry, StrategyCatalogEntryBuilder};
use crate::error::CatalogError;

strategy_ids! {
    /// City strategy identity.
    CityStrategy {
        TinyCity => "tiny_city",
        SmallCity => "small_city",
        MediumCity => "medium_city",
        LargeCity => "large_city",
        LandLocked => "land_locked",
        NeedTileImprovers => "need_tile_improvers",
        WantTileImprovers => "want_tile_improvers",
        EnoughTileImprovers => "enough_tile_improvers",
        NeedNavalGrowth => "need_naval_growth",
        NeedNavalTileImprovement => "need_naval_tile_improvement",
        EnoughNavalTileImprovement => "enough_naval_tile_improvement",
        NeedImprovementFood => "need_improvement_food",
        NeedImprovementProduction => "need_improvement_production",
        HaveTrainingFacility => "have_training_facility",
        CapitalNeedSettler => "capital_need_settler",
        CapitalUnderThreat => "capital_under_threat",
        UnderBlockade => "under_blockade",
        CoastCity => "coast_city",
        RiverCity => "river_city",
        MountainCity => "mountain_city",
        HillCity => "hill_city",
        ForestCity => "forest_city",
        JungleCity => "jungle_city",
    }
}

fn checked(label: &str, recheck: i32, minimum: i32) -> StrategyCatalogEntryBuilder {
    StrategyCatalogEntry::builder(label)
        .recheck_interval(recheck)
        .minimum_adoption(minimum)
}

fn permanent(label: &str) -> StrategyCatalogEntryBuilder {
    StrategyCatalogEntry::builder(label).permanent()
}

impl CityStrategy {
    pub fn catalog() -> Result<StrategyCatalog<Self>, CatalogError> {
        use CityStrategy::*;

        Ok(StrategyCatalog::builder()
            .entry(TinyCity, checked("Tiny City", 5, 5).build()?)
            .entry(SmallCity, checked("Small City", 5, 5).build()?)
            .entry(MediumCity, checked("Medium City", 5, 5).build()?)
            .entry(LargeCity, checked("Large City", 5, 5).build()?)
            .entry(LandLocked, permanent("Land Locked").build()?)
            .entry(NeedTileImprovers, checked("Need Tile Improvers", 2, 2).build()?)
            .entry(WantTileImprovers, checked("Want Tile Improvers", 2, 2).build()?)
            .entry(EnoughTileImprovers, checked("Enough Tile Improvers", 5, 10).build()?)
            .entry(NeedNavalGrowth, checked("Need Naval Growth", 5, 10).build()?)
            .entry(
                NeedNavalTileImprovement,
                checked("Need Naval Tile Improvement", 1, 2).build()?,
            )
            .entry(
                EnoughNavalTileImprovement,
                checked("Enough Naval Tile Improvement", 1, 2).build()?,
            )
            .entry(NeedImprovementFood, checked("Need Improvement Food", 2, 2).build()?)
            .entry(
                NeedImprovementProduction,
                checked("Need Improvement Production", 2, 2).build()?,
            )
            .entry(HaveTrainingFacility, permanent("Have Training Facility").build()?)
            .entry(CapitalNeedSettler, checked("Capital Need Settler", 2, 4).build()?)
            .entry(CapitalUnderThreat, checked("Capital Under Threat", 2, 2).build()?)
            .entry(UnderBlockade, checked("Under Blockade", 2, 2).build()?)
            .entry(CoastCity, permanent("Coast City").build()?)
            .entry(RiverCity, permanent("River City").build()?)
            .entry(MountainCity, permanent("Mountain City").build()?)
            .entry(HillCity, permanent("Hill City").build()?)
            .entry(ForestCity, checked("Forest City", 2, 2).build()?)
            .entry(JungleCity, checked("Jungle City", 2, 2).build()?)
            .build()?)
    }

    /// Size bands are mutually exclusive; exactly one applies to a city.
    pub fn size_band(population: u32) -> Self {
        match population {
            0..=1 => CityStrategy::TinyCity,
            2..=4 => CityStrategy::SmallCity,
            5..=11 => CityStrategy::MediumCity,
            _ => CityStrategy::LargeCity,
        }
    }
}
