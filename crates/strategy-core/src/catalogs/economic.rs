//! Economic Strategies
//!
//! Expansion, recon, happiness and treasury strategies of an actor. Most are
//! re-checked every turn; the weight thresholds are read by the predicates.

use strategy_types::FlavorType::*;
use strategy_types::TechOrCivicRef;

use crate::catalog::{StrategyCatalog, StrategyCatalogEntry};
use crate::error::CatalogError;

strategy_ids! {
    /// Economic strategy identity.
    EconomicStrategy {
        NeedRecon => "need_recon",
        EnoughRecon => "enough_recon",
        ReallyNeedReconSea => "really_need_recon_sea",
        EarlyExpansion => "early_expansion",
        FoundCity => "found_city",
        LosingMoney => "losing_money",
        ExpandLikeCrazy => "expand_like_crazy",
        ExpandToOtherContinents => "expand_to_other_continents",
        NeedHappiness => "need_happiness",
        NeedHappinessCritical => "need_happiness_critical",
        IslandStart => "island_start",
        NavalMap => "naval_map",
        NeedReconSea => "need_recon_sea",
        EnoughReconSea => "enough_recon_sea",
        EnoughExpansion => "enough_expansion",
        NeedNavalGrowth => "need_naval_growth",
        NeedNavalTileImprovement => "need_naval_tile_improvement",
        TradeWithCityState => "trade_with_city_state",
        NeedImprovementFood => "need_improvement_food",
        NeedImprovementProduction => "need_improvement_production",
        OneOrFewerCoastalCities => "one_or_fewer_coastal_cities",
        HaltGrowthBuildings => "halt_growth_buildings",
        TooManyUnits => "too_many_units",
    }
}

impl EconomicStrategy {
    pub fn catalog() -> Result<StrategyCatalog<Self>, CatalogError> {
        use EconomicStrategy::*;
        let entry = StrategyCatalogEntry::builder;

        Ok(StrategyCatalog::builder()
            .entry(
                NeedRecon,
                entry("Need Recon").major_only().not_before_turn(5).flavor(Recon, 10).build()?,
            )
            .entry(
                EnoughRecon,
                entry("Enough Recon").major_only().not_before_turn(5).flavor(Recon, -25).build()?,
            )
            .entry(
                ReallyNeedReconSea,
                entry("Really Need Recon Sea")
                    .major_only()
                    .not_before_turn(50)
                    .flavor(NavalRecon, 50)
                    .flavor(Naval, 10)
                    .build()?,
            )
            .entry(
                EarlyExpansion,
                entry("Early Expansion")
                    .major_only()
                    .recheck_interval(5)
                    .minimum_adoption(10)
                    .weight_threshold(3)
                    .flavor(NavalGrowth, -5)
                    .flavor(Expansion, 75)
                    .flavor(Production, -4)
                    .flavor(Gold, -4)
                    .flavor(Science, -4)
                    .flavor(Culture, -4)
                    .build()?,
            )
            .entry(
                FoundCity,
                entry("Found City").major_only().weight_threshold(10).build()?,
            )
            .entry(
                LosingMoney,
                entry("Losing Money")
                    .recheck_interval(5)
                    .minimum_adoption(5)
                    .weight_threshold(2)
                    .not_before_turn(20)
                    .flavor(Gold, 25)
                    .flavor(Offense, -10)
                    .flavor(Defense, -10)
                    .build()?,
            )
            .entry(
                ExpandLikeCrazy,
                entry("Expand Like Crazy")
                    .major_only()
                    .recheck_interval(10)
                    .minimum_adoption(25)
                    .weight_threshold(10)
                    .not_before_turn(25)
                    .flavor(Expansion, 10)
                    .build()?,
            )
            .entry(
                ExpandToOtherContinents,
                entry("Expand To Other Continents")
                    .major_only()
                    .recheck_interval(10)
                    .minimum_adoption(25)
                    .weight_threshold(50)
                    .prerequisite(TechOrCivicRef::tech("ship_building"))
                    .flavor(Naval, 20)
                    .flavor(NavalTileImprovement, 10)
                    .flavor(NavalGrowth, 5)
                    .flavor(WaterConnection, 10)
                    .flavor(NavalRecon, 5)
                    .flavor(Offense, -10)
                    .flavor(Defense, -10)
                    .flavor(Expansion, 75)
                    .flavor(CityDefense, -10)
                    .flavor(Recon, 10)
                    .build()?,
            )
            .entry(
                NeedHappiness,
                entry("Need Happiness")
                    .weight_threshold(2)
                    .threshold_modifier(Amenities, 1)
                    .flavor(Amenities, 35)
                    .flavor(Expansion, -10)
                    .flavor(Growth, -5)
                    .build()?,
            )
            .entry(
                NeedHappinessCritical,
                entry("Need Happiness Critical")
                    .weight_threshold(-3)
                    .flavor(Amenities, 250)
                    .flavor(Expansion, -10)
                    .flavor(Growth, -10)
                    .build()?,
            )
            .entry(
                IslandStart,
                entry("Island Start")
                    .minimum_adoption(50)
                    .weight_threshold(200)
                    .flavor(Naval, 20)
                    .flavor(NavalTileImprovement, 10)
                    .flavor(NavalGrowth, 5)
                    .flavor(WaterConnection, 5)
                    .flavor(Offense, -5)
                    .flavor(Defense, -5)
                    .flavor(Recon, -20)
                    .build()?,
            )
            .entry(
                NavalMap,
                entry("Naval Map")
                    .major_only()
                    .minimum_adoption(10)
                    .not_before_turn(1)
                    .flavor(NavalRecon, 20)
                    .flavor(Naval, 20)
                    .flavor(WaterConnection, 5)
                    .build()?,
            )
            .entry(
                NeedReconSea,
                entry("Need Recon Sea")
                    .major_only()
                    .not_before_turn(5)
                    .threshold_modifier(NavalRecon, -1)
                    .flavor(NavalRecon, 20)
                    .build()?,
            )
            .entry(
                EnoughReconSea,
                entry("Enough Recon Sea")
                    .major_only()
                    .not_before_turn(5)
                    .flavor(NavalRecon, -200)
                    .build()?,
            )
            .entry(
                EnoughExpansion,
                entry("Enough Expansion")
                    .major_only()
                    .recheck_interval(5)
                    .weight_threshold(1)
                    .flavor(Expansion, -10)
                    .build()?,
            )
            .entry(
                NeedNavalGrowth,
                entry("Need Naval Growth")
                    .recheck_interval(5)
                    .minimum_adoption(5)
                    .weight_threshold(40)
                    .flavor(NavalGrowth, 15)
                    .build()?,
            )
            .entry(
                NeedNavalTileImprovement,
                entry("Need Naval Tile Improvement")
                    .minimum_adoption(5)
                    .weight_threshold(25)
                    .flavor(NavalTileImprovement, 20)
                    .build()?,
            )
            .entry(
                TradeWithCityState,
                entry("Trade With City State").weight_threshold(10).build()?,
            )
            .entry(
                NeedImprovementFood,
                entry("Need Improvement Food")
                    .weight_threshold(10)
                    .not_before_turn(20)
                    .flavor(TileImprovement, 20)
                    .flavor(Growth, 20)
                    .build()?,
            )
            .entry(
                NeedImprovementProduction,
                entry("Need Improvement Production")
                    .weight_threshold(10)
                    .not_before_turn(20)
                    .flavor(TileImprovement, 10)
                    .flavor(Production, 10)
                    .build()?,
            )
            .entry(
                OneOrFewerCoastalCities,
                entry("One Or Fewer Coastal Cities")
                    .minimum_adoption(10)
                    .weight_threshold(10)
                    .flavor(WaterConnection, -10)
                    .build()?,
            )
            .entry(
                HaltGrowthBuildings,
                entry("Halt Growth Buildings")
                    .major_only()
                    .not_before_turn(20)
                    .flavor(Growth, -15)
                    .build()?,
            )
            .entry(
                TooManyUnits,
                entry("Too Many Units")
                    .not_before_turn(20)
                    .flavor(Offense, -30)
                    .flavor(Naval, -30)
                    .flavor(Ranged, -30)
                    .flavor(Mobile, -30)
                    .flavor(Recon, -50)
                    .flavor(Gold, 15)
                    .flavor(Growth, 20)
                    .flavor(Science, 15)
                    .flavor(Culture, 10)
                    .flavor(Amenities, 10)
                    .flavor(Wonder, 5)
                    .build()?,
            )
            .build()?)
    }
}
