//! Built-in strategy catalogs for the military, economic and city layers.

/// Declares a layer's strategy enum together with its `StrategyId` and
/// `Display` impls. Each variant maps to its snake_case catalog key.
macro_rules! strategy_ids {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $key:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $crate::actor::StrategyId for $name {
            fn all() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::actor::StrategyId::name(*self))
            }
        }
    };
}

pub mod city;
pub mod economic;
pub mod military;

pub use city::CityStrategy;
pub use economic::EconomicStrategy;
pub use military::MilitaryStrategy;
