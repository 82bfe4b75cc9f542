//! Assessment methods and hazard categories
//!
//! Categories are a closed set. Each method exposes its own ordered subset;
//! `Ground Movement` is shared by both methods.

use crate::scale::{ScaleTable, DGMS_SCALES, TRAM_SCALES};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk assessment methodology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Linear consequence x exposure x probability model
    Dgms,
    /// Fuzzy linguistic model with AHP category weights and VIKOR ranking
    Tram,
}

const DGMS_CATEGORIES: &[Category] = &[
    Category::GroundMovement,
    Category::RopeHaulage,
    Category::BeltConveyor,
    Category::Explosives,
    Category::DustGasCombustible,
    Category::Inundation,
    Category::LoadHaulDumper,
    Category::MineFire,
];

const TRAM_CATEGORIES: &[Category] = &[
    Category::GroundMovement,
    Category::EquipmentFailure,
    Category::Environmental,
    Category::HumanFactors,
];

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Dgms => "DGMS",
            Method::Tram => "TRAM",
        }
    }

    /// Categories offered by this method, in display order
    pub fn categories(&self) -> &'static [Category] {
        match self {
            Method::Dgms => DGMS_CATEGORIES,
            Method::Tram => TRAM_CATEGORIES,
        }
    }

    /// Scale table used by this method
    pub fn scales(&self) -> &'static ScaleTable {
        match self {
            Method::Dgms => &DGMS_SCALES,
            Method::Tram => &TRAM_SCALES,
        }
    }

    /// Whether `category` belongs to this method
    pub fn offers(&self, category: Category) -> bool {
        self.categories().contains(&category)
    }

    /// Resolve an exact, case-sensitive category name within this method
    pub fn category(&self, name: &str) -> Option<Category> {
        self.categories()
            .iter()
            .copied()
            .find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hazard category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    GroundMovement,
    RopeHaulage,
    BeltConveyor,
    Explosives,
    DustGasCombustible,
    Inundation,
    LoadHaulDumper,
    MineFire,
    EquipmentFailure,
    Environmental,
    HumanFactors,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::GroundMovement => "Ground Movement",
            Category::RopeHaulage => "Rope Haulage System",
            Category::BeltConveyor => "Belt Conveyor System",
            Category::Explosives => "Explosives",
            Category::DustGasCombustible => "Dust, Gas and Other Combustible Material",
            Category::Inundation => "Inundation",
            Category::LoadHaulDumper => "Load Haul Dumper",
            Category::MineFire => "Mine Fire",
            Category::EquipmentFailure => "Equipment Failure",
            Category::Environmental => "Environmental",
            Category::HumanFactors => "Human Factors",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
