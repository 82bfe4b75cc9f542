//! Built-in hazard lists
//!
//! Static per-method, per-category hazard names. Session additions live in
//! `catalog::HazardCatalog`, never here.

use crate::category::{Category, Method};

/// Built-in hazards for a category under a method, in display order
///
/// Empty when the method does not offer the category.
pub fn builtin_hazards(method: Method, category: Category) -> &'static [&'static str] {
    match (method, category) {
        (Method::Dgms, Category::GroundMovement) => DGMS_GROUND_MOVEMENT,
        (Method::Dgms, Category::RopeHaulage) => DGMS_ROPE_HAULAGE,
        (Method::Dgms, Category::BeltConveyor) => DGMS_BELT_CONVEYOR,
        (Method::Dgms, Category::Explosives) => DGMS_EXPLOSIVES,
        (Method::Dgms, Category::DustGasCombustible) => DGMS_DUST_GAS,
        (Method::Dgms, Category::Inundation) => DGMS_INUNDATION,
        (Method::Dgms, Category::LoadHaulDumper) => DGMS_LHD,
        (Method::Dgms, Category::MineFire) => DGMS_MINE_FIRE,
        (Method::Tram, Category::GroundMovement) => TRAM_GROUND_MOVEMENT,
        (Method::Tram, Category::EquipmentFailure) => TRAM_EQUIPMENT_FAILURE,
        (Method::Tram, Category::Environmental) => TRAM_ENVIRONMENTAL,
        (Method::Tram, Category::HumanFactors) => TRAM_HUMAN_FACTORS,
        _ => &[],
    }
}

const DGMS_GROUND_MOVEMENT: &[&str] = &[
    "Presence of subsidence cracks and fissures",
    "Geologically disturbed areas or weak old supports",
    "Poor knowledge of approved Systematic Support Rules",
    "Rock Mass Rating not determined properly",
    "Poorly supported or unsupported roof",
    "Delay in supporting freshly exposed roof",
    "Inadequate timber support",
    "Failure to maintain proper working height",
    "Poor ventilation causing roof deterioration",
    "Excessive blasting vibrations",
    "Water seepage weakening roof structure",
    "Improper pillar extraction",
    "Inadequate monitoring of ground movement",
    "Poor communication of geological conditions",
    "Failure to follow approved mining plan",
    "Inadequate emergency evacuation procedures",
    "Insufficient training on ground stability",
];

const DGMS_ROPE_HAULAGE: &[&str] = &[
    "Non-provision of safety appliances",
    "Unexpected movement of tubs",
    "Defective rope or rope splicing",
    "Failure to inspect haulage road",
    "Inadequate maintenance of haulage equipment",
    "Poor visibility on haulage roads",
    "Excessive speed of rope haulage",
    "Improper loading of tubs",
    "Defective signal system",
    "Inadequate lighting on haulage roads",
    "Poor drainage causing slippery conditions",
    "Obstruction on haulage roads",
    "Inadequate training of operators",
    "Failure to follow haulage procedures",
    "Defective braking system",
];

const DGMS_BELT_CONVEYOR: &[&str] = &[
    "Friction in running belt due to spillage",
    "Operator wearing loose dress",
    "Improper belt condition",
    "Failure of pull cord switches",
    "Inadequate belt guarding",
    "Poor maintenance of conveyor",
    "Excessive belt speed",
    "Improper material loading",
    "Defective emergency stops",
    "Poor lighting around conveyor",
    "Spillage creating slip hazards",
    "Inadequate training of operators",
    "Failure to lockout during maintenance",
    "Defective belt alignment",
    "Poor housekeeping around conveyor",
    "Inadequate fire protection",
    "Defective roller bearings",
    "Poor belt tensioning",
    "Inadequate noise protection",
    "Defective belt cleaning system",
];

const DGMS_EXPLOSIVES: &[&str] = &[
    "Improper storage of explosives",
    "Inadequate blast design",
    "Poor shot firing practices",
    "Defective detonators",
    "Inadequate blast hole stemming",
    "Poor timing of blast",
    "Inadequate evacuation procedures",
    "Defective explosive materials",
    "Poor blast area security",
    "Inadequate training of shot firers",
    "Improper handling of misfires",
    "Poor blast vibration control",
    "Inadequate blast documentation",
    "Defective blasting equipment",
    "Poor explosive transportation",
];

const DGMS_DUST_GAS: &[&str] = &[
    "Inadequate dust suppression",
    "Poor ventilation system",
    "Accumulation of combustible dust",
    "Defective gas monitoring",
    "Inadequate methane drainage",
    "Poor air circulation",
    "Defective dust monitoring equipment",
    "Inadequate training on gas hazards",
    "Poor maintenance of ventilation equipment",
    "Inadequate emergency response for gas",
    "Defective gas detection alarms",
    "Poor housekeeping causing dust accumulation",
    "Inadequate respiratory protection",
    "Poor control of ignition sources",
    "Inadequate gas testing procedures",
];

const DGMS_INUNDATION: &[&str] = &[
    "Inadequate water management",
    "Poor drainage system",
    "Defective pumping equipment",
    "Inadequate monitoring of water levels",
    "Poor knowledge of old workings",
    "Inadequate barrier pillars",
    "Defective water detection equipment",
    "Poor emergency response for flooding",
    "Inadequate training on water hazards",
    "Poor maintenance of drainage equipment",
    "Inadequate water quality monitoring",
    "Defective water management plan",
    "Poor control of surface water",
    "Inadequate underground water mapping",
    "Defective flood warning system",
];

const DGMS_LHD: &[&str] = &[
    "Inadequate operator training",
    "Poor maintenance of LHD",
    "Defective braking system",
    "Poor visibility from operator cabin",
    "Inadequate lighting in work area",
    "Defective steering system",
    "Poor road conditions",
    "Inadequate communication system",
    "Defective safety devices",
    "Poor loading procedures",
    "Inadequate fire protection",
    "Defective hydraulic system",
    "Poor operator fatigue management",
    "Inadequate traffic management",
    "Defective backup alarms",
];

const DGMS_MINE_FIRE: &[&str] = &[
    "Inadequate fire prevention measures",
    "Poor fire detection system",
    "Defective fire suppression equipment",
    "Inadequate evacuation procedures",
    "Poor control of ignition sources",
    "Inadequate training on fire safety",
    "Defective fire fighting equipment",
    "Poor maintenance of electrical equipment",
    "Inadequate fire resistant materials",
    "Poor emergency communication",
    "Inadequate fire barriers",
    "Defective smoke detection",
    "Poor fire investigation procedures",
    "Inadequate fire safety inspections",
    "Defective emergency lighting",
];

const TRAM_GROUND_MOVEMENT: &[&str] = &["Roof fall", "Pillar failure", "Side wall collapse"];

const TRAM_EQUIPMENT_FAILURE: &[&str] = &[
    "Conveyor malfunction",
    "Haulage system failure",
    "LHD breakdown",
];

const TRAM_ENVIRONMENTAL: &[&str] = &["Gas emission", "Water inrush", "Fire hazard"];

const TRAM_HUMAN_FACTORS: &[&str] = &[
    "Operator error",
    "Safety protocol violation",
    "Training inadequacy",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_offered_category_has_hazards() {
        for method in [Method::Dgms, Method::Tram] {
            for category in method.categories() {
                assert!(
                    !builtin_hazards(method, *category).is_empty(),
                    "{} / {} has no hazards",
                    method,
                    category
                );
            }
        }
    }

    #[test]
    fn test_shared_category_differs_per_method() {
        let dgms = builtin_hazards(Method::Dgms, Category::GroundMovement);
        let tram = builtin_hazards(Method::Tram, Category::GroundMovement);
        assert_eq!(dgms.len(), 17);
        assert_eq!(tram, &["Roof fall", "Pillar failure", "Side wall collapse"]);
    }

    #[test]
    fn test_category_outside_method_is_empty() {
        assert!(builtin_hazards(Method::Tram, Category::MineFire).is_empty());
        assert!(builtin_hazards(Method::Dgms, Category::HumanFactors).is_empty());
    }
}
