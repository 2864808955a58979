//! Required module selection: deterministic mission rules.
//!
//! Every habitat gets the same base set. Mission type, duration and
//! crew size each add one module independently. Output order is the
//! base set followed by the additions in rule order; the packer relies
//! on that order.

use crate::budget::LONG_MISSION_DAYS;
use crate::catalog::names;
use crate::params::{MissionParameters, MissionType};

/// Crews larger than this need a dedicated medical bay.
pub const MEDICAL_BAY_CREW_THRESHOLD: u32 = 4;

/// Modules present in every habitat, in packing order.
pub const BASE_MODULES: [&str; 7] = [
    names::PRIVATE_QUARTERS,
    names::WASHROOM,
    names::WASTE_HUMAN,
    names::WASTE_TRASH,
    names::GYM,
    names::HABITATION,
    names::STORAGE,
];

/// Ordered list of module names the mission requires.
pub fn required_modules(params: &MissionParameters) -> Vec<String> {
    let mut modules: Vec<String> = BASE_MODULES.iter().map(|m| m.to_string()).collect();

    if params.mission_type == MissionType::ScienceResearch {
        modules.push(names::LABORATORY.to_string());
    }
    if params.mission_type == MissionType::Exploration {
        modules.push(names::AIRLOCK.to_string());
    }
    if params.mission_days > LONG_MISSION_DAYS {
        modules.push(names::GREENHOUSE.to_string());
    }
    if params.crew_size > MEDICAL_BAY_CREW_THRESHOLD {
        modules.push(names::MEDICAL_BAY.to_string());
    }

    modules
}
