//! Entity kinds that live on the track and their type-specific data.

use serde::{Deserialize, Serialize};

/// Hide-spot quality tiers. Better spots scrub more scent; culverts need a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HideSpotType {
    Bush,
    Tree,
    Shed,
    House,
    Culvert,
}

impl HideSpotType {
    pub const ALL: [HideSpotType; 5] = [
        HideSpotType::Bush,
        HideSpotType::Tree,
        HideSpotType::Shed,
        HideSpotType::House,
        HideSpotType::Culvert,
    ];

    /// Catalog id as used in biome pools and unlock keys.
    pub fn id(&self) -> &'static str {
        match self {
            HideSpotType::Bush => "bush",
            HideSpotType::Tree => "tree",
            HideSpotType::Shed => "shed",
            HideSpotType::House => "house",
            HideSpotType::Culvert => "culvert",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.id() == id)
    }

    pub fn label(&self) -> &'static str {
        match self {
            HideSpotType::Bush => "Bush",
            HideSpotType::Tree => "Tree",
            HideSpotType::Shed => "Shed",
            HideSpotType::House => "House",
            HideSpotType::Culvert => "Culvert",
        }
    }

    pub fn requires_slide(&self) -> bool {
        matches!(self, HideSpotType::Culvert)
    }

    /// Scent removed by a successful hide (12..40).
    pub fn scent_reduce_strength(&self) -> f32 {
        match self {
            HideSpotType::Bush => 12.0,
            HideSpotType::Tree => 20.0,
            HideSpotType::Shed => 28.0,
            HideSpotType::House => 34.0,
            HideSpotType::Culvert => 40.0,
        }
    }

    pub fn unlock_key(&self) -> String {
        format!("hideSpot:{}", self.id())
    }
}

/// The move that gets the dog past an obstacle without a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clearance {
    Jump,
    Slide,
}

impl Clearance {
    /// Map a biome obstacle id onto its clearance. Unknown ids are jumpable.
    pub fn for_obstacle(id: &str) -> Self {
        match id {
            "log" | "mud" | "pipe" | "wire" | "fallenSign" => Clearance::Slide,
            _ => Clearance::Jump,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    FoodSmall,
    FoodBig,
    RareFood,
}

impl PickupKind {
    pub fn from_id(id: &str) -> Self {
        match id {
            "foodBig" => PickupKind::FoodBig,
            "rareFood" => PickupKind::RareFood,
            _ => PickupKind::FoodSmall,
        }
    }

    pub fn hunger_restore(&self) -> f32 {
        match self {
            PickupKind::FoodSmall => 0.10,
            PickupKind::FoodBig => 0.20,
            PickupKind::RareFood => 0.30,
        }
    }

    /// Multiplier on the food score bonus.
    pub fn score_factor(&self) -> f32 {
        match self {
            PickupKind::RareFood => 2.0,
            _ => 1.0,
        }
    }
}

/// What the bear skill-check demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BearRequirement {
    Jump,
    Slide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneZoneType {
    Safe,
    Risk,
    Shortcut,
}

impl LaneZoneType {
    pub fn label(&self) -> &'static str {
        match self {
            LaneZoneType::Safe => "SAFE",
            LaneZoneType::Risk => "RISK",
            LaneZoneType::Shortcut => "SHORTCUT",
        }
    }
}

/// Creatures resolved from animal/predator markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Creature {
    Deer,
    Skunk,
    Moose,
    MountainLion,
}

impl Creature {
    /// Deer and moose run across the whole track rather than occupying one lane.
    pub fn crosses_track(&self) -> bool {
        matches!(self, Creature::Deer | Creature::Moose)
    }

    /// Heavy hitters also slow the dog.
    pub fn slows_on_hit(&self) -> bool {
        matches!(self, Creature::Moose | Creature::MountainLion)
    }
}

/// Component describing what a track entity is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    Obstacle(Clearance),
    Pickup(PickupKind),
    HideSpot(HideSpotType),
    Checkpoint,
    Animal(Creature),
    /// Lingering skunk cloud.
    StinkCloud,
    Bear(BearRequirement),
    CoverZone,
    LightningZone,
    IcePatch,
    LaneZone(LaneZoneType),
    /// Placeholder dropped by the spawner; resolved into a creature the same frame.
    AnimalMarker,
    PredatorMarker,
    /// Visual tell before a mountain lion pounce. Never collides.
    LionWarning,
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Obstacle(_) => "obstacle",
            EntityKind::Pickup(_) => "food",
            EntityKind::HideSpot(_) => "hideSpot",
            EntityKind::Checkpoint => "checkpoint",
            EntityKind::Animal(Creature::Deer) => "deer",
            EntityKind::Animal(Creature::Skunk) => "skunk",
            EntityKind::Animal(Creature::Moose) => "moose",
            EntityKind::Animal(Creature::MountainLion) => "mountainLion",
            EntityKind::StinkCloud => "stinkCloud",
            EntityKind::Bear(_) => "bear",
            EntityKind::CoverZone => "coverZone",
            EntityKind::LightningZone => "lightningZone",
            EntityKind::IcePatch => "icePatch",
            EntityKind::LaneZone(_) => "laneZone",
            EntityKind::AnimalMarker => "spawnAnimalMarker",
            EntityKind::PredatorMarker => "spawnPredatorMarker",
            EntityKind::LionWarning => "lionWarning",
        }
    }

    /// Half-length along the track used by the contact probe.
    pub fn half_length(&self) -> f32 {
        match self {
            EntityKind::Obstacle(_) => 35.0,
            EntityKind::Pickup(_) => 25.0,
            EntityKind::HideSpot(_) => 50.0,
            EntityKind::Checkpoint => 40.0,
            EntityKind::Animal(_) => 40.0,
            EntityKind::StinkCloud => 60.0,
            EntityKind::Bear(_) => 45.0,
            EntityKind::CoverZone | EntityKind::LightningZone => 50.0,
            EntityKind::IcePatch => 40.0,
            // Lane zones carry their own extent.
            EntityKind::LaneZone(_) => 0.0,
            EntityKind::AnimalMarker | EntityKind::PredatorMarker | EntityKind::LionWarning => 0.0,
        }
    }

    /// Whether contact ignores the lane (checkpoint gates, crossing animals).
    pub fn spans_all_lanes(&self) -> bool {
        match self {
            EntityKind::Checkpoint => true,
            EntityKind::Animal(c) => c.crosses_track(),
            _ => false,
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, EntityKind::AnimalMarker | EntityKind::PredatorMarker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_culvert_requires_slide() {
        for h in HideSpotType::ALL {
            assert_eq!(h.requires_slide(), h == HideSpotType::Culvert);
        }
    }

    #[test]
    fn scent_strength_grows_with_quality() {
        let strengths: Vec<f32> = HideSpotType::ALL.iter().map(|h| h.scent_reduce_strength()).collect();
        assert!(strengths.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(HideSpotType::Bush.scent_reduce_strength(), 12.0);
        assert_eq!(HideSpotType::Culvert.scent_reduce_strength(), 40.0);
    }

    #[test]
    fn ids_round_trip() {
        for h in HideSpotType::ALL {
            assert_eq!(HideSpotType::from_id(h.id()), Some(h));
        }
        assert_eq!(HideSpotType::from_id("castle"), None);
        assert_eq!(HideSpotType::Shed.unlock_key(), "hideSpot:shed");
    }

    #[test]
    fn pickup_ids_fall_back_to_small_food() {
        assert_eq!(PickupKind::from_id("rareFood"), PickupKind::RareFood);
        assert_eq!(PickupKind::from_id("mystery"), PickupKind::FoodSmall);
    }

    #[test]
    fn obstacle_clearance_mapping() {
        assert_eq!(Clearance::for_obstacle("log"), Clearance::Slide);
        assert_eq!(Clearance::for_obstacle("trashcan"), Clearance::Jump);
        assert_eq!(Clearance::for_obstacle("unknown"), Clearance::Jump);
    }
}
