//! Procedural content for the track: weighted pools, biome catalog, and
//! date-seeded daily challenge/mission generation.

pub mod biome;
pub mod daily;
pub mod weighted;

pub use biome::*;
pub use daily::*;
pub use weighted::*;
