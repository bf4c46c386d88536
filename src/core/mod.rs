pub mod algorithm;
pub mod generator;
pub mod interaction;
pub mod list;
pub mod map;
pub mod pdg;
