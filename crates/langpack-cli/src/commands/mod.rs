pub mod download;
pub mod format;
pub mod languages;
pub mod mirror;
pub mod packs;
pub mod update;
