//! Shared domain - cross-cutting типы
//!
//! Содержит то, что используют несколько доменов:
//! - Spawn announcements (SpawnKind, SpawnRequested) для presentation слоя

pub mod spawn;

// Re-export all
pub use spawn::*;
