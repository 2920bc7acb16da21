pub mod buckets;
pub mod clusters;
mod game;

pub use game::{GameDisplayRecord, GameSummary, HotGame, HotList};
