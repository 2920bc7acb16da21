pub mod bgg;
pub mod prediction;
pub mod reference;
