pub mod account;
pub mod flashcard;
pub mod marathon;
pub mod quiz;
pub mod stats;
