//! BDD step definitions for the homework bot

pub mod translation_steps;
pub mod validation_steps;
