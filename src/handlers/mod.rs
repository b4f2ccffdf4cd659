// src/handlers/mod.rs

pub mod links;
pub mod notes;
pub mod questions;
pub mod quizzes;
pub mod reports;
pub mod submissions;
pub mod users;
