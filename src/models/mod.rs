// src/models/mod.rs

pub mod answer;
pub mod link;
pub mod note;
pub mod question;
pub mod quiz;
pub mod result;
pub mod user;
