// src/handlers/mod.rs

pub mod auth;
pub mod classes;
pub mod exams;
pub mod feedback;
pub mod marks;
pub mod results;
pub mod root;
pub mod sections;
pub mod students;
