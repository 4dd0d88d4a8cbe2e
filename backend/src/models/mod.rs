// src/models/mod.rs

pub mod class_details;
pub mod exam;
pub mod feedback;
pub mod marks;
pub mod student;
pub mod user;
