pub mod data;
pub mod entity;
