pub mod access;
pub mod find;
