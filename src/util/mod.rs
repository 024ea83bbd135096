pub mod format;
pub mod persistence;
pub mod version;
