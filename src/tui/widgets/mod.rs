pub mod export;
pub mod generator;
pub mod help;
pub mod library;
pub mod root;
pub mod sidebar;
