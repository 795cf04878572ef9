pub mod overlay;
pub mod viewer;
