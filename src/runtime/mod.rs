pub mod app;
pub mod lifetime;
