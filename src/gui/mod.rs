pub mod app;
pub mod background;
pub mod presentation;
pub mod sections;
pub mod theme;
pub mod ticker;
