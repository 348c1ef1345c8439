// Presentation layer - View controllers and rendering sinks
pub mod dashboard;
pub mod event_view;
pub mod surfaces;
