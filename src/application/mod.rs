// Application layer - Services and the data pipeline
pub mod chart_surface;
pub mod event_charts;
pub mod event_service;
pub mod live_charts;
pub mod monitor_api;
pub mod poller;
