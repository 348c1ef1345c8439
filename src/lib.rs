// Client-side monitoring pipeline for a multi-phase power sensor node
pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;
