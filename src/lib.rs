// Library exports for the desktop binary, the dev backend and integration tests

pub mod api;
pub mod config;
pub mod dev_backend;
pub mod flows;
pub mod resource;
pub mod ui;
