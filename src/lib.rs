pub mod api;
pub mod controller;
pub mod fetch;
pub mod http_client;
pub mod render;
pub mod state;
