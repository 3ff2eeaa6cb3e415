//! Terminal UI: components, views, avatar loading, and the render loop.

pub mod app;
pub mod avatar;
pub mod colors;
pub mod components;
pub mod data_source;
pub mod views;
