//! Core library for the `forecast` client.
//!
//! This crate defines:
//! - The backend API (weather lookup, search history, history deletion)
//! - An element tree and the `View` holding the page panels
//! - Rendering of weather and history payloads into those panels
//! - The event layer tying user actions to the API and the renderer
//! - Configuration handling
//!
//! It is used by `forecast-cli`, but can also be driven by other front ends.

pub mod api;
pub mod app;
pub mod config;
pub mod dom;
pub mod error;
pub mod model;
pub mod render;
pub mod view;

pub use api::{HttpWeatherApi, WeatherApi};
pub use app::{Alert, App, Event};
pub use config::Config;
pub use dom::{Element, NodeId};
pub use error::ApiError;
pub use model::{HistoryEntry, HistoryResponse, WeatherRecord};
pub use view::{Control, HistoryRow, View};
