pub mod app;
pub mod booked;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod controller;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod source;
pub mod state;
pub mod ui;

pub use app::router;
pub use calendar::{advance_month, generate_grid, retreat_month};
pub use config::Config;
pub use controller::CalendarController;
pub use state::AppState;
