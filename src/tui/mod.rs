pub mod app;
pub mod render;
pub mod runner;
pub mod spinner;
pub mod state;
pub mod theme;

pub use app::App;
pub use render::DashboardView;
pub use spinner::Spinner;
pub use state::{DashboardState, Phase};
pub use theme::Theme;
