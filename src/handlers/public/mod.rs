// handlers/public/mod.rs - Public handlers (no authentication required)

pub mod health;
pub mod pages;
pub mod settings;

pub use health::health;
pub use pages::{forbidden_page, not_found, root, signin_page};
pub use settings::settings_get;
