// handlers/admin/mod.rs - admin pages (behind the access gate) and the
// admin settings API (AdminSession extractor)

pub mod dashboard;
pub mod settings;

pub use dashboard::{dashboard, settings_page};
pub use settings::{setting_get, settings_list, settings_put};
