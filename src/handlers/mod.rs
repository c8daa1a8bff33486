// handlers/mod.rs - three access tiers
//
// Public (anyone) → Admin (admin session; pages redirect, API answers 401/403)
// → Cron (shared bearer secret)
pub mod admin;
pub mod cron;
pub mod public;
