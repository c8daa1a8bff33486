pub mod serve;
pub mod settings;
pub mod token;
