pub mod store;

pub use store::{default_minecraft_dir, ConfigStore, Settings};
