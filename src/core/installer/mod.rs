pub mod local;

pub use local::{
    ensure_mods_dir, install_from_staging, install_selected, validate_install_path, MOD_EXTENSION,
};
