pub mod store;

pub use store::{
    AppSettings, default_settings_path, load_required_settings, load_settings, try_load_settings,
};
