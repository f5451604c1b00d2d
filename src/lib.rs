pub mod almagest;
pub mod almagest_errors;
pub mod angles;
pub mod batch;
pub mod constants;
pub mod earth_orientation;
pub mod env_state;
pub mod equinox;
pub mod lunar;
pub mod observers;
pub mod planets;
pub mod ref_system;
pub mod riseset;
pub mod scheduler;
pub mod series;
pub mod sun;
pub mod time;
