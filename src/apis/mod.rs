pub mod base;
pub mod factory;
pub mod kbga;

pub use base::Registry;
pub use factory::{create_registry, registry_from_config};
pub use kbga::KbgaRegistry;
