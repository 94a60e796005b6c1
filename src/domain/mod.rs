// Domain layer: core models and the ports (interfaces) that adapters implement.

pub mod model;
pub mod ports;
