// Domain layer: models, built-in content and ports (interfaces).

pub mod catalog;
pub mod model;
pub mod ports;
