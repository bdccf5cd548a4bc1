// Domain layer: response models and the API port. No I/O here.

pub mod model;
pub mod ports;
