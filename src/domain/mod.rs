// Domain layer: data model and ports. Concrete implementations live in core/, adapters/ and config/.

pub mod model;
pub mod ports;
