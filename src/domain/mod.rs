// Domain layer: severity model and the ports the engine runs against.

pub mod model;
pub mod ports;
