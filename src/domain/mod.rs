// Domain layer: resources, layout plans and the ports the engine talks through.

pub mod model;
pub mod ports;
