// Domain layer: dataset records, stage reports and ports (interfaces).

pub mod model;
pub mod ports;
