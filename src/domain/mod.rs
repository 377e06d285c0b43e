// Domain layer: wire models, analysis result types, and ports (interfaces).

pub mod model;
pub mod ports;
