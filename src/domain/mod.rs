// Domain layer: wire models and ports. No HTTP or terminal code here.

pub mod model;
pub mod ports;
