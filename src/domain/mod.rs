// Domain layer: the model object and its ports. Nothing here touches the
// file system directly.

pub mod model;
pub mod ports;
pub mod registry;
