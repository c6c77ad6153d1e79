pub(crate) mod composite;
pub(crate) mod pair;
pub(crate) mod rasterize;
pub(crate) mod surface;
