pub(crate) mod loader;
pub(crate) mod opts;
pub(crate) mod session;
