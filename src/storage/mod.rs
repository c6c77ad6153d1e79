pub(crate) mod auth;
pub(crate) mod file;
pub(crate) mod library;
pub(crate) mod memory;
pub(crate) mod model;
pub(crate) mod publish;
pub(crate) mod store;
