pub(crate) mod codec;
pub(crate) mod store;
