pub(crate) mod input;
pub(crate) mod pipeline;
pub(crate) mod tool;
