pub(crate) mod backend;
pub(crate) mod fixed;
pub(crate) mod font;
