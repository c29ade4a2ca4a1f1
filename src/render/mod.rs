pub(crate) mod batch;
pub(crate) mod compositor;
pub(crate) mod export;
pub(crate) mod icon;
pub(crate) mod surface;
