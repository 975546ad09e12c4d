pub(crate) mod document;
pub(crate) mod palette;
pub(crate) mod registry;
