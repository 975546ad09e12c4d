pub(crate) mod decor;
pub(crate) mod layout;
pub(crate) mod pose;
pub(crate) mod renderer;
