pub(crate) mod cards;
pub(crate) mod frame;
pub(crate) mod storyboard;
