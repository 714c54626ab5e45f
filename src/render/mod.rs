pub(crate) mod banner;
pub(crate) mod canvas;
pub(crate) mod color;
pub(crate) mod layout;
pub(crate) mod operation;
pub(crate) mod page;
pub(crate) mod terminal;
pub(crate) mod transition;
