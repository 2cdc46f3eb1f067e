pub(crate) mod main_loop;
pub(crate) mod shared;
