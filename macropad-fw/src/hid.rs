pub(crate) mod keycodes;
#[cfg(feature = "hiddev")]
pub(crate) mod transform;
