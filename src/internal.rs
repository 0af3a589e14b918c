/// Prevents types outside of this crate from implementing
/// traits that are meant to be closed, like [`Marker`].
///
/// [`Marker`]: crate::types::id::marker::Marker
pub trait Sealed {}
