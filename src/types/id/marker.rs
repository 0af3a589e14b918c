use crate::internal::Sealed;

macro_rules! markers {
  { $( $(#[$meta:meta])* $ident:ident, )* } => {$(
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct $ident;
    impl Sealed for $ident {}
    impl Marker for $ident {}
  )*};
}

markers! {
  AnyMarker,
  BookMarker,
  /// Follow relationship between two users.
  FollowMarker,
  ReactionMarker,
  ReviewMarker,
  /// An entry of a user's personal library.
  UserBookMarker,
  UserMarker,
}

/// This trait represents a marker restricting all objects to
/// from using it as a generic in [Id](super::Id) object.
pub trait Marker: Sealed {}
