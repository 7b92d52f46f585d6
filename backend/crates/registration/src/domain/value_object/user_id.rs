use kernel::id::Id;

/// Marker for user identifiers
pub struct UserMarker;

/// Opaque user identifier, generated independently of username and email
pub type UserId = Id<UserMarker>;
