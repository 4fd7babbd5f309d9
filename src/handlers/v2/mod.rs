pub mod stocks;

/// Marker added to every v2 response body so clients can tell the
/// versions apart.
pub const VERSION_MESSAGE: &str = "This is version 2.0 of the API";
