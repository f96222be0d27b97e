use thiserror::Error;

use crate::models::Coordinates;

/// Raised when submit is pressed before a location was picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("location has not been informed")]
pub struct LocationMissing;

/// Pre-submission check requiring an externally supplied coordinate.
///
/// Runs before any I/O so a missing location never leaves partial work behind.
pub struct LocationGate;

impl LocationGate {
    pub fn check(location: Option<Coordinates>) -> Result<Coordinates, LocationMissing> {
        match location {
            Some(coordinates) => Ok(coordinates),
            None => Err(LocationMissing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_location_passes_through() {
        let c = Coordinates::new(-3.1, -60.0);
        assert_eq!(LocationGate::check(Some(c)), Ok(c));
    }

    #[test]
    fn test_absent_location_is_rejected() {
        assert_eq!(LocationGate::check(None), Err(LocationMissing));
    }
}
