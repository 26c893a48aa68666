//! Vendor Model

use serde::{Deserialize, Serialize};

/// Vendor entity (a snack van). Holds the password hash, never serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Vendor {
    pub id: i64,
    pub van_name: String,
    pub password_hash: String,
    pub ready: bool,
    pub location_string: Option<String>,
    /// `[longitude, latitude]`
    pub coordinates: Option<[f64; 2]>,
    /// Minutes a customer has to modify or cancel an order
    pub time_limit: i64,
}

impl Vendor {
    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c[1])
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c[0])
    }
}

/// Vendor response (without password)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VendorProfile {
    pub id: i64,
    pub van_name: String,
    pub ready: bool,
    pub location_string: Option<String>,
    pub coordinates: Option<[f64; 2]>,
    pub time_limit: i64,
}

impl From<&Vendor> for VendorProfile {
    fn from(v: &Vendor) -> Self {
        Self {
            id: v.id,
            van_name: v.van_name.clone(),
            ready: v.ready,
            location_string: v.location_string.clone(),
            coordinates: v.coordinates,
            time_limit: v.time_limit,
        }
    }
}

/// One entry of a nearest-vendor search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NearbyVendor {
    /// Whole kilometres, absent when the vendor has no coordinates
    pub distance_km: Option<i64>,
    pub vendor_id: i64,
    pub van_name: String,
    pub ready: bool,
    pub location_string: Option<String>,
    pub coordinates: Option<[f64; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_has_no_password() {
        let vendor = Vendor {
            id: 7,
            van_name: "Tasty Trucks".into(),
            password_hash: "$argon2id$secret".into(),
            ready: true,
            location_string: Some("Melbourne Central".into()),
            coordinates: Some([144.963, -37.81]),
            time_limit: 30,
        };
        let json = serde_json::to_string(&VendorProfile::from(&vendor)).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
        assert_eq!(vendor.latitude(), Some(-37.81));
        assert_eq!(vendor.longitude(), Some(144.963));
    }
}
