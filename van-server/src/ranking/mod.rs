//! Nearest vendor ranking
//!
//! Filters ready vendors and orders them by distance from the requester.
//! Vendors that never reported a location go last, in input order.

pub mod distance;

pub use distance::{GeoPoint, distance_meters};

use shared::error::{AppError, ErrorCode};
use shared::models::{NearbyVendor, Vendor};
use std::cmp::Ordering;
use thiserror::Error;

/// Requester position errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RankingError {
    #[error("Missing {0}")]
    MissingField(&'static str),

    #[error("{field} is not a valid coordinate: {value:?}")]
    InvalidCoordinate { field: &'static str, value: String },
}

impl From<RankingError> for AppError {
    fn from(err: RankingError) -> Self {
        match err {
            RankingError::MissingField(field) => AppError::missing_field(field),
            RankingError::InvalidCoordinate { field, ref value } => {
                AppError::with_message(ErrorCode::InvalidCoordinates, err.to_string())
                    .with_detail("field", field)
                    .with_detail("value", value.clone())
            }
        }
    }
}

fn parse_coordinate(
    field: &'static str,
    raw: Option<&str>,
    limit: f64,
) -> Result<f64, RankingError> {
    let raw = raw.ok_or(RankingError::MissingField(field))?;
    let invalid = || RankingError::InvalidCoordinate {
        field,
        value: raw.to_string(),
    };
    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value.abs() > limit {
        return Err(invalid());
    }
    Ok(value)
}

/// Parse the requester position from raw `lat` / `lon` query values.
pub fn parse_origin(lat: Option<&str>, lon: Option<&str>) -> Result<GeoPoint, RankingError> {
    let lat = parse_coordinate("lat", lat, 90.0)?;
    let lon = parse_coordinate("lon", lon, 180.0)?;
    Ok(GeoPoint::new(lat, lon))
}

/// Rank ready vendors by distance from `origin`, nearest first.
pub fn rank_vendors(vendors: &[Vendor], origin: GeoPoint) -> Vec<NearbyVendor> {
    let mut ranked: Vec<(&Vendor, Option<f64>)> = vendors
        .iter()
        .filter(|v| v.ready)
        .map(|v| {
            let meters = v
                .coordinates
                .map(|c| distance_meters(origin, GeoPoint::from_lon_lat(c)));
            (v, meters)
        })
        .collect();

    // Stable: equal keys keep input order
    ranked.sort_by(|(_, a), (_, b)| match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    ranked
        .into_iter()
        .map(|(v, meters)| NearbyVendor {
            distance_km: meters.map(|m| (m / 1000.0).floor() as i64),
            vendor_id: v.id,
            van_name: v.van_name.clone(),
            ready: v.ready,
            location_string: v.location_string.clone(),
            coordinates: v.coordinates,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_vendor(id: i64, ready: bool, lat_lon: Option<(f64, f64)>) -> Vendor {
        Vendor {
            id,
            van_name: format!("Van {id}"),
            password_hash: "hash".to_string(),
            ready,
            location_string: lat_lon.map(|_| format!("Spot {id}")),
            coordinates: lat_lon.map(|(lat, lon)| [lon, lat]),
            time_limit: 30,
        }
    }

    fn ids(result: &[NearbyVendor]) -> Vec<i64> {
        result.iter().map(|v| v.vendor_id).collect()
    }

    const ORIGIN: GeoPoint = GeoPoint::new(-37.81, 144.91);

    #[test]
    fn test_single_ready_vendor() {
        let vendors = vec![create_vendor(1, true, Some((-37.8, 144.9)))];
        let result = rank_vendors(&vendors, ORIGIN);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].vendor_id, 1);
        assert_eq!(result[0].distance_km, Some(1));
        assert_eq!(result[0].coordinates, Some([144.9, -37.8]));
    }

    #[test]
    fn test_sorted_by_distance() {
        let vendors = vec![
            create_vendor(1, true, Some((-37.9, 145.2))),
            create_vendor(2, true, Some((-37.8, 144.9))),
            create_vendor(3, true, Some((-37.7, 144.8))),
        ];
        let result = rank_vendors(&vendors, ORIGIN);

        assert_eq!(ids(&result), vec![2, 3, 1]);
        assert_eq!(result[0].distance_km, Some(1));
        assert_eq!(result[1].distance_km, Some(15));
        assert_eq!(result[2].distance_km, Some(27));
    }

    #[test]
    fn test_not_ready_vendors_excluded() {
        let vendors = vec![
            create_vendor(1, false, Some((-37.81, 144.91))),
            create_vendor(2, true, Some((-37.7, 144.8))),
        ];
        assert_eq!(ids(&rank_vendors(&vendors, ORIGIN)), vec![2]);
    }

    #[test]
    fn test_missing_coordinates_rank_last() {
        let vendors = vec![
            create_vendor(1, true, None),
            create_vendor(2, true, Some((-37.9, 145.2))),
            create_vendor(3, true, None),
            create_vendor(4, true, Some((-37.8, 144.9))),
        ];
        let result = rank_vendors(&vendors, ORIGIN);

        assert_eq!(ids(&result), vec![4, 2, 1, 3]);
        assert_eq!(result[2].distance_km, None);
        assert_eq!(result[3].distance_km, None);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let vendors = vec![
            create_vendor(5, true, Some((-37.8, 144.9))),
            create_vendor(6, true, Some((-37.8, 144.9))),
            create_vendor(7, true, Some((-37.8, 144.9))),
        ];
        assert_eq!(ids(&rank_vendors(&vendors, ORIGIN)), vec![5, 6, 7]);
    }

    #[test]
    fn test_no_ready_vendors() {
        let vendors = vec![create_vendor(1, false, Some((-37.8, 144.9)))];
        assert!(rank_vendors(&vendors, ORIGIN).is_empty());
        assert!(rank_vendors(&[], ORIGIN).is_empty());
    }

    #[test]
    fn test_parse_origin() {
        assert_eq!(
            parse_origin(Some("-37.81"), Some("144.91")),
            Ok(GeoPoint::new(-37.81, 144.91))
        );
        assert_eq!(
            parse_origin(None, Some("144.91")),
            Err(RankingError::MissingField("lat"))
        );
        assert_eq!(
            parse_origin(Some("-37.81"), None),
            Err(RankingError::MissingField("lon"))
        );
        assert!(matches!(
            parse_origin(Some("north"), Some("144.91")),
            Err(RankingError::InvalidCoordinate { field: "lat", .. })
        ));
        assert!(matches!(
            parse_origin(Some("-37.81"), Some("200")),
            Err(RankingError::InvalidCoordinate { field: "lon", .. })
        ));
        assert!(matches!(
            parse_origin(Some("NaN"), Some("1")),
            Err(RankingError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_ranking_error_codes() {
        let err: AppError = RankingError::MissingField("lat").into();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let err: AppError = RankingError::InvalidCoordinate {
            field: "lon",
            value: "x".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidCoordinates);
    }
}
