pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0088;

/// Convert a ground distance into the central angle it spans (radians).
pub fn meters_to_radians(meters: f64) -> f64 {
    meters / 1000.0 / EARTH_MEAN_RADIUS_KM
}

/// Central angle between two points given in radians, haversine formula.
pub fn haversine_angle(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * a.clamp(0.0, 1.0).sqrt().asin()
}

/// Position on the unit sphere, for Euclidean indexing of angular neighbourhoods.
pub fn unit_vector(lat_rad: f64, lon_rad: f64) -> [f64; 3] {
    let cos_lat = lat_rad.cos();
    [cos_lat * lon_rad.cos(), cos_lat * lon_rad.sin(), lat_rad.sin()]
}

/// Straight-line distance through the unit sphere for a central angle.
pub fn chord_length(angle_rad: f64) -> f64 {
    if angle_rad >= std::f64::consts::PI {
        2.0
    } else {
        2.0 * (angle_rad / 2.0).sin()
    }
}
