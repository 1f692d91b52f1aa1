use crate::models::Candidate;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two points given in degrees
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Fill `distanceKm` from each candidate's coordinates relative to the viewer.
///
/// Candidates without coordinates keep whatever distance the source supplied.
pub fn annotate_distances(candidates: &mut [Candidate], origin_lat: f64, origin_lon: f64) {
    let mut annotated = 0usize;

    for candidate in candidates.iter_mut() {
        if let Some((lat, lon)) = candidate.coordinates() {
            candidate.set_distance_km(haversine_distance(origin_lat, origin_lon, lat, lon));
            annotated += 1;
        }
    }

    tracing::debug!(
        "Annotated distances for {}/{} candidates",
        annotated,
        candidates.len()
    );
}
