use crate::Location;

/// 地球半径（km）。
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// 2 点間の大円距離（km）をハーバサイン公式で求める。
pub fn haversine_km(a: &Location, b: &Location) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}
