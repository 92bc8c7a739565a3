/// Mean Earth radius (kilometers), spherical approximation used for altitudes
pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth rotation, approximated as a linear angle per hour of day (degrees)
pub const EARTH_ROTATION_DEG_PER_HOUR: f64 = 360.0 / 24.0;

/// Constant longitude offset of the inertial to Earth fixed approximation (degrees)
pub const LONGITUDE_OFFSET_DEG: f64 = 24.0;

/// Hour of day at which the rotation term vanishes
pub const ROTATION_REFERENCE_HOUR: f64 = 12.0;

/// Altitude units
pub const ALTITUDE_UNITS: &str = "km";

/// Speed units
pub const SPEED_UNITS: &str = "km/s";

/// Public ISS ephemeris (OEM, J2000 frame, XML)
pub const ISS_OEM_URL: &str =
    "https://nasa-public-data.s3.amazonaws.com/iss-coords/current/ISS_OEM/ISS.OEM_J2K_EPH.xml";
