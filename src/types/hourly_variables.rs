//! The fixed set of hourly variables requested from the archive.

/// Hourly variables requested for every fetch, in the order they appear as
/// columns of the resulting [`crate::HourlyFrame`].
///
/// Columns are paired with the response by name, so the API returning them in
/// a different order does not shift data between columns.
pub const HOURLY_VARIABLES: [&str; 32] = [
    "temperature_2m",
    "relative_humidity_2m",
    "dew_point_2m",
    "apparent_temperature",
    "precipitation",
    "rain",
    "snowfall",
    "snow_depth",
    "weather_code",
    "pressure_msl",
    "surface_pressure",
    "cloud_cover",
    "cloud_cover_low",
    "cloud_cover_mid",
    "cloud_cover_high",
    "et0_fao_evapotranspiration",
    "vapour_pressure_deficit",
    "wind_speed_10m",
    "wind_speed_100m",
    "wind_direction_10m",
    "wind_direction_100m",
    "wind_gusts_10m",
    "soil_temperature_0_to_7cm",
    "soil_temperature_7_to_28cm",
    "soil_temperature_28_to_100cm",
    "soil_temperature_100_to_255cm",
    "soil_moisture_0_to_7cm",
    "soil_moisture_7_to_28cm",
    "soil_moisture_28_to_100cm",
    "soil_moisture_100_to_255cm",
    "is_day",
    "sunshine_duration",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_variables_are_unique() {
        let unique: HashSet<&str> = HOURLY_VARIABLES.iter().copied().collect();
        assert_eq!(unique.len(), HOURLY_VARIABLES.len());
    }

    #[test]
    fn test_variable_order() {
        assert_eq!(HOURLY_VARIABLES[0], "temperature_2m");
        assert_eq!(HOURLY_VARIABLES[8], "weather_code");
        assert_eq!(HOURLY_VARIABLES[31], "sunshine_duration");
    }
}
