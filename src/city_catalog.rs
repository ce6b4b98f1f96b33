// City Catalog - built-in major-city table and per-country GDP estimates
// Used when no external geodata source is available

use crate::exposure::CityRecord;
use crate::geometry::haversine_km;

/// Fallback when a country code has no entry (USD).
pub const DEFAULT_GDP_PER_CAPITA: f64 = 5000.0;

// (name, country, latitude, longitude, population, gdp_per_capita)
type CityRow = (&'static str, &'static str, f64, f64, u64, f64);

const MAJOR_CITIES: [CityRow; 50] = [
    // North America
    ("New York", "USA", 40.7128, -74.0060, 8_336_817, 65000.0),
    ("Los Angeles", "USA", 34.0522, -118.2437, 3_971_883, 65000.0),
    ("Chicago", "USA", 41.8781, -87.6298, 2_693_976, 65000.0),
    ("Houston", "USA", 29.7604, -95.3698, 2_320_268, 65000.0),
    ("Phoenix", "USA", 33.4484, -112.0740, 1_680_992, 65000.0),
    ("Philadelphia", "USA", 39.9526, -75.1652, 1_584_064, 65000.0),
    ("San Antonio", "USA", 29.4241, -98.4936, 1_547_253, 65000.0),
    ("San Diego", "USA", 32.7157, -117.1611, 1_423_851, 65000.0),
    ("Dallas", "USA", 32.7767, -96.7970, 1_343_573, 65000.0),
    ("San Jose", "USA", 37.3382, -121.8863, 1_021_795, 65000.0),
    ("Toronto", "Canada", 43.6532, -79.3832, 2_930_000, 45000.0),
    ("Montreal", "Canada", 45.5017, -73.5673, 1_780_000, 45000.0),
    ("Vancouver", "Canada", 49.2827, -123.1207, 675_218, 45000.0),
    ("Mexico City", "Mexico", 19.4326, -99.1332, 9_209_944, 20000.0),
    ("Guadalajara", "Mexico", 20.6597, -103.3496, 1_495_189, 20000.0),
    // Europe
    ("London", "UK", 51.5074, -0.1278, 8_982_000, 42000.0),
    ("Paris", "France", 48.8566, 2.3522, 2_161_000, 40000.0),
    ("Berlin", "Germany", 52.5200, 13.4050, 3_769_000, 45000.0),
    ("Madrid", "Spain", 40.4168, -3.7038, 3_223_000, 30000.0),
    ("Rome", "Italy", 41.9028, 12.4964, 2_873_000, 35000.0),
    ("Moscow", "Russia", 55.7558, 37.6176, 12_615_000, 12000.0),
    ("Barcelona", "Spain", 41.3851, 2.1734, 1_620_000, 30000.0),
    ("Munich", "Germany", 48.1351, 11.5820, 1_472_000, 45000.0),
    ("Milan", "Italy", 45.4642, 9.1900, 1_372_000, 35000.0),
    // Asia
    ("Tokyo", "Japan", 35.6762, 139.6503, 13_929_286, 40000.0),
    ("Shanghai", "China", 31.2304, 121.4737, 24_870_895, 15000.0),
    ("Beijing", "China", 39.9042, 116.4074, 21_540_000, 15000.0),
    ("Mumbai", "India", 19.0760, 72.8777, 12_478_447, 2000.0),
    ("Delhi", "India", 28.7041, 77.1025, 32_941_000, 2000.0),
    ("Seoul", "South Korea", 37.5665, 126.9780, 9_720_846, 30000.0),
    ("Bangkok", "Thailand", 13.7563, 100.5018, 10_539_000, 7000.0),
    ("Singapore", "Singapore", 1.3521, 103.8198, 5_685_807, 65000.0),
    ("Hong Kong", "China", 22.3193, 114.1694, 7_496_981, 50000.0),
    ("Guangzhou", "China", 23.1291, 113.2644, 14_043_500, 15000.0),
    ("Shenzhen", "China", 22.5431, 114.0579, 12_356_820, 15000.0),
    // Africa
    ("Cairo", "Egypt", 30.0444, 31.2357, 20_484_965, 3000.0),
    ("Lagos", "Nigeria", 6.5244, 3.3792, 15_388_000, 2000.0),
    ("Johannesburg", "South Africa", -26.2041, 28.0473, 5_634_800, 6000.0),
    ("Nairobi", "Kenya", -1.2921, 36.8219, 4_397_073, 2000.0),
    ("Kinshasa", "DR Congo", -4.4419, 15.2663, 14_342_000, 500.0),
    // South America
    ("São Paulo", "Brazil", -23.5505, -46.6333, 12_325_232, 15000.0),
    ("Buenos Aires", "Argentina", -34.6118, -58.3960, 3_075_646, 12000.0),
    ("Lima", "Peru", -12.0464, -77.0428, 10_750_000, 6000.0),
    ("Bogotá", "Colombia", 4.7110, -74.0721, 10_700_000, 6000.0),
    ("Rio de Janeiro", "Brazil", -22.9068, -43.1729, 6_748_000, 15000.0),
    // Oceania
    ("Sydney", "Australia", -33.8688, 151.2093, 5_312_163, 55000.0),
    ("Melbourne", "Australia", -37.8136, 144.9631, 5_078_193, 55000.0),
    ("Brisbane", "Australia", -27.4698, 153.0251, 2_514_184, 55000.0),
    ("Perth", "Australia", -31.9505, 115.8605, 2_085_973, 55000.0),
    ("Auckland", "New Zealand", -36.8485, 174.7633, 1_657_200, 40000.0),
];

/// The full built-in city table.
pub fn major_cities() -> Vec<CityRecord> {
    MAJOR_CITIES
        .iter()
        .map(|&(name, country, lat, lon, population, gdp)| CityRecord::new(name, country, lat, lon, population, gdp))
        .collect()
}

/// Built-in cities within `radius_km` of a point (inclusive).
pub fn cities_within(lat: f64, lon: f64, radius_km: f64, earth_radius_km: f64) -> Vec<CityRecord> {
    major_cities()
        .into_iter()
        .filter(|city| haversine_km(lat, lon, city.latitude, city.longitude, earth_radius_km) <= radius_km)
        .collect()
}

/// GDP per capita estimate (USD) by ISO 3166-1 alpha-2 country code.
pub fn estimate_gdp_per_capita(country_code: &str) -> f64 {
    match country_code.to_ascii_uppercase().as_str() {
        // High income
        "US" => 65000.0,
        "CA" => 45000.0,
        "GB" => 42000.0,
        "DE" => 45000.0,
        "FR" => 40000.0,
        "JP" => 40000.0,
        "AU" => 55000.0,
        "NZ" => 40000.0,
        "SG" => 65000.0,
        "CH" => 80000.0,
        "NO" => 75000.0,
        "SE" => 55000.0,
        "DK" => 60000.0,
        "NL" => 50000.0,
        "AT" => 48000.0,
        "BE" => 45000.0,
        "FI" => 48000.0,
        "IE" => 70000.0,
        "LU" => 110000.0,
        "IS" => 60000.0,
        // Upper-middle income
        "CN" => 15000.0,
        "KR" => 30000.0,
        "ES" => 30000.0,
        "IT" => 35000.0,
        "PT" => 25000.0,
        "GR" => 20000.0,
        "PL" => 18000.0,
        "CZ" => 25000.0,
        "HU" => 18000.0,
        "RO" => 15000.0,
        "RU" => 12000.0,
        "TR" => 10000.0,
        "MX" => 20000.0,
        "BR" => 15000.0,
        "AR" => 12000.0,
        "CL" => 16000.0,
        "MY" => 12000.0,
        "TH" => 7000.0,
        "ZA" => 6000.0,
        // Lower-middle income
        "IN" => 2000.0,
        "ID" => 4000.0,
        "PH" => 3500.0,
        "VN" => 3500.0,
        "EG" => 3000.0,
        "NG" => 2000.0,
        "KE" => 2000.0,
        "PK" => 1500.0,
        "BD" => 2000.0,
        "UA" => 4000.0,
        "PE" => 6000.0,
        "CO" => 6000.0,
        "EC" => 6000.0,
        "MA" => 3500.0,
        // Low income
        "ET" => 900.0,
        "CD" => 500.0,
        "TZ" => 1100.0,
        "UG" => 900.0,
        "NP" => 1200.0,
        _ => DEFAULT_GDP_PER_CAPITA,
    }
}
