//! Countries offered by the form, keyed by ISO 3166-1 alpha-3 code.

/// A selectable country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
}

const fn c(code: &'static str, name: &'static str) -> Country {
    Country { code, name }
}

/// All countries in display order.
pub const COUNTRIES: &[Country] = &[
    c("USA", "United States"),
    c("CAN", "Canada"),
    c("GBR", "United Kingdom"),
    c("DEU", "Germany"),
    c("FRA", "France"),
    c("JPN", "Japan"),
    c("KOR", "South Korea"),
    c("CHN", "China"),
    c("IND", "India"),
    c("SGP", "Singapore"),
    c("AUS", "Australia"),
    c("NZL", "New Zealand"),
    c("ISR", "Israel"),
    c("NLD", "Netherlands"),
    c("SWE", "Sweden"),
    c("NOR", "Norway"),
    c("DNK", "Denmark"),
    c("FIN", "Finland"),
    c("CHE", "Switzerland"),
    c("AUT", "Austria"),
    c("BEL", "Belgium"),
    c("IRL", "Ireland"),
    c("ESP", "Spain"),
    c("ITA", "Italy"),
    c("POL", "Poland"),
    c("CZE", "Czech Republic"),
    c("HUN", "Hungary"),
    c("EST", "Estonia"),
    c("LTU", "Lithuania"),
    c("LVA", "Latvia"),
    c("BRA", "Brazil"),
    c("ARG", "Argentina"),
    c("MEX", "Mexico"),
    c("CHL", "Chile"),
    c("COL", "Colombia"),
    c("RUS", "Russia"),
    c("UKR", "Ukraine"),
    c("TUR", "Turkey"),
    c("ZAF", "South Africa"),
    c("EGY", "Egypt"),
    c("NGA", "Nigeria"),
    c("KEN", "Kenya"),
    c("ARE", "United Arab Emirates"),
    c("SAU", "Saudi Arabia"),
    c("IDN", "Indonesia"),
    c("THA", "Thailand"),
    c("VNM", "Vietnam"),
    c("PHL", "Philippines"),
    c("MYS", "Malaysia"),
];

/// Look up a country by code (case-insensitive).
pub fn country_by_code(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Position of a country in [`COUNTRIES`].
pub fn country_index(code: &str) -> Option<usize> {
    COUNTRIES.iter().position(|c| c.code.eq_ignore_ascii_case(code))
}
