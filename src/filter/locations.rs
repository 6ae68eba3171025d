/// City list behind the location picker.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationCatalog {
    cities: Vec<String>,
}

const DEFAULT_CITIES: [&str; 10] = [
    "Mumbai, Maharashtra",
    "Bangalore, Karnataka",
    "Hyderabad, Telangana",
    "Delhi, Delhi",
    "Chennai, Tamil Nadu",
    "Pune, Maharashtra",
    "Kolkata, West Bengal",
    "Ahmedabad, Gujarat",
    "Jaipur, Rajasthan",
    "Lucknow, Uttar Pradesh",
];

impl LocationCatalog {
    pub fn new(cities: impl IntoIterator<Item = String>) -> Self {
        Self {
            cities: cities.into_iter().collect(),
        }
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Cities containing `query`, ignoring case. An empty query lists all.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let needle = query.to_lowercase();
        self.cities
            .iter()
            .filter(|c| c.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }
}

impl Default for LocationCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_CITIES.iter().map(|c| c.to_string()))
    }
}
