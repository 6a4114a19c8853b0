use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Embedded per-state sales figures for the regional map.
pub static STATE_STATS_CSV: &str = include_str!("../../fixtures/state_stats.csv");

/// Sales figures for one Indian state or union territory.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct StateStats {
    pub name: String,
    /// Marker colour on the map, `#RRGGBB`
    pub color: String,
    /// Annual sales in rupees
    pub sales: u64,
    /// Annual revenue in rupees
    pub revenue: u64,
    pub stores: u32,
    /// Marker position as a percentage of the map image width
    pub marker_x: f64,
    /// Marker position as a percentage of the map image height
    pub marker_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    North,
    South,
    East,
    West,
    Central,
    Other,
}

const NORTH: &[&str] = &[
    "Jammu and Kashmir",
    "Himachal Pradesh",
    "Punjab",
    "Uttarakhand",
    "Haryana",
    "Delhi",
    "Rajasthan",
    "Uttar Pradesh",
];
const SOUTH: &[&str] = &[
    "Tamil Nadu",
    "Kerala",
    "Karnataka",
    "Andhra Pradesh",
    "Telangana",
];
const EAST: &[&str] = &[
    "West Bengal",
    "Bihar",
    "Jharkhand",
    "Odisha",
    "Assam",
    "Arunachal Pradesh",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Sikkim",
    "Tripura",
];
const WEST: &[&str] = &["Maharashtra", "Gujarat", "Goa"];
const CENTRAL: &[&str] = &["Madhya Pradesh", "Chhattisgarh"];

impl Region {
    pub const ALL: [Region; 6] = [
        Region::North,
        Region::South,
        Region::East,
        Region::West,
        Region::Central,
        Region::Other,
    ];

    /// Classify a state by exact name. Island territories and unknown names
    /// fall into `Other`.
    pub fn classify(state_name: &str) -> Self {
        let lists: [(&[&str], Region); 5] = [
            (NORTH, Region::North),
            (SOUTH, Region::South),
            (EAST, Region::East),
            (WEST, Region::West),
            (CENTRAL, Region::Central),
        ];
        lists
            .iter()
            .find(|(names, _)| names.contains(&state_name))
            .map(|(_, region)| *region)
            .unwrap_or(Region::Other)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Region::North => "North",
            Region::South => "South",
            Region::East => "East",
            Region::West => "West",
            Region::Central => "Central",
            Region::Other => "Other",
        }
    }

    /// Case-insensitive lookup by label.
    pub fn from_label(label: &str) -> Option<Self> {
        Region::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Format rupees in millions, e.g. `₹1.25M`.
pub fn format_millions(rupees: u64) -> String {
    format!("₹{:.2}M", rupees as f64 / 1_000_000.0)
}

impl StateStats {
    pub fn region(&self) -> Region {
        Region::classify(&self.name)
    }

    /// All states from the embedded fixture.
    pub fn embedded() -> Result<Vec<StateStats>> {
        StateStats::parse_state_stats_csv(STATE_STATS_CSV)
    }

    /// Parse CSV with columns: name, color, sales, revenue, stores, marker_x, marker_y
    pub fn parse_state_stats_csv(csv_object: &str) -> Result<Vec<StateStats>> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_object.as_bytes());
        let mut states = Vec::new();
        for row in rdr.deserialize() {
            let state: StateStats = row?;
            states.push(state);
        }
        Ok(states)
    }

    pub fn find<'a>(states: &'a [StateStats], name: &str) -> Option<&'a StateStats> {
        states.iter().find(|s| s.name == name)
    }

    pub fn total_sales(states: &[StateStats]) -> u64 {
        states.iter().map(|s| s.sales).sum()
    }

    pub fn total_revenue(states: &[StateStats]) -> u64 {
        states.iter().map(|s| s.revenue).sum()
    }

    pub fn total_stores(states: &[StateStats]) -> u32 {
        states.iter().map(|s| s.stores).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_states() {
        let states = StateStats::embedded().unwrap();
        assert_eq!(states.len(), 31);
        assert_eq!(StateStats::total_sales(&states), 56_883_000);
        assert_eq!(StateStats::total_stores(&states), 1_950);
        assert_eq!(StateStats::total_revenue(&states), 147_755_000);

        let maharashtra = StateStats::find(&states, "Maharashtra").unwrap();
        assert_eq!(maharashtra.stores, 187);
        assert_eq!(maharashtra.region(), Region::West);
        assert!(states
            .iter()
            .all(|s| (0.0..=100.0).contains(&s.marker_x) && (0.0..=100.0).contains(&s.marker_y)));
    }

    #[test]
    fn test_classify() {
        assert_eq!(Region::classify("Punjab"), Region::North);
        assert_eq!(Region::classify("Delhi"), Region::North);
        assert_eq!(Region::classify("Kerala"), Region::South);
        assert_eq!(Region::classify("Sikkim"), Region::East);
        assert_eq!(Region::classify("Goa"), Region::West);
        assert_eq!(Region::classify("Chhattisgarh"), Region::Central);
        assert_eq!(Region::classify("Lakshadweep"), Region::Other);
        assert_eq!(Region::classify("punjab"), Region::Other);
    }

    #[test]
    fn test_format_millions() {
        assert_eq!(format_millions(5_670_000), "₹5.67M");
        assert_eq!(format_millions(89_000), "₹0.09M");
    }

    #[test]
    fn test_region_from_label() {
        assert_eq!(Region::from_label("south"), Some(Region::South));
        assert_eq!(Region::from_label("nowhere"), None);
    }

    #[test]
    fn test_parse_rejects_bad_numbers() {
        let csv_data = "name,color,sales,revenue,stores,marker_x,marker_y\nGoa,#FFF,lots,1,1,1,1\n";
        assert!(StateStats::parse_state_stats_csv(csv_data).is_err());
    }
}
