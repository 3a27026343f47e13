//! Route reference data from the route details sheet.

use serde::{Deserialize, Deserializer, Serialize};

use super::cell;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    #[serde(rename = "Route ID", default, deserialize_with = "cell::text")]
    pub route_id: String,

    #[serde(
        rename = "Route name as per Transnet (from Point A to B)",
        default,
        deserialize_with = "cell::text"
    )]
    pub route_name: String,

    #[serde(rename = "Services working", default, deserialize_with = "services_list")]
    pub services: Vec<String>,
}

impl RouteRecord {
    /// Routes without a name cannot be selected and are dropped on load.
    pub fn is_usable(&self) -> bool {
        !cell::is_blank(&self.route_name)
    }
}

/// Splits the services cell on commas and line breaks.
pub(crate) fn split_services(raw: &str) -> Vec<String> {
    raw.split([',', '\n', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn services_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = cell::text(deserializer)?;
    Ok(split_services(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_route_row() {
        let route: RouteRecord = serde_json::from_value(json!({
            "Route ID": 301,
            "Route name as per Transnet (from Point A to B)": "Pune - Satara",
            "Services working": "MPLS, NLD\nILL"
        }))
        .unwrap();

        assert_eq!(route.route_id, "301");
        assert_eq!(route.services, vec!["MPLS", "NLD", "ILL"]);
        assert!(route.is_usable());
    }

    #[test]
    fn test_missing_services_is_empty_list() {
        let route: RouteRecord = serde_json::from_value(json!({
            "Route name as per Transnet (from Point A to B)": "A - B"
        }))
        .unwrap();
        assert!(route.services.is_empty());
        assert!(route.route_id.is_empty());
    }

    #[test]
    fn test_blank_name_not_usable() {
        let route = RouteRecord {
            route_name: "  ".to_string(),
            ..Default::default()
        };
        assert!(!route.is_usable());
    }
}
