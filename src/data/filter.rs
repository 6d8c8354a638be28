use serde::{Deserialize, Serialize};

use super::model::{LaunchRecord, LaunchTable};

/// Dropdown value that selects every launch site.
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Filter selection: site dropdown value + payload range
// ---------------------------------------------------------------------------

/// Value of the site dropdown. Travels over the wire as a plain string,
/// with [`ALL_SITES`] standing for [`SiteSelection::All`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub fn parse(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// Whether a record's site passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(selected) => selected == site,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(site) => site,
        }
    }
}

impl From<String> for SiteSelection {
    fn from(value: String) -> Self {
        SiteSelection::parse(&value)
    }
}

impl From<SiteSelection> for String {
    fn from(selection: SiteSelection) -> String {
        selection.as_str().to_string()
    }
}

/// Inclusive payload mass range from the range slider, `[lower, upper]`.
///
/// `lower > upper` is accepted as-is and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct PayloadRange {
    pub lower: f64,
    pub upper: f64,
}

impl PayloadRange {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.lower <= payload_mass_kg && payload_mass_kg <= self.upper
    }
}

impl From<[f64; 2]> for PayloadRange {
    fn from([lower, upper]: [f64; 2]) -> Self {
        PayloadRange { lower, upper }
    }
}

impl From<PayloadRange> for [f64; 2] {
    fn from(range: PayloadRange) -> Self {
        [range.lower, range.upper]
    }
}

/// Current value of every dashboard control, as posted by the page on
/// each change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlValues {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

// ---------------------------------------------------------------------------
// Record filtering
// ---------------------------------------------------------------------------

/// Records passing the site selection and, if given, the payload range,
/// in table order.
pub fn filtered_records<'a>(
    table: &'a LaunchTable,
    site: &'a SiteSelection,
    payload: Option<PayloadRange>,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    table.records().iter().filter(move |record| {
        site.matches(&record.site)
            && payload.map_or(true, |range| range.contains(record.payload_mass_kg))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, OutcomeClass};

    fn table() -> LaunchTable {
        LaunchTable::from_records(vec![
            LaunchRecord::new("A", 3000.0, OutcomeClass::Success, "FT"),
            LaunchRecord::new("B", 6000.0, OutcomeClass::Failure, "B4"),
            LaunchRecord::new("A", 5000.0, OutcomeClass::Failure, "B4"),
        ])
        .unwrap()
    }

    #[test]
    fn site_selection_wire_format() {
        let all: SiteSelection = serde_json::from_str("\"ALL\"").unwrap();
        assert_eq!(all, SiteSelection::All);
        let site: SiteSelection = serde_json::from_str("\"KSC LC-39A\"").unwrap();
        assert_eq!(site, SiteSelection::Site("KSC LC-39A".into()));
        assert_eq!(serde_json::to_string(&site).unwrap(), "\"KSC LC-39A\"");
    }

    #[test]
    fn control_values_from_json() {
        let values: ControlValues =
            serde_json::from_str(r#"{"site": "ALL", "payload": [0, 5000.5]}"#).unwrap();
        assert_eq!(values.site, SiteSelection::All);
        assert_eq!(values.payload, PayloadRange::new(0.0, 5000.5));
    }

    #[test]
    fn payload_range_is_inclusive() {
        let range = PayloadRange::new(3000.0, 5000.0);
        assert!(range.contains(3000.0));
        assert!(range.contains(5000.0));
        assert!(!range.contains(5000.1));
        assert!(!PayloadRange::new(5000.0, 3000.0).contains(4000.0));
    }

    #[test]
    fn filters_by_site_and_payload() {
        let table = table();
        let site_a = SiteSelection::Site("A".into());

        let by_site: Vec<_> = filtered_records(&table, &site_a, None).collect();
        assert_eq!(by_site.len(), 2);

        let by_both: Vec<_> =
            filtered_records(&table, &site_a, Some(PayloadRange::new(0.0, 4000.0))).collect();
        assert_eq!(by_both.len(), 1);
        assert_eq!(by_both[0].payload_mass_kg, 3000.0);

        let all = SiteSelection::All;
        assert_eq!(filtered_records(&table, &all, None).count(), 3);

        let unknown = SiteSelection::Site("Z".into());
        assert_eq!(filtered_records(&table, &unknown, None).count(), 0);
    }
}
