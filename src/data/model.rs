use std::fmt;

// ---------------------------------------------------------------------------
// OutcomeClass – the binary launch outcome
// ---------------------------------------------------------------------------

/// Outcome of a launch attempt, stored as `0` / `1` in the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeClass {
    Failure,
    Success,
}

impl OutcomeClass {
    pub fn as_u8(self) -> u8 {
        match self {
            OutcomeClass::Failure => 0,
            OutcomeClass::Success => 1,
        }
    }

    /// Interpret a numeric cell; only exact 0 and 1 are accepted.
    pub fn from_f64(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(OutcomeClass::Failure)
        } else if value == 1.0 {
            Some(OutcomeClass::Success)
        } else {
            None
        }
    }

    /// Parse a text cell such as `"1"` or `"0.0"`.
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<f64>().ok().and_then(Self::from_f64)
    }
}

impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// Launch site identifier, e.g. `CCAFS LC-40`.
    pub site: String,
    /// Payload mass in kilograms.
    pub payload_mass_kg: f64,
    pub class: OutcomeClass,
    /// Booster version category, e.g. `FT`.
    pub booster_category: String,
}

impl LaunchRecord {
    pub fn new(
        site: impl Into<String>,
        payload_mass_kg: f64,
        class: OutcomeClass,
        booster_category: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            payload_mass_kg,
            class,
            booster_category: booster_category.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// PayloadBounds – min/max payload across the table
// ---------------------------------------------------------------------------

/// Inclusive payload extent of a [`LaunchTable`], computed once at load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

impl PayloadBounds {
    fn from_records(records: &[LaunchRecord]) -> Option<Self> {
        let mut masses = records.iter().map(|r| r.payload_mass_kg);
        let first = masses.next()?;
        let (min, max) = masses.fold((first, first), |(lo, hi), m| (lo.min(m), hi.max(m)));
        Some(PayloadBounds { min, max })
    }
}

// ---------------------------------------------------------------------------
// LaunchTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Read-only once built.
#[derive(Debug, Clone)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    /// Distinct site identifiers in first-seen order.
    sites: Vec<String>,
    payload_bounds: PayloadBounds,
}

impl LaunchTable {
    /// Build the table and its payload bounds. Returns `None` for an empty
    /// record list, which has no bounds.
    pub fn from_records(records: Vec<LaunchRecord>) -> Option<Self> {
        let payload_bounds = PayloadBounds::from_records(&records)?;
        let mut sites: Vec<String> = Vec::new();
        for record in &records {
            if !sites.contains(&record.site) {
                sites.push(record.site.clone());
            }
        }
        Some(LaunchTable {
            records,
            sites,
            payload_bounds,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn payload_bounds(&self) -> PayloadBounds {
        self.payload_bounds
    }

    /// Number of records. Never zero: an empty record list builds no table.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_and_sites_computed_once_at_build() {
        let table = LaunchTable::from_records(vec![
            LaunchRecord::new("B", 6000.0, OutcomeClass::Failure, "FT"),
            LaunchRecord::new("A", 3000.0, OutcomeClass::Success, "v1.1"),
            LaunchRecord::new("B", 0.0, OutcomeClass::Success, "FT"),
        ])
        .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.sites(), ["B".to_string(), "A".to_string()]);
        assert_eq!(table.payload_bounds(), PayloadBounds { min: 0.0, max: 6000.0 });
    }

    #[test]
    fn empty_records_have_no_table() {
        assert!(LaunchTable::from_records(Vec::new()).is_none());
    }

    #[test]
    fn outcome_class_parsing() {
        assert_eq!(OutcomeClass::parse("1"), Some(OutcomeClass::Success));
        assert_eq!(OutcomeClass::parse(" 0.0 "), Some(OutcomeClass::Failure));
        assert_eq!(OutcomeClass::parse("2"), None);
        assert_eq!(OutcomeClass::parse("yes"), None);
        assert_eq!(OutcomeClass::Success.to_string(), "1");
    }
}
