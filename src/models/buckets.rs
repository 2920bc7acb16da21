use crate::error::{AppError, AppResult};

/// An ordered, closed table of human-readable range labels, each mapped to
/// one representative numeric value or to the unspecified sentinel
/// (`None`), which downstream means "no filter on this dimension".
///
/// Tables are fixed at compile time and shared by the filter vocabulary
/// endpoint and the prediction query builders, so the labels a client can
/// pick are exactly the labels that resolve.
#[derive(Debug, Clone, Copy)]
pub struct BucketTable {
    name: &'static str,
    entries: &'static [(&'static str, Option<f64>)],
}

impl BucketTable {
    /// Resolves a label to its numeric representative.
    ///
    /// `Ok(None)` is the unspecified sentinel. An unknown label is an
    /// invalid-argument error: select widgets are populated from
    /// [`BucketTable::labels`], so a miss means the client and server
    /// tables have drifted apart.
    pub fn resolve(&self, label: &str) -> AppResult<Option<f64>> {
        self.entries
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, value)| *value)
            .ok_or_else(|| {
                AppError::InvalidInput(format!("unknown {} label: {label:?}", self.name))
            })
    }

    /// Labels in table order, for populating select widgets.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(label, _)| *label)
    }
}

/// Playing-time buckets, mapped to a representative midpoint in minutes.
pub const PLAYING_TIME: BucketTable = BucketTable {
    name: "playing time",
    entries: &[
        ("Any", None),
        ("Short (0-30 min)", Some(15.0)),
        ("Medium (30-60 min)", Some(45.0)),
        ("Long (60-120 min)", Some(90.0)),
        ("Very long (120+ min)", Some(120.0)),
    ],
};

/// Minimum-age buckets, mapped to a representative age in years.
pub const AGE: BucketTable = BucketTable {
    name: "age",
    entries: &[
        ("Any", None),
        ("Toddler (0-3 years)", Some(1.5)),
        ("Child (4-12 years)", Some(8.0)),
        ("Teenager (12-18 years)", Some(15.0)),
        ("Adult (18+ years)", Some(18.0)),
    ],
};

/// Publication-era buckets, mapped to a representative year.
pub const YEAR_PUBLISHED: BucketTable = BucketTable {
    name: "year published",
    entries: &[
        ("Any", None),
        ("Oldschool (< 1851)", Some(1850.0)),
        ("Ancient (1851 - 1979)", Some(1915.0)),
        ("Modern (1980-2000)", Some(1990.0)),
        ("Recent (2000-2019)", Some(2009.0)),
        ("New (2020+)", Some(2020.0)),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TABLES: [BucketTable; 3] = [PLAYING_TIME, AGE, YEAR_PUBLISHED];

    #[test]
    fn test_every_label_resolves_to_finite_value_or_sentinel() {
        for table in ALL_TABLES {
            for label in table.labels() {
                match table.resolve(label).unwrap() {
                    Some(value) => assert!(value.is_finite(), "{label} mapped to {value}"),
                    None => assert_eq!(label, "Any"),
                }
            }
        }
    }

    #[test]
    fn test_resolve_is_idempotent() {
        for table in ALL_TABLES {
            for label in table.labels() {
                let first = table.resolve(label).unwrap();
                let second = table.resolve(label).unwrap();
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn test_known_midpoints() {
        assert_eq!(PLAYING_TIME.resolve("Medium (30-60 min)").unwrap(), Some(45.0));
        assert_eq!(PLAYING_TIME.resolve("Very long (120+ min)").unwrap(), Some(120.0));
        assert_eq!(AGE.resolve("Toddler (0-3 years)").unwrap(), Some(1.5));
        assert_eq!(AGE.resolve("Adult (18+ years)").unwrap(), Some(18.0));
        assert_eq!(YEAR_PUBLISHED.resolve("Oldschool (< 1851)").unwrap(), Some(1850.0));
        assert_eq!(YEAR_PUBLISHED.resolve("New (2020+)").unwrap(), Some(2020.0));
    }

    #[test]
    fn test_any_is_the_unspecified_sentinel() {
        for table in ALL_TABLES {
            assert_eq!(table.resolve("Any").unwrap(), None);
        }
    }

    #[test]
    fn test_unknown_label_is_invalid_input() {
        let err = PLAYING_TIME.resolve("Endless (500+ min)").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_labels_keep_table_order() {
        let labels: Vec<&str> = YEAR_PUBLISHED.labels().collect();
        assert_eq!(
            labels,
            vec![
                "Any",
                "Oldschool (< 1851)",
                "Ancient (1851 - 1979)",
                "Modern (1980-2000)",
                "Recent (2000-2019)",
                "New (2020+)",
            ]
        );
    }
}
