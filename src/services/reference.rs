use std::path::Path;

/// Category / mechanic / family option lists, loaded once at startup and
/// read-only afterwards. They only populate selection widgets; a missing
/// table degrades to an empty list rather than blocking startup.
#[derive(Debug, Default, Clone)]
pub struct ReferenceData {
    pub categories: Vec<String>,
    pub mechanics: Vec<String>,
    pub families: Vec<String>,
}

impl ReferenceData {
    pub fn load(dir: &Path) -> Self {
        let data = Self {
            categories: load_column(&dir.join("category_data.csv")),
            mechanics: load_column(&dir.join("mechanic_data.csv")),
            families: load_column(&dir.join("family_data.csv")),
        };

        tracing::info!(
            categories = data.categories.len(),
            mechanics = data.mechanics.len(),
            families = data.families.len(),
            "Loaded reference option tables"
        );

        data
    }
}

/// Reads the first column of a headed CSV table.
fn load_column(path: &Path) -> Vec<String> {
    let mut reader = match csv::Reader::from_path(path) {
        Ok(reader) => reader,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Reference table unavailable");
            return Vec::new();
        }
    };

    let mut values = Vec::new();
    for record in reader.records() {
        match record {
            Ok(record) => {
                if let Some(value) = record.get(0) {
                    if !value.is_empty() {
                        values.push(value.to_string());
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping malformed reference row");
            }
        }
    }
    values
}
