//! [`EmissionsRepository`] implementations.

#[cfg(feature = "json")]
use std::path::{Path, PathBuf};

use super::{EmissionsTable, MembershipTable};
use crate::domain::{EmissionRecord, PoolMembership};
use crate::error::Result;
use crate::traits::EmissionsRepository;

/// Repository over tables already held in memory.
///
/// # Examples
///
/// ```
/// use unlock_impact::ingest::{EmissionsTable, InMemoryRepository, MembershipTable};
/// use unlock_impact::traits::EmissionsRepository;
///
/// let repo = InMemoryRepository::new(EmissionsTable::default(), MembershipTable::default());
/// assert!(repo.load_emissions().expect("empty table").is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    emissions: EmissionsTable,
    membership: MembershipTable,
}

impl InMemoryRepository {
    /// Creates a repository over the two tables.
    #[must_use]
    pub fn new(emissions: EmissionsTable, membership: MembershipTable) -> Self {
        Self {
            emissions,
            membership,
        }
    }
}

impl EmissionsRepository for InMemoryRepository {
    fn load_emissions(&self) -> Result<Vec<EmissionRecord>> {
        self.emissions.to_records()
    }

    fn load_membership(&self) -> Result<PoolMembership> {
        self.membership.to_membership()
    }
}

/// Default file name of the emissions export.
#[cfg(feature = "json")]
pub const EMISSIONS_FILE: &str = "streamlit_emissions.json";

/// Default file name of the membership export.
#[cfg(feature = "json")]
pub const MEMBERSHIP_FILE: &str = "Database.json";

/// Repository reading both tables from JSON record exports on disk.
///
/// Each file holds a JSON array of objects, one per table row.  Files are
/// read on every `load_*` call; callers that want caching keep the loaded
/// records themselves.
#[cfg(feature = "json")]
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    emissions_path: PathBuf,
    membership_path: PathBuf,
}

#[cfg(feature = "json")]
impl JsonFileRepository {
    /// Uses the default file names inside `dir`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(EMISSIONS_FILE), dir.join(MEMBERSHIP_FILE))
    }

    /// Uses explicit file paths.
    #[must_use]
    pub fn new(emissions_path: impl Into<PathBuf>, membership_path: impl Into<PathBuf>) -> Self {
        Self {
            emissions_path: emissions_path.into(),
            membership_path: membership_path.into(),
        }
    }

    fn read<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
        tracing::debug!(path = %path.display(), "reading table");
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(feature = "json")]
impl EmissionsRepository for JsonFileRepository {
    fn load_emissions(&self) -> Result<Vec<EmissionRecord>> {
        Self::read::<EmissionsTable>(&self.emissions_path)?.to_records()
    }

    fn load_membership(&self) -> Result<PoolMembership> {
        Self::read::<MembershipTable>(&self.membership_path)?.to_membership()
    }
}

#[cfg(all(test, feature = "json"))]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Month;
    use crate::error::SimError;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "unlock-impact-{tag}-{}",
            std::process::id()
        ));
        let Ok(()) = std::fs::create_dir_all(&dir) else {
            panic!("temp dir");
        };
        dir
    }

    #[test]
    fn reads_json_exports() {
        let dir = temp_dir("read");
        let emissions = r#"[
            {"Month": 0, "Seed": "1,000", "Team": 0},
            {"Month": 1, "Seed": 500, "Team": "n/a"}
        ]"#;
        let membership = r#"[
            {"data_input": "Seed", "circulation": "TRUE", "is_investor": "TRUE", "allocation": 0.1},
            {"data_input": "Liquidity", "circulation": "TRUE", "is_investor": "FALSE", "allocation": "20%"}
        ]"#;
        let Ok(()) = std::fs::write(dir.join(EMISSIONS_FILE), emissions) else {
            panic!("write emissions");
        };
        let Ok(()) = std::fs::write(dir.join(MEMBERSHIP_FILE), membership) else {
            panic!("write membership");
        };

        let repo = JsonFileRepository::in_dir(&dir);
        let Ok(records) = repo.load_emissions() else {
            panic!("expected emissions");
        };
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].month(), Month::new(1));
        assert!((records[0].amount("Seed") - 1_000.0).abs() < f64::EPSILON);

        let Ok(m) = repo.load_membership() else {
            panic!("expected membership");
        };
        let Ok(fraction) = m.liquidity_fraction() else {
            panic!("expected liquidity fraction");
        };
        assert!((fraction - 0.2).abs() < f64::EPSILON);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_io_error() {
        let repo = JsonFileRepository::in_dir(temp_dir("missing").join("nope"));
        assert!(matches!(repo.load_emissions(), Err(SimError::Io(_))));
    }

    #[test]
    fn malformed_json_is_json_error() {
        let dir = temp_dir("malformed");
        let Ok(()) = std::fs::write(dir.join(EMISSIONS_FILE), "{not json") else {
            panic!("write");
        };
        let repo = JsonFileRepository::in_dir(&dir);
        assert!(matches!(repo.load_emissions(), Err(SimError::Json(_))));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
