//! Process-start allow-list of creature names known to the catalog.

use std::collections::HashSet;

use crate::client::{CatalogClient, CatalogError};

/// Read-only set of names the catalog can answer for.
///
/// Built once at startup and passed to the creation flow explicitly, so the
/// flow stays testable without ambient global state. Refreshing the list
/// means restarting the process.
#[derive(Debug, Clone)]
pub struct KnownNames {
    names: HashSet<String>,
}

impl KnownNames {
    /// The catalog holds fewer creatures than this and the count is not
    /// expected to grow past it, so a single page fetch covers everything.
    pub const FETCH_LIMIT: usize = 1000;

    /// Fetch the full name list from the catalog.
    pub async fn fetch(catalog: &dyn CatalogClient) -> Result<Self, CatalogError> {
        let names = catalog.creature_names(Self::FETCH_LIMIT).await?;
        Ok(Self::from_names(names))
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact, case-sensitive membership check.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{AbilityDetail, CreaturePayload};
    use async_trait::async_trait;

    struct FixedNames(Vec<String>);

    #[async_trait]
    impl CatalogClient for FixedNames {
        async fn creature_detail(&self, _name: &str) -> Result<CreaturePayload, CatalogError> {
            unreachable!("name fetch must not hit creature detail")
        }

        async fn ability_detail(&self, _url: &str) -> Result<AbilityDetail, CatalogError> {
            unreachable!("name fetch must not hit ability detail")
        }

        async fn creature_names(&self, limit: usize) -> Result<Vec<String>, CatalogError> {
            assert_eq!(limit, KnownNames::FETCH_LIMIT);
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn fetch_builds_membership_set() {
        let catalog = FixedNames(vec!["bulbasaur".into(), "ivysaur".into()]);
        let names = KnownNames::fetch(&catalog).await.unwrap();

        assert_eq!(names.len(), 2);
        assert!(names.contains("bulbasaur"));
        assert!(!names.contains("missingno"));
    }

    #[test]
    fn membership_is_case_sensitive() {
        let names = KnownNames::from_names(["bulbasaur"]);
        assert!(names.contains("bulbasaur"));
        assert!(!names.contains("Bulbasaur"));
    }
}
