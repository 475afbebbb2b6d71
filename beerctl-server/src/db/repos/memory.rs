//! In-memory beer repository
//!
//! Same contract as `SqliteBeerRepo`, without a database. Used to exercise
//! the HTTP layer in isolation.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::beers::{BeerRepository, RepoError, RepoResult};
use crate::models::{Beer, ValidationError};

/// Map-backed repository. Lists in ascending id order.
#[derive(Debug, Default)]
pub struct MemoryBeerRepo {
    beers: RwLock<BTreeMap<i64, Beer>>,
    unavailable: AtomicBool,
}

impl MemoryBeerRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository already holding `beers`.
    pub fn with_beers(beers: impl IntoIterator<Item = Beer>) -> Self {
        let beers = beers.into_iter().map(|b| (b.id, b)).collect();
        Self {
            beers: RwLock::new(beers),
            unavailable: AtomicBool::new(false),
        }
    }

    /// While unavailable, every operation that would reach the store fails
    /// with `RepoError::Storage`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> RepoResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepoError::Storage(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl BeerRepository for MemoryBeerRepo {
    async fn list(&self) -> RepoResult<Vec<Beer>> {
        self.check_available()?;
        Ok(self.beers.read().await.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> RepoResult<Beer> {
        self.check_available()?;
        self.beers
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(RepoError::NotFound { id })
    }

    async fn create(&self, beer: &Beer) -> RepoResult<i64> {
        self.check_available()?;
        let mut beers = self.beers.write().await;

        let id = if beer.id != 0 {
            beer.id
        } else {
            match beers.keys().next_back() {
                Some(&last) if last >= 1 => last.checked_add(1).ok_or_else(|| {
                    RepoError::Storage(sqlx::Error::Protocol("beer id space exhausted".into()))
                })?,
                _ => 1,
            }
        };

        if beers.contains_key(&id) {
            return Err(RepoError::Storage(sqlx::Error::Protocol(format!(
                "UNIQUE constraint failed: beer.id ({id})"
            ))));
        }

        beers.insert(id, Beer { id, ..beer.clone() });
        Ok(id)
    }

    async fn update(&self, beer: &Beer) -> RepoResult<()> {
        if beer.id == 0 {
            return Err(ValidationError::Unassigned { field: "id" }.into());
        }
        self.check_available()?;

        if let Some(stored) = self.beers.write().await.get_mut(&beer.id) {
            *stored = beer.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        if id == 0 {
            return Err(ValidationError::Unassigned { field: "id" }.into());
        }
        self.check_available()?;

        self.beers.write().await.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BeerStyle, BeerType};

    #[tokio::test]
    async fn assigns_ids_after_the_highest() {
        let repo = MemoryBeerRepo::with_beers([Beer::new(
            10,
            "Heineken",
            BeerType::LAGER,
            BeerStyle::PALE,
        )]);

        let id = repo
            .create(&Beer::new(0, "Skol", BeerType::ALE, BeerStyle::PALE))
            .await
            .unwrap();
        assert_eq!(id, 11);
        assert_eq!(repo.get(11).await.unwrap().name, "Skol");
    }

    #[tokio::test]
    async fn duplicate_is_storage_error() {
        let repo = MemoryBeerRepo::new();
        let beer = Beer::new(1, "Heineken", BeerType::LAGER, BeerStyle::PALE);
        repo.create(&beer).await.unwrap();

        assert!(matches!(
            repo.create(&beer).await.unwrap_err(),
            RepoError::Storage(_)
        ));
    }

    #[tokio::test]
    async fn zero_id_writes_are_rejected() {
        let repo = MemoryBeerRepo::new();
        let beer = Beer::new(0, "Nobody", BeerType::ALE, BeerStyle::RED);

        assert!(matches!(
            repo.update(&beer).await.unwrap_err(),
            RepoError::Validation(_)
        ));
        assert!(matches!(
            repo.delete(0).await.unwrap_err(),
            RepoError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn unavailable_fails_every_operation() {
        let repo = MemoryBeerRepo::new();
        repo.set_unavailable(true);

        assert!(matches!(repo.list().await, Err(RepoError::Storage(_))));
        assert!(matches!(repo.get(1).await, Err(RepoError::Storage(_))));
        assert!(matches!(repo.delete(1).await, Err(RepoError::Storage(_))));

        repo.set_unavailable(false);
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn exhausted_id_space_is_storage_error() {
        let top = Beer::new(i64::MAX, "Last", BeerType::STOUT, BeerStyle::DARK);
        let repo = MemoryBeerRepo::with_beers([top.clone()]);

        let err = repo
            .create(&Beer::new(0, "Overflow", BeerType::ALE, BeerStyle::RED))
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::Storage(_)), "got {err:?}");
        assert_eq!(repo.list().await.unwrap(), vec![top]);
    }
}
