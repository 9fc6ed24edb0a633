//! An in-memory roster that other tasks may update while pipelines read it.

use async_trait::async_trait;
use tokio::sync::RwLock;
use triage::{Availability, Engineer, EngineerId, EngineerRoster, RosterError, Skill};

use crate::RosterLoadError;

/// Workload points one thread assignment adds.
pub const ASSIGNMENT_LOAD: u8 = 20;

/// Workload at which an engineer is marked busy.
pub const FULL_LOAD: u8 = 100;

/// Shared roster guarded by a tokio `RwLock`.
///
/// Every read clones the matching entries under one read guard, so each call
/// returns a consistent snapshot even while writers flip availability.
#[derive(Debug, Default)]
pub struct InMemoryRoster {
    engineers: RwLock<Vec<Engineer>>,
}

impl InMemoryRoster {
    /// # Errors
    ///
    /// [`RosterLoadError::DuplicateId`] if two entries share an identifier.
    pub fn new(engineers: Vec<Engineer>) -> Result<Self, RosterLoadError> {
        for (index, engineer) in engineers.iter().enumerate() {
            if engineers[..index].iter().any(|e| e.id == engineer.id) {
                return Err(RosterLoadError::DuplicateId {
                    id: engineer.id.clone(),
                });
            }
        }
        Ok(Self {
            engineers: RwLock::new(engineers),
        })
    }

    pub async fn len(&self) -> usize {
        self.engineers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.engineers.read().await.is_empty()
    }

    /// Every engineer, whatever their availability.
    pub async fn engineers(&self) -> Vec<Engineer> {
        self.snapshot(|_| true).await
    }

    /// Sets an engineer's availability.
    ///
    /// # Errors
    ///
    /// [`RosterError::NotFound`] for an unknown identifier.
    pub async fn set_availability(
        &self,
        id: &EngineerId,
        availability: Availability,
    ) -> Result<(), RosterError> {
        self.update(id, |engineer| engineer.availability = availability)
            .await?;
        tracing::info!(engineer_id = %id, ?availability, "availability changed");
        Ok(())
    }

    /// Adds [`ASSIGNMENT_LOAD`] to an engineer's workload, capped at
    /// [`FULL_LOAD`]; an engineer at full load becomes busy.
    ///
    /// # Errors
    ///
    /// [`RosterError::NotFound`] for an unknown identifier.
    pub async fn record_assignment(&self, id: &EngineerId) -> Result<Engineer, RosterError> {
        self.update(id, |engineer| {
            engineer.workload = engineer
                .workload
                .saturating_add(ASSIGNMENT_LOAD)
                .min(FULL_LOAD);
            if engineer.workload >= FULL_LOAD && engineer.is_available() {
                engineer.availability = Availability::Busy;
            }
        })
        .await
    }

    /// Removes one assignment's load; a busy engineer below full load becomes
    /// available again. Offline engineers stay offline.
    ///
    /// # Errors
    ///
    /// [`RosterError::NotFound`] for an unknown identifier.
    pub async fn release_assignment(&self, id: &EngineerId) -> Result<Engineer, RosterError> {
        self.update(id, |engineer| {
            engineer.workload = engineer.workload.saturating_sub(ASSIGNMENT_LOAD);
            if engineer.workload < FULL_LOAD && engineer.availability == Availability::Busy {
                engineer.availability = Availability::Available;
            }
        })
        .await
    }

    async fn update(
        &self,
        id: &EngineerId,
        apply: impl FnOnce(&mut Engineer),
    ) -> Result<Engineer, RosterError> {
        let mut engineers = self.engineers.write().await;
        let engineer = engineers
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| RosterError::NotFound { id: id.clone() })?;
        apply(engineer);
        Ok(engineer.clone())
    }

    async fn snapshot(&self, keep: impl Fn(&Engineer) -> bool) -> Vec<Engineer> {
        self.engineers
            .read()
            .await
            .iter()
            .filter(|e| keep(*e))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EngineerRoster for InMemoryRoster {
    async fn find_by_id(&self, id: &EngineerId) -> Result<Engineer, RosterError> {
        self.engineers
            .read()
            .await
            .iter()
            .find(|e| &e.id == id)
            .cloned()
            .ok_or_else(|| RosterError::NotFound { id: id.clone() })
    }

    async fn list_available(&self) -> Result<Vec<Engineer>, RosterError> {
        Ok(self.snapshot(Engineer::is_available).await)
    }

    async fn list_by_skill(&self, skill: Skill) -> Result<Vec<Engineer>, RosterError> {
        Ok(self.snapshot(|e| e.skills.contains(&skill)).await)
    }

    async fn list_leads(&self) -> Result<Vec<Engineer>, RosterError> {
        Ok(self.snapshot(|e| e.is_lead).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> EngineerId {
        EngineerId::new(value).unwrap()
    }

    fn roster() -> InMemoryRoster {
        InMemoryRoster::new(vec![
            Engineer::new(id("ENG-1"), "Ada")
                .with_expertise(Skill::Database, 90)
                .as_lead(),
            Engineer::new(id("ENG-2"), "Brook")
                .with_expertise(Skill::Frontend, 70)
                .with_availability(Availability::Offline),
            Engineer::new(id("ENG-3"), "Cyd").with_expertise(Skill::Database, 40),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn listings_keep_roster_order() {
        let r = roster();
        let available: Vec<_> = r
            .list_available()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(available, vec![id("ENG-1"), id("ENG-3")]);

        let dbas = r.list_by_skill(Skill::Database).await.unwrap();
        assert_eq!(dbas.len(), 2);

        let leads = r.list_leads().await.unwrap();
        assert_eq!(leads.len(), 1);
    }

    #[tokio::test]
    async fn unknown_engineer_is_not_found() {
        let err = roster().find_by_id(&id("ENG-404")).await.unwrap_err();
        assert_eq!(err, RosterError::NotFound { id: id("ENG-404") });
    }

    #[tokio::test]
    async fn snapshot_is_unaffected_by_later_updates() {
        let r = roster();
        let before = r.list_available().await.unwrap();
        r.set_availability(&id("ENG-1"), Availability::Busy).await.unwrap();
        assert_eq!(before.len(), 2);
        assert_eq!(r.list_available().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn assignments_saturate_into_busy_and_release_back() {
        let r = roster();
        let mut last = None;
        for _ in 0..6 {
            last = Some(r.record_assignment(&id("ENG-3")).await.unwrap());
        }
        let full = last.unwrap();
        assert_eq!(full.workload, FULL_LOAD);
        assert_eq!(full.availability, Availability::Busy);

        let released = r.release_assignment(&id("ENG-3")).await.unwrap();
        assert_eq!(released.workload, FULL_LOAD - ASSIGNMENT_LOAD);
        assert_eq!(released.availability, Availability::Available);
    }

    #[tokio::test]
    async fn release_leaves_offline_engineers_offline() {
        let r = roster();
        let e = r.release_assignment(&id("ENG-2")).await.unwrap();
        assert_eq!(e.availability, Availability::Offline);
        assert_eq!(e.workload, 0);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = InMemoryRoster::new(vec![
            Engineer::new(id("ENG-1"), "a"),
            Engineer::new(id("ENG-1"), "b"),
        ])
        .unwrap_err();
        assert!(matches!(err, RosterLoadError::DuplicateId { .. }));
    }
}
