use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use models::drawing::now;

use super::domain::{Drawing, DrawingPatch, NewDrawing};
use super::repository::DrawingRepository;
use crate::errors::ServiceError;

/// Application service encapsulating the drawing CRUD contract.
/// Holds no state of its own beyond the repository handle.
pub struct DrawingService<R: DrawingRepository> {
    repo: Arc<R>,
}

impl<R: DrawingRepository> DrawingService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Assign a fresh id and timestamps, then persist.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewDrawing) -> Result<Drawing, ServiceError> {
        let drawing = Drawing::new(Uuid::new_v4().to_string(), input, now());
        let stored = self.repo.insert(&drawing).await?;
        info!(id = %stored.id, "drawing created");
        Ok(stored)
    }

    pub async fn list(&self) -> Result<Vec<Drawing>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: &str) -> Result<Drawing, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("drawing"))
    }

    /// Existence is checked before emptiness, so an empty patch on a missing
    /// id reports not found.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: DrawingPatch) -> Result<Drawing, ServiceError> {
        let existing = self.get(id).await?;
        if patch.is_empty() {
            return Err(ServiceError::Validation("No fields to update".into()));
        }
        let merged = patch.merge(existing, now());
        match self.repo.replace(&merged).await? {
            Some(stored) => {
                info!(id = %stored.id, "drawing updated");
                Ok(stored)
            }
            None => {
                warn!(%id, "drawing deleted while update was in flight");
                Err(ServiceError::not_found("drawing"))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("drawing"));
        }
        info!(%id, "drawing deleted");
        Ok(())
    }
}
