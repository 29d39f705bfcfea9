use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};

use models::drawing::{self, Entity as DrawingEntity};

use super::domain::Drawing;
use crate::errors::ServiceError;

#[async_trait]
pub trait DrawingRepository: Send + Sync {
    /// Every drawing, most recently updated first.
    async fn list(&self) -> Result<Vec<Drawing>, ServiceError>;
    async fn insert(&self, drawing: &Drawing) -> Result<Drawing, ServiceError>;
    async fn get(&self, id: &str) -> Result<Option<Drawing>, ServiceError>;
    /// Write the full record over the existing row and re-read it.
    /// `None` when the row is gone by the time the write lands.
    async fn replace(&self, drawing: &Drawing) -> Result<Option<Drawing>, ServiceError>;
    /// Returns true if a row was removed.
    async fn delete(&self, id: &str) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmDrawingRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmDrawingRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl DrawingRepository for SeaOrmDrawingRepository {
    async fn list(&self) -> Result<Vec<Drawing>, ServiceError> {
        drawing::list_recent(&self.db)
            .await?
            .into_iter()
            .map(Drawing::try_from)
            .collect()
    }

    async fn insert(&self, d: &Drawing) -> Result<Drawing, ServiceError> {
        let row = d.to_row()?;
        let txn = self.db.begin().await?;
        let stored = drawing::create(&txn, row).await?;
        txn.commit().await?;
        Drawing::try_from(stored)
    }

    async fn get(&self, id: &str) -> Result<Option<Drawing>, ServiceError> {
        let found = DrawingEntity::find_by_id(id.to_owned()).one(&self.db).await?;
        found.map(Drawing::try_from).transpose()
    }

    async fn replace(&self, d: &Drawing) -> Result<Option<Drawing>, ServiceError> {
        let row = d.to_row()?;
        let txn = self.db.begin().await?;
        if drawing::overwrite(&txn, &row).await? == 0 {
            txn.rollback().await?;
            return Ok(None);
        }
        let stored = DrawingEntity::find_by_id(row.id).one(&txn).await?;
        txn.commit().await?;
        stored.map(Drawing::try_from).transpose()
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let res = DrawingEntity::delete_by_id(id.to_owned()).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
