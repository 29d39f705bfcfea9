use chrono::{DateTime, SubsecRound, Utc};
use sea_orm::{entity::prelude::*, ActiveModelTrait, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

/// A saved canvas. `canvas_state` is the serialized JSON document.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "drawing")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub preview_image: String,
    #[sea_orm(column_type = "Text")]
    pub canvas_state: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Current time at the precision the store round-trips exactly (microseconds).
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Insert a fully populated row and return it as stored.
pub async fn create<C: ConnectionTrait>(db: &C, row: Model) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: Set(row.id),
        name: Set(row.name),
        preview_image: Set(row.preview_image),
        canvas_state: Set(row.canvas_state),
        created_at: Set(row.created_at),
        updated_at: Set(row.updated_at),
    };
    Ok(am.insert(db).await?)
}

/// Every row, most recently updated first.
pub async fn list_recent<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find().order_by_desc(Column::UpdatedAt).all(db).await?)
}

/// Overwrite every mutable column of `row.id` in one statement.
///
/// Returns the number of rows touched; zero means the id no longer exists.
pub async fn overwrite<C: ConnectionTrait>(db: &C, row: &Model) -> Result<u64, errors::ModelError> {
    let am = ActiveModel {
        name: Set(row.name.clone()),
        preview_image: Set(row.preview_image.clone()),
        canvas_state: Set(row.canvas_state.clone()),
        updated_at: Set(row.updated_at),
        ..Default::default()
    };
    let res = Entity::update_many()
        .set(am)
        .filter(Column::Id.eq(row.id.as_str()))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
