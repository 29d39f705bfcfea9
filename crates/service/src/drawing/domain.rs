use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use models::drawing;

use crate::errors::ServiceError;

/// Opaque canvas document. Stored as text, never inspected.
pub type CanvasState = serde_json::Map<String, serde_json::Value>;

/// A drawing as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub id: String,
    pub name: String,
    pub preview_image: String,
    pub canvas_state: CanvasState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload; every field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDrawing {
    pub name: String,
    pub preview_image: String,
    pub canvas_state: CanvasState,
}

/// Partial update. `None` (field omitted or `null`) leaves the stored value alone;
/// `Some` overwrites it, empty strings and empty objects included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_state: Option<CanvasState>,
}

impl Drawing {
    /// Fresh record with `created_at == updated_at == now`.
    pub fn new(id: String, input: NewDrawing, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            preview_image: input.preview_image,
            canvas_state: input.canvas_state,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_row(&self) -> Result<drawing::Model, ServiceError> {
        Ok(drawing::Model {
            id: self.id.clone(),
            name: self.name.clone(),
            preview_image: self.preview_image.clone(),
            canvas_state: serde_json::to_string(&self.canvas_state)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl TryFrom<drawing::Model> for Drawing {
    type Error = ServiceError;

    fn try_from(row: drawing::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            canvas_state: serde_json::from_str(&row.canvas_state)?,
            id: row.id,
            name: row.name,
            preview_image: row.preview_image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl DrawingPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.preview_image.is_none() && self.canvas_state.is_none()
    }

    /// Apply the patch on top of `existing`.
    ///
    /// `id` and `created_at` are kept; `updated_at` becomes `now`, clamped so it
    /// never moves backwards.
    pub fn merge(self, existing: Drawing, now: DateTime<Utc>) -> Drawing {
        Drawing {
            name: self.name.unwrap_or(existing.name),
            preview_image: self.preview_image.unwrap_or(existing.preview_image),
            canvas_state: self.canvas_state.unwrap_or(existing.canvas_state),
            updated_at: now.max(existing.updated_at),
            id: existing.id,
            created_at: existing.created_at,
        }
    }
}
