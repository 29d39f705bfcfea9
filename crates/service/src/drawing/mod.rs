pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{CanvasState, Drawing, DrawingPatch, NewDrawing};
pub use repository::{DrawingRepository, SeaOrmDrawingRepository};
pub use service::DrawingService;
