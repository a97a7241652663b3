//! Application services for the Lore client: chat turn orchestration,
//! upload batch orchestration, and gated surfaces.

pub mod chat;
pub mod surface;
pub mod upload;

pub use chat::{ChatTurnService, SendOutcome};
pub use surface::{Surface, SurfaceGuard, evaluate, visible_surfaces};
pub use upload::{UploadBatchService, UploadSelection};
