use crate::types::ItemId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: ItemId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Feed source error: {0}")]
    Source(String),
}
