/// Error type for the feedback workflow and its collaborators.
///
/// Nothing here is fatal: the widget entry points absorb every variant,
/// surface it as a notification, and return the workflow to its
/// pre-operation state.
#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    /// Client-side validation failed (e.g. empty title).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The rasterizer could not capture the document surface.
    #[error("Screenshot capture failed: {0}")]
    Capture(String),

    /// Encoding the captured raster to a data URL failed.
    #[error("Screenshot encoding failed: {0}")]
    Encode(String),

    /// The remote document store rejected or never received the write.
    #[error("Remote store write failed: {0}")]
    Store(String),
}
