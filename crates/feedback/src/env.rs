//! Read-only environment probe.
//!
//! The workflow samples the ambient environment exactly once, at
//! submit time, through this narrow interface; the workflow itself
//! performs no hidden global reads.

/// Read-only access to the current page, viewport, and device context.
pub trait EnvironmentProbe: Send + Sync {
    /// Path of the page the user is on, e.g. `/feed/sports`.
    fn page_path(&self) -> String;
    /// Full URL of the page, including origin and query.
    fn page_url(&self) -> String;
    /// Viewport size in CSS pixels (width, height).
    fn viewport(&self) -> (u32, u32);
    /// Active theme name, if one is set.
    fn theme(&self) -> Option<String>;
    fn user_agent(&self) -> String;
    fn platform(&self) -> String;
    fn language(&self) -> String;
    fn online(&self) -> bool;
}

/// One immutable sample of the environment, taken at submit time.
#[derive(Debug, Clone)]
pub struct EnvironmentSample {
    pub page_path: String,
    pub page_url: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub theme: Option<String>,
    pub user_agent: String,
    pub platform: String,
    pub language: String,
    pub online: bool,
}

impl EnvironmentSample {
    /// Snapshot the probe. Pure read; no side effects.
    pub fn capture(probe: &dyn EnvironmentProbe) -> Self {
        let (viewport_width, viewport_height) = probe.viewport();
        Self {
            page_path: probe.page_path(),
            page_url: probe.page_url(),
            viewport_width,
            viewport_height,
            theme: probe.theme(),
            user_agent: probe.user_agent(),
            platform: probe.platform(),
            language: probe.language(),
            online: probe.online(),
        }
    }

    /// Viewport in the `WxH` wire form, e.g. `"390x844"`.
    pub fn viewport_string(&self) -> String {
        format!("{}x{}", self.viewport_width, self.viewport_height)
    }
}
