//! Per-binding configuration.

use std::borrow::Cow;

/// Options for one binding accessor.
///
/// All options have conservative defaults.
///
/// # Example
///
/// ```
/// use lifebind_runtime::BindingOptions;
///
/// let opts = BindingOptions {
///     label: "settings_screen".into(),
///     ..Default::default()
/// };
/// assert!(!opts.trace_hits);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingOptions {
    /// Name attached to every log event emitted for this binding.
    pub label: Cow<'static, str>,

    /// Emit a `trace` event on every cache hit.
    ///
    /// Hits are the hot path, so this is off unless you are chasing a
    /// stale-binding bug.
    pub trace_hits: bool,
}

impl BindingOptions {
    /// Default options with the given label.
    #[must_use]
    pub fn labeled(label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }
}

impl Default for BindingOptions {
    fn default() -> Self {
        Self {
            label: Cow::Borrowed("binding"),
            trace_hits: false,
        }
    }
}
