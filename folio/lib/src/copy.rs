//! Copy-to-clipboard affordance for code blocks.
//!
//! The affordance shows a label that flips to `"Copied!"` after a successful
//! write and reverts to `"Copy"` after [`REVERT_DELAY`]. Triggering again
//! while a revert is pending cancels that revert first, so only the most
//! recent trigger decides when the label goes back.
//!
//! Clipboard failures are logged and swallowed: the label stays as it was
//! and nothing propagates to the caller.
//!
//! The HTML renderer embeds [`COPY_SCRIPT`], the browser-side equivalent.
//!
//! ## Examples
//!
//! ```
//! use folio_lib::copy::{Clipboard, ClipboardError, CopyAffordance, COPIED_LABEL};
//!
//! struct Discard;
//!
//! impl Clipboard for Discard {
//!     fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
//!         Ok(())
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let button = CopyAffordance::new("cargo build\n", Discard);
//! button.trigger();
//! assert_eq!(button.label(), COPIED_LABEL);
//! # }
//! ```

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Label shown while idle.
pub const COPY_LABEL: &str = "Copy";

/// Label shown after a successful copy.
pub const COPIED_LABEL: &str = "Copied!";

/// How long [`COPIED_LABEL`] stays up.
pub const REVERT_DELAY: Duration = Duration::from_millis(2000);

/// Browser-side copy handler, emitted once per rendered document.
///
/// Mirrors [`CopyAffordance`]: a pending revert is cleared before a new one is
/// scheduled and failures only reach the console.
pub const COPY_SCRIPT: &str = r#"<script>
(() => {
  const COPY = "Copy", COPIED = "Copied!", DELAY = 2000;
  document.addEventListener("click", async (event) => {
    const button = event.target.closest("button.copy-button");
    if (!button) return;
    try {
      await navigator.clipboard.writeText(button.dataset.code ?? "");
      button.textContent = COPIED;
      if (button._revertTimer) {
        clearTimeout(button._revertTimer);
        button._revertTimer = null;
      }
      button._revertTimer = setTimeout(() => {
        button.textContent = COPY;
        button._revertTimer = null;
      }, DELAY);
    } catch (error) {
      console.error("Failed to copy: ", error);
    }
  });
})();
</script>
"#;

/// Error reported by a [`Clipboard`] backend.
#[derive(Debug, Error)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

/// Destination for copied text.
pub trait Clipboard: Send + Sync {
    /// Writes `text` to the clipboard.
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug)]
struct LabelState {
    label: &'static str,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

/// Copy button state bound to one block's raw source.
#[derive(Debug)]
pub struct CopyAffordance<C> {
    content: String,
    clipboard: C,
    state: Arc<Mutex<LabelState>>,
}

impl<C: Clipboard> CopyAffordance<C> {
    /// Binds the affordance to `content`, which is written verbatim on trigger.
    pub fn new(content: impl Into<String>, clipboard: C) -> Self {
        Self {
            content: content.into(),
            clipboard,
            state: Arc::new(Mutex::new(LabelState {
                label: COPY_LABEL,
                generation: 0,
                pending: None,
            })),
        }
    }

    /// The text this affordance copies.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The currently displayed label.
    pub fn label(&self) -> &'static str {
        lock(&self.state).label
    }

    /// Writes the content to the clipboard and schedules the label revert.
    ///
    /// The revert runs on the current tokio runtime. Outside one the label
    /// still flips but stays on [`COPIED_LABEL`]. Returns whether the
    /// clipboard write succeeded.
    pub fn trigger(&self) -> bool {
        if let Err(e) = self.clipboard.write_text(&self.content) {
            tracing::error!(error = %e, "Failed to copy");
            return false;
        }

        let mut state = lock(&self.state);
        state.label = COPIED_LABEL;
        state.generation += 1;
        if let Some(pending) = state.pending.take() {
            pending.abort();
        }

        let generation = state.generation;
        match Handle::try_current() {
            Ok(runtime) => {
                let shared = Arc::clone(&self.state);
                state.pending = Some(runtime.spawn(async move {
                    tokio::time::sleep(REVERT_DELAY).await;
                    let mut state = lock(&shared);
                    if state.generation == generation {
                        state.label = COPY_LABEL;
                        state.pending = None;
                        tracing::trace!(generation, "Reverted copy label");
                    }
                }));
            }
            Err(e) => {
                tracing::warn!(error = %e, generation, "No tokio runtime, copy label will not revert");
            }
        }

        tracing::debug!(generation, bytes = self.content.len(), "Copied code block");
        true
    }
}

impl<C> Drop for CopyAffordance<C> {
    fn drop(&mut self) {
        if let Some(pending) = lock(&self.state).pending.take() {
            pending.abort();
        }
    }
}

fn lock(state: &Mutex<LabelState>) -> MutexGuard<'_, LabelState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
