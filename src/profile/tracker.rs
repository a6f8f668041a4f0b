//! Active call-stack tracking for a single call chain.
//!
//! Each call chain (one thread) owns a [`CallStackTracker`]. A `push` opens a
//! frame; the matching `pop` closes it, synthesises the body entry from the
//! time not accounted for by subordinate calls, and folds the frame into its
//! caller's pending children, or into the shared root tree once the chain's
//! stack is empty.

use super::record::{merge_into, subcall_time, CallKey, CallTree, ProfileRecord};
use super::store::ProfileData;
use crate::utils::error::ProfileError;
use log::{debug, trace};
use std::time::Instant;

/// One level of an active call stack
#[derive(Debug, Clone)]
pub struct CallFrame {
    /// Method name of the in-progress call
    pub name: String,

    /// When the frame was pushed
    pub start: Instant,

    /// Subordinate calls completed while this frame is active
    pub pending_children: CallTree,
}

impl CallFrame {
    fn new(name: String) -> Self {
        Self {
            name,
            start: Instant::now(),
            pending_children: CallTree::new(),
        }
    }
}

/// Call stack of one call chain
#[derive(Debug, Default)]
pub struct CallStackTracker {
    frames: Vec<CallFrame>,
}

impl CallStackTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a frame for `name`
    pub fn push(&mut self, name: impl Into<String>) {
        let name = name.into();
        trace!("push {} (depth {})", name, self.frames.len());
        self.frames.push(CallFrame::new(name));
    }

    /// Close the frame for `name` after `elapsed` seconds
    ///
    /// Appends `elapsed` to the flat times and merges the frame into the
    /// caller's pending children, or into `data.root_tree` when this was
    /// the outermost frame. Returns the computed self time.
    ///
    /// # Errors
    /// * `ProfileError::EmptyStack` - no frame is active
    /// * `ProfileError::ProtocolViolation` - top frame has a different name
    ///
    /// On error the stack is left untouched.
    pub fn pop(
        &mut self,
        name: &str,
        elapsed: f64,
        data: &mut ProfileData,
    ) -> Result<f64, ProfileError> {
        let mut frame = match self.frames.pop() {
            Some(top) if top.name == name => top,
            Some(top) => {
                let expected = top.name.clone();
                self.frames.push(top);
                return Err(ProfileError::ProtocolViolation {
                    expected,
                    found: name.to_string(),
                });
            }
            None => {
                return Err(ProfileError::EmptyStack {
                    name: name.to_string(),
                })
            }
        };

        let elapsed = clamp_time(elapsed, &frame.name);
        let self_time = clamp_time(elapsed - subcall_time(&frame.pending_children), &frame.name);
        frame
            .pending_children
            .insert(CallKey::Body, ProfileRecord::leaf(self_time));

        data.flat_times
            .entry(frame.name.clone())
            .or_default()
            .push(elapsed);

        let target = match self.frames.last_mut() {
            Some(parent) => &mut parent.pending_children,
            None => &mut data.root_tree,
        };
        merge_into(target, CallKey::Method(frame.name), elapsed, 1, &frame.pending_children);

        Ok(self_time)
    }

    /// Number of open frames
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Innermost open frame
    pub fn top(&self) -> Option<&CallFrame> {
        self.frames.last()
    }

    /// Discard the frames opened after the innermost frame named `name`
    ///
    /// Returns how many frames were dropped; zero when no open frame is
    /// named `name`, in which case the stack is unchanged.
    pub fn abandon_above(&mut self, name: &str) -> usize {
        match self.frames.iter().rposition(|frame| frame.name == name) {
            Some(index) => {
                let dropped = self.frames.len() - index - 1;
                self.frames.truncate(index + 1);
                dropped
            }
            None => 0,
        }
    }

    /// Drop every open frame without recording it
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

/// Clamp clock anomalies (negative or NaN durations) to zero
fn clamp_time(seconds: f64, name: &str) -> f64 {
    if seconds >= 0.0 {
        seconds
    } else {
        debug!("Clamping negative time {} for '{}' to zero", seconds, name);
        0.0
    }
}
