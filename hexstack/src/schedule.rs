// Copyright 2025 the Hexstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-coalesced render requests.
//!
//! State changes ask for a render; the host asks for a frame callback only when the request
//! was not already pending. Any number of requests between two frames collapse into one
//! pipeline run.

/// Host hook for scheduling a frame callback (e.g. `request_animation_frame`, or a winit
/// `request_redraw`).
pub trait FrameHost {
    /// Arranges for the host to call back on its next frame.
    fn request_frame(&mut self);
}

/// A host that does nothing; the caller drives frames explicitly.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualFrames;

impl FrameHost for ManualFrames {
    fn request_frame(&mut self) {}
}

/// At-most-one pending render flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderScheduler {
    pending: bool,
    requested: u64,
    coalesced: u64,
}

impl RenderScheduler {
    /// Creates an idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a render as wanted.
    ///
    /// Returns `true` if this request queued a new render (and `host` was asked for a frame),
    /// `false` if a render was already pending.
    pub fn request(&mut self, host: &mut dyn FrameHost) -> bool {
        self.requested += 1;
        if self.pending {
            self.coalesced += 1;
            log::trace!("render already pending; coalesced {}", self.coalesced);
            return false;
        }
        self.pending = true;
        host.request_frame();
        true
    }

    /// Consumes the pending render, if any. Call at the start of a frame callback.
    pub fn take(&mut self) -> bool {
        core::mem::take(&mut self.pending)
    }

    /// Whether a render is queued.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Total requests seen.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Requests dropped because one was already pending.
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}
