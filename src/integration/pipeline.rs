//! TrackingPipeline for driving the view from a detection source.

use crate::view::{DrawInstruction, TrackingView};

use super::DetectionSource;

/// Bundles a `DetectionSource` with a `TrackingView`.
///
/// Frames are processed strictly one after another: each frame's registry
/// update finishes before its instructions are returned.
pub struct TrackingPipeline<S: DetectionSource> {
    source: S,
    view: TrackingView,
}

impl<S: DetectionSource> TrackingPipeline<S> {
    /// Create a new pipeline with the given source and view.
    pub fn new(source: S, view: TrackingView) -> Self {
        Self { source, view }
    }

    /// Create a new pipeline with the default view configuration.
    pub fn with_default_config(source: S) -> Self {
        Self::new(source, TrackingView::with_default_config())
    }

    /// Pull one frame and return its draw instructions.
    ///
    /// Returns `Ok(None)` once the source is exhausted.
    pub fn process_next(&mut self) -> Result<Option<Vec<DrawInstruction>>, S::Error> {
        let Some(frame) = self.source.next_frame()? else {
            return Ok(None);
        };
        Ok(Some(self.view.generate_view(
            &frame.detections,
            frame.timestamp_ns,
            &frame.pose,
            frame.is_tracked,
        )))
    }

    /// Drain the source, handing each frame's instructions to `sink`.
    ///
    /// Returns the number of frames processed.
    pub fn run<F>(&mut self, mut sink: F) -> Result<usize, S::Error>
    where
        F: FnMut(&[DrawInstruction]),
    {
        let mut frames = 0;
        while let Some(instructions) = self.process_next()? {
            sink(&instructions);
            frames += 1;
        }
        Ok(frames)
    }

    /// Get a reference to the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Get a reference to the underlying view.
    pub fn view(&self) -> &TrackingView {
        &self.view
    }

    /// Get a mutable reference to the underlying view.
    pub fn view_mut(&mut self) -> &mut TrackingView {
        &mut self.view
    }
}
