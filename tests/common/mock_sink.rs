/*!
 * Mock timeline sink for testing
 *
 * Records every apply/render call instead of launching the external editor,
 * so pipeline tests run with zero process-launch cost. Failures can be
 * injected to exercise the error paths.
 */

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use overtitle::composition::planner::CompositionPlan;
use overtitle::errors::SinkError;
use overtitle::sink::TimelineSink;

/// One recorded apply call
#[derive(Debug, Clone)]
pub struct AppliedComposition {
    /// Number of cues in the applied plan
    pub cue_count: usize,
    /// Canvas description of the applied plan
    pub canvas: String,
    /// Source video handed to the sink
    pub video_path: PathBuf,
    /// Project file the sink was asked to build
    pub project_path: PathBuf,
}

/// Tracks sink calls to ensure no actual editor process is launched
#[derive(Debug, Default)]
pub struct SinkCallTracker {
    /// Apply calls in order
    pub applied: Vec<AppliedComposition>,
    /// Render calls in order: (project, output)
    pub rendered: Vec<(PathBuf, PathBuf)>,
    /// Should the next call fail
    pub should_fail: bool,
}

/// Sink implementation that records calls in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    tracker: Arc<Mutex<SinkCallTracker>>,
}

impl RecordingSink {
    /// Create a new recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the call tracker
    pub fn tracker(&self) -> Arc<Mutex<SinkCallTracker>> {
        Arc::clone(&self.tracker)
    }

    /// Make the next sink call fail
    pub fn fail_next(&self) {
        self.tracker.lock().unwrap().should_fail = true;
    }
}

#[async_trait]
impl TimelineSink for RecordingSink {
    async fn apply(
        &self,
        plan: &CompositionPlan,
        video_path: &Path,
        project_path: &Path,
    ) -> Result<(), SinkError> {
        let mut tracker = self.tracker.lock().unwrap();
        if tracker.should_fail {
            tracker.should_fail = false;
            return Err(SinkError::Unavailable("mock sink failure".to_string()));
        }

        tracker.applied.push(AppliedComposition {
            cue_count: plan.cues.len(),
            canvas: plan.canvas.describe(),
            video_path: video_path.to_path_buf(),
            project_path: project_path.to_path_buf(),
        });
        Ok(())
    }

    async fn render(&self, project_path: &Path, output_path: &Path) -> Result<(), SinkError> {
        let mut tracker = self.tracker.lock().unwrap();
        if tracker.should_fail {
            tracker.should_fail = false;
            return Err(SinkError::ProcessFailed("mock render failure".to_string()));
        }

        tracker
            .rendered
            .push((project_path.to_path_buf(), output_path.to_path_buf()));
        Ok(())
    }
}
