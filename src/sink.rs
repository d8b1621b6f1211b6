use std::path::{Path, PathBuf};
use async_trait::async_trait;
use log::{debug, error, info};
use tokio::process::Command;

use crate::composition::planner::CompositionPlan;
use crate::errors::SinkError;

// @module: Timeline sink abstraction and external editor driver

/// Capability interface to the host timeline environment.
///
/// The sink owns clip/audio placement, text elements on channels, opacity
/// keyframing and rendering. Tests substitute an in-memory implementation.
#[async_trait]
pub trait TimelineSink: Send + Sync {
    /// Apply a composition plan to a project for the given source video
    async fn apply(
        &self,
        plan: &CompositionPlan,
        video_path: &Path,
        project_path: &Path,
    ) -> Result<(), SinkError>;

    /// Render a previously built project to the output file
    async fn render(&self, project_path: &Path, output_path: &Path) -> Result<(), SinkError>;
}

/// Sink implementation that drives the external editor executable headless
pub struct EditorSink {
    /// Editor executable
    executable: PathBuf,
    /// Driver script the editor runs to build the composition
    driver_script: PathBuf,
    /// Seconds to wait for one editor invocation
    timeout_secs: u64,
}

impl EditorSink {
    /// Create a sink for the given editor install
    pub fn new(
        executable: impl Into<PathBuf>,
        driver_script: impl Into<PathBuf>,
        timeout_secs: u64,
    ) -> Self {
        EditorSink {
            executable: executable.into(),
            driver_script: driver_script.into(),
            timeout_secs,
        }
    }

    /// Persisted plan location for a project file; one project per folder
    pub fn plan_path(project_path: &Path) -> PathBuf {
        project_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("composition.json")
    }

    /// Run one editor invocation with a timeout, mapping failures to sink errors
    async fn run_editor(&self, args: &[&str]) -> Result<(), SinkError> {
        if !self.executable.exists() {
            return Err(SinkError::Unavailable(format!(
                "editor executable not found at {:?}",
                self.executable
            )));
        }

        debug!("Launching editor: {:?} {:?}", self.executable, args);

        let editor_future = Command::new(&self.executable).args(args).output();

        let timeout_duration = std::time::Duration::from_secs(self.timeout_secs);
        let output = tokio::select! {
            result = editor_future => {
                result.map_err(|e| SinkError::Unavailable(format!(
                    "failed to launch editor process: {}", e
                )))?
            },
            _ = tokio::time::sleep(timeout_duration) => {
                return Err(SinkError::Timeout(self.timeout_secs));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let filtered = filter_editor_stderr(&stderr);
            error!("Editor process failed: {}", filtered);
            return Err(SinkError::ProcessFailed(filtered));
        }

        Ok(())
    }
}

#[async_trait]
impl TimelineSink for EditorSink {
    async fn apply(
        &self,
        plan: &CompositionPlan,
        video_path: &Path,
        project_path: &Path,
    ) -> Result<(), SinkError> {
        let plan_path = Self::plan_path(project_path);
        plan.save(&plan_path)
            .map_err(|e| SinkError::ProcessFailed(format!("failed to persist plan: {}", e)))?;

        let args = [
            "--background",
            "--python",
            self.driver_script.to_str().unwrap_or_default(),
            "--",
            video_path.to_str().unwrap_or_default(),
            plan_path.to_str().unwrap_or_default(),
            project_path.to_str().unwrap_or_default(),
        ];

        self.run_editor(&args).await?;
        info!("Project saved to {:?}", project_path);
        Ok(())
    }

    async fn render(&self, project_path: &Path, output_path: &Path) -> Result<(), SinkError> {
        if !project_path.exists() {
            return Err(SinkError::Unavailable(format!(
                "project file not found: {:?}",
                project_path
            )));
        }

        let args = [
            "-b",
            project_path.to_str().unwrap_or_default(),
            "-o",
            output_path.to_str().unwrap_or_default(),
            "-a",
        ];

        self.run_editor(&args).await?;
        info!("Rendered {:?}", output_path);
        Ok(())
    }
}

/// Default editor install location for the current platform
pub fn default_editor_path() -> PathBuf {
    if cfg!(target_os = "windows") {
        PathBuf::from(r"C:\Program Files\Blender Foundation\Blender 4.4\blender.exe")
    } else if cfg!(target_os = "macos") {
        PathBuf::from("/Applications/Blender.app/Contents/MacOS/Blender")
    } else {
        PathBuf::from("/usr/bin/blender")
    }
}

/// Filter editor stderr to only show meaningful error lines, stripping the
/// version banner, preference loading and per-frame progress noise.
fn filter_editor_stderr(stderr: &str) -> String {
    let dominated_prefixes = [
        "Blender",
        "Read prefs",
        "Read blend",
        "found bundled python",
        "Info:",
        "Fra:",
        "Saved:",
        "AL lib:",
        "ALSA lib",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !dominated_prefixes.iter().any(|p| trimmed.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown editor error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
