use anyhow::{Result, anyhow};
use log::{error, info, warn};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::composition::cue::{POSITION_BOTTOM, POSITION_TOP};
use crate::composition::layers::LayerAllocator;
use crate::composition::planner::{CompositionPlan, CompositionPlanner};
use crate::file_utils::FileManager;
use crate::media_probe;
use crate::sink::{EditorSink, TimelineSink};
use crate::transcribe::TranscribeClient;
use crate::transcript::{Transcript, transcript_path};

// @module: Application controller for the transcript overlay pipeline

/// Vertical placement requested by the operator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RepositionTarget {
    /// Upper band of the frame
    Top,
    /// Lower band of the frame
    Bottom,
    /// Explicit normalized y in [-1, 1]
    Custom(f32),
    /// Back to the default placement
    Reset,
}

impl RepositionTarget {
    /// Parse an operator-supplied position: "top", "bottom" or a y value
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "reset" => Ok(Self::Reset),
            other => {
                let y: f32 = other
                    .parse()
                    .map_err(|_| anyhow!("Invalid position '{}': expected top, bottom, reset or a number", raw))?;
                if !(-1.0..=1.0).contains(&y) {
                    return Err(anyhow!("Position y {} out of range [-1, 1]", y));
                }
                Ok(Self::Custom(y))
            }
        }
    }

    /// Normalized y value for the placement
    pub fn position_y(&self) -> f32 {
        match self {
            Self::Top => POSITION_TOP,
            Self::Bottom => POSITION_BOTTOM,
            Self::Custom(y) => *y,
            Self::Reset => POSITION_TOP,
        }
    }
}

/// Main application controller for the overlay pipeline
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Timeline sink receiving composition plans
    sink: Arc<dyn TimelineSink>,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let sink = Arc::new(EditorSink::new(
            config.editor.executable.clone(),
            config.editor.driver_script.clone(),
            config.editor.apply_timeout_secs,
        ));
        Self::with_sink(config, sink)
    }

    /// Create a controller with an explicit sink; tests use this with a fake
    /// sink so no editor process is ever launched
    pub fn with_sink(config: Config, sink: Arc<dyn TimelineSink>) -> Result<Self> {
        Ok(Self { config, sink })
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.transcription.endpoint.is_empty()
    }

    /// Build a planner from the configured style and band layout
    fn planner(&self) -> CompositionPlanner {
        CompositionPlanner::new(
            self.config.style.clone(),
            LayerAllocator::new(self.config.channels.sentence_base, self.config.channels.word_base),
        )
    }

    /// Process a single video: transcribe, persist the transcript, plan the
    /// composition and hand it to the timeline sink
    pub async fn run(&self, input_file: PathBuf, force_overwrite: bool) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !input_file.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let base_name = FileManager::base_name(&input_file);
        let project_path = FileManager::project_path(&self.config.output_folder, &base_name);

        if project_path.exists() && !force_overwrite {
            warn!("Skipping file, project already exists (use -f to force overwrite)");
            return Ok(());
        }

        info!("Transcribing {:?}, please wait…", input_file);
        let client = TranscribeClient::new(
            self.config.transcription.endpoint.clone(),
            self.config.transcription.timeout_secs,
        );
        let mut transcript = client.transcribe(&input_file).await?;

        // Older service deployments answer without a resolution record;
        // synthesize one from the file itself so planning still has a canvas.
        if transcript.resolution.width == 0 || transcript.resolution.height == 0 {
            warn!("Transcript has no resolution record, probing {:?}", input_file);
            let info = media_probe::probe_video(&input_file).await?;
            transcript.resolution = info.to_canvas_decl();
        }

        let transcript_file = transcript_path(&self.config.output_folder, &base_name);
        transcript.save(&transcript_file)?;
        info!("Transcript saved to {:?}", transcript_file);

        let plan = self.planner().plan(&transcript)?;
        info!(
            "Planned {} cues on canvas {}",
            plan.cues.len(),
            plan.canvas.describe()
        );

        self.sink.apply(&plan, &input_file, &project_path).await?;

        info!(
            "Processing completed in {}.",
            Self::format_duration(start_time.elapsed())
        );
        Ok(())
    }

    /// Run the workflow in folder mode, processing all video files in a
    /// directory one at a time.
    ///
    /// Heavy external operations never overlap: each video's transcription
    /// and project build finish before the next video starts, and unless
    /// `assume_yes` is set the operator confirms between items.
    pub async fn run_folder(
        &self,
        input_dir: PathBuf,
        force_overwrite: bool,
        assume_yes: bool,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !input_dir.exists() {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let video_files = FileManager::find_videos(&input_dir)?;
        if video_files.is_empty() {
            return Err(anyhow!("No video files found in directory: {:?}", input_dir));
        }

        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(video_files.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Processing files");

        let mut success_count = 0;
        let mut error_count = 0;
        let mut skip_count = 0;

        for (index, video_file) in video_files.iter().enumerate() {
            let file_name = video_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            folder_pb.set_message(format!("Processing: {}", file_name));

            let base_name = FileManager::base_name(video_file);
            let project_path = FileManager::project_path(&self.config.output_folder, &base_name);
            if project_path.exists() && !force_overwrite {
                warn!("Skipping file, project already exists (use -f to force overwrite)");
                skip_count += 1;
                folder_pb.inc(1);
                continue;
            }

            match self.run(video_file.clone(), force_overwrite).await {
                Ok(_) => {
                    success_count += 1;
                }
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    error_count += 1;
                }
            }

            folder_pb.inc(1);

            let has_more = index + 1 < video_files.len();
            if has_more && !assume_yes {
                folder_pb.set_message("Waiting for operator");
                wait_for_continue(&file_name)?;
            }
        }

        folder_pb.finish_with_message("Folder processing complete");

        let duration = start_time.elapsed();
        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors - Duration: {}",
            success_count,
            skip_count,
            error_count,
            Self::format_duration(duration)
        );

        Ok(())
    }

    /// Build and persist a composition plan from an existing transcript file
    pub fn plan_transcript(&self, transcript_file: &Path, plan_file: &Path) -> Result<CompositionPlan> {
        let transcript = Transcript::load(transcript_file)?;
        let plan = self.planner().plan(&transcript)?;

        plan.save(plan_file)?;
        info!(
            "Planned {} cues on canvas {}; plan saved to {:?}",
            plan.cues.len(),
            plan.canvas.describe(),
            plan_file
        );

        Ok(plan)
    }

    /// Render a previously built project to the output folder
    pub async fn render(&self, project_path: PathBuf) -> Result<PathBuf> {
        let base_name = FileManager::base_name(&project_path);
        let output_path = FileManager::render_path(&self.config.output_folder, &base_name);
        FileManager::ensure_dir(&self.config.output_folder)?;

        let render_sink = EditorSink::new(
            self.config.editor.executable.clone(),
            self.config.editor.driver_script.clone(),
            self.config.editor.render_timeout_secs,
        );
        render_sink.render(&project_path, &output_path).await?;

        Ok(output_path)
    }

    /// Rewrite the vertical placement of every cue in a persisted plan and,
    /// when the source video is supplied, re-apply the new snapshot to its
    /// project
    pub async fn reposition(
        &self,
        plan_file: &Path,
        target: RepositionTarget,
        video: Option<PathBuf>,
    ) -> Result<()> {
        let plan = CompositionPlan::load(plan_file)?;
        let repositioned = plan.with_position_y(target.position_y());
        repositioned.save(plan_file)?;
        info!("Updated cue placement in {:?}", plan_file);

        if let Some(video_path) = video {
            let project_path = plan_file
                .parent()
                .map(|dir| {
                    let base_name = FileManager::base_name(&video_path);
                    dir.join(format!("{}.blend", base_name))
                })
                .ok_or_else(|| anyhow!("Plan file has no parent directory: {:?}", plan_file))?;

            self.sink.apply(&repositioned, &video_path, &project_path).await?;
        } else {
            info!("Re-run with --video to rebuild the project with the new placement");
        }

        Ok(())
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

/// Block until the operator confirms the next item may start
fn wait_for_continue(last_file: &str) -> Result<()> {
    let mut stderr = std::io::stderr();
    write!(
        stderr,
        "Finished {}. Press Enter to continue with the next video... ",
        last_file
    )?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
