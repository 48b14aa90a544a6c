//! Export rendering seam.
//!
//! The engine hands the full track list plus output parameters across this
//! boundary and receives finished video bytes or an error message. The
//! backend's filter graph and codecs are its own business.

use serde::{Deserialize, Serialize};

use crate::entities::{Project, Resolution, Track};

/// Everything a render backend needs to produce the output file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportJob {
    pub tracks: Vec<Track>,
    pub resolution: Resolution,
    pub fps: f64,
    pub duration: f64,
}

impl ExportJob {
    /// Snapshot a project into a render job.
    pub fn from_project(project: &Project) -> Self {
        Self {
            tracks: project.tracks.clone(),
            resolution: project.resolution,
            fps: project.fps,
            duration: project.duration,
        }
    }
}

/// Rendering boundary.
pub trait RenderBackend {
    fn render(&self, job: &ExportJob) -> Result<Vec<u8>, String>;
}

/// Backend used when none is configured: every render fails with a clear
/// message instead of panicking.
#[derive(Debug, Default)]
pub struct NullBackend;

impl RenderBackend for NullBackend {
    fn render(&self, _job: &ExportJob) -> Result<Vec<u8>, String> {
        Err("no render backend configured".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Clip, ClipKind};

    #[test]
    fn test_job_snapshots_project() {
        let mut project = Project::new();
        project.tracks[0]
            .clips
            .push(Clip::new("c1", ClipKind::Video, "mem://a.mp4").placed(0.0, 5.0));

        let job = ExportJob::from_project(&project);
        assert_eq!(job.tracks.len(), 3);
        assert_eq!(job.tracks[0].clips.len(), 1);
        assert_eq!(job.fps, 30.0);
        assert_eq!(job.duration, 60.0);

        // Later edits do not reach into the snapshot.
        project.tracks[0].clips.clear();
        assert_eq!(job.tracks[0].clips.len(), 1);
    }

    #[test]
    fn test_null_backend_fails_cleanly() {
        let project = Project::new();
        let job = ExportJob::from_project(&project);
        assert!(NullBackend.render(&job).is_err());
    }
}
