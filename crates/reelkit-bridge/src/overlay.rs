use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One input video for an overlay job.
///
/// A source is either a file on the local machine (uploaded as a binary
/// part) or a reference id of a file already in the remote store (sent as a
/// text field). The two are mutually exclusive per source, which the enum
/// encodes directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlaySource {
    /// A local file to upload with the request.
    File(PathBuf),
    /// Reference id of a file already in the remote store.
    DriveId(String),
}

/// Corner of the main video the overlay is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Compositing parameters sent to the overlay endpoint as one JSON-encoded
/// form field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlayParams {
    /// Corner placement of the overlay video.
    pub position: OverlayPosition,
    /// Scale factor for the overlay video, in `(0, 1]`.
    pub scale: f64,
    /// Volume multiplier for the main video, in `(0, 2]`.
    pub main_volume: f64,
    /// Volume multiplier for the overlay video, in `(0, 2]`.
    pub overlay_volume: f64,
    /// Playback-speed multiplier for the result, in `(0, 4]`.
    pub speed_factor: f64,
}

impl Default for OverlayParams {
    fn default() -> Self {
        Self {
            position: OverlayPosition::default(),
            scale: 0.3,
            main_volume: 1.0,
            overlay_volume: 1.0,
            speed_factor: 1.0,
        }
    }
}

/// Client-side validation failures that block an overlay submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverlayJobError {
    /// A source was given as an empty path or an empty reference id.
    #[error("provide a file or a remote reference id for the {0} video")]
    MissingSource(&'static str),
    /// The scale factor is outside `(0, 1]`.
    #[error("scale must be greater than 0 and at most 1")]
    ScaleOutOfRange,
    /// A volume multiplier is outside `(0, 2]`.
    #[error("{0} volume must be greater than 0 and at most 2")]
    VolumeOutOfRange(&'static str),
    /// The playback-speed multiplier is outside `(0, 4]`.
    #[error("speed factor must be greater than 0 and at most 4")]
    SpeedOutOfRange,
}

impl OverlayParams {
    /// Checks the parameter ranges enforced by the overlay endpoint, so that
    /// out-of-range values are rejected before a request is built.
    pub fn validate(&self) -> Result<(), OverlayJobError> {
        if !(self.scale > 0.0 && self.scale <= 1.0) {
            return Err(OverlayJobError::ScaleOutOfRange);
        }
        if !(self.main_volume > 0.0 && self.main_volume <= 2.0) {
            return Err(OverlayJobError::VolumeOutOfRange("main"));
        }
        if !(self.overlay_volume > 0.0 && self.overlay_volume <= 2.0) {
            return Err(OverlayJobError::VolumeOutOfRange("overlay"));
        }
        if !(self.speed_factor > 0.0 && self.speed_factor <= 4.0) {
            return Err(OverlayJobError::SpeedOutOfRange);
        }
        Ok(())
    }
}

/// How the finished composite should be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayDelivery {
    /// The service returns the binary result, which is saved to the local
    /// downloads directory.
    #[default]
    DirectDownload,
    /// The service uploads the result to the remote store and returns its
    /// reference id.
    StoreRemote,
}

/// One submit/response cycle of the overlay builder: two sources, the
/// compositing parameters and the delivery mode.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayJob {
    /// The main (background) video.
    pub main: OverlaySource,
    /// The video composited on top.
    pub overlay: OverlaySource,
    /// Compositing parameters.
    pub params: OverlayParams,
    /// Delivery mode for the result.
    pub delivery: OverlayDelivery,
}

impl OverlayJob {
    /// Validates both sources and the parameter ranges before submission.
    pub fn validate(&self) -> Result<(), OverlayJobError> {
        validate_source(&self.main, "main")?;
        validate_source(&self.overlay, "overlay")?;
        self.params.validate()
    }
}

fn validate_source(source: &OverlaySource, role: &'static str) -> Result<(), OverlayJobError> {
    let present = match source {
        OverlaySource::File(path) => !path.as_os_str().is_empty(),
        OverlaySource::DriveId(id) => !id.trim().is_empty(),
    };
    if present {
        Ok(())
    } else {
        Err(OverlayJobError::MissingSource(role))
    }
}

/// The result of a finished overlay job, mirroring the two delivery modes.
#[derive(Debug, Clone)]
pub enum OverlayOutcome {
    /// Direct mode: the binary result was written to this path.
    SavedLocally { path: PathBuf },
    /// Remote-store mode: the result was stored under this reference id.
    StoredRemotely { drive_file_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_serialize_to_the_wire_block() {
        let params = OverlayParams {
            position: OverlayPosition::BottomLeft,
            scale: 0.5,
            main_volume: 1.0,
            overlay_volume: 0.8,
            speed_factor: 2.0,
        };
        let json = serde_json::to_value(params).expect("params serialize");
        assert_eq!(json["position"], "bottom_left");
        assert_eq!(json["scale"], 0.5);
        assert_eq!(json["main_volume"], 1.0);
        assert_eq!(json["overlay_volume"], 0.8);
        assert_eq!(json["speed_factor"], 2.0);
    }

    #[test]
    fn default_params_pass_validation() {
        assert_eq!(OverlayParams::default().validate(), Ok(()));
    }

    #[test]
    fn out_of_range_params_are_rejected() {
        let mut params = OverlayParams::default();
        params.scale = 0.0;
        assert_eq!(params.validate(), Err(OverlayJobError::ScaleOutOfRange));

        let mut params = OverlayParams::default();
        params.overlay_volume = 2.5;
        assert_eq!(
            params.validate(),
            Err(OverlayJobError::VolumeOutOfRange("overlay"))
        );

        let mut params = OverlayParams::default();
        params.speed_factor = 4.1;
        assert_eq!(params.validate(), Err(OverlayJobError::SpeedOutOfRange));
    }

    #[test]
    fn empty_sources_are_rejected() {
        let job = OverlayJob {
            main: OverlaySource::DriveId(String::new()),
            overlay: OverlaySource::File(PathBuf::from("/tmp/b.mp4")),
            params: OverlayParams::default(),
            delivery: OverlayDelivery::DirectDownload,
        };
        assert_eq!(job.validate(), Err(OverlayJobError::MissingSource("main")));

        let job = OverlayJob {
            main: OverlaySource::File(PathBuf::from("/tmp/a.mp4")),
            overlay: OverlaySource::File(PathBuf::new()),
            params: OverlayParams::default(),
            delivery: OverlayDelivery::StoreRemote,
        };
        assert_eq!(
            job.validate(),
            Err(OverlayJobError::MissingSource("overlay"))
        );
    }
}
