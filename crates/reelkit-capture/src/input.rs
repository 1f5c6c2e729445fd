//! Camera/microphone input selection for the ffmpeg command line.

use crate::CaptureError;

/// Requested capture inputs and geometry, resolved from the application
/// configuration by the caller.
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    /// Platform-specific camera identifier; the platform default is used
    /// when unset.
    pub video_input: Option<String>,
    /// Platform-specific microphone identifier; the platform default is used
    /// when unset.
    pub audio_input: Option<String>,
    /// Requested frame width in pixels.
    pub frame_width: u32,
    /// Requested frame height in pixels.
    pub frame_height: u32,
    /// Requested frame rate in frames per second.
    pub frame_rate: u32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            video_input: None,
            audio_input: None,
            frame_width: 500,
            frame_height: 500,
            frame_rate: 30,
        }
    }
}

/// Operating systems with wired-up capture inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
}

impl Platform {
    /// The platform this binary was compiled for, if capture is supported
    /// there.
    pub fn current() -> Result<Self, CaptureError> {
        if cfg!(target_os = "linux") {
            Ok(Self::Linux)
        } else if cfg!(target_os = "macos") {
            Ok(Self::MacOs)
        } else {
            Err(CaptureError::UnsupportedPlatform)
        }
    }
}

/// Builds the ffmpeg input arguments for the given platform and options.
///
/// Linux reads the camera through video4linux2 and the microphone through
/// PulseAudio as two separate inputs. macOS reads both through one
/// avfoundation input addressed as `video:audio` device indices.
pub fn input_args(platform: Platform, options: &CaptureOptions) -> Vec<String> {
    let geometry = format!("{}x{}", options.frame_width, options.frame_height);
    let frame_rate = options.frame_rate.to_string();

    match platform {
        Platform::Linux => {
            let video = options.video_input.as_deref().unwrap_or("/dev/video0");
            let audio = options.audio_input.as_deref().unwrap_or("default");
            vec![
                "-f".to_owned(),
                "v4l2".to_owned(),
                "-framerate".to_owned(),
                frame_rate,
                "-video_size".to_owned(),
                geometry,
                "-i".to_owned(),
                video.to_owned(),
                "-f".to_owned(),
                "pulse".to_owned(),
                "-i".to_owned(),
                audio.to_owned(),
            ]
        }
        Platform::MacOs => {
            let video = options.video_input.as_deref().unwrap_or("0");
            let audio = options.audio_input.as_deref().unwrap_or("0");
            vec![
                "-f".to_owned(),
                "avfoundation".to_owned(),
                "-framerate".to_owned(),
                frame_rate,
                "-video_size".to_owned(),
                geometry,
                "-i".to_owned(),
                format!("{video}:{audio}"),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_uses_two_default_inputs() {
        let args = input_args(Platform::Linux, &CaptureOptions::default());
        assert!(args.contains(&"v4l2".to_owned()));
        assert!(args.contains(&"/dev/video0".to_owned()));
        assert!(args.contains(&"pulse".to_owned()));
        assert!(args.contains(&"default".to_owned()));
        assert!(args.contains(&"500x500".to_owned()));
    }

    #[test]
    fn macos_addresses_one_combined_input() {
        let options = CaptureOptions {
            video_input: Some("1".to_owned()),
            audio_input: Some("2".to_owned()),
            ..CaptureOptions::default()
        };
        let args = input_args(Platform::MacOs, &options);
        assert!(args.contains(&"avfoundation".to_owned()));
        assert!(args.contains(&"1:2".to_owned()));
        // Exactly one -i: video and audio share the input.
        assert_eq!(args.iter().filter(|arg| *arg == "-i").count(), 1);
    }

    #[test]
    fn overrides_replace_the_default_devices() {
        let options = CaptureOptions {
            video_input: Some("/dev/video3".to_owned()),
            audio_input: Some("alsa_input.usb".to_owned()),
            frame_width: 1280,
            frame_height: 720,
            frame_rate: 60,
        };
        let args = input_args(Platform::Linux, &options);
        assert!(args.contains(&"/dev/video3".to_owned()));
        assert!(args.contains(&"alsa_input.usb".to_owned()));
        assert!(args.contains(&"1280x720".to_owned()));
        assert!(args.contains(&"60".to_owned()));
    }
}
