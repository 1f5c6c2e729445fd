//! Recording-format negotiation against the local ffmpeg build.
//!
//! The preference list mirrors what a browser recorder would try: WebM with
//! VP9, WebM with VP8, then MP4 with H.264. Whether a format is usable is
//! decided by parsing the encoder table of the discovered ffmpeg binary.

use std::collections::BTreeSet;
use std::process::Stdio;

use tokio::process::Command;

use crate::CaptureError;

/// One container/codec combination the recorder can produce.
#[derive(Debug, PartialEq, Eq)]
pub struct RecordingFormat {
    /// Human-readable label shown in the UI.
    pub label: &'static str,
    /// Container name passed to ffmpeg's `-f` output option.
    pub container: &'static str,
    /// File extension for saved clips.
    pub extension: &'static str,
    /// MIME type of the produced stream.
    pub mime_type: &'static str,
    /// ffmpeg video encoder name.
    pub video_encoder: &'static str,
    /// ffmpeg audio encoder name.
    pub audio_encoder: &'static str,
    /// Encoder tuning for live capture (the camera delivers in real time, so
    /// the encoder must keep up rather than optimize for size).
    pub encode_args: &'static [&'static str],
    /// Extra muxer options; MP4 needs fragmented output to be streamable
    /// over a pipe.
    pub mux_args: &'static [&'static str],
}

/// Descending-preference list of recording formats.
pub const PREFERRED_FORMATS: &[RecordingFormat] = &[
    RecordingFormat {
        label: "WebM (VP9/Opus)",
        container: "webm",
        extension: "webm",
        mime_type: "video/webm",
        video_encoder: "libvpx-vp9",
        audio_encoder: "libopus",
        encode_args: &["-deadline", "realtime", "-cpu-used", "8"],
        mux_args: &[],
    },
    RecordingFormat {
        label: "WebM (VP8/Vorbis)",
        container: "webm",
        extension: "webm",
        mime_type: "video/webm",
        video_encoder: "libvpx",
        audio_encoder: "libvorbis",
        encode_args: &["-deadline", "realtime", "-cpu-used", "8"],
        mux_args: &[],
    },
    RecordingFormat {
        label: "MP4 (H.264/AAC)",
        container: "mp4",
        extension: "mp4",
        mime_type: "video/mp4",
        video_encoder: "libx264",
        audio_encoder: "aac",
        encode_args: &["-preset", "ultrafast", "-tune", "zerolatency"],
        mux_args: &["-movflags", "+frag_keyframe+empty_moov"],
    },
];

/// Parses the output of `ffmpeg -encoders` into the set of encoder names.
///
/// The table starts after a `------` separator line; each entry line carries
/// a capability column followed by the encoder name.
pub fn parse_encoder_names(output: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    let mut in_table = false;
    for line in output.lines() {
        if !in_table {
            in_table = line.trim_start().starts_with("------");
            continue;
        }
        let mut columns = line.split_whitespace();
        let (Some(_capabilities), Some(name)) = (columns.next(), columns.next()) else {
            continue;
        };
        names.insert(name.to_owned());
    }
    names
}

/// Returns the first preferred format whose video and audio encoders are
/// both present in `available`.
pub fn select_recording_format(
    available: &BTreeSet<String>,
) -> Option<&'static RecordingFormat> {
    PREFERRED_FORMATS.iter().find(|format| {
        available.contains(format.video_encoder) && available.contains(format.audio_encoder)
    })
}

/// Runs `ffmpeg -encoders` and returns the set of supported encoder names.
pub async fn probe_available_encoders(
    ffmpeg_path: &str,
) -> Result<BTreeSet<String>, CaptureError> {
    let output = Command::new(ffmpeg_path)
        .args(["-hide_banner", "-encoders"])
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|error| CaptureError::Probe(error.to_string()))?;

    if !output.status.success() {
        return Err(CaptureError::Probe(format!(
            "ffmpeg -encoders exited with status: {}",
            output.status
        )));
    }

    Ok(parse_encoder_names(&String::from_utf8_lossy(
        &output.stdout,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENCODER_TABLE: &str = "\
Encoders:
 V..... = Video
 A..... = Audio
 ------
 V....D libx264              H.264 / AVC / MPEG-4 AVC (codec h264)
 V....D libvpx               libvpx VP8 (codec vp8)
 A....D aac                  AAC (Advanced Audio Coding)
 A....D libvorbis            libvorbis
";

    #[test]
    fn parses_encoder_names_from_the_table() {
        let names = parse_encoder_names(ENCODER_TABLE);
        assert!(names.contains("libx264"));
        assert!(names.contains("libvpx"));
        assert!(names.contains("aac"));
        assert!(names.contains("libvorbis"));
        // Legend lines above the separator are not encoder entries.
        assert!(!names.contains("Video"));
        assert!(!names.contains("="));
    }

    #[test]
    fn selection_walks_the_preference_list_in_order() {
        let all: BTreeSet<String> = [
            "libvpx-vp9",
            "libopus",
            "libvpx",
            "libvorbis",
            "libx264",
            "aac",
        ]
        .iter()
        .map(|name| (*name).to_owned())
        .collect();
        let format = select_recording_format(&all).expect("a format must match");
        assert_eq!(format.video_encoder, "libvpx-vp9");

        let without_vp9: BTreeSet<String> = all
            .iter()
            .filter(|name| *name != "libvpx-vp9")
            .cloned()
            .collect();
        let format = select_recording_format(&without_vp9).expect("a format must match");
        assert_eq!(format.video_encoder, "libvpx");

        let x264_only: BTreeSet<String> = ["libx264", "aac"]
            .iter()
            .map(|name| (*name).to_owned())
            .collect();
        let format = select_recording_format(&x264_only).expect("a format must match");
        assert_eq!(format.container, "mp4");
    }

    #[test]
    fn selection_requires_both_encoders_of_a_pair() {
        // VP9 video without its audio companion must not be selected.
        let mismatched: BTreeSet<String> = ["libvpx-vp9", "aac"]
            .iter()
            .map(|name| (*name).to_owned())
            .collect();
        assert!(select_recording_format(&mismatched).is_none());
    }
}
