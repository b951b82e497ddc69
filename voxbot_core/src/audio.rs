//! Audio container recognition.
//!
//! The transcription endpoint wants an upload labeled with a filename and
//! MIME type, so the container kind has to be known before the request is
//! built. Recognition is a byte-prefix check only; decoding is out of scope.

/// Audio container kinds the transcription endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
    Ogg,
    Flac,
    WebM,
    Mp4,
}

impl AudioFormat {
    /// Recognize a container from its leading bytes.
    ///
    /// Returns `None` for anything that is not a known container, including
    /// buffers too short to carry a header.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 12 {
            return None;
        }
        if &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE" {
            return Some(Self::Wav);
        }
        if &bytes[0..4] == b"OggS" {
            return Some(Self::Ogg);
        }
        if &bytes[0..4] == b"fLaC" {
            return Some(Self::Flac);
        }
        // EBML header, shared by WebM and Matroska
        if bytes[0..4] == [0x1A, 0x45, 0xDF, 0xA3] {
            return Some(Self::WebM);
        }
        if &bytes[4..8] == b"ftyp" {
            return Some(Self::Mp4);
        }
        if &bytes[0..3] == b"ID3" {
            return Some(Self::Mp3);
        }
        // Bare MPEG audio frame sync
        if bytes[0] == 0xFF && (bytes[1] & 0xE0) == 0xE0 {
            return Some(Self::Mp3);
        }
        None
    }

    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Ogg => "audio/ogg",
            Self::Flac => "audio/flac",
            Self::WebM => "audio/webm",
            Self::Mp4 => "audio/mp4",
        }
    }

    /// Filename used to label the multipart upload.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Wav => "audio.wav",
            Self::Mp3 => "audio.mp3",
            Self::Ogg => "audio.ogg",
            Self::Flac => "audio.flac",
            Self::WebM => "audio.webm",
            Self::Mp4 => "audio.mp4",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(prefix: &[u8]) -> Vec<u8> {
        let mut bytes = prefix.to_vec();
        bytes.resize(16, 0);
        bytes
    }

    #[test]
    fn sniffs_wav() {
        let mut bytes = b"RIFF".to_vec();
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        bytes.extend_from_slice(b"WAVEfmt ");
        assert_eq!(AudioFormat::sniff(&bytes), Some(AudioFormat::Wav));
    }

    #[test]
    fn sniffs_ogg_flac_webm() {
        assert_eq!(AudioFormat::sniff(&padded(b"OggS")), Some(AudioFormat::Ogg));
        assert_eq!(
            AudioFormat::sniff(&padded(b"fLaC")),
            Some(AudioFormat::Flac)
        );
        assert_eq!(
            AudioFormat::sniff(&padded(&[0x1A, 0x45, 0xDF, 0xA3])),
            Some(AudioFormat::WebM)
        );
    }

    #[test]
    fn sniffs_mp4_by_ftyp_box() {
        let mut bytes = vec![0, 0, 0, 0x20];
        bytes.extend_from_slice(b"ftypM4A ");
        bytes.resize(16, 0);
        assert_eq!(AudioFormat::sniff(&bytes), Some(AudioFormat::Mp4));
    }

    #[test]
    fn sniffs_mp3_with_and_without_id3() {
        assert_eq!(AudioFormat::sniff(&padded(b"ID3")), Some(AudioFormat::Mp3));
        assert_eq!(
            AudioFormat::sniff(&padded(&[0xFF, 0xFB])),
            Some(AudioFormat::Mp3)
        );
    }

    #[test]
    fn rejects_unknown_and_short_buffers() {
        assert_eq!(AudioFormat::sniff(b"not audio at all"), None);
        assert_eq!(AudioFormat::sniff(b"RIFF"), None);
        assert_eq!(AudioFormat::sniff(&[]), None);
    }
}
