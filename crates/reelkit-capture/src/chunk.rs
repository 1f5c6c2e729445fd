//! Grouping of the encoder's byte stream into timed chunks.

use std::time::Duration;

/// Snapshot describing one sealed chunk, handed to the caller's chunk
/// callback.
#[derive(Debug, Clone, Copy)]
pub struct ChunkInfo {
    /// Zero-based index of the sealed chunk within the session.
    pub sequence: u64,
    /// Size of the sealed chunk in bytes.
    pub chunk_bytes: u64,
    /// Encoded bytes accumulated since the session started, including this
    /// chunk.
    pub total_bytes: u64,
    /// Wall-clock seconds since the session started.
    pub elapsed_seconds: f64,
}

/// Accumulates encoder output and seals it into one chunk per interval.
///
/// The assembler is driven by the stdout reader: every read is pushed with
/// the elapsed session time, and once the configured interval has passed a
/// chunk is sealed and reported. `finish` concatenates every sealed chunk
/// plus the unsealed remainder into exactly one blob, so nothing read since
/// the matching start is lost.
#[derive(Debug)]
pub struct ChunkAssembler {
    interval: Duration,
    chunks: Vec<Vec<u8>>,
    pending: Vec<u8>,
    total_bytes: u64,
    next_seal_at: Duration,
}

impl ChunkAssembler {
    /// Creates an assembler sealing one chunk per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            chunks: Vec::new(),
            pending: Vec::new(),
            total_bytes: 0,
            next_seal_at: interval,
        }
    }

    /// Appends encoder output read at `elapsed` since session start.
    /// Returns chunk info when this push sealed a chunk.
    pub fn push(&mut self, data: &[u8], elapsed: Duration) -> Option<ChunkInfo> {
        self.pending.extend_from_slice(data);
        self.total_bytes += data.len() as u64;

        if elapsed < self.next_seal_at || self.pending.is_empty() {
            return None;
        }

        while self.next_seal_at <= elapsed {
            self.next_seal_at += self.interval;
        }

        let sealed = std::mem::take(&mut self.pending);
        let info = ChunkInfo {
            sequence: self.chunks.len() as u64,
            chunk_bytes: sealed.len() as u64,
            total_bytes: self.total_bytes,
            elapsed_seconds: elapsed.as_secs_f64(),
        };
        self.chunks.push(sealed);
        Some(info)
    }

    /// Total encoded bytes seen so far, sealed or not.
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Consumes the assembler and returns the single finished blob.
    pub fn finish(mut self) -> Vec<u8> {
        let mut blob = Vec::with_capacity(self.total_bytes as usize);
        for chunk in &self.chunks {
            blob.extend_from_slice(chunk);
        }
        blob.append(&mut self.pending);
        blob
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn seals_roughly_once_per_interval() {
        let mut assembler = ChunkAssembler::new(SECOND);

        assert!(assembler.push(b"aa", Duration::from_millis(300)).is_none());
        assert!(assembler.push(b"bb", Duration::from_millis(700)).is_none());

        let sealed = assembler
            .push(b"cc", Duration::from_millis(1100))
            .expect("interval elapsed");
        assert_eq!(sealed.sequence, 0);
        assert_eq!(sealed.chunk_bytes, 6);
        assert_eq!(sealed.total_bytes, 6);

        assert!(assembler.push(b"dd", Duration::from_millis(1500)).is_none());
        let sealed = assembler
            .push(b"ee", Duration::from_millis(2200))
            .expect("second interval elapsed");
        assert_eq!(sealed.sequence, 1);
        assert_eq!(sealed.chunk_bytes, 4);
        assert_eq!(sealed.total_bytes, 10);
    }

    #[test]
    fn a_stalled_stream_seals_nothing_empty() {
        let mut assembler = ChunkAssembler::new(SECOND);
        // Interval long past, but no bytes pending: no empty chunk.
        assert!(assembler.push(b"", Duration::from_secs(5)).is_none());
        assert_eq!(assembler.total_bytes(), 0);
    }

    #[test]
    fn finish_assembles_exactly_one_blob_from_all_chunks() {
        let mut assembler = ChunkAssembler::new(SECOND);
        assembler.push(b"head", Duration::from_millis(100));
        assembler.push(b"-mid", Duration::from_millis(1200));
        assembler.push(b"-tail", Duration::from_millis(1800));

        // Two sealed-or-pending pieces; the trailing remainder was never
        // sealed but must still be part of the blob.
        assert_eq!(assembler.finish(), b"head-mid-tail".to_vec());
    }

    #[test]
    fn late_reads_advance_the_seal_boundary_past_the_gap() {
        let mut assembler = ChunkAssembler::new(SECOND);
        let sealed = assembler
            .push(b"x", Duration::from_secs(4))
            .expect("boundary long past");
        assert_eq!(sealed.sequence, 0);
        // The next boundary lies beyond the observed time, not at 2s.
        assert!(assembler.push(b"y", Duration::from_millis(4500)).is_none());
    }
}
