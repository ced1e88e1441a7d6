use std::time::{Duration, Instant};

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo {
    pub number: u64,
    /// Wall-clock instant the frame starts at
    pub instant: Instant,
    /// Seconds since the iterator was created
    pub time: f32,
    /// Seconds since the previous frame
    pub delta: f32,
}

/// Infinite iterator that yields frame information.
///
/// With a frame interval set, `next` sleeps until the next frame is due,
/// which paces a headless loop at a fixed rate.
pub struct FrameIterator {
    frame_number: u64,
    start_time: Instant,
    last_frame_time: Instant,
    interval: Option<Duration>,
}

impl FrameIterator {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
            interval: None,
        }
    }

    /// Paced iterator yielding roughly `rate` frames per second
    pub fn with_rate(rate: u32) -> Self {
        let mut frames = Self::new();
        if rate > 0 {
            frames.interval = Some(Duration::from_secs(1) / rate);
        }
        frames
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn time(&self) -> f32 {
        self.start_time.elapsed().as_secs_f32()
    }
}

impl Default for FrameIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameIterator {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        if let (Some(interval), true) = (self.interval, self.frame_number > 0) {
            let due = self.last_frame_time + interval;
            let now = Instant::now();
            if due > now {
                std::thread::sleep(due - now);
            }
        }

        let now = Instant::now();
        let info = FrameInfo {
            number: self.frame_number,
            instant: now,
            time: now.duration_since(self.start_time).as_secs_f32(),
            delta: now.duration_since(self.last_frame_time).as_secs_f32(),
        };

        self.frame_number += 1;
        self.last_frame_time = now;

        Some(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_are_numbered() {
        let numbers: Vec<u64> = FrameIterator::new().take(3).map(|f| f.number).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
    }

    #[test]
    fn test_paced_frames_are_spaced() {
        let frames: Vec<FrameInfo> = FrameIterator::with_rate(100).take(3).collect();
        let elapsed = frames[2].instant.duration_since(frames[0].instant);
        assert!(elapsed >= Duration::from_millis(20), "elapsed {elapsed:?}");
    }

    #[test]
    fn test_zero_rate_is_unpaced() {
        let mut frames = FrameIterator::with_rate(0);
        assert!(frames.next().is_some());
        assert_eq!(frames.frame_number(), 1);
    }
}
