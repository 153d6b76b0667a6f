//! Frame timing

use std::time::{Duration, Instant};

/// Supplies the elapsed time for each frame
pub trait TimeSource {
    /// Seconds since the previous call (never negative)
    fn delta_time(&mut self) -> f32;

    /// Seconds since the clock started, for frame-rate measurement
    fn now(&self) -> f64;
}

/// Constant frame length, for headless runs and tests
#[derive(Debug, Clone)]
pub struct FixedClock {
    dt: f32,
    elapsed: f64,
}

impl FixedClock {
    pub fn new(dt: f32) -> Self {
        Self {
            dt: dt.max(0.0),
            elapsed: 0.0,
        }
    }

    /// One frame at the given rate
    pub fn at_fps(fps: u32) -> Self {
        Self::new(1.0 / fps.max(1) as f32)
    }
}

impl TimeSource for FixedClock {
    fn delta_time(&mut self) -> f32 {
        self.elapsed += self.dt as f64;
        self.dt
    }

    fn now(&self) -> f64 {
        self.elapsed
    }
}

/// Wall clock that sleeps to hold a frame-rate cap
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    min_frame: Duration,
}

impl FrameClock {
    pub fn new(max_fps: u32) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            min_frame: Duration::from_secs_f64(1.0 / max_fps.max(1) as f64),
        }
    }
}

impl TimeSource for FrameClock {
    fn delta_time(&mut self) -> f32 {
        let spent = self.last.elapsed();
        if spent < self.min_frame {
            std::thread::sleep(self.min_frame - spent);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }

    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Number of frame timestamps kept for the FPS average
const FPS_WINDOW: usize = 60;

/// Rolling frames-per-second estimate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    filled: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            filled: 0,
            fps: 0,
        }
    }

    /// Record a frame at `time` seconds and return the updated estimate
    pub fn record(&mut self, time: f64) -> u32 {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.filled = (self.filled + 1).min(FPS_WINDOW);

        // Oldest sample: the slot we will overwrite next, once the ring is full
        let oldest = if self.filled == FPS_WINDOW {
            self.frame_times[self.frame_index]
        } else {
            self.frame_times[0]
        };
        let frames = (self.filled - 1) as f64;
        let elapsed = time - oldest;
        if frames > 0.0 && elapsed > 0.0 {
            self.fps = (frames / elapsed).round() as u32;
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
