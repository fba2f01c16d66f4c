//! Frame-color generators for the sign LEDs.
//!
//! An [`Animator`] owns the canvas and whatever state its active pattern
//! carries between frames, and fills one [`Rgb`] per LED each tick. The
//! patterns are pure numeric transforms; none of them can fail, and an empty
//! canvas simply produces no colors.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::canvas::Canvas;
use crate::color::Rgb;

const SWEEP_COLOR: Rgb = Rgb::new(0xFC, 0x54, 0x00);

const WAVE_SPEED: f32 = 1.0; // degrees of phase per frame
const WAVE_LENGTH: f32 = 1.0;
const WAVE_HIGH: Rgb = Rgb::new(0xFF, 0x08, 0x08);
const WAVE_LOW: Rgb = Rgb::new(0xFF, 0xFF, 0x00);

const PULSE_RADIUS_RATE: f32 = 3.0; // mm per frame
const PULSE_RADIUS_LIMIT: f32 = 140.0; // mm
const PULSE_FALLOFF: f32 = 0.003;
const PULSE_HIGH: Rgb = Rgb::new(0xFF, 0x00, 0xFF);
const PULSE_LOW: Rgb = Rgb::new(0xFF, 0xA0, 0x00);

const SPRINKLE_SPEED: f32 = 0.03; // one ramp per n frames
const SPRINKLE_GROUPS: usize = 4;
const SPRINKLE_HIGH: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
const SPRINKLE_LOW: Rgb = Rgb::new(0xFF, 0xA0, 0x00);

const CIRCLE_ACCEL: f32 = 0.08; // mm per frame^2
const CIRCLE_RESPAWN_MARGIN: f32 = 20.0; // mm past the canvas diagonal
const CIRCLE_BAND_SLOPE: f32 = 0.5; // gradient band widens with the radius
const CIRCLE_BAND_MIN: f32 = 4.0; // mm
const CIRCLE_HIGH: Rgb = Rgb::new(0x40, 0xC8, 0xFF);

const COMET_SPEED: f32 = 0.5; // LEDs per frame
const COMET_TAIL_LEN: f32 = 10.0; // LEDs
const COMET_TAIL_DECAY: f32 = 0.55; // brightness ratio per LED of tail
const COMET_DWELL_FRAMES: u64 = 45;
const COMET_COLOR: Rgb = Rgb::new(0xFC, 0x54, 0x00);

/// The available animation patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// LEDs light in index order, one more per frame.
    Sweep,
    /// Standing color wave over the signed distance from the canvas center.
    Wave,
    /// Trigger-fired pulse expanding radially from the center.
    RadialPulse,
    /// Independent twinkling in staggered groups.
    Sprinkle,
    /// Circles growing from random spawn points.
    Circles,
    /// A bright head with a decaying tail, announcing a new message.
    Comet,
}

impl Pattern {
    pub const ALL: [Pattern; 6] = [
        Pattern::Sweep,
        Pattern::Wave,
        Pattern::RadialPulse,
        Pattern::Sprinkle,
        Pattern::Circles,
        Pattern::Comet,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Sweep => "sweep",
            Pattern::Wave => "wave",
            Pattern::RadialPulse => "pulse",
            Pattern::Sprinkle => "sprinkle",
            Pattern::Circles => "circles",
            Pattern::Comet => "comet",
        }
    }

    pub fn from_name(name: &str) -> Option<Pattern> {
        Pattern::ALL.iter().copied().find(|p| p.name() == name)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// State a pattern carries from frame to frame. A negative radius means the
/// pattern is idle.
#[derive(Debug, Clone, Copy)]
enum PatternState {
    Stateless,
    Pulse {
        radius: f32,
    },
    Circle {
        spawn_x: f32,
        spawn_y: f32,
        radius: f32,
        velocity: f32,
    },
}

impl PatternState {
    fn initial(pattern: Pattern) -> Self {
        match pattern {
            Pattern::RadialPulse => PatternState::Pulse { radius: -1.0 },
            Pattern::Circles => PatternState::Circle {
                spawn_x: 0.0,
                spawn_y: 0.0,
                radius: -1.0,
                velocity: 0.0,
            },
            _ => PatternState::Stateless,
        }
    }
}

/// Drives one pattern over a canvas, one frame at a time.
pub struct Animator {
    canvas: Canvas,
    pattern: Pattern,
    state: PatternState,
    trigger_latch: bool,
    rng: StdRng,
}

impl Animator {
    pub fn new(pattern: Pattern, canvas: Canvas) -> Self {
        Self::with_rng(pattern, canvas, StdRng::from_entropy())
    }

    /// Animator with a deterministic spawn sequence.
    pub fn seeded(pattern: Pattern, canvas: Canvas, seed: u64) -> Self {
        Self::with_rng(pattern, canvas, StdRng::seed_from_u64(seed))
    }

    fn with_rng(pattern: Pattern, canvas: Canvas, rng: StdRng) -> Self {
        Self {
            canvas,
            pattern,
            state: PatternState::initial(pattern),
            trigger_latch: false,
            rng,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    /// Switches the active pattern, discarding any in-flight state.
    pub fn set_pattern(&mut self, pattern: Pattern) {
        if self.pattern == pattern {
            return;
        }
        self.pattern = pattern;
        self.state = PatternState::initial(pattern);
        self.trigger_latch = false;
    }

    /// Computes the colors for `frame`, writing one entry per canvas point.
    /// `colors` is blacked out first; a slice longer than the canvas keeps
    /// its tail untouched, a shorter one limits how many points are painted.
    pub fn step(&mut self, frame: u64, trigger: bool, colors: &mut [Rgb]) {
        let n = self.canvas.len().min(colors.len());
        let colors = &mut colors[..n];
        for color in colors.iter_mut() {
            *color = Rgb::BLACK;
        }
        let rising = trigger && !self.trigger_latch;
        self.trigger_latch = trigger;
        if colors.is_empty() {
            return;
        }
        match self.pattern {
            Pattern::Sweep => self.sweep(frame, colors),
            Pattern::Wave => self.wave(frame, colors),
            Pattern::RadialPulse => self.pulse(rising, colors),
            Pattern::Sprinkle => self.sprinkle(frame, colors),
            Pattern::Circles => self.circles(rising, colors),
            Pattern::Comet => self.comet(frame, colors),
        }
    }

    fn sweep(&self, frame: u64, colors: &mut [Rgb]) {
        let lit = (frame % colors.len() as u64) as usize;
        for color in colors.iter_mut().take(lit) {
            *color = SWEEP_COLOR;
        }
    }

    fn wave(&self, frame: u64, colors: &mut [Rgb]) {
        let angle_offset = (frame as f32 * -WAVE_SPEED).rem_euclid(360.0);
        for (point, color) in self.canvas.points().iter().zip(colors.iter_mut()) {
            let normalized = self.canvas.normalized_x(point.x);
            let angle = (normalized * 360.0 / WAVE_LENGTH + angle_offset).rem_euclid(360.0);
            let value = angle.to_radians().cos();
            *color = Rgb::mix(WAVE_LOW, WAVE_HIGH, value, -1.0, 1.0);
        }
    }

    fn pulse(&mut self, rising: bool, colors: &mut [Rgb]) {
        let PatternState::Pulse { radius } = &mut self.state else {
            return;
        };
        if rising {
            *radius = 0.0;
        }
        if *radius >= 0.0 {
            *radius += PULSE_RADIUS_RATE;
            if *radius >= PULSE_RADIUS_LIMIT {
                *radius = -1.0;
            }
        }
        if *radius < 0.0 {
            return;
        }
        for (point, color) in self.canvas.points().iter().zip(colors.iter_mut()) {
            let x = point.x - self.canvas.center_x();
            let value = (1.0 - PULSE_FALLOFF * (*radius - x.abs()).powi(2)).max(0.0);
            *color = Rgb::mix(PULSE_LOW, PULSE_HIGH, value, 0.0, 1.0);
        }
    }

    fn sprinkle(&self, frame: u64, colors: &mut [Rgb]) {
        for (i, color) in colors.iter_mut().enumerate() {
            let group = i % SPRINKLE_GROUPS;
            let phase_shift = group as f32 / SPRINKLE_GROUPS as f32;
            let ramp = (i as f32 - frame as f32 * SPRINKLE_SPEED - phase_shift).abs();
            let value = (ramp.rem_euclid(2.0) - 1.0).abs();
            *color = Rgb::mix(SPRINKLE_LOW, SPRINKLE_HIGH, value, 0.0, 1.0);
        }
    }

    fn circles(&mut self, rising: bool, colors: &mut [Rgb]) {
        let limit = self.canvas.diagonal() + CIRCLE_RESPAWN_MARGIN;
        let (min_x, max_x) = (self.canvas.min_x(), self.canvas.max_x());
        let (min_y, max_y) = (self.canvas.min_y(), self.canvas.max_y());
        let PatternState::Circle {
            spawn_x,
            spawn_y,
            radius,
            velocity,
        } = &mut self.state
        else {
            return;
        };
        if *radius < 0.0 || rising {
            *spawn_x = self.rng.gen_range(min_x..=max_x);
            *spawn_y = self.rng.gen_range(min_y..=max_y);
            *radius = 0.0;
            *velocity = 0.0;
        }
        *velocity += CIRCLE_ACCEL;
        *radius += *velocity;
        if *radius > limit {
            *radius = -1.0;
            return;
        }
        for (point, color) in self.canvas.points().iter().zip(colors.iter_mut()) {
            let dx = point.x - *spawn_x;
            let dy = point.y - *spawn_y;
            let distance = (dx * dx + dy * dy).sqrt();
            let band = *radius * CIRCLE_BAND_SLOPE + CIRCLE_BAND_MIN;
            let value = (1.0 - (distance - *radius).abs() / band).max(0.0);
            *color = Rgb::mix(Rgb::BLACK, CIRCLE_HIGH, value, 0.0, 1.0);
        }
    }

    fn comet(&self, frame: u64, colors: &mut [Rgb]) {
        let travel_frames = (colors.len() as f32 / COMET_SPEED).ceil() as u64;
        let cycle = travel_frames + COMET_DWELL_FRAMES;
        let frame_in_cycle = frame % cycle;
        if frame_in_cycle >= travel_frames {
            // dwell between passes
            return;
        }
        let head = frame_in_cycle as f32 * COMET_SPEED;
        for (i, color) in colors.iter_mut().enumerate() {
            let behind = head - i as f32;
            if !(0.0..COMET_TAIL_LEN).contains(&behind) {
                continue;
            }
            let brightness = COMET_TAIL_DECAY.powf(behind);
            *color = Rgb::mix(Rgb::BLACK, COMET_COLOR, brightness, 0.0, 1.0);
        }
    }
}
