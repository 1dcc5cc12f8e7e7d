use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Damped spring driving an entrance from 0 to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub damping: f64,
    pub stiffness: f64,
    pub mass: f64,
}

impl Default for Spring {
    fn default() -> Self {
        Self {
            damping: 15.0,
            stiffness: 150.0,
            mass: 1.0,
        }
    }
}

/// Distance from rest below which a spring counts as settled.
const REST_EPSILON: f64 = 1e-3;

impl Spring {
    fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Position at `t` seconds for a unit step starting at rest.
    pub fn position(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let w0 = self.natural_frequency();
        let zeta = self.damping_ratio();
        if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * w0 * t).exp();
            1.0 - envelope * ((wd * t).cos() + (zeta * w0 / wd) * (wd * t).sin())
        } else if (zeta - 1.0).abs() < f64::EPSILON {
            1.0 - (1.0 + w0 * t) * (-w0 * t).exp()
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            1.0 - (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
        }
    }

    /// Time after which the envelope stays within [`REST_EPSILON`] of rest.
    pub fn settle_time(&self) -> Duration {
        let w0 = self.natural_frequency();
        let zeta = self.damping_ratio();
        let decay = if zeta < 1.0 {
            zeta * w0
        } else {
            w0 * (zeta - (zeta * zeta - 1.0).sqrt())
        };
        let secs = if decay > 0.0 {
            // the critically damped term carries a (1 + w0 t) factor; pad for it
            (1.0 / REST_EPSILON).ln() / decay * if zeta >= 1.0 { 1.5 } else { 1.0 }
        } else {
            0.0
        };
        Duration::from_secs_f64(secs)
    }
}

/// Direction a card enters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntranceFrom {
    #[default]
    Bottom,
    Top,
    Left,
    Right,
    Scale,
}

/// Visual state of an entering card at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntranceFrame {
    pub opacity: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl EntranceFrame {
    pub const REST: EntranceFrame = EntranceFrame {
        opacity: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
        scale: 1.0,
    };
}

pub const ENTRANCE_DISTANCE: f64 = 50.0;
const ENTRANCE_SCALE: f64 = 0.8;

/// One card's entrance: delay, spring and an optional completion callback.
pub struct Entrance {
    delay: Duration,
    from: EntranceFrom,
    spring: Spring,
    on_complete: Option<Box<dyn FnOnce()>>,
    finished: bool,
}

impl fmt::Debug for Entrance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entrance")
            .field("delay", &self.delay)
            .field("from", &self.from)
            .field("finished", &self.finished)
            .field("has_callback", &self.on_complete.is_some())
            .finish()
    }
}

impl Entrance {
    pub fn new(delay: Duration, from: EntranceFrom) -> Self {
        Self {
            delay,
            from,
            spring: Spring::default(),
            on_complete: None,
            finished: false,
        }
    }

    /// Callback run once, on the tick where the entrance settles.
    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Spring progress at `elapsed` since mount; 0 during the delay.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.finished {
            return 1.0;
        }
        match elapsed.checked_sub(self.delay) {
            Some(t) => self.spring.position(t.as_secs_f64()),
            None => 0.0,
        }
    }

    pub fn frame(&self, elapsed: Duration) -> EntranceFrame {
        let p = self.progress(elapsed);
        let remaining = 1.0 - p;
        let mut frame = EntranceFrame {
            opacity: p.clamp(0.0, 1.0),
            ..EntranceFrame::REST
        };
        match self.from {
            EntranceFrom::Bottom => frame.offset_y = ENTRANCE_DISTANCE * remaining,
            EntranceFrom::Top => frame.offset_y = -ENTRANCE_DISTANCE * remaining,
            EntranceFrom::Left => frame.offset_x = -ENTRANCE_DISTANCE * remaining,
            EntranceFrom::Right => frame.offset_x = ENTRANCE_DISTANCE * remaining,
            EntranceFrom::Scale => frame.scale = ENTRANCE_SCALE + (1.0 - ENTRANCE_SCALE) * p,
        }
        frame
    }

    /// Advance to `elapsed`. Returns true on the tick the entrance settles.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if self.finished || elapsed < self.delay + self.spring.settle_time() {
            return false;
        }
        self.finished = true;
        if let Some(callback) = self.on_complete.take() {
            callback();
        }
        true
    }
}

/// Staggered entrances of the cards mounted in one list.
///
/// Dropping or cancelling the set discards pending callbacks without
/// running them.
#[derive(Debug, Default)]
pub struct EntranceSet {
    entrances: Vec<Entrance>,
    elapsed: Duration,
}

impl EntranceSet {
    /// One entrance per card, delayed by `index * stagger`.
    pub fn staggered(count: usize, stagger: Duration, from: EntranceFrom) -> Self {
        let entrances = (0..count)
            .map(|i| Entrance::new(stagger * i as u32, from))
            .collect();
        Self::with_entrances(entrances)
    }

    pub fn with_entrances(entrances: Vec<Entrance>) -> Self {
        Self {
            entrances,
            elapsed: Duration::ZERO,
        }
    }

    /// Attach a completion callback to the last card's entrance.
    pub fn on_last_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        if let Some(last) = self.entrances.pop() {
            self.entrances.push(last.on_complete(callback));
        }
        self
    }

    /// Move the clock forward by `dt`. Returns how many entrances settled.
    pub fn tick(&mut self, dt: Duration) -> usize {
        self.elapsed += dt;
        let elapsed = self.elapsed;
        self.entrances
            .iter_mut()
            .map(|e| e.advance(elapsed))
            .filter(|settled| *settled)
            .count()
    }

    pub fn frame(&self, card: usize) -> EntranceFrame {
        self.entrances
            .get(card)
            .map_or(EntranceFrame::REST, |e| e.frame(self.elapsed))
    }

    pub fn is_running(&self) -> bool {
        self.entrances.iter().any(|e| !e.is_finished())
    }

    /// Stop every in-flight entrance without firing callbacks.
    pub fn cancel(&mut self) {
        if self.is_running() {
            tracing::debug!(pending = self.entrances.len(), "Entrances cancelled");
        }
        self.entrances.clear();
    }
}
