//! Tile module - a single face-down tile on the board
//!
//! A tile carries two independent pieces of state:
//!
//! - the flip state machine (`TileFace` + [`FlipAnimation`]), driven by explicit
//!   reveal/hide/match requests and by animation progress;
//! - a position tween ([`MoveTween`]) used by the shuffle scheduler, which never
//!   touches the flip state.

use std::sync::Arc;

use crate::types::{CardBack, Rect, TileFace, Vec2, FLIP_ANIMATION_SPEED};

/// Flip animation progress, `0.0..=1.0` while a flip is running.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipAnimation {
    pub progress: f32,
    pub speed: f32,
}

impl FlipAnimation {
    pub fn new(speed: f32) -> Self {
        Self {
            progress: 0.0,
            speed,
        }
    }
}

/// Position tween with quadratic ease-in/ease-out.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct MoveTween {
    start: Vec2,
    target: Vec2,
    elapsed: f32,
    duration: f32,
    active: bool,
}

impl MoveTween {
    /// Advance the tween and return the interpolated position.
    ///
    /// On completion the returned position is exactly `target` and the tween is
    /// deactivated.
    fn advance(&mut self, dt: f32) -> Vec2 {
        self.elapsed += dt;
        let t = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };

        if t >= 1.0 {
            self.active = false;
            self.elapsed = 0.0;
            self.duration = 0.0;
            return self.target;
        }

        self.start.lerp(self.target, ease_in_out_quad(t))
    }
}

/// Quadratic ease-in/ease-out on `t` in `0..=1`.
pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

#[derive(Debug, Clone)]
pub struct Tile {
    key: u32,
    position: Vec2,
    size: Vec2,
    face: TileFace,
    flip: FlipAnimation,
    motion: MoveTween,
    back: Arc<CardBack>,
}

impl Tile {
    pub fn new(key: u32, position: Vec2, size: Vec2, back: Arc<CardBack>) -> Self {
        Self::with_flip_speed(key, position, size, back, FLIP_ANIMATION_SPEED)
    }

    pub fn with_flip_speed(
        key: u32,
        position: Vec2,
        size: Vec2,
        back: Arc<CardBack>,
        flip_speed: f32,
    ) -> Self {
        Self {
            key,
            position,
            size,
            face: TileFace::FaceDown,
            flip: FlipAnimation::new(flip_speed),
            motion: MoveTween::default(),
            back,
        }
    }

    /// Pair key; two tiles on a board share it.
    pub fn key(&self) -> u32 {
        self.key
    }

    pub fn face(&self) -> TileFace {
        self.face
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }

    pub fn back(&self) -> &Arc<CardBack> {
        &self.back
    }

    pub fn flip(&self) -> FlipAnimation {
        self.flip
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        self.bounds().contains(point)
    }

    pub fn is_revealed(&self) -> bool {
        self.face.is_revealed()
    }

    pub fn is_animating(&self) -> bool {
        self.face.is_animating()
    }

    pub fn is_matched(&self) -> bool {
        self.face == TileFace::Matched
    }

    pub fn is_face_down(&self) -> bool {
        self.face == TileFace::FaceDown
    }

    pub fn is_moving(&self) -> bool {
        self.motion.active
    }

    /// Start flipping face up. Only legal from `FaceDown`.
    pub fn reveal(&mut self) -> bool {
        if self.face != TileFace::FaceDown {
            return false;
        }
        self.face = TileFace::FlippingUp;
        self.flip.progress = 0.0;
        true
    }

    /// Start flipping face down. Only legal from `FaceUp`.
    pub fn hide(&mut self) -> bool {
        if self.face != TileFace::FaceUp {
            return false;
        }
        self.face = TileFace::FlippingDown;
        self.flip.progress = 0.0;
        true
    }

    /// Lock the tile face up for the rest of its life.
    pub fn confirm_match(&mut self) -> bool {
        if self.face == TileFace::Matched {
            return false;
        }
        self.face = TileFace::Matched;
        self.flip.progress = 0.0;
        true
    }

    /// Tween from the current position to `target` over `duration` seconds.
    ///
    /// Restarting while a tween is running starts from wherever the tile is now, so
    /// the position never jumps.
    pub fn move_to(&mut self, target: Vec2, duration: f32) {
        self.motion = MoveTween {
            start: self.position,
            target,
            elapsed: 0.0,
            duration,
            active: true,
        };
    }

    /// Place the tile at `position`. A running tween is retargeted instead of snapped.
    pub fn set_position(&mut self, position: Vec2) {
        if self.motion.active {
            let remaining = (self.motion.duration - self.motion.elapsed).max(0.0);
            self.move_to(position, remaining);
        } else {
            self.position = position;
        }
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    pub fn set_back(&mut self, back: Arc<CardBack>) {
        self.back = back;
    }

    pub fn update(&mut self, dt: f32) {
        if self.motion.active {
            self.position = self.motion.advance(dt);
        }

        match self.face {
            TileFace::FlippingUp | TileFace::FlippingDown => {
                self.flip.progress += dt * self.flip.speed;
                if self.flip.progress >= 1.0 {
                    self.flip.progress = 0.0;
                    self.face = match self.face {
                        TileFace::FlippingUp => TileFace::FaceUp,
                        _ => TileFace::FaceDown,
                    };
                }
            }
            TileFace::FaceDown | TileFace::FaceUp | TileFace::Matched => {}
        }
    }

    /// Horizontal scale for rendering: shrinks to zero at the flip midpoint, then
    /// grows back.
    pub fn scale_x(&self) -> f32 {
        if self.is_animating() {
            (1.0 - 2.0 * self.flip.progress.clamp(0.0, 1.0)).abs()
        } else {
            1.0
        }
    }

    /// Whether the front artwork should be drawn this frame.
    pub fn shows_front(&self) -> bool {
        match self.face {
            TileFace::FaceUp | TileFace::Matched => true,
            TileFace::FaceDown => false,
            TileFace::FlippingUp => self.flip.progress >= 0.5,
            TileFace::FlippingDown => self.flip.progress < 0.5,
        }
    }
}
