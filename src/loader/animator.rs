//! Trail-based ring of dots.
//!
//! Every dot sits on a circle whose x and y components rotate at slightly
//! different speeds (1.0x and 1.2x) while the radius breathes at 0.6x. The
//! phase drift makes the ring look like it is turning in space, and dots
//! occasionally overlap so the ring seems to hold fewer of them.
//!
//! Positions are a pure function of the dot index and the elapsed time; the
//! only state carried between frames is each dot's trail.

use std::collections::VecDeque;
use std::f64::consts::TAU;
use std::time::Duration;

use crate::config::LoaderConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub position: Position,
    /// Frames since this entry was recorded
    pub age: u32,
}

/// Geometry and motion constants of the ring.
#[derive(Debug, Clone, PartialEq)]
pub struct RingParams {
    pub dot_count: usize,
    pub base_radius: f64,
    pub dot_radius: f64,
    pub max_trail_length: usize,
    /// Radians per millisecond
    pub rotation_speed: f64,
    pub expansion_factor: f64,
    pub surface: Surface,
}

impl RingParams {
    pub fn from_config(config: &LoaderConfig) -> Self {
        Self {
            dot_count: config.dot_count,
            base_radius: config.base_radius,
            dot_radius: config.dot_radius,
            max_trail_length: config.max_trail_length,
            rotation_speed: config.rotation_speed,
            expansion_factor: config.expansion_factor,
            surface: Surface {
                logical_size: config.surface_size,
                scale: config.scale,
            },
        }
    }

    pub fn center(&self) -> Position {
        let half = self.surface.logical_size / 2.0;
        Position::new(half, half)
    }

    fn angle(&self, angle_index: usize) -> f64 {
        TAU * angle_index as f64 / self.dot_count as f64
    }

    /// Offset of a dot from the centre after `elapsed_ms`.
    pub fn offset_at(&self, angle_index: usize, elapsed_ms: f64) -> Position {
        let angle = self.angle(angle_index);
        let time_factor = elapsed_ms * self.rotation_speed;
        let breathe = self.base_radius * self.expansion_factor;

        let x = (angle + time_factor).cos() * (self.base_radius + (time_factor * 0.6).sin() * breathe);
        let y = (angle + time_factor * 1.2).sin()
            * (self.base_radius + (time_factor * 0.6).cos() * breathe);
        Position::new(x, y)
    }

    pub fn position_at(&self, angle_index: usize, elapsed_ms: f64) -> Position {
        let center = self.center();
        let offset = self.offset_at(angle_index, elapsed_ms);
        Position::new(center.x + offset.x, center.y + offset.y)
    }
}

impl Default for RingParams {
    fn default() -> Self {
        Self::from_config(&LoaderConfig::default())
    }
}

/// Square drawing surface measured in logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub logical_size: f64,
    /// Device pixel density
    pub scale: f64,
}

impl Surface {
    /// Edge length in device pixels.
    pub fn device_size(&self) -> f64 {
        self.logical_size * self.scale
    }
}

#[derive(Debug, Clone)]
pub struct Point {
    angle_index: usize,
    position: Position,
    /// Newest first
    trail: VecDeque<TrailPoint>,
}

impl Point {
    pub fn angle_index(&self) -> usize {
        self.angle_index
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn trail(&self) -> &VecDeque<TrailPoint> {
        &self.trail
    }

    fn record(&mut self, position: Position, max_len: usize) {
        for entry in self.trail.iter_mut() {
            entry.age += 1;
        }
        self.position = position;
        self.trail.push_front(TrailPoint { position, age: 0 });
        self.trail.truncate(max_len);
    }
}

// ============================================================================
// RENDER STATE
// ============================================================================

/// One fading piece of a dot's trail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Position,
    pub to: Position,
    /// 1.0 at the head, falling linearly with age
    pub alpha: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DotRender {
    pub position: Position,
    pub segments: Vec<Segment>,
}

/// Everything a drawing surface needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub surface: Surface,
    pub center: Position,
    pub dot_radius: f64,
    pub glow_radius: f64,
    pub dots: Vec<DotRender>,
}

// ============================================================================
// ANIMATOR
// ============================================================================

#[derive(Debug, Clone)]
pub struct Animator {
    params: RingParams,
    points: Vec<Point>,
    elapsed_ms: f64,
}

impl Animator {
    pub fn new(params: RingParams) -> Self {
        let center = params.center();
        let points = (0..params.dot_count)
            .map(|i| {
                let angle = params.angle(i);
                Point {
                    angle_index: i,
                    position: Position::new(
                        center.x + angle.cos() * params.base_radius,
                        center.y + angle.sin() * params.base_radius,
                    ),
                    trail: VecDeque::with_capacity(params.max_trail_length),
                }
            })
            .collect();

        Self {
            params,
            points,
            elapsed_ms: 0.0,
        }
    }

    pub fn params(&self) -> &RingParams {
        &self.params
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Moves the clock forward by `delta` and records one frame.
    pub fn advance(&mut self, delta: Duration) -> RenderState {
        self.elapsed_ms += delta.as_secs_f64() * 1000.0;
        let elapsed = self.elapsed_ms;
        let max_len = self.params.max_trail_length;
        for point in &mut self.points {
            let position = self.params.position_at(point.angle_index, elapsed);
            point.record(position, max_len);
        }
        self.render_state()
    }

    pub fn render_state(&self) -> RenderState {
        let max_len = self.params.max_trail_length as f64;
        let dot_radius = self.params.dot_radius;

        let dots = self
            .points
            .iter()
            .map(|point| {
                let segments = point
                    .trail
                    .iter()
                    .zip(point.trail.iter().skip(1))
                    .map(|(head, tail)| {
                        let decay = f64::from(head.age) / max_len;
                        Segment {
                            from: head.position,
                            to: tail.position,
                            alpha: 1.0 - decay,
                            width: dot_radius * (1.2 - decay * 0.8),
                        }
                    })
                    .collect();
                DotRender {
                    position: point.position,
                    segments,
                }
            })
            .collect();

        RenderState {
            surface: self.params.surface,
            center: self.params.center(),
            dot_radius,
            glow_radius: dot_radius * 3.0,
            dots,
        }
    }
}
