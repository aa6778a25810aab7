//! Keyframe channels and their evaluation.

use crate::tolerance::{fp_equal, EPSILON};
use serde::{Deserialize, Serialize};

// =============================================================================
// Keyframes and Modes
// =============================================================================

/// A single (time, value) sample of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Frame time.
    pub time: f64,
    /// Channel value at `time`.
    pub value: f64,
}

impl Keyframe {
    /// Creates a new keyframe.
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

/// Interpolation between consecutive keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Hold the left key's value until the next key.
    Constant,
    /// Straight line between keys.
    #[default]
    Linear,
    /// Hermite segments with auto-clamped tangents.
    Cubic,
}

/// Behavior before the first and after the last keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolation {
    /// Hold the end value.
    #[default]
    Constant,
    /// Extend the slope of the end segment.
    Linear,
    /// Repeat the keyed span.
    Cyclic,
    /// Repeat the keyed span, offset by its value delta each cycle.
    CyclicAdditive,
}

// =============================================================================
// Channel
// =============================================================================

/// Ordered keyframe sequence of one scalar transform property.
///
/// Points are always sorted by time. They are never reordered; new points are
/// inserted at their sorted position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ChannelDocument")]
pub struct Channel {
    /// Interpolation between keys.
    pub interpolation: Interpolation,
    /// Behavior outside the keyed span.
    pub extrapolation: Extrapolation,
    points: Vec<Keyframe>,
}

/// Wire form of a channel; points may arrive unsorted.
#[derive(Deserialize)]
struct ChannelDocument {
    #[serde(default)]
    interpolation: Interpolation,
    #[serde(default)]
    extrapolation: Extrapolation,
    #[serde(default)]
    points: Vec<Keyframe>,
}

impl From<ChannelDocument> for Channel {
    fn from(doc: ChannelDocument) -> Self {
        Channel::from_points(doc.interpolation, doc.extrapolation, doc.points)
    }
}

impl Channel {
    /// Creates an empty channel.
    pub fn new(interpolation: Interpolation, extrapolation: Extrapolation) -> Self {
        Self {
            interpolation,
            extrapolation,
            points: Vec::new(),
        }
    }

    /// Creates a channel from points in any order.
    pub fn from_points(
        interpolation: Interpolation,
        extrapolation: Extrapolation,
        points: impl IntoIterator<Item = Keyframe>,
    ) -> Self {
        let mut points: Vec<Keyframe> = points.into_iter().collect();
        points.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self {
            interpolation,
            extrapolation,
            points,
        }
    }

    /// Creates a single-key channel that holds `value` everywhere.
    pub fn constant_key(time: f64, value: f64) -> Self {
        Self::from_points(
            Interpolation::Constant,
            Extrapolation::Constant,
            [Keyframe::new(time, value)],
        )
    }

    /// Returns the keyframes in time order.
    pub fn points(&self) -> &[Keyframe] {
        &self.points
    }

    /// Returns the number of keyframes.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the channel has no keyframes.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the keyframe times in order.
    pub fn times(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.time).collect()
    }

    /// Returns true if some keyframe lies at `time` within epsilon.
    pub fn has_time(&self, time: f64) -> bool {
        self.points.iter().any(|p| fp_equal(p.time, time))
    }

    /// Returns how many keyframes lie at `time` within epsilon.
    pub fn keys_at(&self, time: f64) -> usize {
        self.points.iter().filter(|p| fp_equal(p.time, time)).count()
    }

    /// Inserts a keyframe at its sorted position and returns its index.
    ///
    /// A key at an already-keyed time goes after the existing ones.
    pub fn insert(&mut self, key: Keyframe) -> usize {
        let index = self.points.partition_point(|p| p.time <= key.time);
        self.points.insert(index, key);
        index
    }

    /// Removes and returns the keyframe at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> Keyframe {
        self.points.remove(index)
    }

    /// Evaluates the channel at `time`.
    ///
    /// An empty channel evaluates to 0.
    pub fn evaluate(&self, time: f64) -> f64 {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return 0.0,
        };
        if self.points.len() == 1 {
            return first.value;
        }

        if time >= first.time && time <= last.time {
            return self.interpolate(time);
        }

        let span = last.time - first.time;
        match self.extrapolation {
            Extrapolation::Constant => {
                if time < first.time {
                    first.value
                } else {
                    last.value
                }
            }
            Extrapolation::Linear => {
                let (a, b) = if time < first.time {
                    (self.points[0], self.points[1])
                } else {
                    let n = self.points.len();
                    (self.points[n - 2], self.points[n - 1])
                };
                let dt = b.time - a.time;
                if dt.abs() <= EPSILON {
                    return if time < first.time { first.value } else { last.value };
                }
                let slope = (b.value - a.value) / dt;
                let anchor = if time < first.time { first } else { last };
                anchor.value + slope * (time - anchor.time)
            }
            Extrapolation::Cyclic | Extrapolation::CyclicAdditive => {
                if span <= EPSILON {
                    return if time < first.time { first.value } else { last.value };
                }
                let offset = time - first.time;
                let cycles = (offset / span).floor();
                let local = first.time + offset.rem_euclid(span);
                let value = self.interpolate(local);
                if self.extrapolation == Extrapolation::CyclicAdditive {
                    value + cycles * (last.value - first.value)
                } else {
                    value
                }
            }
        }
    }

    /// Interpolates inside the keyed span; requires at least two points.
    fn interpolate(&self, time: f64) -> f64 {
        let n = self.points.len();
        let i = self
            .points
            .partition_point(|p| p.time <= time)
            .saturating_sub(1)
            .min(n - 2);
        let a = self.points[i];
        let b = self.points[i + 1];
        let dt = b.time - a.time;
        if dt <= EPSILON {
            return b.value;
        }
        let u = ((time - a.time) / dt).clamp(0.0, 1.0);

        match self.interpolation {
            Interpolation::Constant => {
                if time >= b.time {
                    b.value
                } else {
                    a.value
                }
            }
            Interpolation::Linear => a.value + (b.value - a.value) * u,
            Interpolation::Cubic => {
                let m0 = self.tangent(i);
                let m1 = self.tangent(i + 1);
                let u2 = u * u;
                let u3 = u2 * u;
                let h00 = 2.0 * u3 - 3.0 * u2 + 1.0;
                let h10 = u3 - 2.0 * u2 + u;
                let h01 = -2.0 * u3 + 3.0 * u2;
                let h11 = u3 - u2;
                h00 * a.value + h10 * dt * m0 + h01 * b.value + h11 * dt * m1
            }
        }
    }

    /// Auto-clamped tangent at key `k`.
    ///
    /// Zero at the ends and at local extrema; otherwise the Catmull-Rom slope
    /// limited to three times either adjacent secant, which keeps every
    /// segment monotonic between its endpoint values.
    fn tangent(&self, k: usize) -> f64 {
        if k == 0 || k + 1 >= self.points.len() {
            return 0.0;
        }
        let prev = self.points[k - 1];
        let here = self.points[k];
        let next = self.points[k + 1];
        let dt_left = here.time - prev.time;
        let dt_right = next.time - here.time;
        if dt_left <= EPSILON || dt_right <= EPSILON {
            return 0.0;
        }
        let left = (here.value - prev.value) / dt_left;
        let right = (next.value - here.value) / dt_right;
        if left * right <= 0.0 {
            return 0.0;
        }
        let slope = (next.value - prev.value) / (next.time - prev.time);
        let limit = 3.0 * left.abs().min(right.abs());
        slope.signum() * slope.abs().min(limit)
    }
}
