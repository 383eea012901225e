use serde::{Deserialize, Serialize};

/// A single keyframe of a [`LatitudeCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f64,
    pub value: f64,
}

impl CurveKey {
    pub const fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

/// Piecewise-linear curve mapping normalized latitude to base temperature.
///
/// Keys must be sorted by `time`. Inputs before the first key or after the
/// last key evaluate to that key's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatitudeCurve {
    pub keys: Vec<CurveKey>,
}

impl LatitudeCurve {
    pub fn new(keys: Vec<CurveKey>) -> Self {
        Self { keys }
    }

    /// Same temperature at every latitude
    pub fn constant(value: f64) -> Self {
        Self::new(vec![CurveKey::new(0.0, value)])
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn is_sorted(&self) -> bool {
        self.keys.windows(2).all(|pair| pair[0].time <= pair[1].time)
    }

    pub fn evaluate(&self, t: f64) -> f64 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };

        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t >= a.time && t <= b.time {
                let span = b.time - a.time;
                if span <= f64::EPSILON {
                    return b.value;
                }
                let f = (t - a.time) / span;
                return a.value + (b.value - a.value) * f;
            }
        }

        last.value
    }
}

impl Default for LatitudeCurve {
    /// Cold poles, warm equator
    fn default() -> Self {
        Self::new(vec![
            CurveKey::new(0.0, 0.0),
            CurveKey::new(0.5, 1.0),
            CurveKey::new(1.0, 0.0),
        ])
    }
}
