/// One control point of an [`Envelope`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvelopeKey {
    /// Frame position (may be fractional).
    pub frame: f64,
    /// Value at `frame`.
    pub value: f64,
}

impl EnvelopeKey {
    /// Key holding `value` at `frame`.
    pub const fn new(frame: f64, value: f64) -> Self {
        Self { frame, value }
    }
}

/// Piecewise-linear interpolation over frame-sorted keys, clamped on both sides.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    keys: Vec<EnvelopeKey>, // sorted by frame, non-decreasing
}

impl Envelope {
    /// Build from keys; they are stably sorted by frame.
    pub fn new(mut keys: Vec<EnvelopeKey>) -> Self {
        keys.sort_by(|a, b| a.frame.total_cmp(&b.frame));
        Self { keys }
    }

    /// Four-point fade: `0` at `in_start`, `1` from `in_end` to `out_start`, `0` again at `out_end`.
    ///
    /// When the window is too short for both ramps the hold collapses so keys stay monotone.
    pub fn fade(in_start: f64, in_end: f64, out_start: f64, out_end: f64) -> Self {
        let in_start = in_start.min(out_end);
        let in_end = in_end.clamp(in_start, out_end);
        let out_start = out_start.clamp(in_end, out_end);
        Self::new(vec![
            EnvelopeKey::new(in_start, 0.0),
            EnvelopeKey::new(in_end, 1.0),
            EnvelopeKey::new(out_start, 1.0),
            EnvelopeKey::new(out_end, 0.0),
        ])
    }

    /// Linear ramp from `from` to `to` over `[start, end]`, held afterwards.
    pub fn ramp(start: f64, end: f64, from: f64, to: f64) -> Self {
        Self::new(vec![
            EnvelopeKey::new(start, from),
            EnvelopeKey::new(end.max(start), to),
        ])
    }

    /// Keys in frame order.
    pub fn keys(&self) -> &[EnvelopeKey] {
        &self.keys
    }

    /// Sample at `frame`. Values before the first key / after the last key are held.
    pub fn sample(&self, frame: f64) -> f64 {
        let Some(first) = self.keys.first() else {
            return 0.0;
        };
        let idx = self.keys.partition_point(|k| k.frame <= frame);
        if idx == 0 {
            return first.value;
        }
        if idx >= self.keys.len() {
            return self.keys[self.keys.len() - 1].value;
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.frame - a.frame;
        if denom <= 0.0 {
            return a.value;
        }
        let t = (frame - a.frame) / denom;
        a.value + (b.value - a.value) * t
    }
}

/// Remap `value` from `[-1, 1]` onto `[lo, hi]`, clamped.
pub fn remap_unit_wave(value: f64, lo: f64, hi: f64) -> f64 {
    let t = ((value + 1.0) / 2.0).clamp(0.0, 1.0);
    lo + (hi - lo) * t
}

#[cfg(test)]
#[path = "../../tests/unit/animation/envelope.rs"]
mod tests;
