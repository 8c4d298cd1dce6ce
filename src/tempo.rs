//! Note length → milliseconds.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duration {
    Whole,
    Half,
    Quarter,
    Eighth,
}

impl Duration {
    pub const ALL: [Duration; 4] = [Duration::Whole, Duration::Half, Duration::Quarter, Duration::Eighth];

    pub fn base_ms(self) -> u32 {
        match self {
            Duration::Whole => 1000,
            Duration::Half => 500,
            Duration::Quarter => 250,
            Duration::Eighth => 125,
        }
    }
}

/// Divisor applied to every base duration; always 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoFactor(u8);

impl TempoFactor {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 3;

    pub fn new(factor: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&factor).then_some(Self(factor))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// 1 → 2 → 3 → 1.
    pub fn next(self) -> Self {
        Self(self.0 % Self::MAX + 1)
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Slow tempo",
            2 => "Normal tempo",
            _ => "Fast tempo",
        }
    }
}

impl Default for TempoFactor {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

/// Truncating division, so e.g. an eighth at factor 3 lasts 41 ms, not 41.67.
pub fn duration_ms(duration: Duration, tempo: TempoFactor) -> u32 {
    duration.base_ms() / tempo.get() as u32
}
