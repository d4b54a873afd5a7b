//! Sources of dropout proportions.

/// Pull-based supplier of dropout proportions.
///
/// [`dropout`](super::dropout) pulls exactly one value per call, which
/// lets a training loop anneal the dropout strength over time.
pub trait ProportionSource {
    fn next_proportion(&mut self) -> f64;
}

impl<F> ProportionSource for F
where
    F: FnMut() -> f64,
{
    fn next_proportion(&mut self) -> f64 {
        self()
    }
}

/// Linear schedule from `start` to `end` in `steps` increments.
///
/// The first pull returns `start`, pull number `steps + 1` returns `end`,
/// and every later pull keeps returning `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearAnneal {
    start: f64,
    end: f64,
    steps: u64,
    step: u64,
}

impl LinearAnneal {
    pub fn new(start: f64, end: f64, steps: u64) -> Self {
        Self {
            start,
            end,
            steps,
            step: 0,
        }
    }

    /// Number of values pulled so far.
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Value the next pull will return.
    pub fn peek(&self) -> f64 {
        if self.steps == 0 || self.step >= self.steps {
            return self.end;
        }
        let t = self.step as f64 / self.steps as f64;
        self.start + (self.end - self.start) * t
    }
}

impl ProportionSource for LinearAnneal {
    fn next_proportion(&mut self) -> f64 {
        let value = self.peek();
        self.step = self.step.saturating_add(1);
        value
    }
}
