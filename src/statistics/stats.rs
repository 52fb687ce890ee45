/// Running accumulator of `x^power` for one observable series.
pub struct Statistics {
    pub count: usize,
    pub aggregate: f64,
    pub power: u32,
}

impl Statistics {
    pub fn new(power: u32) -> Self {
        Self {
            count: 0,
            aggregate: 0.0,
            power,
        }
    }

    pub fn update(&mut self, v: f64) {
        self.count += 1;
        self.aggregate += if self.power == 1 {
            v
        } else {
            v.powi(self.power as i32)
        };
    }

    pub fn average(&self) -> f64 {
        if self.count == 0 {
            return self.aggregate;
        }
        self.aggregate / self.count as f64
    }
}

/// Sample mean and mean-of-squares of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub mean: f64,
    pub mean_sq: f64,
}

impl Moments {
    pub fn from_samples(samples: &[f64]) -> Self {
        let mut first = Statistics::new(1);
        let mut second = Statistics::new(2);
        for &v in samples {
            first.update(v);
            second.update(v);
        }
        Self {
            mean: first.average(),
            mean_sq: second.average(),
        }
    }

    /// `<x²> - <x>²`, clamped at zero against rounding.
    pub fn variance(&self) -> f64 {
        (self.mean_sq - self.mean * self.mean).max(0.0)
    }
}
