use nalgebra::DVector;

/// Sampled solution of y' = f(x,y): xs[0] = x0, ys[0] = y0, xs monotone towards x_end,
/// last x equal to x_end.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trajectory {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl Trajectory {
    pub fn with_capacity(x0: f64, y0: f64, capacity: usize) -> Trajectory {
        let mut xs = Vec::with_capacity(capacity + 1);
        let mut ys = Vec::with_capacity(capacity + 1);
        xs.push(x0);
        ys.push(y0);
        Trajectory { xs, ys }
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.xs.push(x);
        self.ys.push(y);
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// last (x, y) sample
    pub fn last(&self) -> Option<(f64, f64)> {
        Some((*self.xs.last()?, *self.ys.last()?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    /// (x mesh, y values) as nalgebra vectors
    pub fn to_dvectors(&self) -> (DVector<f64>, DVector<f64>) {
        (
            DVector::from_vec(self.xs.clone()),
            DVector::from_vec(self.ys.clone()),
        )
    }
}
