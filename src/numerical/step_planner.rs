//! Fixed-step planning shared by every solver of the calculator.
//!
//! n = max(1, ceil(|x_end - x0| / |h|)) steps are planned. Each step is h clamped to the
//! remaining distance, so the trajectory ends exactly on x_end and never overshoots.
//! The planner stops early once x reaches or passes x_end.

/// One planned step from `x` to `x_next = x + h`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub x: f64,
    pub h: f64,
    pub x_next: f64,
}

#[derive(Debug, Clone)]
pub struct StepPlanner {
    x: f64,
    x_end: f64,
    h: f64,
    forward: bool,
    n_steps: usize,
    i: usize,
    finished: bool,
}

impl StepPlanner {
    /// `h` must be nonzero; its sign is taken from the direction x0 -> x_end.
    pub fn new(x0: f64, x_end: f64, h: f64) -> StepPlanner {
        let forward = x_end >= x0;
        let h = if forward { h.abs() } else { -h.abs() };
        let n_steps = ((x_end - x0).abs() / h.abs()).ceil().max(1.0) as usize;
        StepPlanner {
            x: x0,
            x_end,
            h,
            forward,
            n_steps,
            i: 0,
            finished: false,
        }
    }

    /// Number of planned steps; fewer may be taken if x reaches x_end earlier.
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Signed nominal step.
    pub fn h(&self) -> f64 {
        self.h
    }
}

impl Iterator for StepPlanner {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.finished || self.i >= self.n_steps {
            return None;
        }
        let remaining = self.x_end - self.x;
        let mut h = if self.forward {
            self.h.min(remaining)
        } else {
            self.h.max(remaining)
        };
        let mut x_next = self.x + h;
        let reached = if self.forward {
            x_next >= self.x_end
        } else {
            x_next <= self.x_end
        };
        // the step that reaches x_end, and the last planned one, land on it exactly
        if reached || self.i + 1 == self.n_steps {
            h = remaining;
            x_next = self.x_end;
            self.finished = true;
        }
        let step = Step {
            x: self.x,
            h,
            x_next,
        };
        self.i += 1;
        self.x = x_next;
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_division_needs_no_clamping() {
        let steps: Vec<Step> = StepPlanner::new(0.0, 2.0, 0.5).collect();
        assert_eq!(steps.len(), 4);
        for step in &steps {
            assert_relative_eq!(step.h, 0.5, epsilon = 1e-15);
        }
        assert_eq!(steps[3].x_next, 2.0);
    }

    #[test]
    fn test_last_step_is_clamped() {
        let planner = StepPlanner::new(0.0, 1.0, 0.3);
        assert_eq!(planner.n_steps(), 4);
        let steps: Vec<Step> = planner.collect();
        assert_eq!(steps.len(), 4);
        assert_relative_eq!(steps[0].h, 0.3);
        assert_relative_eq!(steps[2].h, 0.3);
        assert_relative_eq!(steps[3].h, 0.1, epsilon = 1e-12);
        assert_eq!(steps[3].x_next, 1.0);
    }

    #[test]
    fn test_backward_direction_normalizes_sign() {
        // positive h with x_end < x0 walks backwards
        let steps: Vec<Step> = StepPlanner::new(1.0, 0.0, 0.3).collect();
        assert_eq!(steps.len(), 4);
        assert!(steps.iter().all(|s| s.h < 0.0));
        assert_relative_eq!(steps[3].h, -0.1, epsilon = 1e-12);
        assert_eq!(steps[3].x_next, 0.0);
    }

    #[test]
    fn test_wrong_sign_forward_is_normalized() {
        let steps: Vec<Step> = StepPlanner::new(0.0, 1.0, -0.25).collect();
        assert_eq!(steps.len(), 4);
        assert!(steps.iter().all(|s| s.h > 0.0));
    }

    #[test]
    fn test_step_larger_than_interval() {
        let steps: Vec<Step> = StepPlanner::new(0.0, 0.2, 1.0).collect();
        assert_eq!(steps.len(), 1);
        assert_relative_eq!(steps[0].h, 0.2);
    }

    #[test]
    fn test_zero_length_interval_plans_one_empty_step() {
        let steps: Vec<Step> = StepPlanner::new(1.5, 1.5, 0.1).collect();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].h, 0.0);
        assert_eq!(steps[0].x_next, 1.5);
    }

    #[test]
    fn test_steps_are_contiguous() {
        let steps: Vec<Step> = StepPlanner::new(-0.3, 0.71, 0.01).collect();
        for pair in steps.windows(2) {
            assert_eq!(pair[0].x_next, pair[1].x);
        }
        assert_eq!(steps.last().unwrap().x_next, 0.71);
    }
}
