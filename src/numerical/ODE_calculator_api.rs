//! Entry point of the scalar ODE calculator.
//!
//! [`solve`] / [`solve_with`] take the equation as typed by the user, a requested [`Strategy`]
//! and the integration parameters, and return a [`Solution`]. A specialized method that fails
//! its structural test or produces a non-finite value is abandoned and the equation is
//! re-solved with RK4, the warning is attached to the solution.
//!
//! [`ScalarODE`] wraps the same call with logger setup, statistics and csv export.
use crate::Utils::logger::save_trajectory_to_csv;
use crate::numerical::Bernoulli_ODE::solve_bernoulli;
use crate::numerical::Homogeneous_ODE::solve_homogeneous;
use crate::numerical::Linear_ODE::solve_linear;
use crate::numerical::ODE_classifier::riccati_gate;
use crate::numerical::ODE_error::ODEError;
use crate::numerical::RK4::solve_rk4;
use crate::numerical::trajectory::Trajectory;
use crate::symbolic::equation_text::rhs_from_equation;
use crate::symbolic::symbolic_traits::{ExpressionEvaluator, NativeEvaluator};
use chrono::Local;
use log::{error, info, warn};
use simplelog::*;
use std::error::Error;
use std::fs::File;
use std::time::Instant;
use strum_macros::{Display, EnumIter, EnumString};
use tabled::{builder::Builder, settings::Style};

pub const DEFAULT_STEP: f64 = 0.01;

pub type SolveOutcome = Result<Trajectory, ODEError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Strategy {
    /// classical RK4, no structural assumptions
    #[strum(to_string = "rk4", serialize = "generic")]
    Generic,
    #[strum(to_string = "linear")]
    Linear,
    #[strum(to_string = "homogeneous")]
    Homogeneous,
    #[strum(to_string = "bernoulli")]
    Bernoulli,
    /// y^2 term required, integrated with RK4
    #[strum(to_string = "riccati")]
    RiccatiGated,
}

/// Validated integration parameters: finite x0, y0, x_end and a nonzero finite h pointing
/// from x0 towards x_end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationParameters {
    pub x0: f64,
    pub y0: f64,
    pub x_end: f64,
    pub h: f64,
}

impl IntegrationParameters {
    pub fn new(x0: f64, y0: f64, x_end: f64, h: f64) -> Result<IntegrationParameters, ODEError> {
        for (name, value) in [("x0", x0), ("y0", y0), ("x_end", x_end)] {
            if !value.is_finite() {
                return Err(ODEError::InvalidInput(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }
        let h = if h.is_finite() && h != 0.0 {
            h
        } else {
            warn!("step h = {} is not usable, default h = {} taken", h, DEFAULT_STEP);
            DEFAULT_STEP
        };
        let h = if x_end >= x0 { h.abs() } else { -h.abs() };
        Ok(IntegrationParameters { x0, y0, x_end, h })
    }
}

/// Result of one calculator call.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub trajectory: Trajectory,
    /// right-hand side after preprocessing
    pub equation: String,
    pub requested: Strategy,
    /// method that produced the trajectory
    pub method: Strategy,
    pub warning: Option<String>,
}

impl Solution {
    pub fn fallback_used(&self) -> bool {
        self.warning.is_some()
    }

    pub fn final_point(&self) -> Option<(f64, f64)> {
        self.trajectory.last()
    }

    /// Short human-readable report: method, equation and y at the end point.
    pub fn summary(&self) -> String {
        let mut report = if self.requested != self.method {
            format!(
                "Method: {} (computed with {})\n",
                self.requested, self.method
            )
        } else {
            format!("Method: {}\n", self.method)
        };
        report.push_str(&format!("Equation: y' = {}\n", self.equation));
        if let Some((x, y)) = self.final_point() {
            report.push_str(&format!(
                "y({}) ≈ {}",
                format_significant(x, 6),
                format_significant(y, 6)
            ));
        }
        if let Some(warning) = &self.warning {
            report.push_str(&format!("\nWarning: {}", warning));
        }
        report
    }
}

/// `value` rounded to `digits` significant digits
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = digits as i32 - 1 - magnitude;
    if (0..=15).contains(&decimals) {
        format!("{:.*}", decimals as usize, value)
    } else {
        format!("{:.*e}", digits.saturating_sub(1), value)
    }
}

fn generic<E: ExpressionEvaluator>(
    evaluator: &E,
    rhs: &E::Ast,
    p: &IntegrationParameters,
) -> SolveOutcome {
    let f = evaluator.compile(rhs, &["x", "y"])?;
    solve_rk4(|x, y| f(&[x, y]), p.x0, p.y0, p.x_end, p.h)
}

fn specialized<E: ExpressionEvaluator>(
    evaluator: &E,
    strategy: Strategy,
    rhs_text: &str,
    rhs: &E::Ast,
    p: &IntegrationParameters,
) -> SolveOutcome {
    match strategy {
        Strategy::Linear => solve_linear(evaluator, rhs, p.x0, p.y0, p.x_end, p.h),
        Strategy::Homogeneous => {
            solve_homogeneous(evaluator, rhs_text, rhs, p.x0, p.y0, p.x_end, p.h)
        }
        Strategy::Bernoulli => solve_bernoulli(evaluator, rhs, p.x0, p.y0, p.x_end, p.h),
        Strategy::Generic | Strategy::RiccatiGated => generic(evaluator, rhs, p),
    }
}

/// Solves y' = f(x,y) with any expression engine.
///
/// `equation` may be `y' = ...`, `dy/dx = ...` or the bare right-hand side.
/// Terminal errors: `ParseError`, `InvalidInput`, `RiccatiGateError`, and `NumericalFault`
/// raised by RK4 itself.
pub fn solve_with<E: ExpressionEvaluator>(
    evaluator: &E,
    equation: &str,
    strategy: Strategy,
    x0: f64,
    y0: f64,
    x_end: f64,
    h: f64,
) -> Result<Solution, ODEError> {
    let params = IntegrationParameters::new(x0, y0, x_end, h)?;
    let rhs_text = rhs_from_equation(equation)?;
    let rhs = evaluator.parse(&rhs_text)?;
    info!(
        "solving y' = {} with {} on [{}, {}], h = {}",
        rhs, strategy, params.x0, params.x_end, params.h
    );
    let solution = |trajectory: Trajectory, method: Strategy, warning: Option<String>| Solution {
        trajectory,
        equation: rhs_text.clone(),
        requested: strategy,
        method,
        warning,
    };
    match strategy {
        Strategy::Generic => {
            let trajectory = generic(evaluator, &rhs, &params)?;
            return Ok(solution(trajectory, Strategy::Generic, None));
        }
        Strategy::RiccatiGated => {
            let k = riccati_gate(evaluator, &rhs, "y")?;
            info!("Riccati form detected (y^{} term), integrating with RK4", k);
            let trajectory = generic(evaluator, &rhs, &params)?;
            return Ok(solution(trajectory, Strategy::Generic, None));
        }
        _ => {}
    }
    match specialized(evaluator, strategy, &rhs_text, &rhs, &params) {
        Ok(trajectory) => Ok(solution(trajectory, strategy, None)),
        Err(reason) if reason.is_recoverable() => {
            let warning = format!(
                "computed with fallback method (RK4) after {} failed: {}",
                strategy, reason
            );
            warn!("{}", warning);
            let trajectory = generic(evaluator, &rhs, &params)?;
            Ok(solution(trajectory, Strategy::Generic, Some(warning)))
        }
        Err(reason) => Err(reason),
    }
}

/// [`solve_with`] using the crate's own expression engine.
///
/// # Examples
/// ```
/// use RustedODEcalc::numerical::ODE_calculator_api::{solve, Strategy};
/// let solution = solve("y' = 2*x + y", Strategy::Linear, 0.0, 1.0, 1.0, 0.001).unwrap();
/// let (x, y) = solution.final_point().unwrap();
/// assert_eq!(x, 1.0);
/// assert!((y - (3.0 * 1.0_f64.exp() - 4.0)).abs() < 1e-4);
/// ```
pub fn solve(
    equation: &str,
    strategy: Strategy,
    x0: f64,
    y0: f64,
    x_end: f64,
    h: f64,
) -> Result<Solution, ODEError> {
    solve_with(&NativeEvaluator, equation, strategy, x0, y0, x_end, h)
}

/////////////////////////////////////////////////////////////////////////////////////////////////
//                    SOLVER STRUCT WITH LOGGING, STATISTICS AND EXPORT
/////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ScalarODE {
    equation: String,
    strategy: Strategy,
    x0: f64,
    y0: f64,
    x_end: f64,
    h: f64,
    /// "debug", "info", "warn", "error" or "off"/"none"
    pub loglevel: Option<String>,
    /// duplicate the log into log_<date>_<time>.txt
    pub log_to_file: bool,
    /// csv path used by save_result
    pub save_path: Option<String>,
    elapsed_ms: u128,
    solution: Option<Solution>,
}

impl ScalarODE {
    pub fn new(equation: &str, strategy: Strategy, x0: f64, y0: f64, x_end: f64, h: f64) -> Self {
        ScalarODE {
            equation: equation.to_string(),
            strategy,
            x0,
            y0,
            x_end,
            h,
            loglevel: Some("info".to_string()),
            log_to_file: false,
            save_path: None,
            elapsed_ms: 0,
            solution: None,
        }
    }

    pub fn set_solver_params(
        &mut self,
        loglevel: Option<String>,
        log_to_file: Option<bool>,
        save_path: Option<String>,
    ) -> Result<(), ODEError> {
        if let Some(level) = loglevel {
            let level = level.to_lowercase();
            level_filter(Some(&level))?;
            self.loglevel = Some(level);
        }
        if let Some(flag) = log_to_file {
            self.log_to_file = flag;
        }
        if save_path.is_some() {
            self.save_path = save_path;
        }
        Ok(())
    }

    fn solver(&mut self) -> Result<(), ODEError> {
        let start = Instant::now();
        let res = solve(
            &self.equation,
            self.strategy,
            self.x0,
            self.y0,
            self.x_end,
            self.h,
        );
        self.elapsed_ms = start.elapsed().as_millis();
        match res {
            Ok(solution) => {
                self.solution = Some(solution);
                self.calc_statistics();
                Ok(())
            }
            Err(e) => {
                error!("{}", e);
                self.solution = None;
                Err(e)
            }
        }
    }

    /// wrapper around the solver function to set up logging
    pub fn solve(&mut self) -> Result<(), ODEError> {
        let log_option = level_filter(self.loglevel.as_deref())?;
        if log_option == LevelFilter::Off {
            return self.solver();
        }
        let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
        loggers.push(TermLogger::new(
            log_option,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
        if self.log_to_file {
            let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
            let name = format!("log_{}.txt", date_and_time);
            match File::create(&name) {
                Ok(file) => loggers.push(WriteLogger::new(log_option, Config::default(), file)),
                Err(e) => eprintln!("log file {} not created: {}", name, e),
            }
        }
        // a logger set up by an earlier call stays in place
        let _ = CombinedLogger::init(loggers);
        let res = self.solver();
        info!(" \n \n Program ended");
        res
    }

    fn calc_statistics(&self) {
        let Some(solution) = &self.solution else {
            return;
        };
        let (x_last, y_last) = solution.final_point().unwrap_or((f64::NAN, f64::NAN));
        let mut builder = Builder::default();
        builder.push_record(["requested method".to_string(), solution.requested.to_string()]);
        builder.push_record(["method used".to_string(), solution.method.to_string()]);
        builder.push_record([
            "fallback".to_string(),
            solution.fallback_used().to_string(),
        ]);
        builder.push_record([
            "number of steps".to_string(),
            (solution.trajectory.len().saturating_sub(1)).to_string(),
        ]);
        builder.push_record(["final x".to_string(), x_last.to_string()]);
        builder.push_record(["final y".to_string(), y_last.to_string()]);
        builder.push_record(["elapsed, ms".to_string(), self.elapsed_ms.to_string()]);
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        info!("\n \n CALC STATISTICS \n \n {}", table.to_string());
    }

    pub fn get_result(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Writes the trajectory to `save_path`, or to `x+y.csv` in the working directory.
    pub fn save_result(&self) -> Result<(), Box<dyn Error>> {
        let solution = self
            .solution
            .as_ref()
            .ok_or_else(|| ODEError::InvalidInput("nothing to save, solve first".to_string()))?;
        let path = self
            .save_path
            .clone()
            .unwrap_or_else(|| "x+y.csv".to_string());
        save_trajectory_to_csv(&path, &solution.trajectory, "x", "y")?;
        info!("result saved to {}", path);
        Ok(())
    }
}

/// loglevel string -> simplelog filter
pub fn level_filter(level: Option<&str>) -> Result<LevelFilter, ODEError> {
    match level {
        None => Ok(LevelFilter::Info),
        Some("debug") => Ok(LevelFilter::Debug),
        Some("info") => Ok(LevelFilter::Info),
        Some("warn") => Ok(LevelFilter::Warn),
        Some("error") => Ok(LevelFilter::Error),
        Some("off") | Some("none") => Ok(LevelFilter::Off),
        Some(other) => Err(ODEError::InvalidInput(format!(
            "loglevel must be debug, info, warn, error or off, got {}",
            other
        ))),
    }
}
