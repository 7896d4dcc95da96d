/// error type shared by the whole calculator
pub mod ODE_error;
/// fixed step plan from x0 to x_end, the last step lands exactly on x_end
pub mod step_planner;
/// sampled solution (x, y)
pub mod trajectory;
/// classical 4th order Runge-Kutta, the fallback of every specialized method
pub mod RK4;
/// structural tests: linear, homogeneous, Bernoulli, Riccati
pub mod ODE_classifier;
/// y' = a(x)*y + b(x), integrating factor with trapezoidal quadrature
pub mod Linear_ODE;
/// y' = F(y/x), substitution y = v*x
pub mod Homogeneous_ODE;
/// y' = a(x)*y + b(x)*y^n, substitution z = y^(1-n)
pub mod Bernoulli_ODE;
/// main api of the calculator
///
/// Example#1
/// ```
/// use RustedODEcalc::numerical::ODE_calculator_api::{solve, Strategy};
/// // the equation is not linear, RK4 takes over and the warning says why
/// let solution = solve("y' = x*y*y", Strategy::Linear, 0.0, 1.0, 1.0, 0.01).unwrap();
/// assert!(solution.fallback_used());
/// println!("{}", solution.summary());
/// ```
/// Example#2
/// ```
/// use RustedODEcalc::numerical::ODE_calculator_api::{ScalarODE, Strategy};
/// let mut ode = ScalarODE::new("dy/dx = (x + y)/x", Strategy::Homogeneous, 1.0, 0.0, 2.0, 0.01);
/// ode.set_solver_params(Some("off".to_string()), None, None).unwrap();
/// ode.solve().unwrap();
/// let (x, y) = ode.get_result().unwrap().final_point().unwrap();
/// assert!((y - x * x.ln()).abs() < 1e-6);
/// ```
pub mod ODE_calculator_api;
