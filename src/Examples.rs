//! examples of usage of RustedODEcalc
/// scalar ODE calculator examples: one per method, fallback, solver struct
pub mod ode_examples;
