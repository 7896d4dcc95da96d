//! # Symbolic Expression Simplification Module
//!
//! Bottom-up algebraic simplification used after differentiation:
//!
//! 1. **Constant Folding**: arithmetic and elementary functions applied to constants
//! 2. **Algebraic Identities**: x + 0 = x, x * 1 = x, 0 * x = 0, x ^ 1 = x, x ^ 0 = 1
//! 3. **Zero Elimination**: products with a zero factor collapse to `Const(0.0)`
//!
//! No term collection is attempted: the classifier only needs the simplified derivative to be
//! free of spurious occurrences of a variable.

use crate::symbolic::symbolic_engine::Expr;
use std::f64::consts::PI;

fn fold_function(expr: &Expr, value: f64) -> Option<f64> {
    let res = match expr {
        Expr::Exp(_) => value.exp(),
        Expr::Ln(_) => value.ln(),
        Expr::sin(_) => value.sin(),
        Expr::cos(_) => value.cos(),
        Expr::tg(_) => value.tan(),
        Expr::ctg(_) => 1.0 / value.tan(),
        Expr::arcsin(_) => value.asin(),
        Expr::arccos(_) => value.acos(),
        Expr::arctg(_) => value.atan(),
        Expr::arcctg(_) => PI / 2.0 - value.atan(),
        _ => return None,
    };
    // folding must not hide a domain fault inside a constant
    if res.is_finite() { Some(res) } else { None }
}

impl Expr {
    /// Simplifies the expression recursively, children first.
    pub fn simplify_(&self) -> Expr {
        let children_done = match self {
            Expr::Var(_) | Expr::Const(_) => return self.clone(),
            Expr::Add(lhs, rhs) => Expr::Add(lhs.simplify_().boxed(), rhs.simplify_().boxed()),
            Expr::Sub(lhs, rhs) => Expr::Sub(lhs.simplify_().boxed(), rhs.simplify_().boxed()),
            Expr::Mul(lhs, rhs) => Expr::Mul(lhs.simplify_().boxed(), rhs.simplify_().boxed()),
            Expr::Div(lhs, rhs) => Expr::Div(lhs.simplify_().boxed(), rhs.simplify_().boxed()),
            Expr::Pow(base, exp) => Expr::Pow(base.simplify_().boxed(), exp.simplify_().boxed()),
            other => {
                let arg = other.children()[0].simplify_();
                if let Expr::Const(value) = arg {
                    if let Some(folded) = fold_function(other, value) {
                        return Expr::Const(folded);
                    }
                }
                return match other {
                    Expr::Exp(_) => Expr::Exp(arg.boxed()),
                    Expr::Ln(_) => Expr::Ln(arg.boxed()),
                    Expr::sin(_) => Expr::sin(arg.boxed()),
                    Expr::cos(_) => Expr::cos(arg.boxed()),
                    Expr::tg(_) => Expr::tg(arg.boxed()),
                    Expr::ctg(_) => Expr::ctg(arg.boxed()),
                    Expr::arcsin(_) => Expr::arcsin(arg.boxed()),
                    Expr::arccos(_) => Expr::arccos(arg.boxed()),
                    Expr::arctg(_) => Expr::arctg(arg.boxed()),
                    _ => Expr::arcctg(arg.boxed()),
                };
            }
        };
        children_done.simplify_node()
    }

    /// One rewriting step on a node whose children are already simplified.
    fn simplify_node(self) -> Expr {
        match self {
            Expr::Add(lhs, rhs) => match (*lhs, *rhs) {
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
                (l, r) if l.is_zero() => r,
                (l, r) if r.is_zero() => l,
                (l, r) => l + r,
            },
            Expr::Sub(lhs, rhs) => match (*lhs, *rhs) {
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
                (l, r) if r.is_zero() => l,
                (l, r) if l.is_zero() => Expr::Const(-1.0) * r,
                (l, r) if l == r => Expr::Const(0.0),
                (l, r) => l - r,
            },
            Expr::Mul(lhs, rhs) => match (*lhs, *rhs) {
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
                (l, r) if l.is_zero() || r.is_zero() => Expr::Const(0.0),
                (l, r) if l.is_one() => r,
                (l, r) if r.is_one() => l,
                // pull constants to the left: c1 * (c2 * u) = (c1*c2) * u
                (Expr::Const(a), Expr::Mul(inner_l, inner_r)) => match *inner_l {
                    Expr::Const(b) => (Expr::Const(a * b) * *inner_r).simplify_node(),
                    other => Expr::Const(a) * (other * *inner_r),
                },
                (l, Expr::Const(b)) => Expr::Const(b) * l,
                (l, r) => l * r,
            },
            Expr::Div(lhs, rhs) => match (*lhs, *rhs) {
                (Expr::Const(a), Expr::Const(b)) if b != 0.0 => Expr::Const(a / b),
                (l, r) if l.is_zero() && !r.is_zero() => Expr::Const(0.0),
                (l, r) if r.is_one() => l,
                (l, r) => l / r,
            },
            Expr::Pow(base, exp) => match (*base, *exp) {
                (Expr::Const(a), Expr::Const(b)) if a.powf(b).is_finite() => {
                    Expr::Const(a.powf(b))
                }
                (_, e) if e.is_zero() => Expr::Const(1.0),
                (b, e) if e.is_one() => b,
                (b, e) => b.pow(e),
            },
            other => other,
        }
    }
}
