use crate::error::{Error, Result};
use crate::polynomial::Polynomial;
use crate::solution::{Solution, Value};
use ark_ff::PrimeField;
use log::debug;
use rootcause::Report;
use rootcause::prelude::ResultExt;
use std::iter::{once, zip};
use std::ops::Add;

/// Name of the constant wire fixed to one; always the first public variable.
pub const ONE: &str = "ONE";

/// Handle to a variable declared on a [`Circuit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variable {
    One,
    Public(usize),
    Secret(usize),
    /// Output wire of a [`Circuit::mul`] gate, computed by the solver.
    Internal(usize),
}

/// `sum(coefficient_i * variable_i)` with curve-agnostic coefficients.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinearCombination {
    terms: Vec<(Variable, Value)>,
}

impl LinearCombination {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn constant(value: impl Into<Value>) -> Self {
        Self::zero().term(Variable::One, value)
    }

    pub fn term(mut self, variable: Variable, coefficient: impl Into<Value>) -> Self {
        self.terms.push((variable, coefficient.into()));
        self
    }

    pub fn terms(&self) -> &[(Variable, Value)] {
        &self.terms
    }
}

impl From<Variable> for LinearCombination {
    fn from(variable: Variable) -> Self {
        Self::zero().term(variable, 1)
    }
}

impl Add<Variable> for LinearCombination {
    type Output = LinearCombination;

    fn add(self, rhs: Variable) -> Self::Output {
        self.term(rhs, 1)
    }
}

impl Add for LinearCombination {
    type Output = LinearCombination;

    fn add(mut self, rhs: LinearCombination) -> Self::Output {
        self.terms.extend(rhs.terms);
        self
    }
}

#[derive(Clone, Debug)]
struct Gate {
    a: LinearCombination,
    b: LinearCombination,
    c: LinearCombination,
    output: Option<usize>,
}

/// A rank-1 constraint system described independently of any curve.
///
/// Lower it into a concrete scalar field with [`Circuit::compile`].
#[derive(Clone, Debug, Default)]
pub struct Circuit {
    public: Vec<String>,
    secret: Vec<String>,
    internal: usize,
    gates: Vec<Gate>,
}

impl Circuit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn public_input(&mut self, name: impl Into<String>) -> Result<Variable> {
        let name = self.check_name(name.into())?;
        self.public.push(name);
        Ok(Variable::Public(self.public.len() - 1))
    }

    pub fn secret_input(&mut self, name: impl Into<String>) -> Result<Variable> {
        let name = self.check_name(name.into())?;
        self.secret.push(name);
        Ok(Variable::Secret(self.secret.len() - 1))
    }

    /// Allocates a wire holding `a * b`; the solver fills it in.
    pub fn mul(
        &mut self,
        a: impl Into<LinearCombination>,
        b: impl Into<LinearCombination>,
    ) -> Variable {
        let output = Variable::Internal(self.internal);
        self.gates.push(Gate {
            a: a.into(),
            b: b.into(),
            c: output.into(),
            output: Some(self.internal),
        });
        self.internal += 1;
        output
    }

    /// Adds the constraint `a * b = c`.
    pub fn assert_product(
        &mut self,
        a: impl Into<LinearCombination>,
        b: impl Into<LinearCombination>,
        c: impl Into<LinearCombination>,
    ) {
        self.gates.push(Gate {
            a: a.into(),
            b: b.into(),
            c: c.into(),
            output: None,
        });
    }

    /// Adds the constraint `a * 1 = b`.
    pub fn assert_equal(
        &mut self,
        a: impl Into<LinearCombination>,
        b: impl Into<LinearCombination>,
    ) {
        self.assert_product(a, LinearCombination::constant(1), b);
    }

    pub fn num_constraints(&self) -> usize {
        self.gates.len()
    }

    fn check_name(&self, name: String) -> Result<String> {
        if name == ONE || self.public.contains(&name) || self.secret.contains(&name) {
            return Err(Error::DuplicateVariable(name));
        }
        Ok(name)
    }

    fn index(&self, variable: Variable) -> Option<usize> {
        let num_public = 1 + self.public.len();
        let num_secret = self.secret.len();
        match variable {
            Variable::One => Some(0),
            Variable::Public(i) if i < self.public.len() => Some(1 + i),
            Variable::Secret(i) if i < num_secret => Some(num_public + i),
            Variable::Internal(i) if i < self.internal => Some(num_public + num_secret + i),
            _ => None,
        }
    }

    /// Lowers the circuit into the scalar field `F`.
    pub(crate) fn build<F: PrimeField>(&self) -> Result<ConstraintSystem<F>> {
        let lower = |lc: &LinearCombination| -> Result<Vec<(usize, F)>> {
            lc.terms
                .iter()
                .map(|(variable, coefficient)| {
                    let index = self
                        .index(*variable)
                        .ok_or_else(|| Error::UnknownVariable(format!("{variable:?}")))?;
                    let coefficient = coefficient.to_field().ok_or_else(|| Error::InvalidValue {
                        name: format!("coefficient of {variable:?}"),
                        value: coefficient.to_string(),
                    })?;
                    Ok((index, coefficient))
                })
                .collect()
        };

        let constraints = self
            .gates
            .iter()
            .map(|gate| {
                Ok(Constraint {
                    a: lower(&gate.a)?,
                    b: lower(&gate.b)?,
                    c: lower(&gate.c)?,
                    output: gate
                        .output
                        .and_then(|i| self.index(Variable::Internal(i))),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let variables = once(ONE.to_string())
            .chain(self.public.iter().cloned())
            .chain(self.secret.iter().cloned())
            .chain((0..self.internal).map(|i| format!("internal_{i}")))
            .collect();

        Ok(ConstraintSystem {
            variables,
            num_public: 1 + self.public.len(),
            num_secret: self.secret.len(),
            constraints,
        })
    }
}

/// One `a * b = c` row over sparse `(variable index, coefficient)` terms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constraint<F: PrimeField> {
    pub a: Vec<(usize, F)>,
    pub b: Vec<(usize, F)>,
    pub c: Vec<(usize, F)>,
    /// Wire assigned from `a * b` while solving.
    pub output: Option<usize>,
}

fn evaluate<F: PrimeField>(terms: &[(usize, F)], witness: &[F]) -> F {
    terms
        .iter()
        .fold(F::zero(), |acc, (index, coefficient)| acc + witness[*index] * coefficient)
}

/// An R1CS over one scalar field.
///
/// Variables are ordered: [`ONE`], public inputs, secret inputs, internal wires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstraintSystem<F: PrimeField> {
    variables: Vec<String>,
    num_public: usize,
    num_secret: usize,
    constraints: Vec<Constraint<F>>,
}

impl<F: PrimeField> ConstraintSystem<F> {
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Public variables including [`ONE`].
    pub fn num_public(&self) -> usize {
        self.num_public
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn constraints(&self) -> &[Constraint<F>] {
        &self.constraints
    }

    /// Names of the public inputs, excluding [`ONE`].
    pub fn public_inputs(&self) -> &[String] {
        &self.variables[1..self.num_public]
    }

    /// Builds the full witness vector from the inputs in `solution` and checks it.
    pub fn solve(&self, solution: &Solution) -> Result<Vec<F>> {
        let num_inputs = self.num_public + self.num_secret;
        let mut witness = vec![F::zero(); self.variables.len()];
        witness[0] = F::one();
        for (slot, name) in witness[1..num_inputs]
            .iter_mut()
            .zip(&self.variables[1..num_inputs])
        {
            *slot = solution.field_value(name)?;
        }
        if solution.len() > num_inputs - 1 {
            debug!(
                "solution carries {} values, the circuit only reads {}",
                solution.len(),
                num_inputs - 1
            );
        }

        for constraint in &self.constraints {
            if let Some(output) = constraint.output {
                witness[output] =
                    evaluate(&constraint.a, &witness) * evaluate(&constraint.b, &witness);
            }
        }

        match self.first_unsatisfied(&witness) {
            Some(index) => Err(Error::UnsatisfiedConstraint(index)),
            None => Ok(witness),
        }
    }

    pub fn first_unsatisfied(&self, witness: &[F]) -> Option<usize> {
        self.constraints.iter().position(|constraint| {
            evaluate(&constraint.a, witness) * evaluate(&constraint.b, witness)
                != evaluate(&constraint.c, witness)
        })
    }
}

/// Quadratic arithmetic program: one polynomial per variable for each of the
/// left, right and output matrices, interpolated over `x = 1..=n`.
#[derive(Debug, PartialEq, Eq)]
pub struct QAP<F>
where
    F: PrimeField,
{
    /// LHS of multiplication
    pub u: Vec<Polynomial<F>>,
    /// RHS of multiplication
    pub v: Vec<Polynomial<F>>,
    /// Output
    pub w: Vec<Polynomial<F>>,
    pub num_public: usize,
    pub num_constraints: usize,
}

impl<F: PrimeField> QAP<F> {
    pub fn num_variables(&self) -> usize {
        self.u.len()
    }

    /// Vanishing polynomial over the constraint evaluation points.
    pub fn t(&self) -> Result<Polynomial<F>, Report> {
        Polynomial::vanishing(self.num_constraints)
    }

    /// `h(x) = (U(x) * V(x) - W(x)) / t(x)` for a satisfying witness.
    pub fn quotient(&self, witness: &[F]) -> Result<Polynomial<F>, Report> {
        let u: Polynomial<F> = zip(&self.u, witness).map(|(u_i, a_i)| u_i * *a_i).sum();
        let v: Polynomial<F> = zip(&self.v, witness).map(|(v_i, a_i)| v_i * *a_i).sum();
        let w: Polynomial<F> = zip(&self.w, witness).map(|(w_i, a_i)| w_i * *a_i).sum();
        Ok((&(&u * &v) - &w)
            .divide_exact(&self.t()?)
            .context("Dividing by the vanishing polynomial")
            .attach(format!("constraints: {}", self.num_constraints))?)
    }
}

impl<F: PrimeField> From<&ConstraintSystem<F>> for QAP<F> {
    fn from(r1cs: &ConstraintSystem<F>) -> Self {
        let n = r1cs.num_constraints();
        // Column-wise, i.e. a vec of columns
        let mut l = vec![vec![F::zero(); n]; r1cs.num_variables()];
        let mut r = l.clone();
        let mut o = l.clone();
        for (row, constraint) in r1cs.constraints.iter().enumerate() {
            for (column, coefficient) in &constraint.a {
                l[*column][row] += coefficient;
            }
            for (column, coefficient) in &constraint.b {
                r[*column][row] += coefficient;
            }
            for (column, coefficient) in &constraint.c {
                o[*column][row] += coefficient;
            }
        }

        let interpolate = |columns: Vec<Vec<F>>| -> Vec<Polynomial<F>> {
            columns
                .iter()
                .map(|column| Polynomial::interpolate_from_vector(column))
                .collect()
        };
        QAP {
            u: interpolate(l),
            v: interpolate(r),
            w: interpolate(o),
            num_public: r1cs.num_public(),
            num_constraints: n,
        }
    }
}
