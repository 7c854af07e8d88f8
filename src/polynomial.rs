use ark_ec::PrimeGroup;
use ark_ff::Field;
use rootcause::{Report, bail, report};
use std::cmp::max;
use std::fmt::Debug;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

/// Dense univariate polynomial with trailing zero coefficients trimmed.
///
/// The zero polynomial has no coefficients.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Polynomial<F>
where
    F: Field,
{
    /// x^0, x^1, x^2, ...
    coefficients: Vec<F>,
}

impl<F: Field> Polynomial<F> {
    pub fn new(mut coefficients: Vec<F>) -> Self {
        while coefficients.last().is_some_and(|c| c.is_zero()) {
            coefficients.pop();
        }
        Polynomial { coefficients }
    }

    pub fn zero() -> Self {
        Polynomial {
            coefficients: Vec::new(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn coefficients(&self) -> &[F] {
        &self.coefficients
    }

    /// Number of coefficients, i.e. one more than the degree for non-zero polynomials.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluates in the exponent: `sum(coefficient_i * srs[i])`.
    pub fn evaluate_over_srs<G>(&self, srs: &[G]) -> Result<G, Report>
    where
        G: PrimeGroup<ScalarField = F> + Debug,
    {
        if srs.len() < self.coefficients.len() {
            bail!(
                "SRS too small for polynomial: {} points for {} coefficients",
                srs.len(),
                self.coefficients.len()
            );
        }

        Ok(self
            .coefficients
            .iter()
            .zip(srs)
            .fold(G::zero(), |acc, (coefficient, point)| {
                acc + *point * *coefficient
            }))
    }

    pub fn evaluate(&self, x: &F) -> F {
        self.coefficients
            .iter()
            .rev()
            .fold(F::zero(), |acc, coefficient| acc * x + coefficient)
    }

    /// Lagrange interpolation through `(1, values[0]), (2, values[1]), ...`.
    ///
    /// The evaluation points match the roots of [`Polynomial::vanishing`].
    pub fn interpolate_from_vector(values: &[F]) -> Self {
        let xs: Vec<F> = (1..=values.len()).map(|x| F::from(x as u64)).collect();
        values
            .iter()
            .enumerate()
            .filter(|(_, y)| !y.is_zero())
            .map(|(j, y)| {
                let (numerator, denominator) = xs
                    .iter()
                    .enumerate()
                    .filter(|(k, _)| *k != j)
                    .fold(
                        (Polynomial::new(vec![F::one()]), F::one()),
                        |(numerator, denominator), (_, x_k)| {
                            (
                                &numerator * &Polynomial::new(vec![-*x_k, F::one()]),
                                denominator * (xs[j] - x_k),
                            )
                        },
                    );
                &numerator * (*y / denominator)
            })
            .sum()
    }

    /// `(x - 1)(x - 2)...(x - n)`
    pub fn vanishing(num_roots: usize) -> Result<Self, Report> {
        (1..=num_roots)
            .map(|root| Polynomial::new(vec![-F::from(root as u64), F::one()]))
            .reduce(|a, b| &a * &b)
            .ok_or_else(|| report!("Vanishing polynomial needs at least one root"))
    }

    /// Long division, returning `(quotient, remainder)`.
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self), Report> {
        let Some(leading) = divisor.coefficients.last() else {
            bail!("Division by the zero polynomial");
        };
        if self.coefficients.len() < divisor.coefficients.len() {
            return Ok((Polynomial::zero(), self.clone()));
        }

        let leading_inverse = F::one() / leading;
        let shift = divisor.degree();
        let mut remainder = self.coefficients.clone();
        let mut quotient = vec![F::zero(); remainder.len() - shift];
        for i in (0..quotient.len()).rev() {
            let coefficient = remainder[i + shift] * leading_inverse;
            quotient[i] = coefficient;
            for (j, d) in divisor.coefficients.iter().enumerate() {
                remainder[i + j] -= coefficient * d;
            }
        }
        Ok((Polynomial::new(quotient), Polynomial::new(remainder)))
    }

    /// Division that must leave no remainder.
    pub fn divide_exact(&self, divisor: &Self) -> Result<Self, Report> {
        let (quotient, remainder) = self.div_rem(divisor)?;
        if !remainder.is_zero() {
            bail!(
                "Polynomial division left a remainder of degree {}",
                remainder.degree()
            );
        }
        Ok(quotient)
    }
}

impl<F: Field> Add for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn add(self, rhs: Self) -> Self::Output {
        let len = max(self.len(), rhs.len());
        Polynomial::new(
            (0..len)
                .map(|i| {
                    let a = self.coefficients.get(i).copied().unwrap_or_default();
                    let b = rhs.coefficients.get(i).copied().unwrap_or_default();
                    a + b
                })
                .collect(),
        )
    }
}

impl<F: Field> Add for Polynomial<F> {
    type Output = Polynomial<F>;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl<F: Field> Sub for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn sub(self, rhs: Self) -> Self::Output {
        let len = max(self.len(), rhs.len());
        Polynomial::new(
            (0..len)
                .map(|i| {
                    let a = self.coefficients.get(i).copied().unwrap_or_default();
                    let b = rhs.coefficients.get(i).copied().unwrap_or_default();
                    a - b
                })
                .collect(),
        )
    }
}

impl<F: Field> Sub for Polynomial<F> {
    type Output = Polynomial<F>;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl<F: Field> Mul for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.is_zero() || rhs.is_zero() {
            return Polynomial::zero();
        }

        // Schoolbook n^2 multiplication
        let mut out = vec![F::zero(); self.len() + rhs.len() - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in rhs.coefficients.iter().enumerate() {
                out[i + j] += *a * b;
            }
        }
        Polynomial::new(out)
    }
}

impl<F: Field> Mul for Polynomial<F> {
    type Output = Polynomial<F>;

    fn mul(self, rhs: Polynomial<F>) -> Self::Output {
        &self * &rhs
    }
}

impl<F: Field> Mul<F> for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn mul(self, rhs: F) -> Self::Output {
        Polynomial::new(self.coefficients.iter().map(|x| *x * rhs).collect())
    }
}

impl<F: Field> Sum for Polynomial<F> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.reduce(|a, b| &a + &b).unwrap_or_default()
    }
}

impl<F: Field> From<Vec<u64>> for Polynomial<F> {
    fn from(coefficients: Vec<u64>) -> Self {
        Polynomial::new(coefficients.into_iter().map(F::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::{Fp64, MontBackend, Zero};
    use rand::Rng;

    #[derive(ark_ff::MontConfig)]
    #[modulus = "641"]
    #[generator = "3"]
    struct FieldConfig;
    type Field = Fp64<MontBackend<FieldConfig, 1>>;

    fn poly(coefficients: Vec<u64>) -> Polynomial<Field> {
        Polynomial::from(coefficients)
    }

    #[test]
    fn polynomial_add() {
        assert_eq!(poly(vec![1, 3, 5]) + poly(vec![0, 10, 2]), poly(vec![1, 13, 7]));
    }

    #[test]
    fn polynomial_add_different_order() {
        assert_eq!(poly(vec![1, 3, 5]) + poly(vec![10, 2]), poly(vec![11, 5, 5]));
    }

    #[test]
    fn polynomial_sub_cancels_to_zero() {
        let a = poly(vec![4, 0, 9]);
        assert!((&a - &a).is_zero());
        assert_eq!(poly(vec![5, 7]) - poly(vec![2]), poly(vec![3, 7]));
    }

    #[test]
    fn polynomial_mult() {
        assert_eq!(
            poly(vec![1, 3, 5]) * poly(vec![10, 2]),
            poly(vec![10, 32, 56, 10])
        );
        assert!((poly(vec![1, 2]) * Polynomial::zero()).is_zero());
    }

    #[test]
    fn trailing_zeroes_are_trimmed() {
        assert_eq!(poly(vec![1, 2, 0, 0]).coefficients().len(), 2);
        assert!(poly(vec![0, 0]).is_zero());
    }

    #[test]
    fn evaluate_uses_every_coefficient() {
        // 3 + 5x + 10x^2 + 20x^3 at x = 2
        let value = poly(vec![3, 5, 10, 20]).evaluate(&Field::from(2u64));
        assert_eq!(value, Field::from(3u64 + 10 + 40 + 160));
    }

    #[test]
    fn division_reverses_multiplication() {
        let a = poly(vec![7, 1, 4]);
        let b = poly(vec![3, 0, 2, 9]);
        let product = &a * &b;
        assert_eq!(product.divide_exact(&b).unwrap(), a);

        let (quotient, remainder) = (&product + &poly(vec![5])).div_rem(&a).unwrap();
        assert_eq!(quotient, b);
        assert_eq!(remainder, poly(vec![5]));
    }

    #[test]
    fn inexact_division_is_an_error() {
        assert!(poly(vec![1, 0, 1]).divide_exact(&poly(vec![1, 1])).is_err());
        assert!(poly(vec![1]).div_rem(&Polynomial::zero()).is_err());
    }

    #[test]
    fn vanishing_polynomial_has_roots_one_to_n() {
        let t = Polynomial::<Field>::vanishing(5).unwrap();
        assert_eq!(t.degree(), 5);
        for root in 1..=5u64 {
            assert!(t.evaluate(&Field::from(root)).is_zero());
        }
        assert!(!t.evaluate(&Field::from(6u64)).is_zero());
        assert!(Polynomial::<Field>::vanishing(0).is_err());
    }

    #[test]
    fn polynomial_interpolation() {
        let mut rng = rand::rng();
        let length: usize = rng.random_range(1..30);
        let values: Vec<Field> = (0..length)
            .map(|_| Field::from(rng.random_range(0..641u64)))
            .collect();
        let poly = Polynomial::interpolate_from_vector(&values);
        let out: Vec<Field> = (1..=values.len())
            .map(|x| poly.evaluate(&Field::from(x as u64)))
            .collect();

        assert_eq!(values, out)
    }
}
