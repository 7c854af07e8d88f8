use ark_ec::PrimeGroup;
use ark_ff::Field;
use rand::Rng;

/// Samples a uniformly random non-zero field element.
pub fn rand_scalar<T, S>(rng: &mut T) -> S
where
    T: Rng,
    S: Field,
{
    let mut bytes = [0; 256];
    loop {
        rng.fill_bytes(&mut bytes);
        if let Some(scalar) = S::from_random_bytes(&bytes) {
            if !scalar.is_zero() {
                return scalar;
            }
        }
    }
}

/// A random multiple of the group generator.
pub fn rand_point<T, G>(rng: &mut T) -> G
where
    T: Rng,
    G: PrimeGroup,
{
    G::generator() * rand_scalar::<T, G::ScalarField>(rng)
}

/// `sum(bases[i] * scalars[i])`, truncated to the shorter of the two slices.
pub fn linear_combination<G: PrimeGroup>(bases: &[G], scalars: &[G::ScalarField]) -> G {
    bases
        .iter()
        .zip(scalars)
        .fold(G::zero(), |acc, (base, scalar)| acc + *base * *scalar)
}

#[cfg(all(test, feature = "bn254"))]
mod tests {
    use super::*;
    use ark_bn254::{Fr, G1Projective};
    use ark_std::{UniformRand, Zero, test_rng};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn linear_combination_matches_scalar_arithmetic() {
        let mut rng = test_rng();
        let g = G1Projective::generator();
        let scalars: Vec<Fr> = (0..4).map(|_| Fr::rand(&mut rng)).collect();
        let bases: Vec<G1Projective> = (1..=4u64).map(|i| g * Fr::from(i)).collect();

        let expected = scalars
            .iter()
            .zip(1..=4u64)
            .fold(Fr::zero(), |acc, (s, i)| acc + *s * Fr::from(i));
        assert_eq!(linear_combination(&bases, &scalars), g * expected);
        assert_eq!(
            linear_combination(&bases[..2], &scalars),
            linear_combination(&bases[..2], &scalars[..2])
        );
        assert!(linear_combination::<G1Projective>(&[], &scalars).is_zero());
    }

    #[test]
    fn random_scalars_are_never_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            let scalar: Fr = rand_scalar(&mut rng);
            assert!(!scalar.is_zero());
        }
        let point: G1Projective = rand_point(&mut rng);
        assert!(!point.is_zero());
    }
}
