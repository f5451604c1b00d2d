//! Element-wise evaluation of a scalar formula over many instants.
//!
//! Every model in the crate is written for one instant. [`evaluate`] maps such a
//! function over a slice and returns the results in input order. With the `parallel`
//! feature the map runs on the `rayon` thread pool. The function must be side-effect
//! free, which holds for every evaluator of the read-only series tables.

#[cfg(not(feature = "parallel"))]
use itertools::Itertools;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Apply `f` to every element of `inputs`, preserving order.
#[cfg(not(feature = "parallel"))]
pub fn evaluate<T, U, F>(inputs: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    inputs.iter().map(f).collect_vec()
}

/// Apply `f` to every element of `inputs`, preserving order.
#[cfg(feature = "parallel")]
pub fn evaluate<T, U, F>(inputs: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    inputs.par_iter().map(f).collect()
}

/// Fallible variant of [`evaluate`]: stops at the first error in input order.
pub fn try_evaluate<T, U, E, F>(inputs: &[T], f: F) -> Result<Vec<U>, E>
where
    T: Sync,
    U: Send,
    E: Send,
    F: Fn(&T) -> Result<U, E> + Sync + Send,
{
    evaluate(inputs, f).into_iter().collect()
}

#[cfg(test)]
mod batch_test {
    use super::*;

    #[test]
    fn test_evaluate_preserves_order() {
        let inputs: Vec<f64> = (0..1000).map(|i| i as f64).collect();
        let out = evaluate(&inputs, |x| x * 2.0);
        assert_eq!(out.len(), inputs.len());
        assert!(out.iter().zip(&inputs).all(|(y, x)| *y == 2.0 * x));
        assert!(evaluate(&[] as &[f64], |x| *x).is_empty());
    }

    #[test]
    fn test_try_evaluate() {
        let ok: Result<Vec<i32>, String> = try_evaluate(&[1, 2, 3], |x| Ok(x + 1));
        assert_eq!(ok, Ok(vec![2, 3, 4]));

        let err: Result<Vec<i32>, String> = try_evaluate(&[1, -2, -3], |x| {
            if *x < 0 {
                Err(format!("negative {x}"))
            } else {
                Ok(*x)
            }
        });
        assert_eq!(err, Err("negative -2".to_string()));
    }
}
