//! SIMD-accelerated numerical kernels using the `wide` crate.

/// Vectorized scoring primitives shared by the similarity metrics.
pub mod numeric {
    use wide::f32x8;

    /// Dot product of two equal-length slices.
    ///
    /// Callers must have validated the lengths already; this is the hot
    /// inner loop and only asserts in debug builds.
    pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len());

        if a.len() < 8 {
            return a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        }

        let mut dot_vec = f32x8::splat(0.0);

        // Process 8 values at a time
        let chunks_a = a.chunks_exact(8);
        let chunks_b = b.chunks_exact(8);
        let remainder_a = chunks_a.remainder();
        let remainder_b = chunks_b.remainder();

        for (chunk_a, chunk_b) in chunks_a.zip(chunks_b) {
            let vec_a = f32x8::new(*TryInto::<&[f32; 8]>::try_into(chunk_a).unwrap());
            let vec_b = f32x8::new(*TryInto::<&[f32; 8]>::try_into(chunk_b).unwrap());
            dot_vec = dot_vec + vec_a * vec_b;
        }

        // Sum all lanes
        let dot_array = dot_vec.to_array();
        let mut total = dot_array.iter().sum::<f32>();

        // Add remainder
        total += remainder_a
            .iter()
            .zip(remainder_b.iter())
            .map(|(x, y)| x * y)
            .sum::<f32>();

        total
    }

    /// Sum of all values in a slice.
    pub fn fast_sum(values: &[f32]) -> f32 {
        if values.len() < 16 {
            return values.iter().sum();
        }

        let mut sum_vec = f32x8::splat(0.0);

        // Process 8 values at a time
        let chunks = values.chunks_exact(8);
        let remainder = chunks.remainder();

        for chunk in chunks {
            let data_vec = f32x8::new(*TryInto::<&[f32; 8]>::try_into(chunk).unwrap());
            sum_vec = sum_vec + data_vec;
        }

        // Sum all lanes in the vector
        let sum_array = sum_vec.to_array();
        let mut total = sum_array.iter().sum::<f32>();

        // Add remainder
        total += remainder.iter().sum::<f32>();

        total
    }

    /// L2 norm of a slice.
    pub fn l2_norm(values: &[f32]) -> f32 {
        dot_product(values, values).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::numeric;

    fn scalar_dot(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn test_dot_product_short() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, 5.0, 6.0];
        assert!((numeric::dot_product(&a, &b) - 32.0).abs() < 1e-6);
    }

    #[test]
    fn test_dot_product_matches_scalar() {
        // Lengths around the 8-lane boundary and well past it
        for len in [7usize, 8, 9, 16, 31, 64, 100, 1024] {
            let a: Vec<f32> = (0..len).map(|i| (i as f32 * 0.37).sin()).collect();
            let b: Vec<f32> = (0..len).map(|i| (i as f32 * 0.71).cos()).collect();

            let simd = numeric::dot_product(&a, &b);
            let scalar = scalar_dot(&a, &b);
            assert!(
                (simd - scalar).abs() < 1e-4,
                "len {len}: simd {simd} vs scalar {scalar}"
            );
        }
    }

    #[test]
    fn test_dot_product_empty() {
        let empty: Vec<f32> = vec![];
        assert_eq!(numeric::dot_product(&empty, &empty), 0.0);
    }

    #[test]
    fn test_fast_sum_matches_scalar() {
        for len in [0usize, 5, 16, 17, 100] {
            let values: Vec<f32> = (0..len).map(|i| (i as f32 * 0.13).sin()).collect();
            let simd = numeric::fast_sum(&values);
            let scalar: f32 = values.iter().sum();
            assert!((simd - scalar).abs() < 1e-4);
        }
    }

    #[test]
    fn test_l2_norm() {
        let values = vec![3.0, 4.0];
        assert!((numeric::l2_norm(&values) - 5.0).abs() < 1e-6);
    }
}
