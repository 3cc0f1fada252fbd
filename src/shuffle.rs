use rand::Rng;

/// Attempts per call before giving up on finding a positional derangement.
///
/// A fresh Sattolo candidate fails the positional check only when duplicate
/// values land on their own indices, so for real word lists a retry is rare
/// and the bound exists purely to keep degenerate inputs (nearly all values
/// identical) from looping forever.
pub(crate) const MAX_DERANGE_ATTEMPTS: usize = 64;

/// Shuffle `values` such that no value remains at its original index.
///
/// Inputs shorter than two values are returned unchanged; no derangement of
/// them is meaningful. Otherwise candidates are generated by a Sattolo-style
/// in-place shuffle, which yields a single cyclic permutation and therefore
/// has no fixed points *for distinct-valued lists*. Because values may
/// repeat, positional equality is still re-checked explicitly against the
/// original, and a failing candidate is discarded and regenerated.
///
/// If no positionally-deranged candidate appears within
/// [`MAX_DERANGE_ATTEMPTS`] tries (only plausible when almost every value is
/// identical, where no such candidate may exist at all), the last candidate
/// is returned; it is still a fair permutation of the input.
pub fn derange<R: Rng + ?Sized>(values: &[String], rng: &mut R) -> Vec<String> {
    if values.len() < 2 {
        return values.to_vec();
    }

    let mut candidate = values.to_vec();
    for attempt in 0..MAX_DERANGE_ATTEMPTS {
        candidate.clone_from_slice(values);
        // sattolo: swap each index down from the top with a strictly lower one
        for i in (1..candidate.len()).rev() {
            let j = rng.random_range(0..i);
            candidate.swap(i, j);
        }

        if candidate.iter().zip(values).all(|(c, v)| c != v) {
            if attempt > 0 {
                tracing::debug!(attempt, "derangement needed retries for duplicate values");
            }
            return candidate;
        }
    }

    tracing::debug!("derangement attempts exhausted; returning plain permutation");
    candidate
}
