//! Frequency reconciliation.
//!
//! Coefficient files list the frequencies their networks were trained on.
//! Callers supply the frequencies of their instrument, possibly in another
//! order and possibly with extra channels. [`FrequencyMap`] pairs each
//! stored frequency with exactly one supplied frequency and is then used to
//! reorder every frequency-indexed field the same way.

/// Largest difference, in GHz, at which two frequencies are the same channel.
pub const FREQUENCY_TOLERANCE_GHZ: f64 = 0.01;

/// A one-to-one pairing of stored frequencies with supplied channels.
///
/// Entry `k` of the reordered output is stored frequency `order[k]`, which
/// the caller supplied at position `channel_index[k]`. Entries are sorted
/// by `channel_index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyMap {
    order: Vec<usize>,
    channel_index: Vec<usize>,
}

impl FrequencyMap {
    /// Pairs every stored frequency with a supplied one.
    ///
    /// Supplied frequencies the network does not use are ignored. Fails with
    /// a description when a stored frequency has no supplied match, matches
    /// several supplied channels, or shares its match with another stored
    /// frequency.
    pub fn build(stored: &[f32], supplied: &[f64]) -> Result<Self, String> {
        if supplied.is_empty() {
            return Err("no frequencies were supplied".to_string());
        }

        let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(stored.len());
        for (i, &frequency) in stored.iter().enumerate() {
            let frequency = f64::from(frequency);
            let mut candidates = supplied
                .iter()
                .enumerate()
                .filter(|(_, s)| (**s - frequency).abs() <= FREQUENCY_TOLERANCE_GHZ)
                .map(|(j, _)| j);

            let j = match (candidates.next(), candidates.next()) {
                (Some(j), None) => j,
                (None, _) => {
                    return Err(format!(
                        "stored frequency {:.2} GHz was not supplied",
                        frequency
                    ));
                }
                (Some(_), Some(_)) => {
                    return Err(format!(
                        "stored frequency {:.2} GHz matches more than one supplied channel",
                        frequency
                    ));
                }
            };

            if pairs.iter().any(|&(taken, _)| taken == j) {
                return Err(format!(
                    "supplied frequency {:.2} GHz matches more than one stored frequency",
                    supplied[j]
                ));
            }
            pairs.push((j, i));
        }

        pairs.sort_unstable();
        Ok(Self {
            order: pairs.iter().map(|&(_, i)| i).collect(),
            channel_index: pairs.iter().map(|&(j, _)| j).collect(),
        })
    }

    /// Stored index of each reordered entry.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Supplied position of each reordered entry.
    pub fn channel_index(&self) -> &[usize] {
        &self.channel_index
    }

    /// Number of paired frequencies.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no frequencies are paired.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `values` in reordered sequence.
    pub fn reorder<T: Copy>(&self, values: &[T]) -> Vec<T> {
        self.order.iter().map(|&i| values[i]).collect()
    }

    /// Input permutation for networks whose first inputs are the frequencies,
    /// followed by auxiliary inputs that keep their position.
    pub fn input_permutation(&self, inputs: usize) -> Vec<usize> {
        self.order
            .iter()
            .copied()
            .chain(self.len()..inputs)
            .collect()
    }

    /// Input permutation for scan networks whose inputs are `blocks`
    /// consecutive groups of the frequencies, followed by auxiliary inputs.
    pub fn block_permutation(&self, blocks: usize, inputs: usize) -> Vec<usize> {
        let width = self.len();
        (0..blocks)
            .flat_map(|b| self.order.iter().map(move |&i| b * width + i))
            .chain(blocks * width..inputs)
            .collect()
    }
}
