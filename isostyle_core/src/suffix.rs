use rand::Rng;

/// Exclusive upper bound of the random component of a style id.
pub const SUFFIX_BOUND: u32 = 1_000_000_000;

/// Source of the random component appended to every generated style id.
pub trait SuffixSource {
    fn next_suffix(&mut self) -> u32;
}

/// Uniform suffixes in `[0, SUFFIX_BOUND)` from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl SuffixSource for ThreadRandom {
    fn next_suffix(&mut self) -> u32 {
        rand::thread_rng().gen_range(0..SUFFIX_BOUND)
    }
}

/// Replays a fixed sequence of suffixes, wrapping around at the end.
///
/// Makes generated ids reproducible, e.g. for snapshotting server-rendered
/// markup.
#[derive(Debug, Clone)]
pub struct FixedSuffixes {
    values: Vec<u32>,
    cursor: usize,
}

impl FixedSuffixes {
    /// An empty sequence behaves like `[0]`.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        let mut values: Vec<u32> = values.into_iter().collect();
        if values.is_empty() {
            values.push(0);
        }
        Self { values, cursor: 0 }
    }
}

impl SuffixSource for FixedSuffixes {
    fn next_suffix(&mut self) -> u32 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value
    }
}

impl<F> SuffixSource for F
where
    F: FnMut() -> u32,
{
    fn next_suffix(&mut self) -> u32 {
        self()
    }
}
