// Reply timing and canned-response choice. xorshift64* over a
// splitmix64-scrambled seed; not cryptographically secure. A fixed seed makes
// a whole page session reproducible.

#[derive(Debug, Clone)]
pub struct Prng {
    state: u64,
}

impl Prng {
    /// Nearby seeds (and timestamps) start from unrelated states.
    pub fn new(seed: u64) -> Self {
        let state = splitmix64(seed);
        // xorshift never leaves zero.
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    /// Seeded from the wall clock.
    pub fn from_entropy() -> Self {
        Self::new(crate::time::entropy_seed())
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform in `[low, high)`; returns `low` for an empty range.
    #[inline]
    pub fn gen_range_u32(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        low + self.next_u32() % (high - low)
    }

    /// Index into a table; spans beyond `u32::MAX` are clamped.
    pub fn gen_range_usize(&mut self, low: usize, high: usize) -> usize {
        let span = u32::try_from(high.saturating_sub(low)).unwrap_or(u32::MAX);
        low + self.gen_range_u32(0, span) as usize
    }
}

fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Prng::new(7);
        let mut b = Prng::new(7);
        for _ in 0..32 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn adjacent_seeds_diverge() {
        let a: Vec<u32> = (0..4).scan(Prng::new(1000), |p, _| Some(p.next_u32())).collect();
        let b: Vec<u32> = (0..4).scan(Prng::new(1001), |p, _| Some(p.next_u32())).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn zero_seed_is_not_stuck() {
        let mut p = Prng::new(0);
        let first = p.next_u32();
        let second = p.next_u32();
        assert_ne!(first, second);
    }

    #[test]
    fn ranges_stay_half_open() {
        let mut p = Prng::new(42);
        for _ in 0..2_000 {
            let d = p.gen_range_u32(1000, 3000);
            assert!((1000..3000).contains(&d));
            let i = p.gen_range_usize(0, 10);
            assert!(i < 10);
        }
        assert_eq!(p.gen_range_u32(5, 5), 5);
        assert_eq!(p.gen_range_usize(7, 3), 7);
    }
}
