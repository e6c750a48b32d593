use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ParsePieceSeedError, PieceKind};

/// Source of the piece kinds a [`Game`](crate::Game) spawns.
///
/// [`PieceBag`] is the standard implementation. Other implementations can
/// feed a fixed sequence, which keeps tests deterministic.
pub trait PieceSupply {
    /// Draws the kind of the next piece.
    fn next_kind(&mut self) -> PieceKind;

    /// Starts over from a fresh, complete supply.
    fn refill(&mut self);
}

/// 7-bag randomizer.
///
/// The bag holds the kinds not yet drawn in the current cycle. Each draw
/// removes one kind chosen uniformly at random; once all seven are drawn the
/// bag is refilled. Seven consecutive draws starting at a cycle boundary are
/// therefore a uniformly random permutation of all kinds.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
///
/// use blockfall_engine::{PieceBag, PieceSupply as _};
///
/// let mut bag = PieceBag::new();
/// let cycle: HashSet<_> = (0..7).map(|_| bag.next_kind()).collect();
/// assert_eq!(cycle.len(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct PieceBag {
    rng: Pcg32,
    bag: ArrayVec<PieceKind, { PieceKind::LEN }>,
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceBag {
    /// Creates a full bag with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for a reproducible sequence.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut this = Self {
            rng: Pcg32::from_seed(seed.0),
            bag: ArrayVec::new(),
        };
        this.refill();
        this
    }

    /// Kinds still available before the bag refills.
    #[must_use]
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag
    }
}

impl PieceSupply for PieceBag {
    fn next_kind(&mut self) -> PieceKind {
        if self.bag.is_empty() {
            self.refill();
        }
        let index = self.rng.random_range(0..self.bag.len());
        self.bag.swap_remove(index)
    }

    fn refill(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
    }
}

/// Seed for deterministic piece generation.
///
/// 128 bits written as 32 hex digits, both in text form ([`fmt::Display`] and
/// [`FromStr`]) and in serialized form.
///
/// ```
/// use blockfall_engine::{PieceBag, PieceSeed, PieceSupply as _};
///
/// let seed: PieceSeed = "00112233445566778899aabbccddeeff".parse().unwrap();
/// let mut a = PieceBag::with_seed(seed);
/// let mut b = PieceBag::with_seed(seed);
/// for _ in 0..20 {
///     assert_eq!(a.next_kind(), b.next_kind());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParsePieceSeedError::InvalidLength(s.len()));
        }
        // `from_str_radix` tolerates a leading sign, which is not a hex digit.
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParsePieceSeedError::InvalidDigit(s.to_owned()));
        }
        let num = u128::from_str_radix(s, 16)
            .map_err(|_| ParsePieceSeedError::InvalidDigit(s.to_owned()))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}
