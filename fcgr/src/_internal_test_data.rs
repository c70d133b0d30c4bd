use itertools::Itertools;
use lazy_static::lazy_static;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::cgr::{Cgr, CgrPoint};
use crate::sequence::Acid::{A, C, G, T};
use crate::sequence::{Acid, Sequence};

pub const SHORT_TEST_SEQUENCE_STR: &str = "GATTACA";

lazy_static! {
    pub static ref SHORT_TEST_SEQUENCE: Sequence = Sequence::new("SEQ_1", [G, A, T, T, A, C, A]);
    pub static ref SEQ_10K: Sequence = random_sequence("SEQ_10K", 10_000, 123);
    pub static ref CGR_10K: Cgr =
        Cgr::from_sequence(&SEQ_10K).expect("test sequence holds no N");
    pub static ref POINTS_1M: Vec<CgrPoint> = random_points(1_000_000, 321);
}

#[must_use]
pub fn random_sequence(identifier: &str, length: usize, seed: u64) -> Sequence {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let acids: Vec<Acid> = (0..length)
        .map(|_| match rng.gen_range(0..4) {
            0 => A,
            1 => C,
            2 => T,
            _ => G,
        })
        .collect();

    Sequence::new(identifier, acids)
}

#[must_use]
pub fn random_points(num: usize, seed: u64) -> Vec<CgrPoint> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    (0..num)
        .map(|_| CgrPoint::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
        .collect_vec()
}
