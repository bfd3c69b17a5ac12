use crate::constants::RANDOM_ID_CHARSET;
use rand::Rng;

/// Random DOM id made of `len` characters from [`RANDOM_ID_CHARSET`].
pub fn random_id<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    let charset = RANDOM_ID_CHARSET.as_bytes();
    (0..len)
        .map(|_| charset[rng.gen_range(0..charset.len())] as char)
        .collect()
}
