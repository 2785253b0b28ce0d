//! Benchmark utilities.

use binlist_codec::{ByteString, Person};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate `count` random integers.
pub fn random_ints(count: usize) -> Vec<i32> {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| rng.gen()).collect()
}

/// Generate `count` random alphanumeric strings of length `len`.
pub fn random_strings(count: usize, len: usize) -> Vec<ByteString> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(len)
                .collect::<Vec<u8>>()
                .into()
        })
        .collect()
}

/// Generate `count` people with random short names and ages.
pub fn random_people(count: usize) -> Vec<Person> {
    let mut rng = rand::thread_rng();
    random_strings(count, 8)
        .into_iter()
        .map(|name| Person::new(name, rng.gen_range(0..100)))
        .collect()
}
