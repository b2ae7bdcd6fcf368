//! Selecting which key a fixture proves

use std::fmt;

use rand::Rng;
use tracing::trace;

use crate::universe::KeyUniverse;

/// Key sorting below every generated key, used as the absent key on the left.
pub const LEFT_NON_KEY: [u8; 4] = [0x00, 0x00, 0x00, 0x01];
/// Key sorting above every generated key, used as the absent key on the
/// right.
pub const RIGHT_NON_KEY: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

/// Where in the sorted key order a fixture's key sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Where {
    /// The smallest key
    Left,
    /// The largest key
    Right,
    /// Any key but the smallest and largest
    Middle,
}

impl fmt::Display for Where {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Where::Left => "left",
            Where::Right => "right",
            Where::Middle => "middle",
        })
    }
}

/// Returns a key of `universe` at the requested position. `Middle` draws an
/// index uniformly from `1..=len - 2`.
///
/// # Panics
///
/// Panics if `universe` is empty, or if `Middle` is requested from a universe
/// of fewer than three keys.
pub fn get_key<'u, R: Rng + ?Sized>(
    universe: &'u KeyUniverse,
    loc: Where,
    rng: &mut R,
) -> &'u [u8] {
    let keys = universe.as_slice();
    let index = match loc {
        Where::Left => 0,
        Where::Right => keys.len() - 1,
        Where::Middle => {
            assert!(
                keys.len() >= 3,
                "a middle key needs at least 3 keys, universe has {}",
                keys.len()
            );
            rng.gen_range(1..keys.len() - 1)
        }
    };
    trace!(%loc, index, "selected key");
    &keys[index]
}

/// Returns a key absent from `universe` at the requested position.
///
/// `Left` and `Right` are the fixed sentinels `LEFT_NON_KEY` and
/// `RIGHT_NON_KEY`. `Middle` takes a middle key and sets its last two bytes to
/// `0xff`, giving a near neighbour of a real key. That key is only absent as
/// long as no generated key shares the same prefix with an `0xff 0xff` suffix,
/// which alphanumeric keys never have; check `KeyUniverse::contains` when
/// using other keys.
///
/// # Panics
///
/// Panics as `get_key` does for `Middle`, and if the chosen key is shorter
/// than two bytes.
pub fn get_non_key<R: Rng + ?Sized>(universe: &KeyUniverse, loc: Where, rng: &mut R) -> Vec<u8> {
    match loc {
        Where::Left => LEFT_NON_KEY.to_vec(),
        Where::Right => RIGHT_NON_KEY.to_vec(),
        Where::Middle => {
            let mut key = get_key(universe, loc, rng).to_vec();
            let len = key.len();
            key[len - 2..].copy_from_slice(&[0xff, 0xff]);
            key
        }
    }
}

#[cfg(test)]
mod test {
    use rand::{rngs::SmallRng, SeedableRng};

    use super::*;

    fn universe(count: u8) -> KeyUniverse {
        KeyUniverse::from_keys((0..count).map(|i| vec![b'a' + i; 4]).collect())
    }

    #[test]
    fn left_and_right_are_edges() {
        let mut rng = SmallRng::seed_from_u64(0);
        for count in 1..6 {
            let universe = universe(count);
            assert_eq!(get_key(&universe, Where::Left, &mut rng), universe.first().unwrap());
            assert_eq!(get_key(&universe, Where::Right, &mut rng), universe.last().unwrap());
        }
    }

    #[test]
    fn middle_is_strictly_interior() {
        let mut rng = SmallRng::seed_from_u64(1);
        let universe = universe(5);
        let mut seen = [false; 5];
        for _ in 0..200 {
            let key = get_key(&universe, Where::Middle, &mut rng);
            let index = universe.position(key).expect("key from universe");
            assert!(index > 0 && index < universe.len() - 1);
            seen[index] = true;
        }
        // every interior index is reachable
        assert_eq!(seen, [false, true, true, true, false]);
    }

    #[test]
    fn middle_of_three_is_the_centre() {
        let mut rng = SmallRng::seed_from_u64(2);
        let universe = universe(3);
        assert_eq!(get_key(&universe, Where::Middle, &mut rng), universe.get(1).unwrap());
    }

    #[test]
    #[should_panic(expected = "a middle key needs at least 3 keys")]
    fn middle_of_two_panics() {
        let mut rng = SmallRng::seed_from_u64(3);
        get_key(&universe(2), Where::Middle, &mut rng);
    }

    #[test]
    #[should_panic]
    fn empty_universe_panics() {
        let mut rng = SmallRng::seed_from_u64(4);
        get_key(&KeyUniverse::default(), Where::Left, &mut rng);
    }

    #[test]
    fn edge_non_keys_are_sentinels() {
        let mut rng = SmallRng::seed_from_u64(5);
        for count in [0, 1, 3, 10] {
            let universe = universe(count);
            let left = get_non_key(&universe, Where::Left, &mut rng);
            let right = get_non_key(&universe, Where::Right, &mut rng);
            assert_eq!(left, LEFT_NON_KEY.to_vec());
            assert_eq!(right, RIGHT_NON_KEY.to_vec());
            assert!(!universe.contains(&left));
            assert!(!universe.contains(&right));
        }
    }

    #[test]
    fn middle_non_key_neighbours_a_real_key() {
        let mut rng = SmallRng::seed_from_u64(6);
        let universe = universe(5);
        let before = universe.clone();

        let non_key = get_non_key(&universe, Where::Middle, &mut rng);
        assert_eq!(&non_key[2..], &[0xff, 0xff]);
        let source = [&non_key[..2], &non_key[..2]].concat();
        assert!(universe.contains(&source));
        assert!(!universe.contains(&non_key));
        // the universe keeps its own bytes
        assert_eq!(universe, before);
    }

    #[test]
    fn where_display() {
        assert_eq!(Where::Left.to_string(), "left");
        assert_eq!(Where::Middle.to_string(), "middle");
    }
}
