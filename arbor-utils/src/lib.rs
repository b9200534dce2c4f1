pub mod dump;
pub mod error;

use arbor::{AvlTree, Config, Natural};
use error::Error;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::{
    fmt,
    str::FromStr,
    time::{Duration, Instant},
};
use tracing::*;

/// A comma separated list of keys, as given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keys(pub Vec<i64>);

impl FromStr for Keys {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse()
                    .map_err(|cause| Error::InvalidKey(part.to_string(), cause))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Keys)
    }
}

/// Build a tree by inserting and then erasing the given keys, and check it.
pub fn build(insert: &[i64], erase: &[i64], config: Config) -> Result<AvlTree<i64>, Error> {
    let mut tree = AvlTree::with_config(config, Natural);
    for &key in insert {
        if !tree.insert_key(key) {
            info!("{} is already present", key);
        }
    }
    for key in erase {
        if !tree.erase(key) {
            info!("{} is not present", key);
        }
    }
    tree.try_check_invariants()?;
    Ok(tree)
}

#[derive(Debug)]
pub struct BenchReport {
    pub count: usize,
    pub distinct: usize,
    pub height: i32,
    pub insert: Duration,
    pub find: Duration,
    pub erase: Duration,
    pub remaining: usize,
    pub remaining_height: i32,
    pub invariants: Result<(), arbor::error::Error>,
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "inserted {} random keys ({} distinct) in {}s, height {}",
            self.count,
            self.distinct,
            self.insert.as_secs_f64(),
            self.height
        )?;
        writeln!(f, "looked up all keys in {}s", self.find.as_secs_f64())?;
        writeln!(
            f,
            "erased half of them in {}s, {} left, height {}",
            self.erase.as_secs_f64(),
            self.remaining,
            self.remaining_height
        )?;
        match &self.invariants {
            Ok(()) => write!(f, "invariants hold"),
            Err(cause) => write!(f, "{}", cause),
        }
    }
}

/// Insert `count` pseudo random keys, look all of them up and erase every other one.
pub fn bench(count: usize, seed: u64, config: Config) -> BenchReport {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let keys: Vec<u64> = (0..count).map(|_| rng.gen()).collect();
    let mut tree = AvlTree::with_config(config, Natural);

    let t0 = Instant::now();
    for &key in &keys {
        tree.insert_key(key);
    }
    let insert = t0.elapsed();
    let distinct = tree.len();
    let height = tree.height();
    debug!("built tree of {} keys with height {}", distinct, height);

    let t0 = Instant::now();
    let found = keys.iter().filter(|key| tree.contains(key)).count();
    let find = t0.elapsed();
    if found != keys.len() {
        error!("only found {} of {} keys", found, keys.len());
    }

    let t0 = Instant::now();
    for key in keys.iter().step_by(2) {
        tree.erase(key);
    }
    let erase = t0.elapsed();

    BenchReport {
        count,
        distinct,
        height,
        insert,
        find,
        erase,
        remaining: tree.len(),
        remaining_height: tree.height(),
        invariants: tree.try_check_invariants(),
    }
}
