use clap::Parser;
use dense_hash::HashMap;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,

    /// Number of insert/remove operations to run after the initial fill.
    #[arg(short = 'o', long = "churn_ops", default_value_t = 100_000)]
    churn_ops: usize,

    /// Probability that a churn operation is an insert rather than a remove.
    #[arg(short = 'p', long = "insert_probability", default_value_t = 0.5)]
    insert_probability: f64,

    #[arg(short = 's', long = "seed", default_value_t = 0)]
    seed: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!(
        "Creating HashMap with target capacity: {}",
        args.target_capacity
    );

    let mut map: HashMap<u64, u64> = HashMap::with_capacity(args.target_capacity);
    println!(
        "Actual capacity: {} ({} index slots)",
        map.capacity(),
        map.index_capacity()
    );

    let fill = map.capacity() as u64;
    for key in 0..fill {
        map.insert(key, key);
    }
    println!("Filled map with {} entries", map.len());
    map.probe_histogram().print();
    map.debug_stats().print();

    println!("Running {} churn operations...", args.churn_ops);
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let key_space = fill.max(1) * 2;
    let mut inserted = 0usize;
    let mut removed = 0usize;
    for _ in 0..args.churn_ops {
        let key = rng.random_range(0..key_space);
        if rng.random_bool(args.insert_probability) {
            if map.insert(key, key).is_none() {
                inserted += 1;
            }
        } else if map.remove(&key).is_some() {
            removed += 1;
        }
    }

    println!(
        "Churn inserted {} new keys and removed {} keys; {} entries remain",
        inserted,
        removed,
        map.len()
    );
    println!(
        "Final load factor: {:.2}%",
        (map.len() as f64 / map.index_capacity() as f64) * 100.0
    );

    map.probe_histogram().print();
    map.debug_stats().print();
}
