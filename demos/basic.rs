use cuckoo_rs::{
    CuckooFilter, CuckooFilterConfigBuilder, CuckooFilterOps, CuckooFilterStats,
    FilterRegistry, common::bytes2hr,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Cuckoo Filter Basic Example");
    println!("===========================");

    let config = CuckooFilterConfigBuilder::default()
        .expected_items(10_000)
        .build()?;
    let mut filter = CuckooFilter::new(config)?;

    println!("Created cuckoo filter:");
    println!("  Buckets: {}", filter.bucket_count());
    println!("  Slots: {}", filter.slot_capacity());
    println!("  Memory: {}", bytes2hr(filter.approx_memory_bytes()));
    println!("  Max kicks: {}", filter.max_kicks());

    for item in ["videoA", "videoB", "videoC"] {
        let outcome = filter.insert(item.as_bytes())?;
        println!("  Inserted {item}: {outcome:?}");
    }

    for item in ["videoA", "videoD"] {
        println!("  {item}: {:?}", filter.contains(item.as_bytes()));
    }

    // Fill until the kick bound is hit
    let mut small = CuckooFilter::with_capacity(16)?;
    let mut stored = 0;
    for n in 0.. {
        match small.insert(format!("item_{n}").as_bytes()) {
            Ok(_) => stored += 1,
            Err(e) => {
                println!("\nSmall filter full after {stored} items: {e}");
                break;
            }
        }
    }
    println!("  Load factor: {:.2}", small.load_factor());

    let mut registry = FilterRegistry::new(filter.config().clone())?;
    registry.add(b"alice", b"videoA")?;
    println!(
        "\nalice watched videoA: {:?}, bob watched videoA: {:?}",
        registry.check(b"alice", b"videoA"),
        registry.check(b"bob", b"videoA")
    );

    Ok(())
}
