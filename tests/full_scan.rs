use std::collections::HashSet;

use bucket_collider::{
    AddressMapper, Collider, Collision, KeyHasher, KeySpace, MultiplicativeHash, RecordStyle,
    TableGeometry, TextReporter,
};

fn scan_to_text(style: RecordStyle) -> Vec<u8> {
    let mut reporter = TextReporter::new(Vec::new()).with_style(style);
    Collider::default().scan(&mut reporter).unwrap();
    reporter.into_inner()
}

#[test]
fn test_runs_are_byte_identical() {
    for style in [RecordStyle::Line, RecordStyle::Block] {
        let first = scan_to_text(style);
        let second = scan_to_text(style);
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }
}

#[test]
fn test_line_output_shape() {
    let text = String::from_utf8(scan_to_text(RecordStyle::Line)).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 1050);
    assert_eq!(lines[0], "collision key0=af key1=bA address=424624");
    assert_eq!(lines[1049], "collision key0=Yz key1=ZU address=423520");
}

#[test]
fn test_existing_key_precedes_new_key() {
    let space = KeySpace::default();
    let mut found: Vec<Collision> = Vec::new();
    Collider::default().scan(&mut found).unwrap();

    for collision in &found {
        let existing = space.rank(collision.existing_key.as_str()).unwrap();
        let new = space.rank(collision.new_key.as_str()).unwrap();
        assert!(
            existing < new,
            "{} should precede {}",
            collision.existing_key,
            collision.new_key
        );
        assert_ne!(collision.existing_key, collision.new_key);
    }

    // reports arrive in enumeration order of the later key
    let ranks: Vec<u64> = found
        .iter()
        .map(|c| space.rank(c.new_key.as_str()).unwrap())
        .collect();
    assert!(ranks.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_collisions_match_independent_count() {
    let hash = MultiplicativeHash::default();
    let geometry = TableGeometry::default();

    let mut addresses = HashSet::new();
    let mut keys = 0u64;
    for key in KeySpace::default().keys() {
        let address = geometry.address_of(hash.hash_key(key.as_str()).unwrap());
        addresses.insert(address);
        keys += 1;
    }

    let mut found: Vec<Collision> = Vec::new();
    let summary = Collider::default().scan(&mut found).unwrap();

    assert_eq!(keys, 2704);
    assert_eq!(summary.distinct_addresses, addresses.len() as u64);
    assert_eq!(summary.collisions, keys - addresses.len() as u64);

    // every reported pair really shares an address
    for collision in &found {
        let existing = geometry.address_of(hash.hash_key(collision.existing_key.as_str()).unwrap());
        let new = geometry.address_of(hash.hash_key(collision.new_key.as_str()).unwrap());
        assert_eq!(existing, collision.address);
        assert_eq!(new, collision.address);
    }
}

#[test]
fn test_collision_sets_are_stable() {
    let collect = || {
        let mut found: Vec<Collision> = Vec::new();
        Collider::default().scan(&mut found).unwrap();
        found.into_iter().collect::<HashSet<_>>()
    };
    assert_eq!(collect(), collect());
}
