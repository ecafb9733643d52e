use prime_probe::{HashTable, prime::is_prime};

#[test]
fn test_scripted_scenario() {
    let mut table = HashTable::new();

    table.insert("key1", "value1");
    table.insert("key2", "value2");
    table.insert("key3", "value3");

    assert_eq!(table.search("key1"), Some("value1"));
    assert_eq!(table.search("key2"), Some("value2"));
    assert_eq!(table.search("key3"), Some("value3"));
    assert_eq!(table.search("nonexistent"), None);

    table.delete("key1");
    assert_eq!(table.search("key1"), None);

    table.delete("key2");
    assert_eq!(table.search("key2"), None);

    // Deleting a missing key is not an error
    assert_eq!(table.delete("nonexistent"), None);
    assert_eq!(table.len(), 1);

    table.destroy();
}

#[test]
fn test_growth_keeps_prime_capacity() {
    let mut table = HashTable::new();
    let mut capacities = vec![table.capacity()];

    for i in 0..1_000 {
        table.insert(format!("key-{i}"), format!("value-{i}"));
        if capacities.last() != Some(&table.capacity()) {
            capacities.push(table.capacity());
        }
    }

    assert!(capacities.len() > 1);
    assert!(capacities.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(capacities.iter().all(|&capacity| is_prime(capacity)));
    assert!(table.load() <= 71);

    for i in 0..1_000 {
        assert_eq!(table.search(&format!("key-{i}")), Some(format!("value-{i}").as_str()));
    }
}

#[test]
fn test_shrink_after_mass_delete() {
    let mut table = HashTable::new();
    for i in 0..1_000 {
        table.insert(format!("key-{i}"), format!("value-{i}"));
    }
    let grown = table.capacity();

    for i in 0..990 {
        assert_eq!(table.delete(&format!("key-{i}")), Some(format!("value-{i}")));
    }

    assert_eq!(table.len(), 10);
    assert!(table.capacity() < grown);
    assert!(table.base_size() >= prime_probe::DEFAULT_BASE_SIZE);
    for i in 990..1_000 {
        assert_eq!(table.search(&format!("key-{i}")), Some(format!("value-{i}").as_str()));
    }
}

#[test]
fn test_long_keys() {
    let mut table = HashTable::new();
    let long_key = "k".repeat(100_000);
    table.insert(long_key.as_str(), "long");
    table.insert("short", "short");

    assert_eq!(table.search(&long_key), Some("long"));
    assert_eq!(table.search("short"), Some("short"));
}

#[test]
fn test_non_ascii_keys() {
    let mut table = HashTable::new();
    table.insert("ключ", "значение");
    table.insert("鍵", "値");

    assert_eq!(table.search("ключ"), Some("значение"));
    assert_eq!(table.search("鍵"), Some("値"));
}

#[test]
fn test_delete_heavy_churn() {
    let mut table = HashTable::new();
    for round in 0..50 {
        for i in 0..30 {
            table.insert(format!("key-{i}"), format!("value-{round}-{i}"));
        }
        for i in 0..30 {
            if i % 3 != 0 {
                table.delete(&format!("key-{i}"));
            }
        }
    }

    assert_eq!(table.len(), 10);
    for i in (0..30).step_by(3) {
        assert_eq!(table.search(&format!("key-{i}")), Some(format!("value-49-{i}").as_str()));
    }
}
