use storemap::synthetic::{generate_merchants, SyntheticConfig};
use storemap::group_merchants;

#[test]
fn test_generation_is_deterministic() {
    let config = SyntheticConfig {
        count: 200,
        ..SyntheticConfig::default()
    };
    assert_eq!(generate_merchants(&config), generate_merchants(&config));
}

#[test]
fn test_seed_changes_the_dataset() {
    let a = generate_merchants(&SyntheticConfig {
        count: 50,
        seed: 1,
        ..SyntheticConfig::default()
    });
    let b = generate_merchants(&SyntheticConfig {
        count: 50,
        seed: 2,
        ..SyntheticConfig::default()
    });
    assert_ne!(a, b);
}

#[test]
fn test_some_merchants_lack_coordinates() {
    let merchants = generate_merchants(&SyntheticConfig {
        count: 100,
        ..SyntheticConfig::default()
    });
    assert_eq!(merchants.len(), 100);
    let missing = merchants.iter().filter(|m| m.coords.is_none()).count();
    assert_eq!(missing, 2);
}

#[test]
fn test_colocation_produces_multi_merchant_groups() {
    let merchants = generate_merchants(&SyntheticConfig {
        count: 100,
        ..SyntheticConfig::default()
    });
    let groups = group_merchants(&merchants, 5.0);
    assert!(groups.iter().any(|g| g.members.len() >= 2));

    let located = merchants.iter().filter(|m| m.coords.is_some()).count();
    let total: usize = groups.iter().map(|g| g.members.len()).sum();
    assert_eq!(total, located);
}
