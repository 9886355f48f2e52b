use plinko_core::{Settings, WELCOME_BANNER};
use plinko_system_bootstrap::{Bootstrap, MAX_GENERATED_SLOT_VALUE};
use plinko_world::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn generates_one_slot_value_per_column() {
    let config = Settings {
        width: 5,
        length: 5,
        ..Settings::default()
    }
    .validate()
    .expect("valid settings");
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let layout = Bootstrap
        .board_layout(&config, &mut rng)
        .expect("layout matches configuration");

    assert_eq!(layout.slot_values().len(), 5);
    assert!(layout
        .slot_values()
        .iter()
        .all(|value| *value <= MAX_GENERATED_SLOT_VALUE));
}

#[test]
fn generated_values_cover_the_whole_range() {
    let config = Settings {
        width: 100,
        ..Settings::default()
    }
    .validate()
    .expect("valid settings");
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let mut seen_low = false;
    let mut seen_high = false;
    for _ in 0..50 {
        let layout = Bootstrap
            .board_layout(&config, &mut rng)
            .expect("layout matches configuration");
        seen_low |= layout.slot_values().iter().any(|value| *value < 10);
        seen_high |= layout.slot_values().iter().any(|value| *value > 90);
    }

    assert!(seen_low && seen_high);
}

#[test]
fn keeps_player_supplied_values() {
    let config = Settings {
        width: 5,
        slot_values: Some(vec![0, 10, 20, 30, 40]),
        ..Settings::default()
    }
    .validate()
    .expect("valid settings");
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let layout = Bootstrap
        .board_layout(&config, &mut rng)
        .expect("layout matches configuration");

    assert_eq!(layout.slot_values(), &[0, 10, 20, 30, 40]);
}

#[test]
fn banner_comes_from_world() {
    let config = Settings::default().validate().expect("valid settings");
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let layout = Bootstrap
        .board_layout(&config, &mut rng)
        .expect("layout matches configuration");
    let world = World::new(layout);

    assert_eq!(Bootstrap.welcome_banner(&world), WELCOME_BANNER);
}
