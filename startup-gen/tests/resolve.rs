use startup_gen::slot::Slot;
use startup_gen::{Config, Error, IrqTable};

fn table(entries: &[(i64, &str)]) -> IrqTable {
    let mut table = IrqTable::new();
    for &(irqn, name) in entries {
        table.insert(Slot::from_irqn(irqn).unwrap(), name);
    }
    table
}

fn sample() -> IrqTable {
    table(&[(-14, "NonMaskableInt_"), (-1, "SysTick_"), (0, "WWDG_IRQ"), (1, "PVD_IRQ"), (5, "RCC_IRQ")])
}

#[test]
fn defaults_to_mcu_vectors() {
    let resolved = sample().resolve(&Config::default()).unwrap();
    assert_eq!(resolved.mcu_vectors(), 6);
    assert_eq!(resolved.vector_count(), 6);
    assert_eq!(resolved.requested_vectors(), None);
}

#[test]
fn smaller_request_bounds_nvic_range() {
    let config = Config::default().requested_vectors(2).unwrap();
    let resolved = sample().resolve(&config).unwrap();
    assert_eq!(resolved.vector_count(), 2);
    assert_eq!(resolved.nvic_name(1), Some("PVD_IRQ"));
    assert_eq!(resolved.nvic_name(5), None);
    // the table itself keeps every entry
    assert_eq!(resolved.table().get(Slot::nvic(5).unwrap()), Some("RCC_IRQ"));
}

#[test]
fn larger_request_is_clamped_without_unused_names() {
    let config = Config::default().requested_vectors(40).unwrap();
    let resolved = sample().resolve(&config).unwrap();
    assert_eq!(resolved.requested_vectors(), Some(6));
    assert_eq!(resolved.vector_count(), 6);
}

#[test]
fn larger_request_extends_table_with_unused_names() {
    let config = Config::default().emit_unused(true).requested_vectors(40).unwrap();
    let resolved = sample().resolve(&config).unwrap();
    assert_eq!(resolved.requested_vectors(), Some(40));
    assert_eq!(resolved.vector_count(), 40);
}

#[test]
fn core_slots_ignore_vector_count() {
    let config = Config::default().requested_vectors(0).unwrap();
    let resolved = sample().resolve(&config).unwrap();
    assert_eq!(resolved.vector_count(), 0);
    let core: Vec<u16> = resolved.core_names().map(|(slot, _)| slot.index()).collect();
    assert_eq!(core, vec![2, 15]);
}

#[test]
fn reserved_slots_are_not_core_vectors() {
    let resolved = table(&[(-16, "Stack_"), (-15, "Reset_"), (-14, "NonMaskableInt_")])
        .resolve(&Config::default())
        .unwrap();
    let core: Vec<&str> = resolved.core_names().map(|(_, name)| name).collect();
    assert_eq!(core, vec!["NonMaskableInt_"]);
    assert_eq!(resolved.mcu_vectors(), 0);
}

#[test]
fn empty_table_has_no_vectors() {
    let resolved = IrqTable::new().resolve(&Config::default()).unwrap();
    assert_eq!(resolved.mcu_vectors(), 0);
    assert_eq!(resolved.vector_count(), 0);
}

#[test]
fn request_above_nvic_limit_is_an_error() {
    match Config::default().requested_vectors(497) {
        Err(Error::VectorCountOutOfRange(497)) => {},
        other => panic!("unexpected {:?}", other),
    }
    let mut config = Config::default();
    config.requested_vectors = Some(1000);
    assert!(sample().resolve(&config).is_err());
    assert!(Config::default().requested_vectors(496).is_ok());
}
