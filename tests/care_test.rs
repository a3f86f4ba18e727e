//! CareService flows: creation, owner scoping, logging, and shared growth rules.

use chrono::{TimeZone, Utc};
use spiritling_sim::care::{CareService, ItemEffect};
use spiritling_sim::core::{ManualClock, SimError, SimulationConfig};
use spiritling_sim::simulation::SimulationScheduler;
use spiritling_sim::spiritling::{ActionType, GrowthStage, Personality, StatKind, Task, VitalKind};
use spiritling_sim::store::{InMemoryStore, SpiritStore};
use std::sync::Arc;
use uuid::Uuid;

fn service() -> (Arc<InMemoryStore>, Arc<ManualClock>, CareService) {
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 2, 14, 18, 0, 0).unwrap(),
    ));
    let care = CareService::new(store.clone(), clock.clone());
    (store, clock, care)
}

#[test]
fn test_create_spiritling_with_defaults_and_birth_log() {
    let (store, _, care) = service();
    let owner = care.create_owner("mina").unwrap();
    let s = care
        .create_spiritling(owner.id, "Puff", "wind", Personality::Playful)
        .unwrap();

    assert_eq!(s.level, 1);
    assert_eq!(s.growth_stage, GrowthStage::Egg);
    assert_eq!(s.current_action, Task::Idle);
    assert_eq!(s.vitals.hunger, 100);
    assert_eq!(s.stats.get(StatKind::Luck), 10);

    let logs = store.action_logs(s.id).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action_type, ActionType::Create);
    assert_eq!(logs[0].message, "Puff was born!");
}

#[test]
fn test_create_for_unknown_owner_fails() {
    let (_, _, care) = service();
    let result = care.create_spiritling(Uuid::new_v4(), "Nobody", "void", Personality::Normal);
    assert!(matches!(result, Err(SimError::OwnerNotFound(_))));
}

#[test]
fn test_other_owners_creature_is_not_found() {
    let (_, _, care) = service();
    let alice = care.create_owner("alice").unwrap();
    let bob = care.create_owner("bob").unwrap();
    let s = care
        .create_spiritling(alice.id, "Mine", "fire", Personality::Normal)
        .unwrap();

    assert!(matches!(
        care.feed(bob.id, s.id),
        Err(SimError::SpiritlingNotFound(id)) if id == s.id
    ));
}

#[test]
fn test_care_actions_save_and_log() {
    let (store, _, care) = service();
    let owner = care.create_owner("jo").unwrap();
    let s = care
        .create_spiritling(owner.id, "Biscuit", "earth", Personality::Normal)
        .unwrap();

    care.play(owner.id, s.id).unwrap();
    care.clean(owner.id, s.id).unwrap();
    let outcome = care.train(owner.id, s.id, "intelligence").unwrap();

    assert_eq!(outcome.spiritling.stats.get(StatKind::Intelligence), 12);
    assert_eq!(outcome.spiritling.vitals.energy, 70);
    assert_eq!(outcome.spiritling.experience, 3 + 2 + 5);

    let stored = store.spiritling(s.id).unwrap().unwrap();
    assert_eq!(stored, outcome.spiritling, "returned state matches what was saved");

    let types: Vec<ActionType> = store
        .action_logs(s.id)
        .unwrap()
        .iter()
        .map(|l| l.action_type)
        .collect();
    assert_eq!(
        types,
        vec![
            ActionType::Create,
            ActionType::Play,
            ActionType::Clean,
            ActionType::Train
        ]
    );
}

#[test]
fn test_train_rejects_unknown_stat_and_tired_creature() {
    let (_, _, care) = service();
    let owner = care.create_owner("kai").unwrap();
    let s = care
        .create_spiritling(owner.id, "Tired", "water", Personality::Lazy)
        .unwrap();

    assert!(matches!(
        care.train(owner.id, s.id, "charisma"),
        Err(SimError::InvalidStat(_))
    ));

    for _ in 0..5 {
        care.train(owner.id, s.id, "agility").unwrap();
    }
    assert!(matches!(
        care.train(owner.id, s.id, "agility"),
        Err(SimError::InsufficientEnergy { required: 20, current: 0 })
    ));
}

#[test]
fn test_assign_task_then_catch_up_uses_it() {
    let (store, clock, care) = service();
    let owner = care.create_owner("ana").unwrap();
    let s = care
        .create_spiritling(owner.id, "Scout", "wind", Personality::Normal)
        .unwrap();

    assert!(matches!(
        care.assign_task(owner.id, s.id, "sleeping"),
        Err(SimError::InvalidTask(_))
    ));
    let outcome = care.assign_task(owner.id, s.id, "exploring").unwrap();
    assert_eq!(outcome.spiritling.current_action, Task::Exploring);
    assert!(outcome.growth.is_none());

    clock.advance_minutes(20);
    let scheduler = SimulationScheduler::new(store.clone(), clock, SimulationConfig::default());
    scheduler.catch_up(owner.id).unwrap();
    assert_eq!(store.spiritling(s.id).unwrap().unwrap().experience, 60);
}

#[test]
fn test_item_use_scales_and_levels() {
    let (store, _, care) = service();
    let owner = care.create_owner("lee").unwrap();
    let s = care
        .create_spiritling(owner.id, "Chomp", "fire", Personality::Glutton)
        .unwrap();

    let cake = ItemEffect {
        name: "Star Cake".into(),
        stat: Some((StatKind::Friendliness, 2)),
        vital: Some((VitalKind::Happiness, -5)),
    };
    let outcome = care.use_item(owner.id, s.id, &cake, 50).unwrap();

    // 100 experience: exactly one level, every stat +1 on top of the item
    assert_eq!(outcome.spiritling.level, 2);
    assert_eq!(outcome.spiritling.experience, 0);
    assert_eq!(outcome.spiritling.stats.get(StatKind::Friendliness), 100);
    assert_eq!(outcome.spiritling.vitals.happiness, 0);

    let logs = store.action_logs(s.id).unwrap();
    let last_two: Vec<ActionType> = logs[logs.len() - 2..].iter().map(|l| l.action_type).collect();
    assert_eq!(last_two, vec![ActionType::UseItem, ActionType::LevelUp]);
    assert_eq!(logs[logs.len() - 2].message, "Used 50 Star Cake on Chomp.");

    assert!(matches!(
        care.use_item(owner.id, s.id, &cake, 0),
        Err(SimError::InvalidQuantity)
    ));
}
