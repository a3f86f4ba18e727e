// Vital and stat bounds
pub const VITAL_MIN: u32 = 0;
pub const VITAL_MAX: u32 = 100;
pub const STAT_MAX: u32 = 100;

// Creation defaults
pub const DEFAULT_STAT_VALUE: u32 = 10;
pub const DEFAULT_VITAL_VALUE: u32 = 100;
pub const DEFAULT_OWNER_COINS: u64 = 1000;
pub const NUM_STATS: usize = 6;

// Baseline decay: one point per N elapsed minutes
pub const HUNGER_DECAY_MINUTES: u32 = 10;
pub const ENERGY_DECAY_MINUTES: u32 = 15;
pub const HAPPINESS_DECAY_MINUTES: u32 = 20;
pub const CLEANLINESS_DECAY_MINUTES: u32 = 30;

// Task effects (divisors are minutes per point, multipliers are points per minute)
pub const TRAINING_XP_PER_MINUTE: u64 = 2;
pub const TRAINING_ENERGY_MINUTES: u32 = 2;
pub const TRAINING_HUNGER_MINUTES: u32 = 8;

pub const RESTING_ENERGY_MINUTES: u32 = 3;
pub const RESTING_HEALTH_MINUTES: u32 = 5;
pub const RESTING_HUNGER_MINUTES: u32 = 15;

pub const FARMING_XP_PER_MINUTE: u64 = 1;
pub const FARMING_ENERGY_MINUTES: u32 = 3;
pub const FARMING_HUNGER_MINUTES: u32 = 5;
pub const FARMING_COIN_MINUTES: u32 = 5;

pub const EXPLORING_XP_PER_MINUTE: u64 = 3;
pub const EXPLORING_ENERGY_MINUTES: u32 = 2;
pub const EXPLORING_HUNGER_MINUTES: u32 = 8;

pub const PLAYING_HAPPINESS_MINUTES: u32 = 5;
pub const PLAYING_ENERGY_MINUTES: u32 = 4;
pub const PLAYING_XP_PER_MINUTE: u64 = 1;

pub const IDLE_FORAGE_HUNGER_BELOW: u32 = 50;
pub const IDLE_FORAGE_ENERGY_ABOVE: u32 = 50;
pub const IDLE_FORAGE_MINUTES: u32 = 10;
pub const IDLE_NAP_ENERGY_BELOW: u32 = 30;
pub const IDLE_NAP_MINUTES: u32 = 5;

// Personality effects
pub const HARD_WORKER_XP_MINUTES: u32 = 5;
pub const HARD_WORKER_ENERGY_MINUTES: u32 = 3;
pub const LAZY_REST_ENERGY_MINUTES: u32 = 2;
pub const LAZY_TRAINING_XP_MINUTES: u32 = 3;
pub const GLUTTON_HUNGER_MINUTES: u32 = 7;
pub const GLUTTON_CONTENT_HUNGER_ABOVE: u32 = 70;
pub const GLUTTON_HAPPINESS_MINUTES: u32 = 15;
pub const LONER_HAPPINESS_MINUTES: u32 = 30;
pub const PLAYFUL_PLAY_HAPPINESS_MINUTES: u32 = 3;
pub const PLAYFUL_BORED_HAPPINESS_MINUTES: u32 = 40;

// Leveling
pub const XP_PER_LEVEL: u64 = 100;
pub const LEVEL_UP_STAT_GAIN: u32 = 1;

// Growth stage thresholds (minimum level)
pub const INFANT_MIN_LEVEL: u32 = 5;
pub const ADOLESCENT_MIN_LEVEL: u32 = 15;
pub const ADULT_MIN_LEVEL: u32 = 25;
pub const TRANSCENDENT_MIN_LEVEL: u32 = 40;
pub const ELDER_MIN_LEVEL: u32 = 50;

// Scheduling
pub const BULK_TICK_INTERVAL_SECONDS: u64 = 300;
pub const BULK_TICK_MINUTES: u32 = 5;
pub const MAX_CATCH_UP_MINUTES: u32 = 24 * 60;
pub const AUTONOMY_INTERVAL_SECONDS: u64 = 300;
pub const AUTONOMY_INITIAL_DELAY_SECONDS: u64 = 60;
pub const CONFLICT_RETRIES: u32 = 3;

// Autonomy rolls
pub const AUTONOMY_DRIFT_CHANCE: f64 = 0.5;
pub const AUTONOMY_ACTION_CHANCE: f64 = 0.3;
pub const AUTO_EAT_CHANCE: f64 = 0.3;
pub const AUTO_PLAY_CHANCE: f64 = 0.2;
pub const AUTO_ACTIVITY_CHANCE: f64 = 0.1;

pub const AUTO_EAT_HUNGER_BELOW: u32 = 30;
pub const AUTO_EAT_HUNGER_GAIN: (u32, u32) = (10, 20);
pub const AUTO_PLAY_HAPPINESS_BELOW: u32 = 40;
pub const AUTO_PLAY_HAPPINESS_GAIN: (u32, u32) = (5, 10);
pub const AUTO_PLAY_ENERGY_GAIN: (u32, u32) = (0, 5);
pub const AUTO_ACTIVITY_ENERGY_ABOVE: u32 = 70;
pub const AUTO_ACTIVITY_ENERGY_COST: (u32, u32) = (10, 15);
pub const AUTO_ACTIVITY_XP: (u64, u64) = (1, 2);
pub const AUTO_ACTION_XP: u64 = 1;

// Drift (random status tick)
pub const DRIFT_HUNGER_LOSS: (u32, u32) = (1, 3);
pub const DRIFT_HUNGRY_BELOW: u32 = 30;
pub const DRIFT_HUNGRY_HAPPINESS_LOSS: (u32, u32) = (2, 4);
pub const DRIFT_HAPPINESS_LOSS: (u32, u32) = (0, 1);
pub const DRIFT_ENERGY_GAIN: (u32, u32) = (1, 2);
pub const DRIFT_DIRTY_BELOW: u32 = 30;
pub const DRIFT_DIRTY_HEALTH_LOSS: (u32, u32) = (0, 1);
pub const DRIFT_CLEANLINESS_LOSS: (u32, u32) = (0, 1);

// Player care actions
pub const FEED_HUNGER: i64 = 20;
pub const FEED_HAPPINESS: i64 = 5;
pub const FEED_XP: u64 = 2;
pub const PLAY_HAPPINESS: i64 = 15;
pub const PLAY_FRIENDLINESS: u32 = 1;
pub const PLAY_ENERGY: i64 = -10;
pub const PLAY_XP: u64 = 3;
pub const HEAL_HEALTH: i64 = 25;
pub const HEAL_HEALTH_STAT: u32 = 2;
pub const HEAL_HAPPINESS: i64 = 5;
pub const HEAL_XP: u64 = 2;
pub const CLEAN_CLEANLINESS: i64 = 30;
pub const CLEAN_HAPPINESS: i64 = 10;
pub const CLEAN_HEALTH: i64 = 5;
pub const CLEAN_XP: u64 = 2;
pub const TRAIN_ENERGY_COST: u32 = 20;
pub const TRAIN_STAT_GAIN: u32 = 2;
pub const TRAIN_XP: u64 = 5;
pub const ITEM_XP_PER_UNIT: u64 = 2;

// Config file
pub const DEFAULT_STORE_FILENAME: &str = "spiritlings.json";
pub const DEFAULT_LOG_FILTER: &str = "info";
