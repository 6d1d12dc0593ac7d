//! Default tuning parameters.
//!
//! These seed `GameConfig::default()`. Core logic reads tunables from the
//! config record, never from these constants directly.

// --- Game phases ---

/// Ticks of pre-game setup during which only spawn-phase executions run.
pub const SPAWN_PHASE_TURNS: u64 = 100;

// --- Unit stats ---

pub const WARSHIP_MAX_HEALTH: u32 = 1000;
pub const MISSILE_SHIP_MAX_HEALTH: u32 = 600;
/// Ships without armor die to any shell.
pub const UNARMORED_MAX_HEALTH: u32 = 1;

pub const WARSHIP_COST: u64 = 250_000;
pub const MISSILE_SHIP_COST: u64 = 400_000;
pub const PORT_COST: u64 = 125_000;
pub const CITY_COST: u64 = 125_000;
pub const DEFENSE_POST_COST: u64 = 50_000;
pub const TACTICAL_ROCKET_COST: u64 = 750_000;
pub const CLUSTER_ROCKET_COST: u64 = 5_000_000;

// --- Warship ---

/// Ticks between volleys.
pub const WARSHIP_SHELL_ATTACK_RATE: u64 = 20;

/// Radius (tiles) within which a warship acquires targets.
pub const WARSHIP_TARGETING_RANGE: u32 = 130;

/// Side length (tiles) of the square a patrolling warship wanders in.
pub const WARSHIP_PATROL_RANGE: u32 = 100;

/// Health regenerated per tick while the owner holds a Port.
pub const WARSHIP_HEAL_PER_TICK: u32 = 1;

/// Shells per volley for a full warship.
pub const WARSHIP_VOLLEY_SIZE: u32 = 2;

/// Water steps per tick while hunting a trade ship.
pub const WARSHIP_HUNT_STEPS_PER_TICK: u32 = 2;

/// Maximum tiles explored when routing over water.
pub const WATER_SEARCH_LIMIT: usize = 20_000;

/// Random patrol picks attempted before the patrol square grows.
pub const PATROL_ATTEMPTS_BEFORE_EXPAND: u32 = 500;

// --- Missile ship ---

/// Ticks a missile ship stays in cooldown after a launch.
pub const MISSILE_SHIP_COOLDOWN_TICKS: u64 = 75;

/// Shells per volley when a missile ship fights as a warship.
pub const MISSILE_SHIP_VOLLEY_SIZE: u32 = 1;

// --- Shell ---

pub const SHELL_BASE_DAMAGE: u32 = 250;
pub const SHELL_STEPS_PER_TICK: u32 = 3;
/// Ticks a shell may fly before it fizzles.
pub const SHELL_LIFETIME_TICKS: u64 = 50;

// --- Rockets ---

/// Tiles advanced per tick by tactical and cluster rockets.
pub const ROCKET_SPEED: u32 = 6;

/// Tiles advanced per tick by cluster bomblets.
pub const BOMBLET_SPEED: u32 = 4;

/// Distance from launch point or destination within which a rocket may be intercepted.
pub const ROCKET_TARGETABLE_RANGE: u32 = 120;

pub const TACTICAL_BLAST_RADIUS: u32 = 12;
pub const TACTICAL_EXTRA_BURSTS: u32 = 2;
pub const TACTICAL_SCATTER_RADIUS: u32 = 8;
pub const TACTICAL_SCATTER_ATTEMPTS: u32 = 10;

pub const CLUSTER_BOMBLET_COUNT: u32 = 5;
pub const CLUSTER_SPREAD_RADIUS: u32 = 40;
pub const CLUSTER_MIN_SPACING: u32 = 12;
pub const CLUSTER_PLACEMENT_ATTEMPTS: u32 = 40;
pub const BOMBLET_BLAST_RADIUS: u32 = 10;

/// Troops removed from a tile's owner for every owned tile inside a blast.
pub const BLAST_TROOP_DAMAGE: u64 = 50;

/// Extra radius beyond the blast in which structures are refreshed.
pub const BLAST_REFRESH_MARGIN: u32 = 5;
