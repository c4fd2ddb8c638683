// ============================================================================
// Simulation Clock
// ============================================================================

pub const TICKS_PER_SECOND: u64 = 30;

// ============================================================================
// World & Camera
// ============================================================================

pub const DEFAULT_SEED: u64 = 0x5eed_cafe;
pub const DEFAULT_WORLD_DEPTH: f32 = 1_500.0; // y beyond which an actor has fallen out of the world
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1_280.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;
pub const DEFAULT_CAMERA_MARGIN: f32 = 400.0;
pub const DEFAULT_PHASE_X: f32 = 7_000.0; // boss arena entrance
pub const DEFAULT_ARENA_OFFSET: f32 = 6_800.0; // camera offset pinned after the phase latch

// ============================================================================
// Characters
// ============================================================================

// Dimensions (world units, y grows downward)
pub const CHARACTER_WIDTH: f32 = 50.0;
pub const CHARACTER_HEIGHT: f32 = 50.0;

pub const CHARACTER_MAX_HEALTH: i32 = 100;
pub const CHARACTER_GRAVITY: f32 = 2.0;
pub const CHARACTER_SPEED_Y_MAX: f32 = 40.0;
pub const CHARACTER_SPEED_X_MAX: f32 = 10.0;
pub const CHARACTER_WALK_ACCELERATION: f32 = 5.0;
pub const CHARACTER_JUMP_IMPULSE: f32 = 26.0;

// Windows and cooldowns (ticks)
pub const INVINCIBILITY_TICKS: u32 = 30;
pub const HURT_TICKS: u32 = 10;
pub const TRADE_TICKS: u32 = 30;
pub const ATTACK_COOLDOWN_TICKS: u32 = 15;
pub const ATTACK_DURATION_TICKS: u32 = 8;
pub const DEATH_TICKS: u32 = 45;

pub const SHIELD_WIDTH: f32 = 12.0;
pub const SHIELD_HEIGHT: f32 = 50.0;

// ============================================================================
// Projectiles
// ============================================================================

pub const PROJECTILE_WIDTH: f32 = 20.0;
pub const PROJECTILE_HEIGHT: f32 = 10.0;
pub const PROJECTILE_SPEED: f32 = 15.0;
pub const PROJECTILE_DAMAGE: i32 = 10;

// ============================================================================
// Enemies & Bosses
// ============================================================================

pub const ENEMY_WIDTH: f32 = 50.0;
pub const ENEMY_HEIGHT: f32 = 50.0;
pub const ENEMY_CONTACT_DAMAGE: i32 = 10;

pub const WALKER_PATROL_RANGE: f32 = 150.0;
pub const WALKER_SPEED: f32 = 3.0;
pub const WALKER_FIRE_TICKS: u32 = 60;
pub const WALKER_FIRE_RANGE: f32 = 600.0;

pub const WANDER_SPEED: f32 = 2.0;
pub const WANDER_MIN_TICKS: u32 = 20;
pub const WANDER_MAX_TICKS: u32 = 60;
pub const WANDER_DEAD_ZONE: f32 = 0.3;

pub const BOSS_WIDTH: f32 = 100.0;
pub const BOSS_HEIGHT: f32 = 150.0;

pub const VOLLEY_LANES: usize = 3;
pub const VOLLEY_PERIOD_TICKS: u32 = 100;
pub const VOLLEY_WARNING_TICKS: u32 = 20;
pub const VOLLEY_ACTIVE_TICKS: u32 = 15;
pub const VOLLEY_DAMAGE: i32 = 20;
pub const VOLLEY_LANE_WIDTH: f32 = 200.0;
pub const VOLLEY_LANE_HEIGHT: f32 = 300.0;

pub const TELEPORT_THRESHOLD: f32 = 200.0;
pub const TELEPORT_WARMUP_TICKS: u32 = 20;
pub const TELEPORT_ANCHOR_SPREAD: f32 = 400.0; // anchors sit this far either side of the spawn point

// ============================================================================
// Terrain
// ============================================================================

pub const SPIKE_DAMAGE: i32 = 15;
pub const BLOCK_PUSH_STEP: f32 = 1.0; // units per tick while a push is pending
