/// Single-character cell markers of the grid text encoding
pub mod markers {
    /// The agent itself
    pub const SELF: char = 'X';
    /// An opponent
    pub const ENEMY: char = 'O';
    /// Impassable wall, absorbs movement and bolts
    pub const WALL: char = 'W';
    /// Battery pickup (restores energy and health)
    pub const BATTERY: char = 'B';
    /// Laser bolt in flight
    pub const BOLT: char = 'L';
    /// Canonical rendering for every cell without a recognized marker
    pub const EMPTY: char = '_';
}

/// Projectile behaviour as observed between snapshots
pub mod projectile {
    /// Cells a bolt travels between two consecutive snapshots
    pub const CELLS_PER_TURN: usize = 2;
}

/// Search and scan bounds
pub mod limits {
    /// Orientations a single planner state can have
    pub const ORIENTATIONS: usize = 4;
}

/// Snapshot status strings
pub mod status {
    /// The only status under which turns are taken
    pub const RUNNING: &str = "running";
}
