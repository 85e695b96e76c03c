pub mod ai;
pub mod line_of_sight;
pub mod movement;
pub mod pathfinding;
pub mod projectile;
