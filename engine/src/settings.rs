use serde::{Deserialize, Serialize};

/// Tunables for one session. Defaults follow the classic setup: a
/// 32x24 grid, 5 ticks per second, speed step 1 on every third length,
/// food reshuffle every 100 ticks, grace window of 4 segments.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionSettings {
    pub grid_width: usize,
    pub grid_height: usize,
    pub initial_speed: u32,
    pub speed_increment: u32,
    pub relocation_threshold: u32,
    pub self_collision_grace: usize,
    pub growth_food_count: usize,
    pub shrink_food_count: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            grid_width: 32,
            grid_height: 24,
            initial_speed: 5,
            speed_increment: 1,
            relocation_threshold: 100,
            self_collision_grace: 4,
            growth_food_count: 1,
            shrink_food_count: 1,
        }
    }
}

impl SessionSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width < 10 || self.grid_width > 100 {
            return Err("Grid width must be between 10 and 100".to_string());
        }
        if self.grid_height < 10 || self.grid_height > 100 {
            return Err("Grid height must be between 10 and 100".to_string());
        }
        if self.initial_speed < 1 || self.initial_speed > 60 {
            return Err("Initial speed must be between 1 and 60 ticks per second".to_string());
        }
        if self.speed_increment < 1 || self.speed_increment > 10 {
            return Err("Speed increment must be between 1 and 10".to_string());
        }
        if self.relocation_threshold < 1 {
            return Err("Relocation threshold must be at least 1 tick".to_string());
        }
        if self.self_collision_grace > 16 {
            return Err("Self-collision grace must be at most 16 segments".to_string());
        }
        if self.growth_food_count < 1 {
            return Err("At least one growth food is required".to_string());
        }
        if self.growth_food_count + self.shrink_food_count > 50 {
            return Err("Total food count must be at most 50".to_string());
        }
        Ok(())
    }

    pub fn from_yaml(content: &str) -> Result<Self, String> {
        serde_yaml_ng::from_str(content)
            .map_err(|e| format!("Failed to deserialize settings: {}", e))
    }

    pub fn to_yaml(&self) -> Result<String, String> {
        serde_yaml_ng::to_string(self).map_err(|e| format!("Failed to serialize settings: {}", e))
    }
}
