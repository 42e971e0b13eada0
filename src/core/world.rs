//=========================================================================
// Game World
//=========================================================================
//
// The level/overworld/menu collaborator that scene transitions act on.
//
// Level loading, overworld navigation and menus are implemented by the
// game. The sequencer only needs to know whether something is active
// and to issue the load steps of a mode change.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== MenuKind ============================================================

/// Menus a mode change can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuKind {
    Credits,
}

//=== GameWorld Trait =====================================================

/// Game-side state that scene transitions query and modify.
pub trait GameWorld {
    /// Name of the level that is loaded, if any.
    fn active_level(&self) -> Option<&str>;

    /// Name of the overworld that is loaded, if any.
    fn active_overworld(&self) -> Option<&str>;

    /// Leaves the active level, if any.
    fn unload_levels(&mut self);

    /// Loads the named level and makes it active.
    fn load_level(&mut self, name: &str);

    /// Places the player at `entry` in a level that was just loaded.
    fn load_level_entry(&mut self, entry: &str);

    /// Moves the player to `entry` in the already active level.
    fn activate_level_entry(&mut self, entry: &str);

    /// Loads the named overworld fresh.
    fn enter_world(&mut self, name: &str);

    /// Advances the active overworld through the waypoint exit `exit`.
    ///
    /// `None` is the legacy behaviour for worlds without exit directions.
    fn advance_overworld(&mut self, exit: Option<&str>);

    /// Opens a menu.
    fn load_menu(&mut self, menu: MenuKind);
}

//=== WorldState ==========================================================

/// In-memory [`GameWorld`] that records what has been loaded.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WorldState {
    active_level: Option<String>,
    level_entry: Option<String>,
    active_overworld: Option<String>,
    last_exit: Option<String>,
    waypoints_advanced: u32,
    active_menu: Option<MenuKind>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `level` active, as if the player were playing it.
    pub fn with_level(mut self, level: &str) -> Self {
        self.active_level = Some(level.to_string());
        self
    }

    /// Starts with `world` active.
    pub fn with_overworld(mut self, world: &str) -> Self {
        self.active_overworld = Some(world.to_string());
        self
    }

    /// Entry the player was last placed at.
    pub fn level_entry(&self) -> Option<&str> {
        self.level_entry.as_deref()
    }

    /// Exit used by the most recent overworld advance.
    pub fn last_exit(&self) -> Option<&str> {
        self.last_exit.as_deref()
    }

    /// How many times the overworld was advanced past a waypoint.
    pub fn waypoints_advanced(&self) -> u32 {
        self.waypoints_advanced
    }

    pub fn active_menu(&self) -> Option<MenuKind> {
        self.active_menu
    }
}

impl GameWorld for WorldState {
    fn active_level(&self) -> Option<&str> {
        self.active_level.as_deref()
    }

    fn active_overworld(&self) -> Option<&str> {
        self.active_overworld.as_deref()
    }

    fn unload_levels(&mut self) {
        if let Some(level) = self.active_level.take() {
            debug!("Unloading level {}", level);
        }
        self.level_entry = None;
    }

    fn load_level(&mut self, name: &str) {
        debug!("Loading level {}", name);
        self.active_level = Some(name.to_string());
        self.level_entry = None;
        self.active_menu = None;
    }

    fn load_level_entry(&mut self, entry: &str) {
        self.level_entry = Some(entry.to_string());
    }

    fn activate_level_entry(&mut self, entry: &str) {
        self.level_entry = Some(entry.to_string());
    }

    fn enter_world(&mut self, name: &str) {
        debug!("Entering overworld {}", name);
        self.active_overworld = Some(name.to_string());
        self.last_exit = None;
        self.active_menu = None;
    }

    fn advance_overworld(&mut self, exit: Option<&str>) {
        self.last_exit = exit.map(str::to_string);
        self.waypoints_advanced += 1;
    }

    fn load_menu(&mut self, menu: MenuKind) {
        debug!("Opening menu {:?}", menu);
        self.active_menu = Some(menu);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_world_has_nothing_active() {
        let world = WorldState::new();
        assert_eq!(world.active_level(), None);
        assert_eq!(world.active_overworld(), None);
        assert_eq!(world.active_menu(), None);
    }

    #[test]
    fn unload_clears_level_and_entry() {
        let mut world = WorldState::new().with_level("lvl_1");
        world.activate_level_entry("door_2");
        world.unload_levels();
        assert_eq!(world.active_level(), None);
        assert_eq!(world.level_entry(), None);
    }

    #[test]
    fn load_level_replaces_entry() {
        let mut world = WorldState::new().with_level("lvl_1");
        world.activate_level_entry("door_2");
        world.load_level("lvl_2");
        assert_eq!(world.active_level(), Some("lvl_2"));
        assert_eq!(world.level_entry(), None);
    }

    #[test]
    fn advance_overworld_records_exit() {
        let mut world = WorldState::new().with_overworld("world_1");
        world.advance_overworld(Some("right"));
        world.advance_overworld(None);
        assert_eq!(world.waypoints_advanced(), 2);
        assert_eq!(world.last_exit(), None);
    }
}
