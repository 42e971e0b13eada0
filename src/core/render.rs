//=========================================================================
// Scene Rendering Resources
//=========================================================================
//
// Display state owned by a scene and the hooks that draw it.
//
// Architecture:
//   Scene
//     ├─ SceneImage    (background sprite)
//     ├─ SpriteLayer   (foreground sprites added by a story script)
//     ├─ NarrationBox  (story text, attached to the GUI root while entered)
//     └─ SceneCamera
//
//   Scene::draw() → Canvas::clear() → draw_sprite()... → draw_narration()
//
// Nothing here talks to a GPU. The renderer implements `Canvas`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicU64, Ordering};

//=== SceneHandle =========================================================

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Identity of one scene instance.
///
/// Used to tell whether a shared slot (active camera, input focus) is
/// currently claimed by a particular scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneHandle(u64);

impl SceneHandle {
    pub(crate) fn next() -> Self {
        Self(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }
}

//=== FocusOwner ==========================================================

/// Owner of a single-owner slot such as the active camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusOwner {
    /// The regular game (level, overworld or menu).
    #[default]
    Game,

    /// A scene instance.
    Scene(SceneHandle),
}

//=== Canvas ==============================================================

/// Drawing surface a scene renders into each frame.
pub trait Canvas {
    /// Clears the frame buffer.
    fn clear(&mut self);

    /// Draws the image at `image` with its top-left corner at `position`.
    fn draw_sprite(&mut self, image: &str, position: (f32, f32));

    /// Draws the narration box with `text`.
    fn draw_narration(&mut self, text: &str);
}

//=== Overlay =============================================================

/// Visibility toggle for an always-existing overlay (HUD, console).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    visible: bool,
}

impl Overlay {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new(true)
    }
}

//=== GuiRoot =============================================================

/// Root window of the GUI context; scene overlays attach here.
#[derive(Debug, Default, Clone)]
pub struct GuiRoot {
    children: Vec<String>,
}

impl GuiRoot {
    /// Attaches a named child window. Attaching twice is a no-op.
    pub fn add_child(&mut self, name: &str) {
        if !self.has_child(name) {
            self.children.push(name.to_string());
        }
    }

    /// Detaches a named child window.
    pub fn remove_child(&mut self, name: &str) {
        self.children.retain(|child| child != name);
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.children.iter().any(|child| child == name)
    }
}

//=== SceneImage ==========================================================

/// The background sprite of a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneImage {
    image: Option<String>,
    position: (f32, f32),
}

impl SceneImage {
    pub fn new() -> Self {
        Self { image: None, position: (0.0, 0.0) }
    }

    /// Replaces the image. Paths are relative to the pixmaps directory.
    pub fn set_image(&mut self, path: &str) {
        self.image = Some(path.to_string());
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = (x, y);
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn position(&self) -> (f32, f32) {
        self.position
    }
}

impl Default for SceneImage {
    fn default() -> Self {
        Self::new()
    }
}

//=== NarrationBox ========================================================

/// Story text box shown in the lower third of the window.
///
/// The box exists for the whole life of its scene. It is attached to the
/// GUI root on enter, detached on leave, and only shown or hidden in
/// between. Setting the text does not show the box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationBox {
    text: String,
    visible: bool,
}

impl NarrationBox {
    /// Window name used when attaching to the GUI root.
    pub const WINDOW_NAME: &'static str = "story_box";

    pub fn new() -> Self {
        Self { text: String::new(), visible: false }
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Default for NarrationBox {
    fn default() -> Self {
        Self::new()
    }
}

//=== SpriteLayer =========================================================

/// One foreground sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub image: String,
    pub position: (f32, f32),
}

/// Foreground sprites drawn above the background, in insertion order.
#[derive(Debug, Default, Clone)]
pub struct SpriteLayer {
    sprites: Vec<Sprite>,
}

impl SpriteLayer {
    pub fn add(&mut self, image: &str, position: (f32, f32)) {
        self.sprites.push(Sprite { image: image.to_string(), position });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

//=== SceneCamera =========================================================

/// Camera owned by a scene. Scenes do not scroll; the camera stays put.
#[derive(Debug, Default, Clone)]
pub struct SceneCamera {
    position: (f32, f32),
    updates: u64,
}

impl SceneCamera {
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = (x, y);
    }

    /// Converts a world position into screen space.
    pub fn to_screen(&self, position: (f32, f32)) -> (f32, f32) {
        (position.0 - self.position.0, position.1 - self.position.1)
    }

    pub fn update(&mut self) {
        self.updates += 1;
    }

    pub fn position(&self) -> (f32, f32) {
        self.position
    }

    /// Number of frames this camera has been updated.
    pub fn updates(&self) -> u64 {
        self.updates
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_handles_are_unique() {
        let a = SceneHandle::next();
        let b = SceneHandle::next();
        assert_ne!(a, b);
        assert_ne!(FocusOwner::Scene(a), FocusOwner::Game);
    }

    #[test]
    fn focus_defaults_to_game() {
        assert_eq!(FocusOwner::default(), FocusOwner::Game);
    }

    #[test]
    fn gui_root_attach_is_idempotent() {
        let mut root = GuiRoot::default();
        root.add_child(NarrationBox::WINDOW_NAME);
        root.add_child(NarrationBox::WINDOW_NAME);
        let mut once = GuiRoot::default();
        once.add_child(NarrationBox::WINDOW_NAME);
        assert_eq!(format!("{:?}", root), format!("{:?}", once));

        root.remove_child(NarrationBox::WINDOW_NAME);
        assert!(!root.has_child(NarrationBox::WINDOW_NAME));
    }

    #[test]
    fn narration_text_does_not_show_box() {
        let mut story = NarrationBox::new();
        story.set_text("Once upon a time");
        assert_eq!(story.text(), "Once upon a time");
        assert!(!story.is_visible());

        story.show();
        assert!(story.is_visible());
    }

    #[test]
    fn camera_offsets_world_positions() {
        let mut camera = SceneCamera::default();
        camera.set_position(0.0, -600.0);
        assert_eq!(camera.to_screen((0.0, -600.0)), (0.0, 0.0));
        assert_eq!(camera.to_screen((10.0, -500.0)), (10.0, 100.0));
    }

    #[test]
    fn overlay_toggles() {
        let mut hud = Overlay::default();
        assert!(hud.is_visible());
        hud.hide();
        assert!(!hud.is_visible());
    }
}
