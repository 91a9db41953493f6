//! Shared mock view for unit tests

use std::cell::RefCell;
use std::rc::Rc;

use pressfx_core::{Overlay, Point, Size, TargetId, Vec2, ViewHandle, Visibility};

#[derive(Debug)]
pub struct MockState {
    pub position: Point,
    pub size: Size,
    pub visibility: Visibility,
    pub scale: Vec2,
    pub translation: Vec2,
    pub overlay: Option<Overlay>,
    pub overlay_installs: usize,
    pub alpha: u8,
    pub alpha_history: Vec<u8>,
    pub haptics: Vec<(u32, u8)>,
}

/// View whose state is shared between clones, so a test can keep a handle
/// after moving the view into a group
#[derive(Clone, Debug)]
pub struct MockView {
    id: TargetId,
    state: Rc<RefCell<MockState>>,
}

impl MockView {
    pub fn new(id: u64, position: (f32, f32), size: (f32, f32)) -> Self {
        Self {
            id: TargetId(id),
            state: Rc::new(RefCell::new(MockState {
                position: Point::new(position.0, position.1),
                size: Size::new(size.0, size.1),
                visibility: Visibility::Visible,
                scale: Vec2::ONE,
                translation: Vec2::ZERO,
                overlay: None,
                overlay_installs: 0,
                alpha: 0,
                alpha_history: Vec::new(),
                haptics: Vec::new(),
            })),
        }
    }

    pub fn set_size(&self, width: f32, height: f32) {
        self.state.borrow_mut().size = Size::new(width, height);
    }

    pub fn set_visibility(&self, visibility: Visibility) {
        self.state.borrow_mut().visibility = visibility;
    }

    pub fn scale(&self) -> Vec2 {
        self.state.borrow().scale
    }

    pub fn translation(&self) -> Vec2 {
        self.state.borrow().translation
    }

    pub fn alpha(&self) -> u8 {
        self.state.borrow().alpha
    }

    pub fn alpha_history(&self) -> Vec<u8> {
        self.state.borrow().alpha_history.clone()
    }

    pub fn installed_overlay(&self) -> Option<Overlay> {
        self.state.borrow().overlay.clone()
    }

    pub fn overlay_installs(&self) -> usize {
        self.state.borrow().overlay_installs
    }

    pub fn haptics(&self) -> Vec<(u32, u8)> {
        self.state.borrow().haptics.clone()
    }
}

impl ViewHandle for MockView {
    fn id(&self) -> TargetId {
        self.id
    }

    fn screen_position(&self) -> Point {
        self.state.borrow().position
    }

    fn size(&self) -> Size {
        self.state.borrow().size
    }

    fn visibility(&self) -> Visibility {
        self.state.borrow().visibility
    }

    fn set_scale(&mut self, x: f32, y: f32) {
        self.state.borrow_mut().scale = Vec2::new(x, y);
    }

    fn set_translation(&mut self, x: f32, y: f32) {
        self.state.borrow_mut().translation = Vec2::new(x, y);
    }

    fn overlay(&self) -> Option<Overlay> {
        self.state.borrow().overlay.clone()
    }

    fn set_overlay(&mut self, overlay: Overlay) {
        let mut state = self.state.borrow_mut();
        state.overlay = Some(overlay);
        state.overlay_installs += 1;
    }

    fn set_overlay_alpha(&mut self, alpha: u8) {
        let mut state = self.state.borrow_mut();
        state.alpha = alpha;
        state.alpha_history.push(alpha);
    }

    fn perform_haptic_feedback(&mut self, duration_ms: u32, amplitude: u8) {
        self.state.borrow_mut().haptics.push((duration_ms, amplitude));
    }
}
