//! Keyboard bindings for the fly camera.

use std::collections::HashMap;

pub use winit::keyboard::KeyCode;

use crate::camera::CameraAction;

/// Physical key → [`CameraAction`] table.
///
/// The default layout is WASD for movement and Space for the showreel.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    map: HashMap<KeyCode, CameraAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let map = HashMap::from([
            (KeyCode::KeyW, CameraAction::Forward),
            (KeyCode::KeyS, CameraAction::Back),
            (KeyCode::KeyA, CameraAction::Left),
            (KeyCode::KeyD, CameraAction::Right),
            (KeyCode::Space, CameraAction::ToggleShowreel),
        ]);
        Self { map }
    }
}

impl KeyBindings {
    /// A table with nothing bound.
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Binds `key` to `action`, returning whatever it was bound to before.
    pub fn bind(&mut self, key: KeyCode, action: CameraAction) -> Option<CameraAction> {
        self.map.insert(key, action)
    }

    pub fn unbind(&mut self, key: KeyCode) -> Option<CameraAction> {
        self.map.remove(&key)
    }

    #[inline]
    pub fn action_for(&self, key: KeyCode) -> Option<CameraAction> {
        self.map.get(&key).copied()
    }

    /// Every key currently bound to `action`.
    pub fn keys_for(&self, action: CameraAction) -> impl Iterator<Item = KeyCode> + '_ {
        self.map
            .iter()
            .filter(move |(_, a)| **a == action)
            .map(|(k, _)| *k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let b = KeyBindings::default();
        assert_eq!(b.action_for(KeyCode::KeyW), Some(CameraAction::Forward));
        assert_eq!(b.action_for(KeyCode::KeyS), Some(CameraAction::Back));
        assert_eq!(b.action_for(KeyCode::KeyA), Some(CameraAction::Left));
        assert_eq!(b.action_for(KeyCode::KeyD), Some(CameraAction::Right));
        assert_eq!(b.action_for(KeyCode::Space), Some(CameraAction::ToggleShowreel));
        assert_eq!(b.action_for(KeyCode::KeyG), None);
    }

    #[test]
    fn rebinding() {
        let mut b = KeyBindings::default();
        assert_eq!(
            b.bind(KeyCode::ArrowUp, CameraAction::Forward),
            None
        );
        let mut forward: Vec<_> = b.keys_for(CameraAction::Forward).collect();
        forward.sort_by_key(|k| format!("{k:?}"));
        assert_eq!(forward, vec![KeyCode::ArrowUp, KeyCode::KeyW]);

        assert_eq!(b.unbind(KeyCode::KeyW), Some(CameraAction::Forward));
        assert_eq!(b.action_for(KeyCode::KeyW), None);
        assert!(KeyBindings::empty().action_for(KeyCode::Space).is_none());
    }
}
