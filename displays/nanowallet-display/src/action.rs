//! Button to action mapping
//!
//! Screens describe what each button does as a [`ButtonAction`] and handle
//! the resulting actions in one place through [`Store`]. Only completed
//! presses map to actions: a single button released on its own, or both
//! buttons released together. Holds past the fast threshold release
//! without the release flag and therefore map to nothing.

use nanowallet_hal::Supervisor;

use crate::input::ButtonMask;

/// Receiver of screen actions
pub trait Store {
    /// Actions this store understands
    type Action: Copy;

    /// Apply one action
    ///
    /// The supervisor is available for actions that reach the OS, such as
    /// exiting the application.
    fn process_action<S: Supervisor>(&mut self, action: Self::Action, supervisor: &mut S);
}

/// Actions bound to the buttons of a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction<A> {
    /// One optional action per button combination
    Map {
        left: Option<A>,
        right: Option<A>,
        both: Option<A>,
    },
    /// The same action for any combination
    ForAll(A),
    /// Buttons do nothing
    None,
}

impl<A: Copy> ButtonAction<A> {
    /// Action bound to `mask`, if any
    pub fn resolve(&self, mask: ButtonMask) -> Option<A> {
        let (left, right, both) = match *self {
            ButtonAction::Map { left, right, both } => (left, right, both),
            ButtonAction::ForAll(action) => (Some(action), Some(action), Some(action)),
            ButtonAction::None => return None,
        };

        const LEFT: u32 = ButtonMask::EVT_RELEASED.bits() | ButtonMask::LEFT.bits();
        const RIGHT: u32 = ButtonMask::EVT_RELEASED.bits() | ButtonMask::RIGHT.bits();
        const BOTH: u32 = LEFT | RIGHT;

        match mask.bits() {
            LEFT => left,
            RIGHT => right,
            BOTH => both,
            _ => None,
        }
    }

    /// Resolve `mask` and hand the action to `store`
    ///
    /// Returns true if an action was dispatched.
    pub fn dispatch<T, S>(&self, mask: ButtonMask, store: &mut T, supervisor: &mut S) -> bool
    where
        T: Store<Action = A>,
        S: Supervisor,
    {
        match self.resolve(mask) {
            Some(action) => {
                store.process_action(action, supervisor);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanowallet_hal::mock::MockSupervisor;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Nav {
        Previous,
        Next,
        Confirm,
    }

    #[derive(Default)]
    struct Recorder {
        actions: heapless::Vec<Nav, 8>,
    }

    impl Store for Recorder {
        type Action = Nav;

        fn process_action<S: Supervisor>(&mut self, action: Nav, _supervisor: &mut S) {
            let _ = self.actions.push(action);
        }
    }

    const NAV: ButtonAction<Nav> = ButtonAction::Map {
        left: Some(Nav::Previous),
        right: Some(Nav::Next),
        both: Some(Nav::Confirm),
    };

    fn released(mask: ButtonMask) -> ButtonMask {
        mask | ButtonMask::EVT_RELEASED
    }

    #[test]
    fn test_map_resolves_releases() {
        assert_eq!(NAV.resolve(released(ButtonMask::LEFT)), Some(Nav::Previous));
        assert_eq!(NAV.resolve(released(ButtonMask::RIGHT)), Some(Nav::Next));
        assert_eq!(
            NAV.resolve(released(ButtonMask::LEFT | ButtonMask::RIGHT)),
            Some(Nav::Confirm)
        );
    }

    #[test]
    fn test_presses_and_fast_repeats_ignored() {
        assert_eq!(NAV.resolve(ButtonMask::LEFT), None);
        assert_eq!(NAV.resolve(ButtonMask::LEFT | ButtonMask::EVT_FAST), None);
        assert_eq!(NAV.resolve(ButtonMask::EVT_RELEASED), None);
    }

    #[test]
    fn test_unmapped_button() {
        let left_only = ButtonAction::Map {
            left: Some(Nav::Previous),
            right: None,
            both: None,
        };
        assert_eq!(left_only.resolve(released(ButtonMask::RIGHT)), None);
        assert_eq!(
            left_only.resolve(released(ButtonMask::LEFT | ButtonMask::RIGHT)),
            None
        );
    }

    #[test]
    fn test_for_all_and_none() {
        let all = ButtonAction::ForAll(Nav::Confirm);
        assert_eq!(all.resolve(released(ButtonMask::RIGHT)), Some(Nav::Confirm));
        assert_eq!(ButtonAction::<Nav>::None.resolve(released(ButtonMask::LEFT)), None);
    }

    #[test]
    fn test_dispatch_reaches_store() {
        let mut store = Recorder::default();
        let mut sup = MockSupervisor::new();
        assert!(NAV.dispatch(released(ButtonMask::RIGHT), &mut store, &mut sup));
        assert!(!NAV.dispatch(ButtonMask::RIGHT, &mut store, &mut sup));
        assert_eq!(&store.actions[..], &[Nav::Next]);
    }

    proptest! {
        #[test]
        fn prop_only_release_masks_resolve(bits in any::<u32>()) {
            let mask = ButtonMask(bits);
            let resolved = NAV.resolve(mask).is_some();
            prop_assert_eq!(resolved, matches!(bits, 0x8000_0001 | 0x8000_0002 | 0x8000_0003));
        }
    }
}
