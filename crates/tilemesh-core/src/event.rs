#![forbid(unsafe_code)]

//! Pointer input as seen by the panel engine.
//!
//! The host owns real input devices. It reduces a press on a border grip, the
//! following drags and the release to [`PointerEvent`]s carrying a page
//! coordinate and the modifier state.
//!
//! # Design Notes
//!
//! - Coordinates are page coordinates; the mesh converts them to its own frame.
//! - A press names the grip axis it started on, since that decides whether the
//!   engine probes above/below or left/right of the pointer.
//! - `Modifiers` use bitflags for easy combination.

use bitflags::bitflags;

use crate::geometry::{Axis, Point};

bitflags! {
    /// Modifier keys held during a pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key. Selects full-edge gestures.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

impl Modifiers {
    /// Whether the gesture should act on the whole mesh edge or line.
    #[inline]
    pub const fn is_full(self) -> bool {
        self.contains(Self::SHIFT)
    }
}

/// Phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Button pressed on a border grip of the given axis.
    Down(Axis),
    /// Pointer moved while pressed.
    Drag,
    /// Button released.
    Up,
}

/// A pointer event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Page coordinate of the pointer.
    pub position: Point,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(kind: PointerEventKind, position: Point) -> Self {
        Self {
            kind,
            position,
            modifiers: Modifiers::NONE,
        }
    }

    /// Press on a grip.
    #[must_use]
    pub const fn down(axis: Axis, position: Point) -> Self {
        Self::new(PointerEventKind::Down(axis), position)
    }

    #[must_use]
    pub const fn drag(position: Point) -> Self {
        Self::new(PointerEventKind::Drag, position)
    }

    #[must_use]
    pub const fn up(position: Point) -> Self {
        Self::new(PointerEventKind::Up, position)
    }

    /// Attach modifier state.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
