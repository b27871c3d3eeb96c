// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Key bindings.

use hashbrown::HashMap;

use super::Command;

/// A physical or logical key, as far as editing is concerned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home.
    Home,
    /// End.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Backspace.
    Backspace,
    /// Delete.
    Delete,
    /// Enter or Return.
    Enter,
    /// Tab.
    Tab,
    /// Insert.
    Insert,
    /// Escape.
    Escape,
    /// A character key, identified by its unshifted lowercase character.
    Char(char),
}

/// Modifier keys held with a key.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift.
    pub shift: bool,
    /// Control.
    pub ctrl: bool,
    /// Alt or Option.
    pub alt: bool,
    /// Meta, Command or Windows.
    pub meta: bool,
}

impl Modifiers {
    /// No modifier.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };
    /// Shift alone.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };
    /// Control alone.
    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };
    /// Control and Shift.
    pub const CTRL_SHIFT: Self = Self {
        shift: true,
        ctrl: true,
        ..Self::NONE
    };
}

/// A key together with its modifiers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    /// The key.
    pub key: Key,
    /// The modifiers that must be held.
    pub modifiers: Modifiers,
}

impl KeyBinding {
    /// Creates a binding.
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key without modifiers.
    pub const fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// A key with Shift.
    pub const fn shift(key: Key) -> Self {
        Self::new(key, Modifiers::SHIFT)
    }

    /// A key with Control.
    pub const fn ctrl(key: Key) -> Self {
        Self::new(key, Modifiers::CTRL)
    }

    /// A key with Control and Shift.
    pub const fn ctrl_shift(key: Key) -> Self {
        Self::new(key, Modifiers::CTRL_SHIFT)
    }
}

/// Maps key bindings to commands.
///
/// [`KeyMap::default`] holds the standard desktop bindings; hosts can add,
/// replace, or remove entries.
#[derive(Clone, Debug)]
pub struct KeyMap {
    bindings: HashMap<KeyBinding, Command>,
}

impl Default for KeyMap {
    fn default() -> Self {
        use Command as C;
        use Key as K;

        let defaults = [
            (KeyBinding::ctrl(K::Char('a')), C::SelectAll),
            (KeyBinding::plain(K::Backspace), C::Backspace),
            (KeyBinding::shift(K::Backspace), C::Backspace),
            (KeyBinding::ctrl(K::Backspace), C::DeleteWordPrevious),
            (KeyBinding::ctrl(K::Char('h')), C::Backspace),
            (KeyBinding::ctrl(K::Char('c')), C::Copy),
            (KeyBinding::ctrl(K::Insert), C::Copy),
            (KeyBinding::ctrl(K::Char('d')), C::DeleteParagraph),
            (KeyBinding::plain(K::Delete), C::Delete),
            (KeyBinding::ctrl(K::Delete), C::DeleteWordNextStart),
            (KeyBinding::ctrl(K::Char('\\')), C::Deselect),
            (KeyBinding::plain(K::Down), C::MoveDown),
            (KeyBinding::shift(K::Down), C::SelectDown),
            (KeyBinding::ctrl(K::Down), C::MoveParagraphDown),
            (KeyBinding::ctrl_shift(K::Down), C::SelectParagraphDown),
            (KeyBinding::plain(K::Up), C::MoveUp),
            (KeyBinding::shift(K::Up), C::SelectUp),
            (KeyBinding::ctrl(K::Up), C::MoveParagraphUp),
            (KeyBinding::ctrl_shift(K::Up), C::SelectParagraphUp),
            (KeyBinding::plain(K::Left), C::MoveLeft),
            (KeyBinding::shift(K::Left), C::SelectLeft),
            (KeyBinding::ctrl(K::Left), C::MoveWordPrevious),
            (KeyBinding::ctrl_shift(K::Left), C::SelectWordPrevious),
            (KeyBinding::plain(K::Right), C::MoveRight),
            (KeyBinding::shift(K::Right), C::SelectRight),
            (KeyBinding::ctrl(K::Right), C::MoveWordNext),
            (KeyBinding::ctrl_shift(K::Right), C::SelectWordNext),
            (KeyBinding::plain(K::Home), C::MoveToLineStart),
            (KeyBinding::shift(K::Home), C::SelectToLineStart),
            (KeyBinding::ctrl(K::Home), C::MoveToDocumentStart),
            (KeyBinding::ctrl_shift(K::Home), C::SelectToDocumentStart),
            (KeyBinding::plain(K::End), C::MoveToLineEnd),
            (KeyBinding::shift(K::End), C::SelectToLineEnd),
            (KeyBinding::ctrl(K::End), C::MoveToDocumentEnd),
            (KeyBinding::ctrl_shift(K::End), C::SelectToDocumentEnd),
            (KeyBinding::plain(K::PageUp), C::PageUp),
            (KeyBinding::shift(K::PageUp), C::SelectPageUp),
            (KeyBinding::plain(K::PageDown), C::PageDown),
            (KeyBinding::shift(K::PageDown), C::SelectPageDown),
            (KeyBinding::plain(K::Enter), C::InsertLineBreak),
            (KeyBinding::plain(K::Tab), C::InsertTab),
            (KeyBinding::shift(K::Insert), C::Paste),
            (KeyBinding::ctrl(K::Char('v')), C::Paste),
            (KeyBinding::ctrl_shift(K::Char('v')), C::PastePlainText),
            (KeyBinding::ctrl(K::Char('x')), C::Cut),
            (KeyBinding::shift(K::Delete), C::Cut),
            (KeyBinding::ctrl(K::Char('z')), C::Undo),
            (KeyBinding::ctrl(K::Char('y')), C::Redo),
            (KeyBinding::ctrl_shift(K::Char('z')), C::Redo),
        ];
        Self {
            bindings: defaults.into_iter().collect(),
        }
    }
}

impl KeyMap {
    /// A key map without any binding.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// The command bound to `binding`.
    pub fn get(&self, binding: KeyBinding) -> Option<Command> {
        self.bindings.get(&binding).copied()
    }

    /// Binds `binding` to `command`, returning the command it was bound to before.
    pub fn bind(&mut self, binding: KeyBinding, command: Command) -> Option<Command> {
        self.bindings.insert(binding, command)
    }

    /// Removes `binding`, returning the command it was bound to.
    pub fn unbind(&mut self, binding: KeyBinding) -> Option<Command> {
        self.bindings.remove(&binding)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
