//! Device profiles: one offset table and one action table per firmware layout.
//!
//! Both tables are fixed protocol constants. Supporting another firmware means adding
//! another `Profile`, never patching entries of an existing one.

use super::ids::{ActionId, ButtonId, labels_match};
use crate::codec::bits::{FIELD_WIDTH, combine_flags};

/// Name of the profile used when none is requested.
pub const DEFAULT_PROFILE: &str = "standard";

/// A button's 4-byte field position in the file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ButtonSlot {
    pub button: ButtonId,
    pub offset: usize,
    /// False when the offset is known but has not been confirmed on hardware.
    pub verified: bool,
}

impl ButtonSlot {
    pub const fn new(button: ButtonId, offset: usize) -> Self {
        Self {
            button,
            offset,
            verified: true,
        }
    }

    pub const fn unverified(button: ButtonId, offset: usize) -> Self {
        Self {
            button,
            offset,
            verified: false,
        }
    }
}

/// An action's bit flag, with the label the profile spells it with.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ActionFlag {
    pub action: ActionId,
    pub label: &'static str,
    pub flag: u32,
}

impl ActionFlag {
    pub const fn new(action: ActionId, flag: u32) -> Self {
        Self {
            action,
            label: action.label(),
            flag,
        }
    }

    pub const fn labeled(action: ActionId, label: &'static str, flag: u32) -> Self {
        Self {
            action,
            label,
            flag,
        }
    }
}

/// Offset table plus action table for one device firmware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: &'static str,
    pub description: &'static str,
    pub buttons: &'static [ButtonSlot],
    pub actions: &'static [ActionFlag],
}

impl Profile {
    /// Slot for a button, if this profile maps it.
    pub fn slot(&self, button: ButtonId) -> Option<&ButtonSlot> {
        self.buttons.iter().find(|s| s.button == button)
    }

    pub fn offset(&self, button: ButtonId) -> Option<usize> {
        self.slot(button).map(|s| s.offset)
    }

    /// Flag value for an action, if this profile knows it.
    pub fn flag(&self, action: ActionId) -> Option<u32> {
        self.action_entry(action).map(|a| a.flag)
    }

    pub fn action_entry(&self, action: ActionId) -> Option<&ActionFlag> {
        self.actions.iter().find(|a| a.action == action)
    }

    /// Label this profile uses for an action (falls back to the canonical label).
    pub fn action_label(&self, action: ActionId) -> &'static str {
        self.action_entry(action)
            .map_or(action.label(), |a| a.label)
    }

    /// Resolve a button label against this profile's offset table.
    pub fn resolve_button(&self, label: &str) -> Option<ButtonId> {
        self.buttons
            .iter()
            .map(|s| s.button)
            .find(|b| labels_match(b.label(), label))
    }

    /// Resolve an action label against this profile's action table.
    ///
    /// Both the profile's own spelling and the canonical label are accepted.
    pub fn resolve_action(&self, label: &str) -> Option<ActionId> {
        self.actions
            .iter()
            .find(|a| labels_match(a.label, label) || labels_match(a.action.label(), label))
            .map(|a| a.action)
    }

    /// Field value the encoder writes for `actions`; actions outside the table add nothing.
    pub fn field_value(&self, actions: &[ActionId]) -> u32 {
        combine_flags(actions.iter().filter_map(|a| self.flag(*a)))
    }

    /// Whether `name` selects this profile (ASCII case-insensitive, surrounding blanks ignored).
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Smallest buffer length that holds every field of this profile.
    pub fn min_len(&self) -> usize {
        self.buttons
            .iter()
            .map(|s| s.offset + FIELD_WIDTH)
            .max()
            .unwrap_or(0)
    }
}

const STANDARD_BUTTONS: &[ButtonSlot] = &[
    ButtonSlot::new(ButtonId::A, 0x4C),
    ButtonSlot::new(ButtonId::B, 0x50),
    ButtonSlot::new(ButtonId::X, 0x54),
    ButtonSlot::new(ButtonId::Y, 0x58),
    ButtonSlot::new(ButtonId::Lb, 0x5C),
    ButtonSlot::new(ButtonId::Rb, 0x60),
    ButtonSlot::new(ButtonId::Lt, 0x64),
    ButtonSlot::new(ButtonId::Rt, 0x68),
    ButtonSlot::new(ButtonId::L3, 0x6C),
    ButtonSlot::new(ButtonId::R3, 0x70),
    ButtonSlot::new(ButtonId::Back, 0x74),
    ButtonSlot::new(ButtonId::Menu, 0x78),
    ButtonSlot::new(ButtonId::Home, 0x80),
    ButtonSlot::new(ButtonId::UpDpad, 0x84),
    ButtonSlot::new(ButtonId::DownDpad, 0x88),
    ButtonSlot::new(ButtonId::LeftDpad, 0x8C),
    ButtonSlot::new(ButtonId::RightDpad, 0x90),
    ButtonSlot::new(ButtonId::Pr, 0x94),
    ButtonSlot::new(ButtonId::Pl, 0x98),
    ButtonSlot::new(ButtonId::L4, 0x9C),
    ButtonSlot::new(ButtonId::R4, 0xA0),
];

// 0x7C is not a button field; it passes through untouched.
const HOME_UNTESTED_BUTTONS: &[ButtonSlot] = &[
    ButtonSlot::new(ButtonId::A, 0x4C),
    ButtonSlot::new(ButtonId::B, 0x50),
    ButtonSlot::new(ButtonId::X, 0x54),
    ButtonSlot::new(ButtonId::Y, 0x58),
    ButtonSlot::new(ButtonId::Lb, 0x5C),
    ButtonSlot::new(ButtonId::Rb, 0x60),
    ButtonSlot::new(ButtonId::Lt, 0x64),
    ButtonSlot::new(ButtonId::Rt, 0x68),
    ButtonSlot::new(ButtonId::L3, 0x6C),
    ButtonSlot::new(ButtonId::R3, 0x70),
    ButtonSlot::new(ButtonId::Back, 0x74),
    ButtonSlot::new(ButtonId::Menu, 0x78),
    ButtonSlot::unverified(ButtonId::Home, 0x80),
    ButtonSlot::new(ButtonId::UpDpad, 0x84),
    ButtonSlot::new(ButtonId::DownDpad, 0x88),
    ButtonSlot::new(ButtonId::LeftDpad, 0x8C),
    ButtonSlot::new(ButtonId::RightDpad, 0x90),
    ButtonSlot::new(ButtonId::Pr, 0x94),
    ButtonSlot::new(ButtonId::Pl, 0x98),
    ButtonSlot::new(ButtonId::L4, 0x9C),
    ButtonSlot::new(ButtonId::R4, 0xA0),
];

const STANDARD_ACTIONS: &[ActionFlag] = &[
    ActionFlag::new(ActionId::Y, 0x2000_0000),
    ActionFlag::new(ActionId::X, 0x1000_0000),
    ActionFlag::new(ActionId::A, 0x0020_0000),
    ActionFlag::new(ActionId::B, 0x0010_0000),
    ActionFlag::new(ActionId::RightDpad, 0x4000_0000),
    ActionFlag::new(ActionId::LeftDpad, 0x8000_0000),
    ActionFlag::new(ActionId::DownDpad, 0x0001_0000),
    ActionFlag::new(ActionId::UpDpad, 0x0002_0000),
    ActionFlag::new(ActionId::L3Click, 0x0200_0000),
    ActionFlag::new(ActionId::LbButton, 0x0004_0000),
    ActionFlag::new(ActionId::LtTrigger, 0x0040_0000),
    ActionFlag::new(ActionId::RbButton, 0x0008_0000),
    ActionFlag::new(ActionId::RtTrigger, 0x0080_0000),
    ActionFlag::new(ActionId::BackButton, 0x0800_0000),
    ActionFlag::new(ActionId::R3Click, 0x0400_0000),
    ActionFlag::new(ActionId::MenuButton, 0x0100_0000),
    ActionFlag::new(ActionId::HomeButton, 0x0000_0200),
];

const HOME_UNTESTED_ACTIONS: &[ActionFlag] = &[
    ActionFlag::new(ActionId::Y, 0x2000_0000),
    ActionFlag::new(ActionId::X, 0x1000_0000),
    ActionFlag::new(ActionId::A, 0x0020_0000),
    ActionFlag::new(ActionId::B, 0x0010_0000),
    ActionFlag::new(ActionId::RightDpad, 0x4000_0000),
    ActionFlag::new(ActionId::LeftDpad, 0x8000_0000),
    ActionFlag::new(ActionId::DownDpad, 0x0001_0000),
    ActionFlag::new(ActionId::UpDpad, 0x0002_0000),
    ActionFlag::new(ActionId::L3Click, 0x0200_0000),
    ActionFlag::new(ActionId::LbButton, 0x0004_0000),
    ActionFlag::new(ActionId::LtTrigger, 0x0040_0000),
    ActionFlag::new(ActionId::RbButton, 0x0008_0000),
    ActionFlag::new(ActionId::RtTrigger, 0x0080_0000),
    ActionFlag::new(ActionId::BackButton, 0x0800_0000),
    ActionFlag::new(ActionId::R3Click, 0x0400_0000),
    ActionFlag::new(ActionId::MenuButton, 0x0100_0000),
    ActionFlag::labeled(ActionId::HomeButton, "Home_Button", 0x0000_0200),
];

/// Firmware layout with every button, HOME included, confirmed on hardware.
pub static STANDARD: Profile = Profile {
    name: "standard",
    description: "Standard layout, HOME mapped at 0x80",
    buttons: STANDARD_BUTTONS,
    actions: STANDARD_ACTIONS,
};

/// Same offsets as `standard`, but the HOME field has not been confirmed on hardware.
pub static HOME_UNTESTED: Profile = Profile {
    name: "home-untested",
    description: "Standard layout with HOME at 0x80 not tested on hardware",
    buttons: HOME_UNTESTED_BUTTONS,
    actions: HOME_UNTESTED_ACTIONS,
};

/// Every built-in profile, default first.
pub static BUILTIN: &[&Profile] = &[&STANDARD, &HOME_UNTESTED];

/// Look up a built-in profile by name (ASCII case-insensitive).
pub fn by_name(name: &str) -> Option<&'static Profile> {
    BUILTIN
        .iter()
        .copied()
        .find(|p| p.is_named(name))
}

/// The profile used when none is requested.
pub fn default_profile() -> &'static Profile {
    &STANDARD
}
