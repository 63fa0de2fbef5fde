use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Physical controls that own a field in the configuration file.
///
/// Declaration order is the order buttons are listed in decoded output.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ButtonId {
    A,
    B,
    X,
    Y,
    Lb,
    Rb,
    Lt,
    Rt,
    L3,
    R3,
    Back,
    Menu,
    Home,
    UpDpad,
    DownDpad,
    LeftDpad,
    RightDpad,
    Pr,
    Pl,
    L4,
    R4,
}

impl ButtonId {
    /// All button identifiers in declaration order.
    pub const ALL: &'static [ButtonId] = &[
        ButtonId::A,
        ButtonId::B,
        ButtonId::X,
        ButtonId::Y,
        ButtonId::Lb,
        ButtonId::Rb,
        ButtonId::Lt,
        ButtonId::Rt,
        ButtonId::L3,
        ButtonId::R3,
        ButtonId::Back,
        ButtonId::Menu,
        ButtonId::Home,
        ButtonId::UpDpad,
        ButtonId::DownDpad,
        ButtonId::LeftDpad,
        ButtonId::RightDpad,
        ButtonId::Pr,
        ButtonId::Pl,
        ButtonId::L4,
        ButtonId::R4,
    ];

    /// Canonical label, as printed on the editor and stored in edit documents.
    pub const fn label(self) -> &'static str {
        match self {
            ButtonId::A => "A",
            ButtonId::B => "B",
            ButtonId::X => "X",
            ButtonId::Y => "Y",
            ButtonId::Lb => "LB",
            ButtonId::Rb => "RB",
            ButtonId::Lt => "LT",
            ButtonId::Rt => "RT",
            ButtonId::L3 => "L3",
            ButtonId::R3 => "R3",
            ButtonId::Back => "BACK",
            ButtonId::Menu => "MENU",
            ButtonId::Home => "HOME",
            ButtonId::UpDpad => "UP DPAD",
            ButtonId::DownDpad => "DOWN DPAD",
            ButtonId::LeftDpad => "LEFT DPAD",
            ButtonId::RightDpad => "RIGHT DPAD",
            ButtonId::Pr => "PR",
            ButtonId::Pl => "PL",
            ButtonId::L4 => "L4",
            ButtonId::R4 => "R4",
        }
    }
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ButtonId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ButtonId::ALL
            .iter()
            .copied()
            .find(|b| labels_match(b.label(), s))
            .ok_or_else(|| ParseIdError::Button(s.to_string()))
    }
}

/// Logical actions a button press can trigger.
///
/// Separate namespace from [`ButtonId`]: the `A` button may fire the `B` action.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionId {
    Y,
    X,
    A,
    B,
    RightDpad,
    LeftDpad,
    DownDpad,
    UpDpad,
    L3Click,
    LbButton,
    LtTrigger,
    RbButton,
    RtTrigger,
    BackButton,
    R3Click,
    MenuButton,
    HomeButton,
}

impl ActionId {
    /// All action identifiers in declaration order.
    pub const ALL: &'static [ActionId] = &[
        ActionId::Y,
        ActionId::X,
        ActionId::A,
        ActionId::B,
        ActionId::RightDpad,
        ActionId::LeftDpad,
        ActionId::DownDpad,
        ActionId::UpDpad,
        ActionId::L3Click,
        ActionId::LbButton,
        ActionId::LtTrigger,
        ActionId::RbButton,
        ActionId::RtTrigger,
        ActionId::BackButton,
        ActionId::R3Click,
        ActionId::MenuButton,
        ActionId::HomeButton,
    ];

    /// Canonical label.
    pub const fn label(self) -> &'static str {
        match self {
            ActionId::Y => "Y",
            ActionId::X => "X",
            ActionId::A => "A",
            ActionId::B => "B",
            ActionId::RightDpad => "RIGHT_DPAD",
            ActionId::LeftDpad => "LEFT_DPAD",
            ActionId::DownDpad => "DOWN_DPAD",
            ActionId::UpDpad => "UP_DPAD",
            ActionId::L3Click => "L3_CLICK",
            ActionId::LbButton => "LB_BUTTON",
            ActionId::LtTrigger => "LT_TRIGGER",
            ActionId::RbButton => "RB_BUTTON",
            ActionId::RtTrigger => "RT_TRIGGER",
            ActionId::BackButton => "BACK_BUTTON",
            ActionId::R3Click => "R3_CLICK",
            ActionId::MenuButton => "MENU_BUTTON",
            ActionId::HomeButton => "HOME_BUTTON",
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionId::ALL
            .iter()
            .copied()
            .find(|a| labels_match(a.label(), s))
            .ok_or_else(|| ParseIdError::Action(s.to_string()))
    }
}

/// Label that names no known identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseIdError {
    #[error("unknown button: \"{0}\"")]
    Button(String),

    #[error("unknown action: \"{0}\"")]
    Action(String),
}

/// Compare labels ignoring ASCII case and treating `_` and ` ` as the same character,
/// so `UP_DPAD`, `up dpad` and `UP DPAD` all name the same control.
pub fn labels_match(label: &str, input: &str) -> bool {
    let norm = |c: char| if c == '_' { ' ' } else { c.to_ascii_uppercase() };
    let input = input.trim();
    label.len() == input.len() && label.chars().map(norm).eq(input.chars().map(norm))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_through_from_str() {
        for b in ButtonId::ALL {
            assert_eq!(b.label().parse::<ButtonId>().unwrap(), *b);
        }
        for a in ActionId::ALL {
            assert_eq!(a.label().parse::<ActionId>().unwrap(), *a);
        }
    }

    #[test]
    fn test_lenient_label_matching() {
        assert_eq!("up_dpad".parse::<ButtonId>().unwrap(), ButtonId::UpDpad);
        assert_eq!(" lb ".parse::<ButtonId>().unwrap(), ButtonId::Lb);
        assert_eq!("home_button".parse::<ActionId>().unwrap(), ActionId::HomeButton);
        assert_eq!("Left Dpad".parse::<ActionId>().unwrap(), ActionId::LeftDpad);
    }

    #[test]
    fn test_unknown_labels() {
        assert_eq!(
            "TURBO".parse::<ButtonId>(),
            Err(ParseIdError::Button("TURBO".into()))
        );
        assert!("LB".parse::<ActionId>().is_err());
        assert!("".parse::<ButtonId>().is_err());
    }

    #[test]
    fn test_button_order_follows_declaration() {
        let mut sorted = ButtonId::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, ButtonId::ALL);
    }
}
