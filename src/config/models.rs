use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

use crate::codec::Diagnostic;
use crate::profile::{ActionId, ButtonId, DEFAULT_PROFILE, Profile};

/// Decoded, editable mapping of buttons to the actions they fire.
///
/// Buttons iterate in the order they were first inserted; the decoder inserts them in
/// offset-table order. Each action list is free of duplicates and keeps the order actions were
/// added in. Equality compares the mapping and ignores button order.
#[derive(Debug, Clone, Default, Eq)]
pub struct Configuration {
    buttons: Vec<(ButtonId, Vec<ActionId>)>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, button: ButtonId) -> Option<&Vec<ActionId>> {
        self.buttons
            .iter()
            .find(|(b, _)| *b == button)
            .map(|(_, actions)| actions)
    }

    fn entry_mut(&mut self, button: ButtonId) -> Option<&mut Vec<ActionId>> {
        self.buttons
            .iter_mut()
            .find(|(b, _)| *b == button)
            .map(|(_, actions)| actions)
    }

    /// Replace a button's action list. Duplicates are dropped, first occurrence wins.
    ///
    /// A button already present keeps its position.
    pub fn insert(&mut self, button: ButtonId, actions: Vec<ActionId>) -> Option<Vec<ActionId>> {
        let mut deduped = Vec::with_capacity(actions.len());
        for action in actions {
            if !deduped.contains(&action) {
                deduped.push(action);
            }
        }
        match self.entry_mut(button) {
            Some(existing) => Some(std::mem::replace(existing, deduped)),
            None => {
                self.buttons.push((button, deduped));
                None
            }
        }
    }

    /// Drop a button entirely (the encoder then leaves its field untouched).
    pub fn remove(&mut self, button: ButtonId) -> Option<Vec<ActionId>> {
        let idx = self.buttons.iter().position(|(b, _)| *b == button)?;
        Some(self.buttons.remove(idx).1)
    }

    /// Actions of a button; empty when the button has no entry.
    pub fn actions(&self, button: ButtonId) -> &[ActionId] {
        self.entry(button).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, button: ButtonId) -> bool {
        self.entry(button).is_some()
    }

    pub fn has_action(&self, button: ButtonId, action: ActionId) -> bool {
        self.actions(button).contains(&action)
    }

    /// Append an action. Returns false if it was already present.
    pub fn add_action(&mut self, button: ButtonId, action: ActionId) -> bool {
        let idx = match self.buttons.iter().position(|(b, _)| *b == button) {
            Some(idx) => idx,
            None => {
                self.buttons.push((button, Vec::new()));
                self.buttons.len() - 1
            }
        };
        let actions = &mut self.buttons[idx].1;
        if actions.contains(&action) {
            return false;
        }
        actions.push(action);
        true
    }

    /// Remove an action. Returns false if it was not present.
    ///
    /// The button keeps an (possibly empty) entry, so its field is still rewritten on encode.
    pub fn remove_action(&mut self, button: ButtonId, action: ActionId) -> bool {
        let Some(actions) = self.entry_mut(button) else {
            return false;
        };
        let before = actions.len();
        actions.retain(|a| *a != action);
        actions.len() != before
    }

    /// Checkbox-style toggle. Returns true when the configuration changed.
    pub fn set_action(&mut self, button: ButtonId, action: ActionId, enabled: bool) -> bool {
        if enabled {
            self.add_action(button, action)
        } else {
            self.remove_action(button, action)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ButtonId, &[ActionId])> + '_ {
        self.buttons.iter().map(|(b, a)| (*b, a.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Resolve an edit document against `profile`.
    ///
    /// Labels the profile does not know are skipped and reported, never fatal.
    pub fn from_document(doc: &ConfigDocument, profile: &Profile) -> (Self, Vec<Diagnostic>) {
        let mut cfg = Self::new();
        let mut diagnostics = Vec::new();

        for entry in &doc.buttons {
            let Some(button) = profile.resolve_button(&entry.button) else {
                diagnostics.push(Diagnostic::UnknownButton {
                    label: entry.button.clone(),
                });
                continue;
            };
            let mut actions = Vec::with_capacity(entry.actions.len());
            for label in &entry.actions {
                match profile.resolve_action(label) {
                    Some(action) => actions.push(action),
                    None => diagnostics.push(Diagnostic::UnknownAction {
                        button,
                        label: label.clone(),
                    }),
                }
            }
            cfg.insert(button, actions);
        }

        (cfg, diagnostics)
    }

    /// Build the edit document, listing buttons in `profile` offset-table order.
    ///
    /// Buttons the profile does not map are left out.
    pub fn to_document(&self, profile: &Profile) -> ConfigDocument {
        let buttons = profile
            .buttons
            .iter()
            .filter(|slot| self.contains(slot.button))
            .map(|slot| ButtonEntry {
                button: slot.button.label().to_string(),
                actions: self
                    .actions(slot.button)
                    .iter()
                    .map(|a| profile.action_label(*a).to_string())
                    .collect(),
            })
            .collect();

        ConfigDocument {
            profile: profile.name.to_string(),
            buttons,
        }
    }
}

impl PartialEq for Configuration {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(button, actions)| other.entry(button).is_some_and(|o| o == actions))
    }
}

impl FromIterator<(ButtonId, Vec<ActionId>)> for Configuration {
    fn from_iter<T: IntoIterator<Item = (ButtonId, Vec<ActionId>)>>(iter: T) -> Self {
        let mut cfg = Self::new();
        for (button, actions) in iter {
            cfg.insert(button, actions);
        }
        cfg
    }
}

/// JSON edit document: the serializable form of a [`Configuration`].
///
/// Example:
/// `{ "profile": "standard", "buttons": [ { "button": "A", "actions": ["A", "LB_BUTTON"] } ] }`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate, PartialEq, Eq)]
pub struct ConfigDocument {
    /// Name of the device profile the labels refer to.
    #[serde(default = "default_profile_name")]
    #[validate(min_length = 1)]
    pub profile: String,

    /// Per-button action lists. Buttons left out keep their field untouched on save.
    #[serde(default)]
    pub buttons: Vec<ButtonEntry>,
}

fn default_profile_name() -> String {
    DEFAULT_PROFILE.to_string()
}

/// One button and the actions it fires.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate, PartialEq, Eq)]
pub struct ButtonEntry {
    /// Button label, e.g. "A", "LB", "UP DPAD".
    #[validate(min_length = 1)]
    pub button: String,

    /// Action labels, e.g. "A", "LB_BUTTON", "LEFT_DPAD".
    #[serde(default)]
    pub actions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{HOME_UNTESTED, STANDARD};
    use serde_json::json;

    #[test]
    fn test_insert_dedups_keeping_first() {
        let mut cfg = Configuration::new();
        cfg.insert(
            ButtonId::A,
            vec![ActionId::B, ActionId::A, ActionId::B, ActionId::Y],
        );
        assert_eq!(
            cfg.actions(ButtonId::A),
            &[ActionId::B, ActionId::A, ActionId::Y]
        );
    }

    #[test]
    fn test_toggle_actions() {
        let mut cfg = Configuration::new();
        assert!(cfg.set_action(ButtonId::Lb, ActionId::LbButton, true));
        assert!(!cfg.set_action(ButtonId::Lb, ActionId::LbButton, true));
        assert!(cfg.add_action(ButtonId::Lb, ActionId::A));
        assert_eq!(
            cfg.actions(ButtonId::Lb),
            &[ActionId::LbButton, ActionId::A]
        );

        assert!(cfg.set_action(ButtonId::Lb, ActionId::LbButton, false));
        assert!(!cfg.remove_action(ButtonId::Lb, ActionId::LbButton));
        assert!(!cfg.remove_action(ButtonId::Rb, ActionId::LbButton));
        assert!(cfg.remove_action(ButtonId::Lb, ActionId::A));
        // Entry stays, now empty
        assert!(cfg.contains(ButtonId::Lb));
        assert!(cfg.actions(ButtonId::Lb).is_empty());
        assert!(!cfg.contains(ButtonId::Rb));
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut cfg: Configuration = [
            (ButtonId::R4, vec![]),
            (ButtonId::A, vec![ActionId::A]),
            (ButtonId::Home, vec![]),
        ]
        .into_iter()
        .collect();
        // Replacing an entry keeps its position
        cfg.insert(ButtonId::A, vec![ActionId::B]);
        cfg.add_action(ButtonId::Lb, ActionId::LbButton);
        let order: Vec<_> = cfg.iter().map(|(b, _)| b).collect();
        assert_eq!(
            order,
            vec![ButtonId::R4, ButtonId::A, ButtonId::Home, ButtonId::Lb]
        );

        assert_eq!(cfg.remove(ButtonId::A), Some(vec![ActionId::B]));
        assert_eq!(cfg.remove(ButtonId::A), None);
        assert_eq!(cfg.len(), 3);
    }

    #[test]
    fn test_equality_ignores_button_order() {
        let forward: Configuration = [(ButtonId::A, vec![ActionId::A]), (ButtonId::B, vec![])]
            .into_iter()
            .collect();
        let backward: Configuration = [(ButtonId::B, vec![]), (ButtonId::A, vec![ActionId::A])]
            .into_iter()
            .collect();
        assert_eq!(forward, backward);

        let other: Configuration = [(ButtonId::B, vec![]), (ButtonId::A, vec![ActionId::B])]
            .into_iter()
            .collect();
        assert_ne!(forward, other);
    }

    #[test]
    fn test_document_round_trip() {
        let mut cfg = Configuration::new();
        cfg.insert(ButtonId::UpDpad, vec![ActionId::UpDpad, ActionId::LeftDpad]);
        cfg.insert(ButtonId::A, vec![ActionId::B]);

        let doc = cfg.to_document(&STANDARD);
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({
                "profile": "standard",
                "buttons": [
                    { "button": "A", "actions": ["B"] },
                    { "button": "UP DPAD", "actions": ["UP_DPAD", "LEFT_DPAD"] }
                ]
            })
        );

        let (back, diagnostics) = Configuration::from_document(&doc, &STANDARD);
        assert!(diagnostics.is_empty());
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_from_document_skips_unknown_labels() {
        let doc: ConfigDocument = serde_json::from_value(json!({
            "buttons": [
                { "button": "turbo", "actions": ["A"] },
                { "button": "lb", "actions": ["lb_button", "JUMP", "LB_BUTTON"] }
            ]
        }))
        .unwrap();
        assert_eq!(doc.profile, "standard");

        let (cfg, diagnostics) = Configuration::from_document(&doc, &STANDARD);
        assert_eq!(cfg.len(), 1);
        assert_eq!(cfg.actions(ButtonId::Lb), &[ActionId::LbButton]);
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::UnknownButton {
                    label: "turbo".into()
                },
                Diagnostic::UnknownAction {
                    button: ButtonId::Lb,
                    label: "JUMP".into()
                },
            ]
        );
    }

    #[test]
    fn test_home_untested_uses_its_own_label() {
        let mut cfg = Configuration::new();
        cfg.insert(ButtonId::Home, vec![ActionId::HomeButton]);
        let doc = cfg.to_document(&HOME_UNTESTED);
        assert_eq!(doc.profile, "home-untested");
        assert_eq!(doc.buttons[0].actions, vec!["Home_Button".to_string()]);
    }

    #[test]
    fn test_document_validation() {
        let doc = ConfigDocument {
            profile: String::new(),
            buttons: vec![ButtonEntry {
                button: String::new(),
                actions: vec![],
            }],
        };
        assert!(doc.validate().is_err());
        assert!(doc.buttons[0].validate().is_err());

        let doc = Configuration::new().to_document(&STANDARD);
        assert!(doc.validate().is_ok());
    }
}
