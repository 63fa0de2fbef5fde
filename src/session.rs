use tracing::{debug, info, warn};

use crate::codec::{self, Diagnostic};
use crate::config::{ConfigDocument, Configuration};
use crate::error::SessionError;
use crate::profile::{ActionId, ButtonId, Profile};

/// File name used for exports when the loaded file's name is unknown.
pub const DEFAULT_FILE_NAME: &str = "gamepad_config.bin";

/// Session is responsible for:
/// - holding the original buffer, untouched, for as long as the file is open
/// - holding the decoded configuration and applying one-action edits to it
/// - encoding the edited configuration back onto the original for export
pub struct Session<'p> {
    profile: &'p Profile,
    original: Vec<u8>,
    decoded: Configuration,
    configuration: Configuration,
    diagnostics: Vec<Diagnostic>,
    file_name: String,
}

impl<'p> Session<'p> {
    /// Decode `bytes` with `profile` and start editing.
    pub fn open(bytes: Vec<u8>, file_name: Option<String>, profile: &'p Profile) -> Self {
        let decoded = codec::decode(&bytes, profile);
        for d in &decoded.diagnostics {
            debug!(target: "padmap::session", diagnostic = %d, "Decode diagnostic");
        }
        let file_name = file_name.unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());
        info!(
            target: "padmap::session",
            file = %file_name, len = bytes.len(), profile = profile.name,
            buttons = decoded.configuration.len(), diagnostics = decoded.diagnostics.len(),
            "Opened configuration file"
        );

        Self {
            profile,
            original: bytes,
            configuration: decoded.configuration.clone(),
            decoded: decoded.configuration,
            diagnostics: decoded.diagnostics,
            file_name,
        }
    }

    pub fn profile(&self) -> &'p Profile {
        self.profile
    }

    /// The bytes the session was opened with.
    pub fn original(&self) -> &[u8] {
        &self.original
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Diagnostics from decoding the original file and from applied documents.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Change the export file name. Blank names are ignored.
    pub fn set_file_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if name.trim().is_empty() {
            warn!(target: "padmap::session", "Ignoring empty file name");
            return;
        }
        self.file_name = name;
    }

    pub fn actions(&self, button: ButtonId) -> &[ActionId] {
        self.configuration.actions(button)
    }

    pub fn is_enabled(&self, button: ButtonId, action: ActionId) -> bool {
        self.configuration.has_action(button, action)
    }

    /// Enable or disable one action on one button. Returns true when something changed.
    ///
    /// Both identifiers must belong to the session's profile.
    pub fn set_action(
        &mut self,
        button: ButtonId,
        action: ActionId,
        enabled: bool,
    ) -> Result<bool, SessionError> {
        if self.profile.slot(button).is_none() {
            return Err(SessionError::UnmappedButton(button, self.profile.name));
        }
        if self.profile.flag(action).is_none() {
            return Err(SessionError::UnmappedAction(action, self.profile.name));
        }
        let changed = self.configuration.set_action(button, action, enabled);
        debug!(
            target: "padmap::session",
            %button, %action, enabled, changed,
            "Toggled action"
        );
        Ok(changed)
    }

    /// Merge an edit document into the current configuration.
    ///
    /// Buttons listed in the document replace their current action lists; others are kept.
    /// The document must name the session's profile. Returns the diagnostics for labels the
    /// profile does not know.
    pub fn apply_document(
        &mut self,
        doc: &ConfigDocument,
    ) -> Result<Vec<Diagnostic>, SessionError> {
        if !self.profile.is_named(&doc.profile) {
            return Err(SessionError::ProfileMismatch {
                document: doc.profile.clone(),
                session: self.profile.name,
            });
        }
        let (incoming, diagnostics) = Configuration::from_document(doc, self.profile);
        for (button, actions) in incoming.iter() {
            self.configuration.insert(button, actions.to_vec());
        }
        for d in &diagnostics {
            warn!(target: "padmap::session", diagnostic = %d, "Edit document entry ignored");
        }
        self.diagnostics.extend(diagnostics.iter().cloned());
        Ok(diagnostics)
    }

    /// Current configuration as an edit document.
    pub fn to_document(&self) -> ConfigDocument {
        self.configuration.to_document(self.profile)
    }

    /// True when exporting would write different field values than the decoded mapping.
    ///
    /// Action order within a field does not count, since the flags are OR-ed together.
    pub fn is_dirty(&self) -> bool {
        let field = |cfg: &Configuration, button: ButtonId| {
            cfg.contains(button)
                .then(|| self.profile.field_value(cfg.actions(button)))
        };
        self.profile.buttons.iter().any(|slot| {
            field(&self.configuration, slot.button) != field(&self.decoded, slot.button)
        })
    }

    /// Discard all edits.
    pub fn revert(&mut self) {
        self.configuration = self.decoded.clone();
    }

    /// Encode the current configuration onto a copy of the original bytes.
    pub fn export(&self) -> Result<Vec<u8>, SessionError> {
        if self.configuration.is_empty() {
            return Err(SessionError::NothingToExport);
        }
        let bytes = codec::encode(&self.configuration, &self.original, self.profile)?;
        info!(
            target: "padmap::session",
            file = %self.file_name, len = bytes.len(), dirty = self.is_dirty(),
            "Exported configuration"
        );
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ButtonEntry;
    use crate::error::CodecError;
    use crate::profile::{ActionFlag, ButtonSlot, STANDARD};

    const ONE_BUTTON: Profile = Profile {
        name: "one-button",
        description: "A only",
        buttons: &[ButtonSlot::new(ButtonId::A, 0x4C)],
        actions: &[
            ActionFlag::new(ActionId::A, 0x0020_0000),
            ActionFlag::new(ActionId::B, 0x0010_0000),
        ],
    };

    fn standard_file() -> Vec<u8> {
        let mut buf = vec![0xEEu8; STANDARD.min_len()];
        for slot in STANDARD.buttons {
            buf[slot.offset..slot.offset + 4].copy_from_slice(&[0, 0, 0, 0]);
        }
        buf[0x4C..0x50].copy_from_slice(&0x0020_0000u32.to_be_bytes());
        buf
    }

    #[test]
    fn test_open_uses_default_file_name() {
        let s = Session::open(standard_file(), None, &STANDARD);
        assert_eq!(s.file_name(), DEFAULT_FILE_NAME);
        assert_eq!(s.actions(ButtonId::A), &[ActionId::A]);
        assert!(s.diagnostics().is_empty());
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_set_file_name_ignores_blank() {
        let mut s = Session::open(standard_file(), Some("pad.bin".into()), &STANDARD);
        s.set_file_name("   ");
        assert_eq!(s.file_name(), "pad.bin");
        s.set_file_name("pad-edited.bin");
        assert_eq!(s.file_name(), "pad-edited.bin");
    }

    #[test]
    fn test_toggle_and_export() {
        let original = standard_file();
        let mut s = Session::open(original.clone(), None, &STANDARD);

        assert!(s.set_action(ButtonId::A, ActionId::A, false).unwrap());
        assert!(s.set_action(ButtonId::A, ActionId::B, true).unwrap());
        assert!(!s.set_action(ButtonId::A, ActionId::B, true).unwrap());
        assert!(s.is_enabled(ButtonId::A, ActionId::B));
        assert!(s.is_dirty());

        let out = s.export().unwrap();
        assert_eq!(&out[0x4C..0x50], &[0x00, 0x10, 0x00, 0x00]);
        assert_eq!(&out[..0x4C], &original[..0x4C]);
        assert_eq!(&out[0x50..], &original[0x50..]);
        assert_eq!(s.original(), original.as_slice());

        s.revert();
        assert!(!s.is_dirty());
        assert_eq!(s.export().unwrap(), original);
    }

    #[test]
    fn test_reordered_actions_are_not_dirty() {
        let mut original = standard_file();
        original[0x4C..0x50].copy_from_slice(&0x0030_0000u32.to_be_bytes());
        let mut s = Session::open(original.clone(), None, &STANDARD);
        assert_eq!(s.actions(ButtonId::A), &[ActionId::A, ActionId::B]);

        assert!(s.set_action(ButtonId::A, ActionId::A, false).unwrap());
        assert!(s.is_dirty());
        assert!(s.set_action(ButtonId::A, ActionId::A, true).unwrap());
        assert_eq!(s.actions(ButtonId::A), &[ActionId::B, ActionId::A]);
        assert!(!s.is_dirty());
        assert_eq!(s.export().unwrap(), original);
    }

    #[test]
    fn test_apply_document_rejects_other_profile() {
        let mut s = Session::open(standard_file(), None, &STANDARD);
        let doc = ConfigDocument {
            profile: "home-untested".into(),
            buttons: vec![ButtonEntry {
                button: "A".into(),
                actions: vec!["B".into()],
            }],
        };
        assert_eq!(
            s.apply_document(&doc),
            Err(SessionError::ProfileMismatch {
                document: "home-untested".into(),
                session: "standard"
            })
        );
        assert_eq!(s.actions(ButtonId::A), &[ActionId::A]);
        assert!(!s.is_dirty());

        let doc = ConfigDocument {
            profile: "STANDARD".into(),
            ..doc
        };
        assert!(s.apply_document(&doc).unwrap().is_empty());
        assert_eq!(s.actions(ButtonId::A), &[ActionId::B]);
    }

    #[test]
    fn test_set_action_rejects_unmapped_ids() {
        let mut s = Session::open(vec![0; 0x50], None, &ONE_BUTTON);
        assert_eq!(
            s.set_action(ButtonId::Home, ActionId::A, true),
            Err(SessionError::UnmappedButton(ButtonId::Home, "one-button"))
        );
        assert_eq!(
            s.set_action(ButtonId::A, ActionId::HomeButton, true),
            Err(SessionError::UnmappedAction(ActionId::HomeButton, "one-button"))
        );
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_export_requires_a_mapping() {
        let empty = Profile {
            name: "empty",
            description: "",
            buttons: &[],
            actions: &[],
        };
        let s = Session::open(vec![1, 2, 3], None, &empty);
        assert_eq!(s.export(), Err(SessionError::NothingToExport));
    }

    #[test]
    fn test_export_fails_on_short_file() {
        // Truncated fields decode as empty entries; writing the first of them back fails.
        let mut s = Session::open(vec![0; 0x90], None, &STANDARD);
        assert!(!s.diagnostics().is_empty());
        s.set_action(ButtonId::R4, ActionId::A, true).unwrap();
        assert_eq!(
            s.export(),
            Err(SessionError::Codec(CodecError::OffsetOutOfRange {
                button: ButtonId::RightDpad,
                offset: 0x90,
                len: 0x90
            }))
        );
    }

    #[test]
    fn test_apply_document_merges() {
        let mut s = Session::open(standard_file(), None, &STANDARD);
        let doc = ConfigDocument {
            profile: "standard".into(),
            buttons: vec![
                ButtonEntry {
                    button: "B".into(),
                    actions: vec!["A".into(), "nope".into()],
                },
                ButtonEntry {
                    button: "TURBO".into(),
                    actions: vec![],
                },
            ],
        };
        let diagnostics = s.apply_document(&doc).unwrap();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(s.diagnostics().len(), 2);
        assert_eq!(s.actions(ButtonId::A), &[ActionId::A]);
        assert_eq!(s.actions(ButtonId::B), &[ActionId::A]);

        let round = s.to_document();
        assert_eq!(round.buttons.len(), STANDARD.buttons.len());
        assert_eq!(round.buttons[1].actions, vec!["A".to_string()]);
    }
}
