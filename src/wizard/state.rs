use super::tabs::{TabKey, TabState, ALL_TABS};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    Create,
    Edit,
}

impl WizardAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim() {
            "" | "create" => Ok(Self::Create),
            "edit" => Ok(Self::Edit),
            other => Err(format!("wizard action must be create|edit (got `{other}`)")),
        }
    }
}

/// Tab bookkeeping for one wizard. Every `TabKey` is always present in
/// `tabs`, so `active_tab` can never point outside the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    action: WizardAction,
    active_tab: TabKey,
    tabs: BTreeMap<TabKey, TabState>,
}

impl WizardState {
    pub fn new(action: WizardAction) -> Self {
        let mut tabs: BTreeMap<TabKey, TabState> = ALL_TABS
            .iter()
            .map(|key| (*key, TabState::new(*key)))
            .collect();

        for (key, tab) in tabs.iter_mut() {
            match action {
                WizardAction::Create => {
                    tab.disabled = *key != TabKey::General;
                }
                WizardAction::Edit => {
                    if matches!(key, TabKey::Template | TabKey::Confirmation) {
                        tab.visible = false;
                    }
                    tab.disabled = !tab.visible;
                }
            }
        }

        Self {
            action,
            active_tab: TabKey::General,
            tabs,
        }
    }

    pub fn action(&self) -> WizardAction {
        self.action
    }

    pub fn active_tab(&self) -> TabKey {
        self.active_tab
    }

    pub fn tab(&self, key: TabKey) -> &TabState {
        self.tabs
            .get(&key)
            .unwrap_or_else(|| unreachable!("wizard state holds every tab"))
    }

    pub fn tabs(&self) -> impl Iterator<Item = (TabKey, &TabState)> {
        self.tabs.iter().map(|(key, tab)| (*key, tab))
    }

    pub fn visible_tabs(&self) -> impl Iterator<Item = TabKey> + '_ {
        self.tabs
            .iter()
            .filter(|(_, tab)| tab.visible)
            .map(|(key, _)| *key)
    }

    /// Applies `change` to one tab; the single mutation path for tab state.
    pub fn update<F>(&mut self, key: TabKey, change: F)
    where
        F: FnOnce(&mut TabState),
    {
        if let Some(tab) = self.tabs.get_mut(&key) {
            change(tab);
        }
    }

    pub fn set_visible(&mut self, key: TabKey, visible: bool) {
        self.update(key, |tab| {
            tab.visible = visible;
            if !visible {
                tab.disabled = true;
            }
        });
    }

    pub(crate) fn activate(&mut self, key: TabKey) {
        self.active_tab = key;
        self.update(key, |tab| tab.disabled = false);
    }

    pub fn next_visible(&self, key: TabKey) -> Option<TabKey> {
        self.visible_tabs().find(|candidate| *candidate > key)
    }

    pub fn previous_visible(&self, key: TabKey) -> Option<TabKey> {
        self.visible_tabs()
            .filter(|candidate| *candidate < key)
            .last()
    }

    /// First visible tab strictly before `target` that is not validated.
    pub fn first_unvalidated_before(&self, target: TabKey) -> Option<TabKey> {
        self.tabs
            .iter()
            .take_while(|(key, _)| **key < target)
            .find(|(_, tab)| tab.visible && !tab.validated)
            .map(|(key, _)| *key)
    }
}
