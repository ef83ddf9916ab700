//! Per-visitor "already seen" flags for engagement widgets.
//!
//! Flags are read from their store once when the session starts and written
//! back only when the visitor dismisses the widget.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum SessionFlag {
    ExitIntentShown,
    ShortcutsSeen,
}

impl SessionFlag {
    pub const ALL: [SessionFlag; 2] = [Self::ExitIntentShown, Self::ShortcutsSeen];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExitIntentShown => "exit-intent-shown",
            Self::ShortcutsSeen => "shortcuts-seen",
        }
    }
}

impl std::str::FromStr for SessionFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown session flag: {}", s))
    }
}

pub trait FlagStore {
    fn read(&self, flag: SessionFlag) -> bool;
    fn write(&mut self, flag: SessionFlag);
}

#[derive(Debug, Default, Clone)]
pub struct SessionFlags {
    set: HashSet<SessionFlag>,
}

impl SessionFlags {
    pub fn load(store: &impl FlagStore) -> Self {
        let set = SessionFlag::ALL
            .into_iter()
            .filter(|f| store.read(*f))
            .collect();
        Self { set }
    }

    pub fn is_set(&self, flag: SessionFlag) -> bool {
        self.set.contains(&flag)
    }

    pub fn should_show(&self, flag: SessionFlag) -> bool {
        !self.is_set(flag)
    }

    /// Returns `false` if the flag was already set; the store is not touched
    /// again in that case.
    pub fn dismiss(&mut self, flag: SessionFlag, store: &mut impl FlagStore) -> bool {
        if !self.set.insert(flag) {
            return false;
        }
        store.write(flag);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemoryFlagStore {
        set: HashSet<SessionFlag>,
        writes: usize,
    }

    impl FlagStore for MemoryFlagStore {
        fn read(&self, flag: SessionFlag) -> bool {
            self.set.contains(&flag)
        }

        fn write(&mut self, flag: SessionFlag) {
            self.writes += 1;
            self.set.insert(flag);
        }
    }

    #[test]
    fn dismiss_writes_once() {
        let mut store = MemoryFlagStore::default();
        let mut flags = SessionFlags::load(&store);
        assert!(flags.should_show(SessionFlag::ExitIntentShown));

        assert!(flags.dismiss(SessionFlag::ExitIntentShown, &mut store));
        assert!(!flags.dismiss(SessionFlag::ExitIntentShown, &mut store));
        assert_eq!(store.writes, 1);

        let reloaded = SessionFlags::load(&store);
        assert!(!reloaded.should_show(SessionFlag::ExitIntentShown));
        assert!(reloaded.should_show(SessionFlag::ShortcutsSeen));
    }

    #[test]
    fn parses_flag_names() {
        assert_eq!(
            "shortcuts-seen".parse::<SessionFlag>(),
            Ok(SessionFlag::ShortcutsSeen)
        );
        assert!("newsletter".parse::<SessionFlag>().is_err());
    }
}
