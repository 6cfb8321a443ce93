//! The property map: a small, copy-on-push mapping from short string keys
//! (control-word names, or synthetic keys like `family`, `q`, `ul`) to one of
//! an integer, a boolean, or a short string.
//!
//! Expected sizes are small (at most a few dozen live keys per group), so a
//! linear-scan `Vec` is both simpler and faster here than a hash map.

use std::borrow::Cow;

/// A property value: RTF control-word parameters are always one of these
/// three shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Int(i32),
    Bool(bool),
    Str(Cow<'static, str>),
}

impl PropValue {
    pub fn as_int(&self) -> Option<i32> {
        match self {
            PropValue::Int(v) => Some(*v),
            PropValue::Bool(b) => Some(if *b { 1 } else { 0 }),
            PropValue::Str(_) => None,
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            PropValue::Bool(b) => *b,
            PropValue::Int(v) => *v != 0,
            PropValue::Str(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Toggle property keys: present means true, an explicit `0` parameter clears.
pub const TOGGLE_KEYS: &[&str] = &[
    "b", "i", "ul", "strike", "caps", "scaps", "shad", "outl", "v", "deleted",
];

/// Keys cleared by `\pard`.
pub const PARAGRAPH_RESET_KEYS: &[&str] = &[
    "s",
    "hyphpar",
    "intbl",
    "keep",
    "nowidctlpar",
    "widctlpar",
    "keepn",
    "level",
    "noline",
    "outlinelevel",
    "pagebb",
    "sbys",
    "q",
    "fi",
    "li",
    "ri",
    "sb",
    "sa",
    "sl",
    "slmult",
    "subdocument",
    "rtlpar",
    "ltrpar",
];

/// Keys cleared by `\plain` (before `f` is reset to `deff`).
pub const CHARACTER_RESET_KEYS: &[&str] = &[
    "animtext",
    "charscalex",
    "dn",
    "embo",
    "impr",
    "sub",
    "expnd",
    "expndtw",
    "kerning",
    "f",
    "fs",
    "strikedl",
    "up",
    "super",
    "cf",
    "cb",
    "rtlch",
    "ltrch",
    "cs",
    "cchs",
    "lang",
    "b",
    "i",
    "ul",
    "strike",
    "caps",
    "scaps",
    "shad",
    "outl",
    "v",
    "deleted",
];

/// A copy-on-push bag of RTF properties, scoped to one group frame.
#[derive(Debug, Clone, Default)]
pub struct PropertyMap {
    entries: Vec<(Box<str>, PropValue)>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.entries.iter().find(|(k, _)| &**k == key).map(|(_, v)| v)
    }

    pub fn get_int(&self, key: &str, default: i32) -> i32 {
        self.get(key).and_then(PropValue::as_int).unwrap_or(default)
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).map(PropValue::as_bool).unwrap_or(false)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropValue::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| &**k == key)
    }

    /// Insert or overwrite `key`.
    pub fn set(&mut self, key: &str, value: PropValue) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| &**k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key.into(), value));
        }
    }

    pub fn set_int(&mut self, key: &str, value: i32) {
        self.set(key, PropValue::Int(value));
    }

    pub fn set_str(&mut self, key: &str, value: impl Into<Cow<'static, str>>) {
        self.set(key, PropValue::Str(value.into()));
    }

    /// Apply toggle semantics: `param == Some(0)` clears, anything else sets true.
    pub fn set_toggle(&mut self, key: &str, param: Option<i32>) {
        if param == Some(0) {
            self.remove(key);
        } else {
            self.set(key, PropValue::Bool(true));
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.entries.retain(|(k, _)| &**k != key);
    }

    /// Remove every key in `keys`.
    pub fn clear_keys(&mut self, keys: &[&str]) {
        self.entries.retain(|(k, _)| !keys.contains(&&**k));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_clears_on_zero_param() {
        let mut p = PropertyMap::new();
        p.set_toggle("b", None);
        assert!(p.get_bool("b"));
        p.set_toggle("b", Some(0));
        assert!(!p.contains("b"));
    }

    #[test]
    fn pard_clears_only_paragraph_keys() {
        let mut p = PropertyMap::new();
        p.set_int("q", 1);
        p.set_int("b", 1);
        p.clear_keys(PARAGRAPH_RESET_KEYS);
        assert!(!p.contains("q"));
        assert!(p.contains("b"));
    }

    #[test]
    fn copy_on_push_is_independent() {
        let mut parent = PropertyMap::new();
        parent.set_int("f", 2);
        let mut child = parent.clone();
        child.set_int("f", 5);
        assert_eq!(parent.get_int("f", 0), 2);
        assert_eq!(child.get_int("f", 0), 5);
    }
}
