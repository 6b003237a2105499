use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// An interned symptom identifier. Cloning only bumps a reference count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symptom(Arc<str>);

impl Symptom {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Symptom {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Symptom {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symptom {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symptom {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&Symptom> for Symptom {
    fn from(symptom: &Symptom) -> Self {
        symptom.clone()
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl serde::Serialize for Symptom {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_lookup_by_str() {
        let mut index = HashMap::new();
        index.insert(Symptom::new("fever"), 3usize);
        assert_eq!(index.get("fever"), Some(&3));
        assert_eq!(index.get("chills"), None);
    }

    #[test]
    fn test_clones_share_storage() {
        let a = Symptom::new("nausea");
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.0, &b.0));
        assert_eq!(a, Symptom::from("nausea".to_string()));
    }
}
