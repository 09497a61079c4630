use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        /// UUID as handed out by the API. The empty id means "nothing selected".
        #[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn from_str(s: impl Into<String>) -> Self {
                Self(s.into())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(AuditId);
id_newtype!(ScanId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_id_is_empty() {
        assert!(AuditId::default().is_empty());
        assert!(!AuditId::from_str("a1").is_empty());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&ScanId::from_str("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
    }
}
