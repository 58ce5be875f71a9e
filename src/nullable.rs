use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An optional document field that remembers whether it was absent or `null`
///
/// Pair it with `#[serde(default, skip_serializing_if = "Nullable::is_absent")]`
/// so a key missing on input stays missing on output and an explicit `null`
/// is written back as `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nullable<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Nullable<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Nullable::Absent)
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Nullable::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Nullable::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl Nullable<String> {
    pub fn as_deref(&self) -> Option<&str> {
        self.as_option().map(String::as_str)
    }
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Nullable::Absent
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Nullable::Value(value),
            None => Nullable::Absent,
        }
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nullable::Value(value) => value.serialize(serializer),
            Nullable::Absent | Nullable::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Only reached when the key is present; absence comes from `default`
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Nullable::Value(value),
            None => Nullable::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Holder {
        #[serde(default, skip_serializing_if = "Nullable::is_absent")]
        status: Nullable<String>,
    }

    #[test]
    fn test_three_states_survive() {
        for value in [json!({}), json!({"status": null}), json!({"status": "Ready"})] {
            let holder: Holder = serde_json::from_value(value.clone()).unwrap();
            assert_eq!(serde_json::to_value(&holder).unwrap(), value);
        }
    }

    #[test]
    fn test_option_views() {
        let value: Nullable<String> = Some("OCI".to_string()).into();
        assert_eq!(value.as_deref(), Some("OCI"));
        assert_eq!(Nullable::<String>::Null.as_deref(), None);
        assert!(Nullable::<String>::from(None).is_absent());
        assert_eq!(Nullable::Value(3).into_option(), Some(3));
    }
}
