use std::fmt;

/// Connection string of the first detected camera
pub const DEFAULT_CAMERA: &str = "cam://0";

/// Property holding the exposure time, reported after settings are loaded
pub const INTEGRATION_TIME: &str = "IntegrationTime";

/// Property read for the device temperature unless told otherwise
pub const DEFAULT_TEMPERATURE_PROPERTY: &str = "Temperature";

/// Property values of a camera at one point in time, in SDK order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationSnapshot {
    entries: Vec<(String, String)>,
}

impl ConfigurationSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for ConfigurationSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ConfigurationSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.entries.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
        for (name, value) in &self.entries {
            writeln!(f, "- {name:<width$} : {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_and_display() {
        let mut snapshot = ConfigurationSnapshot::new();
        snapshot.push(INTEGRATION_TIME, "32");
        snapshot.push("Width", "640");

        assert_eq!(snapshot.get(INTEGRATION_TIME), Some("32"));
        assert_eq!(snapshot.get("Gain"), None);
        assert_eq!(snapshot.len(), 2);

        let text = snapshot.to_string();
        assert_eq!(text, "- IntegrationTime : 32\n- Width           : 640\n");
    }
}
