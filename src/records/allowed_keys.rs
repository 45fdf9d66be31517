use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedKeyRecord {
    #[serde(default)]
    pub issuer: String,
    #[serde(default, rename = "serial")]
    pub serial_number: String,
    #[serde(default = "default_removable")]
    pub removable: bool,
}

fn default_removable() -> bool {
    true
}

impl AllowedKeyRecord {
    pub fn blank(removable: bool) -> Self {
        Self {
            issuer: String::new(),
            serial_number: String::new(),
            removable,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.issuer.is_empty() && !self.serial_number.is_empty()
    }
}

/// Signing keys allowed to act for the registry. The seed entry cannot be
/// removed so the list never ends up empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedKeyList {
    records: Vec<AllowedKeyRecord>,
}

impl Default for AllowedKeyList {
    fn default() -> Self {
        Self {
            records: vec![AllowedKeyRecord::blank(false)],
        }
    }
}

impl AllowedKeyList {
    pub fn from_records(records: Vec<AllowedKeyRecord>) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let mut records = records;
        records[0].removable = false;
        Self { records }
    }

    pub fn add(&mut self) -> usize {
        self.records.push(AllowedKeyRecord::blank(true));
        self.records.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> bool {
        match self.records.get(index) {
            Some(record) if record.removable => {
                self.records.remove(index);
                true
            }
            _ => false,
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut AllowedKeyRecord> {
        self.records.get_mut(index)
    }

    pub fn records(&self) -> &[AllowedKeyRecord] {
        &self.records
    }

    pub fn incomplete_indices(&self) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| !record.is_complete())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn to_wire(&self) -> String {
        #[derive(Serialize)]
        struct WireKey<'a> {
            issuer: &'a str,
            serial: &'a str,
        }
        let wire: Vec<WireKey<'_>> = self
            .records
            .iter()
            .map(|record| WireKey {
                issuer: &record.issuer,
                serial: &record.serial_number,
            })
            .collect();
        serde_json::to_string(&wire).unwrap_or_else(|_| "[]".to_string())
    }
}
