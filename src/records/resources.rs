use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceCategory {
    Kong,
    Bpms,
    DigitalSignatureOps,
    UserTaskManagement,
    UserProcessManagement,
    DigitalDocumentService,
    RestApi,
    KafkaApi,
    SoapApi,
}

pub const ALL_RESOURCE_CATEGORIES: [ResourceCategory; 9] = [
    ResourceCategory::Kong,
    ResourceCategory::Bpms,
    ResourceCategory::DigitalSignatureOps,
    ResourceCategory::UserTaskManagement,
    ResourceCategory::UserProcessManagement,
    ResourceCategory::DigitalDocumentService,
    ResourceCategory::RestApi,
    ResourceCategory::KafkaApi,
    ResourceCategory::SoapApi,
];

impl ResourceCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kong => "kong",
            Self::Bpms => "bpms",
            Self::DigitalSignatureOps => "digitalSignatureOps",
            Self::UserTaskManagement => "userTaskManagement",
            Self::UserProcessManagement => "userProcessManagement",
            Self::DigitalDocumentService => "digitalDocumentService",
            Self::RestApi => "restApi",
            Self::KafkaApi => "kafkaApi",
            Self::SoapApi => "soapApi",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        ALL_RESOURCE_CATEGORIES
            .iter()
            .copied()
            .find(|category| category.as_str() == raw)
            .ok_or_else(|| format!("unknown resource category `{raw}`"))
    }
}

/// Configuration tree. Numbers and arrays keep their JSON value so they go
/// back to the backend with the type they arrived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigNode {
    Text(String),
    Switch(bool),
    Number(Number),
    List(Vec<Value>),
    Object(BTreeMap<String, ConfigNode>),
}

impl ConfigNode {
    fn object<const N: usize>(entries: [(&str, ConfigNode); N]) -> Self {
        Self::Object(
            entries
                .into_iter()
                .map(|(key, node)| (key.to_string(), node))
                .collect(),
        )
    }

    fn empty_text() -> Self {
        Self::Text(String::new())
    }

    /// Converts JSON into a tree. Nulls are dropped.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(flag) => Some(Self::Switch(*flag)),
            Value::Number(number) => Some(Self::Number(number.clone())),
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Array(items) => Some(Self::List(items.clone())),
            Value::Object(map) => Some(Self::Object(
                map.iter()
                    .filter_map(|(key, value)| Self::from_json(value).map(|node| (key.clone(), node)))
                    .collect(),
            )),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::Switch(flag) => Value::Bool(*flag),
            Self::Number(number) => Value::Number(number.clone()),
            Self::List(items) => Value::Array(items.clone()),
            Self::Object(children) => Value::Object(
                children
                    .iter()
                    .map(|(key, node)| (key.clone(), node.to_json()))
                    .collect(),
            ),
        }
    }

    /// Overlays `other` onto `self`: objects merge key by key, anything else
    /// in `other` replaces what is here.
    pub fn merge(&mut self, other: &ConfigNode) {
        match (self, other) {
            (Self::Object(target), Self::Object(source)) => {
                for (key, node) in source {
                    match target.get_mut(key) {
                        Some(existing) => existing.merge(node),
                        None => {
                            target.insert(key.clone(), node.clone());
                        }
                    }
                }
            }
            (target, source) => *target = source.clone(),
        }
    }

    /// Removes empty text leaves and any object left without children.
    /// Lists are leaves and stay even when empty. Returns true when the node
    /// itself is now empty.
    pub fn prune_empty(&mut self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Switch(_) | Self::Number(_) | Self::List(_) => false,
            Self::Object(children) => {
                children.retain(|_, child| !child.prune_empty());
                children.is_empty()
            }
        }
    }

    pub fn get(&self, path: &[&str]) -> Option<&ConfigNode> {
        let mut current = self;
        for segment in path {
            match current {
                Self::Object(children) => current = children.get(*segment)?,
                _ => return None,
            }
        }
        Some(current)
    }

    pub fn get_mut(&mut self, path: &[&str]) -> Option<&mut ConfigNode> {
        let mut current = self;
        for segment in path {
            match current {
                Self::Object(children) => current = children.get_mut(*segment)?,
                _ => return None,
            }
        }
        Some(current)
    }

    pub fn text(&self, path: &[&str]) -> Option<&str> {
        match self.get(path)? {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

fn resource_spec() -> ConfigNode {
    ConfigNode::object([
        (
            "requests",
            ConfigNode::object([
                ("cpu", ConfigNode::empty_text()),
                ("memory", ConfigNode::empty_text()),
            ]),
        ),
        (
            "limits",
            ConfigNode::object([
                ("cpu", ConfigNode::empty_text()),
                ("memory", ConfigNode::empty_text()),
            ]),
        ),
    ])
}

/// Blank override with every known leaf present.
pub fn default_override_template() -> ConfigNode {
    ConfigNode::object([
        (
            "istio",
            ConfigNode::object([(
                "sidecar",
                ConfigNode::object([
                    ("enabled", ConfigNode::Switch(false)),
                    ("resources", resource_spec()),
                ]),
            )]),
        ),
        (
            "container",
            ConfigNode::object([("resources", resource_spec())]),
        ),
    ])
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

impl EnvVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Per-component resource override. Env vars are an ordered list here and a
/// name/value map on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceOverride {
    pub name: ResourceCategory,
    pub config: ConfigNode,
    pub env_vars: Vec<EnvVar>,
}

impl ResourceOverride {
    pub fn blank(name: ResourceCategory) -> Self {
        Self {
            name,
            config: default_override_template(),
            env_vars: vec![EnvVar::default()],
        }
    }

    /// Builds an override from its wire form merged over the blank template.
    pub fn decode(name: ResourceCategory, wire: &Value) -> Self {
        let mut wire = wire.clone();
        let env_vars = wire
            .get_mut("container")
            .and_then(Value::as_object_mut)
            .and_then(|container| container.remove("envVars"))
            .map(|env| decode_env_vars(&env));

        let mut config = default_override_template();
        if let Some(partial) = ConfigNode::from_json(&wire) {
            if matches!(partial, ConfigNode::Object(_)) {
                config.merge(&partial);
            }
        }

        Self {
            name,
            config,
            env_vars: env_vars.unwrap_or_else(|| vec![EnvVar::default()]),
        }
    }

    /// Wire form: only the `istio` and `container` sections, env vars as a
    /// name/value map, empty leaves pruned. Rows without a name are dropped.
    pub fn encode(&self) -> Value {
        let section = |key: &str| match self.config.get(&[key]) {
            Some(node @ ConfigNode::Object(_)) => node.clone(),
            _ => ConfigNode::Object(BTreeMap::new()),
        };
        let env_map: BTreeMap<String, ConfigNode> = self
            .env_vars
            .iter()
            .filter(|env| !env.name.trim().is_empty())
            .map(|env| (env.name.clone(), ConfigNode::Text(env.value.clone())))
            .collect();
        let mut container = section("container");
        if let ConfigNode::Object(children) = &mut container {
            children.insert("envVars".to_string(), ConfigNode::Object(env_map));
        }

        let mut wire = ConfigNode::object([("istio", section("istio")), ("container", container)]);
        if wire.prune_empty() {
            return Value::Object(Map::new());
        }
        wire.to_json()
    }

    pub fn add_env_var(&mut self) {
        self.env_vars.push(EnvVar::default());
    }

    pub fn remove_env_var(&mut self, index: usize) -> bool {
        if index < self.env_vars.len() {
            self.env_vars.remove(index);
            true
        } else {
            false
        }
    }
}

fn decode_env_vars(value: &Value) -> Vec<EnvVar> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(name, value)| {
                let value = match value {
                    Value::String(text) => text.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                EnvVar::new(name.clone(), value)
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .map(|item| EnvVar {
                name: item
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                value: item
                    .get("value")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Resource overrides chosen for a registry plus the categories still free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEditor {
    available: Vec<ResourceCategory>,
    added: Vec<ResourceOverride>,
}

impl Default for ResourceEditor {
    fn default() -> Self {
        Self {
            available: ALL_RESOURCE_CATEGORIES.to_vec(),
            added: Vec::new(),
        }
    }
}

impl ResourceEditor {
    pub fn available(&self) -> &[ResourceCategory] {
        &self.available
    }

    pub fn added(&self) -> &[ResourceOverride] {
        &self.added
    }

    pub fn get_mut(&mut self, name: ResourceCategory) -> Option<&mut ResourceOverride> {
        self.added.iter_mut().find(|entry| entry.name == name)
    }

    /// Moves a free category to the front of the added overrides.
    pub fn add_category(&mut self, name: ResourceCategory) -> bool {
        let Some(index) = self.available.iter().position(|entry| *entry == name) else {
            return false;
        };
        self.available.remove(index);
        self.added.insert(0, ResourceOverride::blank(name));
        true
    }

    pub fn remove_category(&mut self, name: ResourceCategory) -> bool {
        let Some(index) = self.added.iter().position(|entry| entry.name == name) else {
            return false;
        };
        self.added.remove(index);
        self.available.push(name);
        true
    }

    /// Replaces the editor contents with server data. Returns the names that
    /// are not known resource categories, which are skipped.
    pub fn preload(&mut self, data: &Map<String, Value>) -> Vec<String> {
        *self = Self::default();
        let mut skipped = Vec::new();
        for (raw_name, wire) in data {
            let Ok(name) = ResourceCategory::parse(raw_name) else {
                skipped.push(raw_name.clone());
                continue;
            };
            self.available.retain(|entry| *entry != name);
            self.added.push(ResourceOverride::decode(name, wire));
        }
        skipped
    }

    pub fn encode(&self) -> Value {
        let mut prepared = Map::new();
        for entry in &self.added {
            let wire = entry.encode();
            let empty = wire.as_object().map(Map::is_empty).unwrap_or(false);
            if !empty {
                prepared.insert(entry.name.as_str().to_string(), wire);
            }
        }
        Value::Object(prepared)
    }

    pub fn to_wire(&self) -> String {
        self.encode().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_fills_missing_leaves_with_empty_text() {
        let decoded = ResourceOverride::decode(
            ResourceCategory::Bpms,
            &json!({"container": {"resources": {"limits": {"cpu": "2"}}}}),
        );
        assert_eq!(
            decoded.config.text(&["container", "resources", "limits", "cpu"]),
            Some("2")
        );
        assert_eq!(
            decoded.config.text(&["container", "resources", "requests", "memory"]),
            Some("")
        );
        assert_eq!(
            decoded.config.get(&["istio", "sidecar", "enabled"]),
            Some(&ConfigNode::Switch(false))
        );
        assert_eq!(decoded.env_vars, vec![EnvVar::default()]);
    }

    #[test]
    fn encode_prunes_empty_subtrees_and_maps_env_vars() {
        let mut entry = ResourceOverride::blank(ResourceCategory::Kong);
        entry.env_vars = vec![EnvVar::new("JAVA_OPTS", "-Xmx1g"), EnvVar::default()];
        if let Some(ConfigNode::Text(cpu)) =
            entry.config.get_mut(&["container", "resources", "requests", "cpu"])
        {
            *cpu = "500m".to_string();
        }

        assert_eq!(
            entry.encode(),
            json!({
                "istio": {"sidecar": {"enabled": false}},
                "container": {
                    "resources": {"requests": {"cpu": "500m"}},
                    "envVars": {"JAVA_OPTS": "-Xmx1g"}
                }
            })
        );
    }

    #[test]
    fn merge_skips_nulls_and_keeps_unknown_keys_out_of_the_wire_form() {
        let decoded = ResourceOverride::decode(
            ResourceCategory::RestApi,
            &json!({"istio": null, "replicas": 3}),
        );
        assert_eq!(
            decoded.config.get(&["replicas"]),
            Some(&ConfigNode::Number(Number::from(3u64)))
        );
        assert!(decoded.config.get(&["istio", "sidecar"]).is_some());
        assert!(decoded.encode().get("replicas").is_none());
    }

    #[test]
    fn numbers_and_lists_keep_their_json_type_on_encode() {
        let decoded = ResourceOverride::decode(
            ResourceCategory::Bpms,
            &json!({
                "container": {
                    "resources": {"limits": {"cpu": 2, "memory": "1Gi"}},
                    "envVars": {"A": "1"},
                    "args": ["--port", "8080"]
                },
                "istio": {"sidecar": {"enabled": true, "ports": []}},
                "replicas": 3,
                "hosts": ["a", "b"]
            }),
        );

        assert_eq!(
            decoded.encode(),
            json!({
                "istio": {"sidecar": {"enabled": true, "ports": []}},
                "container": {
                    "resources": {"limits": {"cpu": 2, "memory": "1Gi"}},
                    "envVars": {"A": "1"},
                    "args": ["--port", "8080"]
                }
            })
        );
    }

    #[test]
    fn env_vars_survive_encode_then_decode_except_unnamed_or_empty_rows() {
        let mut entry = ResourceOverride::blank(ResourceCategory::KafkaApi);
        entry.env_vars = vec![
            EnvVar::new("ZETA", "last"),
            EnvVar::new("", "orphan"),
            EnvVar::new("ALPHA", "first"),
            EnvVar::new("EMPTY", ""),
        ];

        let decoded = ResourceOverride::decode(ResourceCategory::KafkaApi, &entry.encode());
        let mut names: Vec<(String, String)> = decoded
            .env_vars
            .iter()
            .map(|env| (env.name.clone(), env.value.clone()))
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                ("ALPHA".to_string(), "first".to_string()),
                ("ZETA".to_string(), "last".to_string()),
            ]
        );
        assert_eq!(decoded.config, entry.config);
    }

    #[test]
    fn editor_moves_categories_between_pool_and_overrides() {
        let mut editor = ResourceEditor::default();
        assert!(editor.add_category(ResourceCategory::Kong));
        assert!(editor.add_category(ResourceCategory::Bpms));
        assert!(!editor.add_category(ResourceCategory::Kong));
        assert_eq!(editor.added()[0].name, ResourceCategory::Bpms);
        assert!(!editor.available().contains(&ResourceCategory::Kong));

        assert!(editor.remove_category(ResourceCategory::Kong));
        assert!(editor.available().contains(&ResourceCategory::Kong));
        assert_eq!(editor.encode(), json!({"bpms": {"istio": {"sidecar": {"enabled": false}}}}));
    }

    #[test]
    fn preload_resets_pool_and_skips_unknown_names() {
        let mut editor = ResourceEditor::default();
        editor.add_category(ResourceCategory::SoapApi);
        let data = json!({
            "kafkaApi": {"container": {"envVars": {"A": "1"}}},
            "mystery": {}
        });
        let skipped = editor.preload(data.as_object().expect("object"));
        assert_eq!(skipped, vec!["mystery".to_string()]);
        assert_eq!(editor.added().len(), 1);
        assert_eq!(editor.added()[0].env_vars, vec![EnvVar::new("A", "1")]);
        assert!(editor.available().contains(&ResourceCategory::SoapApi));
        assert!(!editor.available().contains(&ResourceCategory::KafkaApi));
    }
}
