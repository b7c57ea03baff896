//! Block state descriptors
//!
//! Parsed from the usual `namespace:path[key=value,...]` notation. The core
//! never interprets a block beyond telling air apart; models and quad counts
//! come from the [`DrawHost`](crate::render::DrawHost).

use std::fmt;
use std::str::FromStr;

use crate::render::DrawError;

const DEFAULT_NAMESPACE: &str = "minecraft";
const AIR_BLOCKS: [&str; 3] = ["air", "cave_air", "void_air"];

/// A block identifier with optional state properties
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockState {
    namespace: String,
    path: String,
    properties: Vec<(String, String)>,
}

impl BlockState {
    /// Block with the given namespaced id and no properties
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
            properties: Vec::new(),
        }
    }

    /// Add a state property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    /// Namespaced id, e.g. `minecraft:stone`
    pub fn id(&self) -> String {
        format!("{}:{}", self.namespace, self.path)
    }

    /// State properties in declaration order
    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }

    /// Whether this is one of the air blocks, which never draw
    pub fn is_air(&self) -> bool {
        self.namespace == DEFAULT_NAMESPACE && AIR_BLOCKS.contains(&self.path.as_str())
    }
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.' | '/')
}

impl FromStr for BlockState {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DrawError::InvalidBlock(s.to_string());

        let (id, properties) = match s.split_once('[') {
            Some((id, rest)) => (id, Some(rest.strip_suffix(']').ok_or_else(invalid)?)),
            None => (s, None),
        };
        let (namespace, path) = id.split_once(':').unwrap_or((DEFAULT_NAMESPACE, id));
        if namespace.is_empty()
            || path.is_empty()
            || !namespace.chars().all(is_id_char)
            || !path.chars().all(is_id_char)
        {
            return Err(invalid());
        }

        let mut state = BlockState::new(namespace, path);
        for pair in properties.into_iter().flat_map(|p| p.split(',')) {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').ok_or_else(invalid)?;
            state.properties.push((key.trim().to_string(), value.trim().to_string()));
        }
        Ok(state)
    }
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)?;
        if !self.properties.is_empty() {
            write!(f, "[")?;
            for (i, (key, value)) in self.properties.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_namespace() {
        let state: BlockState = "stone".parse().unwrap();
        assert_eq!(state.id(), "minecraft:stone");
        assert!(state.properties().is_empty());
    }

    #[test]
    fn test_parse_properties() {
        let state: BlockState = "minecraft:oak_stairs[facing=north,half=top]".parse().unwrap();
        assert_eq!(state.id(), "minecraft:oak_stairs");
        assert_eq!(
            state.properties(),
            &[
                ("facing".to_string(), "north".to_string()),
                ("half".to_string(), "top".to_string())
            ]
        );
        assert_eq!(state.to_string(), "minecraft:oak_stairs[facing=north,half=top]");
    }

    #[test]
    fn test_built_state_matches_parsed() {
        let built = BlockState::new("minecraft", "oak_stairs")
            .with_property("facing", "north")
            .with_property("half", "top");
        let parsed: BlockState = "minecraft:oak_stairs[facing=north,half=top]".parse().unwrap();
        assert_eq!(built, parsed);
        assert_eq!(built.to_string().parse::<BlockState>().unwrap(), built);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("".parse::<BlockState>().is_err());
        assert!("Stone".parse::<BlockState>().is_err());
        assert!("minecraft:chest[facing".parse::<BlockState>().is_err());
        assert!("minecraft:chest[facing]".parse::<BlockState>().is_err());
    }

    #[test]
    fn test_air_variants() {
        assert!("air".parse::<BlockState>().unwrap().is_air());
        assert!("minecraft:cave_air".parse::<BlockState>().unwrap().is_air());
        assert!(!"mymod:air".parse::<BlockState>().unwrap().is_air());
        assert!(!"glass".parse::<BlockState>().unwrap().is_air());
    }
}
