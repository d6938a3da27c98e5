//! JSON graph format.

use trellis_core::value::Attributes;

use crate::{data::GraphData, error::TrellisError, extension::Format};

pub(super) const NAME: &str = "json";

/// Reads and writes [`GraphData`] as JSON:
///
/// ```json
/// {
///   "nodes": [{ "data": { "id": "a" }, "position": { "x": 0, "y": 0 } }],
///   "edges": [{ "data": { "id": "ab", "source": "a", "target": "b" } }]
/// }
/// ```
///
/// Option `pretty` (default `true`) selects indented output.
#[derive(Debug, Clone)]
pub struct JsonFormat {
    pretty: bool,
}

impl JsonFormat {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn from_options(options: &Attributes) -> Self {
        let pretty = options
            .get("pretty")
            .and_then(|value| value.as_bool())
            .unwrap_or(true);
        Self { pretty }
    }
}

impl Format for JsonFormat {
    fn parse(&self, input: &str) -> Result<GraphData, TrellisError> {
        serde_json::from_str(input).map_err(|err| TrellisError::Format(err.to_string()))
    }

    fn serialize(&self, data: &GraphData) -> Result<String, TrellisError> {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(data)
        } else {
            serde_json::to_string(data)
        };
        encoded.map_err(|err| TrellisError::Format(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ElementSpec;

    #[test]
    fn test_parse() {
        let input = r#"{
            "nodes": [{"data": {"id": "a"}}, {"data": {"id": "b"}, "position": {"x": 5, "y": 6}}],
            "edges": [{"data": {"id": "ab", "source": "a", "target": "b"}}]
        }"#;

        let data = JsonFormat::new(true).parse(input).unwrap();
        assert_eq!(data.nodes.len(), 2);
        assert_eq!(data.nodes[1].position["x"], 5.0);
        assert_eq!(data.edges[0], ElementSpec {
            group: None,
            ..ElementSpec::edge("ab", "a", "b")
        });
    }

    #[test]
    fn test_parse_error() {
        let err = JsonFormat::new(true).parse("{nodes: ").unwrap_err();
        assert!(matches!(err, TrellisError::Format(_)));
    }

    #[test]
    fn test_compact_output() {
        let data = GraphData::new(vec![ElementSpec::new().with_id("a")], vec![]);
        let output = JsonFormat::new(false).serialize(&data).unwrap();
        assert_eq!(output, r#"{"nodes":[{"data":{"id":"a"}}],"edges":[]}"#);
    }
}
