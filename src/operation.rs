//! operation descriptors
//!
//! every query and mutation is a unit type implementing [`Operation`]: a
//! fixed document, a validated variables record, the item type it yields and
//! a pure parser from the response `data` to a [`Page`].

use crate::error::{Error, Result};
use crate::graphql::GraphQlRequest;
use crate::record::Record;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// graphql operation contract
pub trait Operation {
    /// operation name declared in the document
    const NAME: &'static str;
    /// graphql query or mutation string
    const DOCUMENT: &'static str;
    /// prefix for errors raised by this operation
    const ERROR_CONTEXT: &'static str;

    /// variables record
    type Variables: Record + Send + Sync;
    /// parsed result item
    type Item: DeserializeOwned + Send;

    /// extract items and pagination state from the response `data`
    fn parse(data: &Value) -> Result<Page<Self::Item>>;

    /// validate variables and render the wire request
    fn request(variables: &Self::Variables) -> Result<GraphQlRequest> {
        variables.validate()?;
        Ok(GraphQlRequest::new(Self::DOCUMENT)
            .with_variables(Value::Object(variables.to_wire()?))
            .with_operation_name(Self::NAME))
    }
}

/// variables of a cursor-paginated operation
pub trait CursorVariables {
    /// replace the `after` cursor
    fn set_cursor(&mut self, cursor: Option<String>);
}

/// one page of results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// items in server order
    pub items: Vec<T>,
    /// true if the server reported another page
    pub has_next: bool,
    /// opaque cursor for the next request
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// a final page
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            has_next: false,
            next_cursor: None,
        }
    }

    /// first item, if any
    pub fn into_first(self) -> Option<T> {
        self.items.into_iter().next()
    }
}

/// relay-style connection: `{ pageInfo, edges: [{ node }] }`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    #[serde(default)]
    pub page_info: Option<PageInfo>,
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: Option<bool>,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

impl<T> Connection<T> {
    pub fn into_page(self) -> Page<T> {
        let info = self.page_info.unwrap_or_default();
        Page {
            items: self.edges.into_iter().map(|edge| edge.node).collect(),
            has_next: info.has_next_page.unwrap_or(false),
            next_cursor: info.end_cursor,
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// walk `path` from the response root; a missing key or a null on the way
/// is a shape error
pub fn lookup<'a>(operation: &str, data: &'a Value, path: &[&str]) -> Result<&'a Value> {
    let mut current = data;
    for (depth, key) in path.iter().enumerate() {
        current = match current.get(key) {
            Some(value) if !value.is_null() || depth + 1 == path.len() => value,
            Some(_) => {
                return Err(Error::shape(
                    operation,
                    format!("`{}` is null", path[..=depth].join(".")),
                ))
            }
            None => {
                return Err(Error::shape(
                    operation,
                    format!("missing key `{}`", path[..=depth].join(".")),
                ))
            }
        };
    }
    Ok(current)
}

/// parse a connection at `path` into a page
pub fn parse_connection<T: DeserializeOwned>(
    operation: &str,
    data: &Value,
    path: &[&str],
) -> Result<Page<T>> {
    let value = lookup(operation, data, path)?;
    if value.is_null() {
        return Err(Error::shape(
            operation,
            format!("`{}` is null", path.join(".")),
        ));
    }
    let connection: Connection<T> = serde_json::from_value(value.clone())
        .map_err(|err| Error::shape(operation, format!("{}: {err}", path.join("."))))?;
    Ok(connection.into_page())
}

/// parse a single object at `path`; `null` yields an empty page
pub fn parse_node<T: DeserializeOwned>(
    operation: &str,
    data: &Value,
    path: &[&str],
) -> Result<Page<T>> {
    let value = lookup(operation, data, path)?;
    if value.is_null() {
        return Ok(Page::last(Vec::new()));
    }
    let node = serde_json::from_value(value.clone())
        .map_err(|err| Error::shape(operation, format!("{}: {err}", path.join("."))))?;
    Ok(Page::last(vec![node]))
}

/// a mutation payload at `path` that carries no data we need
pub fn parse_acknowledged(operation: &str, data: &Value, path: &[&str]) -> Result<Page<bool>> {
    lookup(operation, data, path)?;
    Ok(Page::last(vec![true]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Node {
        id: String,
    }

    #[test]
    fn test_parse_connection_with_cursor() {
        let data = json!({"node": {"models": {
            "pageInfo": {"hasNextPage": true, "endCursor": "c1"},
            "edges": [{"node": {"id": "a"}}, {"node": {"id": "b"}}]
        }}});
        let page: Page<Node> = parse_connection("op", &data, &["node", "models"]).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].id, "b");
        assert!(page.has_next);
        assert_eq!(page.next_cursor.as_deref(), Some("c1"));
    }

    #[test]
    fn test_absent_page_info_means_no_more_pages() {
        let data = json!({"models": {"edges": [{"node": {"id": "a"}}]}});
        let page: Page<Node> = parse_connection("op", &data, &["models"]).unwrap();
        assert!(!page.has_next);
        assert!(page.next_cursor.is_none());

        let data = json!({"models": {"pageInfo": null, "edges": null}});
        let page: Page<Node> = parse_connection("op", &data, &["models"]).unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_next);

        let data = json!({"models": {
            "pageInfo": {"hasNextPage": null, "endCursor": null},
            "edges": []
        }});
        let page: Page<Node> = parse_connection("op", &data, &["models"]).unwrap();
        assert!(!page.has_next);
    }

    #[test]
    fn test_missing_key_is_shape_error() {
        let data = json!({"node": {}});
        let err = parse_connection::<Node>("getAllModels", &data, &["node", "models"]).unwrap_err();
        match err {
            Error::ResponseShape { operation, detail } => {
                assert_eq!(operation, "getAllModels");
                assert!(detail.contains("node.models"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let data = json!({"node": null});
        let err = parse_connection::<Node>("op", &data, &["node", "models"]).unwrap_err();
        assert!(matches!(err, Error::ResponseShape { .. }));
    }

    #[test]
    fn test_bad_node_is_shape_error() {
        let data = json!({"models": {"edges": [{"node": {"name": "no id"}}]}});
        let err = parse_connection::<Node>("op", &data, &["models"]).unwrap_err();
        assert!(matches!(err, Error::ResponseShape { .. }));
    }

    #[test]
    fn test_parse_node() {
        let data = json!({"node": {"id": "m1"}});
        let page: Page<Node> = parse_node("op", &data, &["node"]).unwrap();
        assert_eq!(page.into_first(), Some(Node { id: "m1".to_string() }));

        let data = json!({"node": null});
        let page: Page<Node> = parse_node("op", &data, &["node"]).unwrap();
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_parse_acknowledged() {
        let data = json!({"deleteDashboard": {"clientMutationId": null}});
        let page = parse_acknowledged("op", &data, &["deleteDashboard"]).unwrap();
        assert_eq!(page.items, vec![true]);
        assert!(parse_acknowledged("op", &json!({}), &["deleteDashboard"]).is_err());
    }
}
