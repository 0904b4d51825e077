//! Locating content items by concept code
//!
//! Each container level is searched on its own; nested containers are reached
//! by naming the sub-container's code first (see [`ContainerIndex::descend`]).

use super::codes::ConceptCode;
use crate::content::ContentItem;
use std::collections::HashMap;

/// Returns the first child whose concept code matches
///
/// Children without a concept code are skipped.
pub fn find_first<'a, N: ContentItem>(children: &'a [N], code: ConceptCode) -> Option<&'a N> {
    children.iter().find(|child| {
        child
            .concept_code()
            .map(|c| code.matches(&c))
            .unwrap_or(false)
    })
}

/// Returns every child whose concept code matches, in encounter order
pub fn find_all<'a, N: ContentItem>(children: &'a [N], code: ConceptCode) -> Vec<&'a N> {
    children
        .iter()
        .filter(|child| {
            child
                .concept_code()
                .map(|c| code.matches(&c))
                .unwrap_or(false)
        })
        .collect()
}

/// Code to items map over the direct children of one container
///
/// Built in a single pass, so every field sourced from the same container is
/// an O(1) lookup instead of a rescan of the child list.
#[derive(Debug)]
pub struct ContainerIndex<'a, N> {
    by_code: HashMap<String, Vec<&'a N>>,
}

impl<'a, N: ContentItem> ContainerIndex<'a, N> {
    /// Indexes the children of `container`
    pub fn new(container: &'a N) -> Self {
        Self::from_children(container.children())
    }

    /// Indexes a child list
    pub fn from_children(children: &'a [N]) -> Self {
        let mut by_code: HashMap<String, Vec<&'a N>> = HashMap::new();
        for child in children {
            if let Some(code) = child.concept_code() {
                by_code.entry(code).or_default().push(child);
            }
        }
        Self { by_code }
    }

    /// First item with the code, same result as [`find_first`]
    pub fn first(&self, code: ConceptCode) -> Option<&'a N> {
        self.by_code
            .get(code.as_str())
            .and_then(|items| items.first().copied())
    }

    /// All items with the code, same result as [`find_all`]
    pub fn all(&self, code: ConceptCode) -> &[&'a N] {
        self.by_code
            .get(code.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, code: ConceptCode) -> bool {
        self.by_code.contains_key(code.as_str())
    }

    /// Follows a container path and indexes the container at its end
    ///
    /// Each step takes the first item with that code. An empty path is the
    /// container itself; a broken path is `None`.
    pub fn descend(&self, path: &[ConceptCode]) -> Option<ContainerIndex<'a, N>> {
        let (head, rest) = match path.split_first() {
            Some(split) => split,
            None => {
                return Some(Self {
                    by_code: self.by_code.clone(),
                })
            }
        };
        let mut node = self.first(*head)?;
        for code in rest {
            node = find_first(node.children(), *code)?;
        }
        Some(ContainerIndex::new(node))
    }

    /// Number of distinct codes
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentNode;
    use crate::extraction::codes::{
        CT_ACQUISITION_PARAMETERS, CT_XRAY_SOURCE_PARAMETERS, EXPOSURE_TIME, KVP, XRAY_TUBE_CURRENT,
    };
    use crate::types::ValueKind;

    fn codeless() -> ContentNode {
        ContentNode {
            kind: ValueKind::Text,
            ..Default::default()
        }
    }

    #[test]
    fn test_find_first_skips_codeless() {
        let children = vec![
            codeless(),
            ContentNode::num(KVP, "28", "kV"),
            ContentNode::num(KVP, "29", "kV"),
        ];
        let found = find_first(&children, KVP).unwrap();
        assert_eq!(found.measured_value().unwrap().value, "28");
        assert!(find_first(&children, EXPOSURE_TIME).is_none());
    }

    #[test]
    fn test_find_all_keeps_order() {
        let children = vec![
            ContentNode::num(KVP, "28", "kV"),
            ContentNode::num(XRAY_TUBE_CURRENT, "100", "mA"),
            ContentNode::num(KVP, "30", "kV"),
        ];
        let values: Vec<_> = find_all(&children, KVP)
            .iter()
            .map(|n| n.measured_value().unwrap().value)
            .collect();
        assert_eq!(values, vec!["28", "30"]);
        assert!(find_all(&[] as &[ContentNode], KVP).is_empty());
    }

    #[test]
    fn test_index_matches_linear_scan() {
        let children = vec![
            ContentNode::num(KVP, "28", "kV"),
            codeless(),
            ContentNode::num(KVP, "30", "kV"),
            ContentNode::num(XRAY_TUBE_CURRENT, "100", "mA"),
        ];
        let index = ContainerIndex::from_children(&children);

        assert_eq!(index.len(), 2);
        assert_eq!(index.first(KVP), find_first(&children, KVP));
        assert_eq!(index.all(KVP), find_all(&children, KVP).as_slice());
        assert!(index.all(EXPOSURE_TIME).is_empty());
        assert!(!index.contains(EXPOSURE_TIME));
    }

    #[test]
    fn test_descend_nested_containers() {
        let root = ContentNode::root(vec![ContentNode::container(
            CT_ACQUISITION_PARAMETERS,
            vec![ContentNode::container(
                CT_XRAY_SOURCE_PARAMETERS,
                vec![ContentNode::num(KVP, "120", "kV")],
            )],
        )]);
        let index = ContainerIndex::new(&root);

        // nested codes are not visible from the outer level
        assert!(index.first(KVP).is_none());

        let source = index
            .descend(&[CT_ACQUISITION_PARAMETERS, CT_XRAY_SOURCE_PARAMETERS])
            .unwrap();
        assert!(source.first(KVP).is_some());
        assert!(index.descend(&[CT_XRAY_SOURCE_PARAMETERS]).is_none());
        assert_eq!(index.descend(&[]).unwrap().len(), 1);
    }
}
