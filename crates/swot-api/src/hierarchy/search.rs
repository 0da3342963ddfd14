use super::model::HierarchyNode;

/// Depth-first, pre-order search for nodes named exactly `name`.
///
/// Matches are references into `nodes`, in tree order.
pub fn search_hierarchy_by_name<'a>(nodes: &'a [HierarchyNode], name: &str) -> Vec<&'a HierarchyNode> {
    let mut matches = Vec::new();
    let mut stack: Vec<&HierarchyNode> = nodes.iter().rev().collect();

    while let Some(node) = stack.pop() {
        if node.name == name {
            matches.push(node);
        }
        stack.extend(node.subtopics.iter().rev());
    }

    matches
}
