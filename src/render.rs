use crate::tree::{Edge, Node, NodeId, Tree};
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt;

/// Indented text form of a tree, one line per decision.
///
/// ```text
/// Check Outlook:
///   If Outlook = Overcast; Play = Yes
///   If Outlook = Rainy; Check Windy:
///     If Windy = False; Play = Yes
/// ```
pub struct TreeDisplay<'a>(pub &'a Tree);

impl<'a> fmt::Display for TreeDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.0, Tree::ROOT, 0, None)
    }
}

fn write_node(
    f: &mut fmt::Formatter<'_>,
    tree: &Tree,
    id: NodeId,
    depth: usize,
    parent: Option<(&str, &str)>,
) -> fmt::Result {
    let indent = "  ".repeat(depth);
    let prefix = match parent {
        Some((attribute, value)) => format!("If {} = {}; ", attribute, value),
        None => String::new(),
    };
    let branch = match tree.node(id) {
        Some(Node::Branch(branch)) => branch,
        Some(Node::Leaf { class }) => {
            return writeln!(f, "{}{}{} = {}", indent, prefix, tree.target(), class)
        }
        None => return Ok(()),
    };
    let attribute = tree.attribute_name(branch.attribute);
    writeln!(f, "{}{}Check {}:", indent, prefix, attribute)?;

    let mut decisions: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (value, edge) in &branch.edges {
        if let Edge::Leaf(class) = edge {
            decisions.entry(class.as_str()).or_default().push(value.as_str());
        }
    }
    for (class, values) in &decisions {
        writeln!(
            f,
            "{}  If {} = {}; {} = {}",
            indent,
            attribute,
            values.iter().join(", "),
            tree.target(),
            class
        )?;
    }
    for (value, edge) in &branch.edges {
        if let Edge::Branch(child) = edge {
            write_node(f, tree, *child, depth + 1, Some((attribute, value.as_str())))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{train, BuildOptions};
    use crate::test_data::weather;

    #[test]
    fn renders_weather_tree() {
        let data = weather();
        let tree = train(&data.view(), &BuildOptions::default()).unwrap();
        let expected = "\
Check Outlook:
  If Outlook = Overcast; Play = Yes
  If Outlook = Rainy; Check Windy:
    If Windy = True; Play = No
    If Windy = False; Play = Yes
  If Outlook = Sunny; Check Humidity:
    If Humidity = High; Play = No
    If Humidity = Normal; Play = Yes
";
        assert_eq!(TreeDisplay(&tree).to_string(), expected);
    }
}
