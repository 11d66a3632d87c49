use crate::error::Result;
use crate::tree::Tree;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

pub fn save<W: Write>(tree: &Tree, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, tree)?;
    Ok(())
}

/// Reads a tree and rejects arenas that could not have come from the builder.
pub fn load<R: Read>(reader: R) -> Result<Tree> {
    let tree: Tree = serde_json::from_reader(reader)?;
    tree.validate()?;
    Ok(tree)
}

pub fn save_to_path(tree: &Tree, path: impl AsRef<Path>) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    save(tree, &mut writer)?;
    writer.flush()?;
    Ok(())
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<Tree> {
    load(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{train, BuildOptions};
    use crate::test_data::weather;

    #[test]
    fn reloaded_tree_classifies_the_same() {
        let data = weather();
        let tree = train(&data.view(), &BuildOptions::default()).unwrap();
        let mut buffer = Vec::new();
        save(&tree, &mut buffer).unwrap();
        let loaded = load(buffer.as_slice()).unwrap();
        assert_eq!(loaded, tree);
        for record in data.records() {
            assert_eq!(loaded.classify(record), tree.classify(record));
        }
    }

    #[test]
    fn dangling_branch_is_rejected() {
        let json = r#"{
            "nodes": [{"Branch": {"attribute": 0, "edges": {"a": {"Branch": 7}}}}],
            "attributes": ["feature", "class"],
            "target": "class",
            "default_class": "x"
        }"#;
        assert!(matches!(
            load(json.as_bytes()),
            Err(crate::error::Error::InvalidInput(_))
        ));
    }

    #[test]
    fn empty_arena_is_rejected() {
        let json = r#"{"nodes": [], "attributes": ["class"], "target": "class", "default_class": "x"}"#;
        assert!(matches!(
            load(json.as_bytes()),
            Err(crate::error::Error::InvalidInput(_))
        ));
    }

    #[test]
    fn garbage_is_a_serialization_error() {
        assert!(matches!(
            load(&b"{ not json"[..]),
            Err(crate::error::Error::Serialization(_))
        ));
    }
}
