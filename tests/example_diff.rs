use std::{fs, path::Path};

use jasoseo::{DiffFragment, FragmentKind};
use pretty_assertions::assert_eq;
use serde::Deserialize;

/// `ExampleDiff` is a diff test case: two versions of a text and the
/// expected fragments written in a compact markup.
///
/// In `expected`, `[+...]` marks inserted text and `[-...]` deleted text;
/// everything else is unchanged.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ExampleDiff {
    pub name: String,
    pub original: String,
    pub revised: String,
    pub expected: String,
}

impl ExampleDiff {
    /// Loads every document from every `.yml` file in `directory`.
    ///
    /// # Panics
    ///
    /// If a file cannot be read or parsed.
    #[must_use]
    pub fn load_all(directory: &Path) -> Vec<Self> {
        let mut paths: Vec<_> = fs::read_dir(directory)
            .expect("Failed to read examples directory")
            .map(|entry| entry.expect("Failed to read directory entry").path())
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("yml"))
            .collect();
        paths.sort();

        let mut examples = Vec::new();
        for path in paths {
            let file = fs::File::open(&path).expect("Failed to open example file");
            for document in serde_yaml::Deserializer::from_reader(file) {
                examples.push(Self::deserialize(document).expect("Failed to parse example"));
            }
        }

        examples
    }

    /// Asserts that `fragments` render to the expected markup.
    ///
    /// # Panics
    ///
    /// If they don't.
    pub fn assert_eq(&self, fragments: &[DiffFragment]) {
        assert_eq!(render(fragments), self.expected, "example '{}'", self.name);
    }
}

fn render(fragments: &[DiffFragment]) -> String {
    fragments
        .iter()
        .map(|fragment| match fragment.kind {
            FragmentKind::Unchanged => fragment.text.clone(),
            FragmentKind::Inserted => format!("[+{}]", fragment.text),
            FragmentKind::Deleted => format!("[-{}]", fragment.text),
        })
        .collect()
}
