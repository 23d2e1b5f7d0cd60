//! Shared fixtures for integration tests
//!
//! Small Java sources whose concept vocabularies are known by hand,
//! so rankings can be asserted exactly.

#![allow(dead_code)]

use assert_fs::prelude::*;
use cue::{Corpus, Lang, Source};

/// One class exercising identifiers, abbreviations, a nested type,
/// and a comment whose words stay below the concept threshold.
/// `processFile` mentions every declared name but its own outer class
pub const FOO: &str = r#"public class Foo {
    static class ConfigCode {
        int consumeException;
    }

    public void processFile(ConfigCode code, int x) {
        // exit if x is zero or negative
        if (x <= 0) {
            return;
        }
        createTxtFile(x);
    }

    java.io.File createTxtFile(int x) {
        return new java.io.File("out" + x + ".txt");
    }
}
"#;

/// Three file-handling classes and two unrelated outliers, in
/// corpus order: FileStore, FileCache, FileIndex, MatrixMath, SocketPool
pub const CORPUS: &[(&str, &str)] = &[
    ("FileStore.java", "class FileStore { void loadFile() {} void saveFile() {} }\n"),
    ("FileCache.java", "class FileCache { void loadFile() {} void dropFile() {} }\n"),
    ("FileIndex.java", "class FileIndex { void loadFile() {} void scanFile() {} }\n"),
    ("MatrixMath.java", "class MatrixMath { void invertMatrix() {} }\n"),
    ("SocketPool.java", "class SocketPool { void bindSocket() {} void closeSocket() {} }\n"),
];

pub fn foo() -> Source
{
    Source::from_text("Foo.java", Lang::Java, FOO)
}

pub fn corpus() -> Corpus
{
    CORPUS
        .iter()
        .map(|(id, text)| Source::from_text(*id, Lang::Java, *text))
        .collect()
}

/// Write `CORPUS` (and `Foo.java`) under `src/` of a temp directory
pub fn corpus_dir() -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    for (name, text) in CORPUS
    {
        tmp.child(format!("src/{name}"))
            .write_str(text)
            .expect("write source");
    }

    tmp.child("Foo.java")
        .write_str(FOO)
        .expect("write Foo.java");

    // Not part of a Java corpus
    tmp.child("src/README.md")
        .write_str("# notes\n")
        .expect("write README.md");

    tmp
}

pub fn ids(sources: &[&Source]) -> Vec<String>
{
    sources
        .iter()
        .map(|s| {
            s.id()
                .to_string()
        })
        .collect()
}
