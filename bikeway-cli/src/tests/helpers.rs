//! Test helpers for writing bikeway tables to disk.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

pub(super) const TABLE: &str = "\
ASSET_CD,STREET_NAME,TYPE_DESC,STATUS,SIDE,WARD,INSTALLED,MULTILINESTRING
BW-0101,12 AV SW,Cycle Track,ACTIVE,BOTH,8,2015,\"MULTILINESTRING ((-114.0800 51.0400, -114.0760 51.0400))\"
BW-0102,12 AV SW,Cycle Track,ACTIVE,BOTH,8,2015,\"MULTILINESTRING ((-114.0760 51.0400, -114.0740 51.0400))\"
BW-0207,BOW RIVER PATHWAY,Pathway,ACTIVE,,7,2009,\"MULTILINESTRING ((-114.0600 51.0550, -114.0500 51.0560))\"
";

/// A temporary directory holding one bikeway table.
pub(super) struct TableFixture {
    _dir: TempDir,
    root: Utf8PathBuf,
    table: Utf8PathBuf,
}

impl TableFixture {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let table = root.join("bikeways.csv");
        write_utf8(&table, TABLE.as_bytes());
        Self {
            _dir: dir,
            root,
            table,
        }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn table(&self) -> &Utf8Path {
        &self.table
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture file");
}
