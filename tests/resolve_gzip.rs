use flate2::write::GzEncoder;
use flate2::Compression as GzCompression;
use gxftree::{load, Config, GeneClass, Location, TranscriptKind};
use indoc::indoc;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes gz-compressed contents to a file and returns its path.
fn write_gzip_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let mut encoder = GzEncoder::new(Vec::new(), GzCompression::default());
    encoder.write_all(contents.as_bytes()).unwrap();
    let gz = encoder.finish().unwrap();

    let path = dir.join(name);
    std::fs::write(&path, gz).unwrap();
    path
}

/// Resolves a gzipped GFF3 through the buffered decoder.
#[test]
fn resolve_gzipped_gff3() {
    let dir = tempfile::tempdir().unwrap();
    let gff = indoc! {"
        ##gff-version 3
        chr1\tsrc\tgene\t100\t200\t.\t+\t.\tID=g1
        chr1\tsrc\tmRNA\t100\t200\t.\t+\t.\tID=tx1;Parent=g1
        chr1\tsrc\texon\t100\t150\t.\t+\t.\tParent=tx1
        chr1\tsrc\texon\t180\t200\t.\t+\t.\tParent=tx1
    "};
    let input = write_gzip_file(dir.path(), "input.gff3.gz", gff);

    let resolved = load(&Config::new(input)).unwrap();
    let tx = resolved
        .hierarchy
        .contig("chr1")
        .and_then(|c| c.gene(GeneClass::Gene, "g1"))
        .and_then(|g| g.transcript(TranscriptKind::Mrna, "tx1"))
        .unwrap();
    assert_eq!(
        tx.exon().unwrap().locations(),
        &[Location::new(100, 150), Location::new(180, 200)]
    );
}
