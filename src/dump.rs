use std::io::{self, Write};

use crate::gxf::Location;
use crate::hierarchy::{FeatureHierarchy, GeneClass, SegmentKind, TranscriptKind};

/// Column header written by [`write_tsv`].
pub const HEADER: &str =
    "contig\tclass\tgene_id\tkind\ttranscript_id\tfeature\tid\tprotein_id\tproduct\tstart\tend\tstrand";

const MISSING: &str = ".";

/// Flattens a hierarchy to one TSV row per location.
///
/// Contigs, genes and transcripts are written in lexical order so dumps of
/// the same file are byte-identical; locations keep their stored order.
/// Genes referenced only by transcripts get no gene row.
pub fn write_tsv<W: Write>(hierarchy: &FeatureHierarchy, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{HEADER}")?;

    let mut contigs = hierarchy.contigs().collect::<Vec<_>>();
    contigs.sort_unstable_by_key(|(name, _)| *name);

    for (contig, record) in contigs {
        for class in GeneClass::ALL {
            let mut genes = record.genes(class).collect::<Vec<_>>();
            genes.sort_unstable_by_key(|(id, _)| *id);

            for (gene_id, gene) in genes {
                let row = Row {
                    contig,
                    class,
                    gene_id,
                    kind: None,
                    transcript_id: None,
                    feature: &class.to_string(),
                    id: Some(gene_id),
                    protein_id: None,
                    product: None,
                };
                row.write_all(writer, gene.locations())?;

                for kind in TranscriptKind::ALL {
                    let mut transcripts = gene.transcripts(kind).collect::<Vec<_>>();
                    transcripts.sort_unstable_by_key(|(id, _)| *id);

                    for (transcript_id, tx) in transcripts {
                        let row = Row {
                            kind: Some(kind),
                            transcript_id: Some(transcript_id),
                            feature: &kind.to_string(),
                            id: Some(transcript_id),
                            product: tx.product(),
                            ..row
                        };
                        row.write_all(writer, tx.locations())?;

                        for segment_kind in SegmentKind::ALL {
                            let Some(segment) = tx.segment(segment_kind) else {
                                continue;
                            };
                            let row = Row {
                                feature: &segment_kind.to_string(),
                                id: segment.id(),
                                protein_id: segment.protein_id(),
                                ..row
                            };
                            row.write_all(writer, segment.locations())?;
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

#[derive(Clone, Copy)]
struct Row<'a> {
    contig: &'a str,
    class: GeneClass,
    gene_id: &'a str,
    kind: Option<TranscriptKind>,
    transcript_id: Option<&'a str>,
    feature: &'a str,
    id: Option<&'a str>,
    protein_id: Option<&'a str>,
    product: Option<&'a str>,
}

impl Row<'_> {
    fn write_all<W: Write>(&self, writer: &mut W, locations: &[Location]) -> io::Result<()> {
        let kind = self.kind.map(|k| k.to_string());

        for location in locations {
            let strand = location.strand.map(|s| s.to_string());
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                self.contig,
                self.class,
                self.gene_id,
                kind.as_deref().unwrap_or(MISSING),
                self.transcript_id.unwrap_or(MISSING),
                self.feature,
                self.id.unwrap_or(MISSING),
                self.protein_id.unwrap_or(MISSING),
                self.product.unwrap_or(MISSING),
                location.start,
                location.end,
                strand.as_deref().unwrap_or(MISSING),
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build_hierarchy, BuilderOptions};

    #[test]
    fn test_write_tsv() {
        let text = "chr1\tsrc\tgene\t1\t500\t.\t-\t.\tID=g1\n\
                    chr1\tsrc\tmRNA\t1\t500\t.\t-\t.\tID=t1;Parent=g1;product=kinase\n\
                    chr1\tsrc\tCDS\t300\t400\t.\t-\t0\tID=c1;Parent=t1;protein_id=P1\n\
                    chr1\tsrc\tCDS\t100\t200\t.\t-\t0\tID=c1;Parent=t1\n";
        let resolved = build_hierarchy(text.as_bytes(), BuilderOptions::default()).unwrap();

        let mut out = Vec::new();
        write_tsv(&resolved.hierarchy, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines = out.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "chr1\tgene\tg1\t.\t.\tgene\tg1\t.\t.\t1\t500\t-");
        assert_eq!(
            lines[2],
            "chr1\tgene\tg1\tmRNA\tt1\tmRNA\tt1\t.\tkinase\t1\t500\t-"
        );
        assert_eq!(
            lines[3],
            "chr1\tgene\tg1\tmRNA\tt1\tCDS\tc1\tP1\tkinase\t300\t400\t."
        );
        assert_eq!(
            lines[4],
            "chr1\tgene\tg1\tmRNA\tt1\tCDS\tc1\tP1\tkinase\t100\t200\t."
        );
    }
}
