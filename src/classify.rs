use crate::hierarchy::{GeneClass, SegmentKind, TranscriptKind};

/// Bucket a feature-type column falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Gene(GeneClass),
    Rna(TranscriptKind),
    /// Any type containing `transcript`; routed by the shape of its attributes.
    Transcript,
    Segment(SegmentKind),
    Ignored,
}

/// Classifies the 3rd column, case-insensitively.
///
/// Gene and RNA types must match exactly. `transcript`, `cds` and `exon`
/// match anywhere in the type, so `CDS_predicted` is still a CDS.
pub fn classify(feature: &str) -> LineClass {
    let feature = feature.trim().to_ascii_lowercase();

    match feature.as_str() {
        "gene" => LineClass::Gene(GeneClass::Gene),
        "pseudogene" => LineClass::Gene(GeneClass::Pseudogene),
        "mrna" => LineClass::Rna(TranscriptKind::Mrna),
        "trna" => LineClass::Rna(TranscriptKind::Trna),
        "rrna" => LineClass::Rna(TranscriptKind::Rrna),
        f if f.contains("transcript") => LineClass::Transcript,
        f if f.contains("cds") => LineClass::Segment(SegmentKind::Cds),
        f if f.contains("exon") => LineClass::Segment(SegmentKind::Exon),
        _ => LineClass::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_types() {
        assert_eq!(classify("gene"), LineClass::Gene(GeneClass::Gene));
        assert_eq!(classify("Pseudogene"), LineClass::Gene(GeneClass::Pseudogene));
        assert_eq!(classify("mRNA"), LineClass::Rna(TranscriptKind::Mrna));
        assert_eq!(classify("tRNA"), LineClass::Rna(TranscriptKind::Trna));
        assert_eq!(classify("RRNA"), LineClass::Rna(TranscriptKind::Rrna));
    }

    #[test]
    fn test_substring_types() {
        assert_eq!(classify("transcript"), LineClass::Transcript);
        assert_eq!(classify("primary_transcript"), LineClass::Transcript);
        assert_eq!(classify("CDS"), LineClass::Segment(SegmentKind::Cds));
        assert_eq!(classify("cds_predicted"), LineClass::Segment(SegmentKind::Cds));
        assert_eq!(classify("exon"), LineClass::Segment(SegmentKind::Exon));
        assert_eq!(classify("noncoding_exon"), LineClass::Segment(SegmentKind::Exon));
    }

    #[test]
    fn test_ignored_types() {
        assert_eq!(classify("five_prime_UTR"), LineClass::Ignored);
        assert_eq!(classify("start_codon"), LineClass::Ignored);
        assert_eq!(classify("ncRNA_gene"), LineClass::Ignored);
        assert_eq!(classify("lnc_RNA"), LineClass::Ignored);
    }
}
