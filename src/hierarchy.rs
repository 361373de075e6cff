//! Typed gene → transcript → segment tree rebuilt from a GFF3/GTF file.
//!
//! The tree is keyed as
//! `contig → gene class → gene id → transcript kind → transcript id → segment kind`,
//! with every level created on first sighting and never removed. Location
//! lists keep file order; [`FeatureHierarchy::sort_locations`] is the only
//! place they get reordered.

use hashbrown::HashMap;

use crate::gxf::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeneClass {
    Gene,
    Pseudogene,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TranscriptKind {
    Mrna,
    Trna,
    Rrna,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SegmentKind {
    Cds,
    Exon,
}

impl GeneClass {
    pub const ALL: [GeneClass; 2] = [GeneClass::Gene, GeneClass::Pseudogene];
}

impl TranscriptKind {
    pub const ALL: [TranscriptKind; 3] =
        [TranscriptKind::Mrna, TranscriptKind::Trna, TranscriptKind::Rrna];
}

impl SegmentKind {
    pub const ALL: [SegmentKind; 2] = [SegmentKind::Cds, SegmentKind::Exon];
}

impl std::fmt::Display for GeneClass {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            GeneClass::Gene => write!(f, "gene"),
            GeneClass::Pseudogene => write!(f, "pseudogene"),
        }
    }
}

impl std::fmt::Display for TranscriptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TranscriptKind::Mrna => write!(f, "mRNA"),
            TranscriptKind::Trna => write!(f, "tRNA"),
            TranscriptKind::Rrna => write!(f, "rRNA"),
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SegmentKind::Cds => write!(f, "CDS"),
            SegmentKind::Exon => write!(f, "exon"),
        }
    }
}

/// Replaces `slot` only when a new value is present; never clears it.
#[inline(always)]
pub fn merge_scalar(slot: &mut Option<String>, value: Option<&str>) {
    if let Some(value) = value {
        *slot = Some(value.to_string());
    }
}

/// CDS or exon parts of one transcript, one location per file line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SegmentRecord {
    pub(crate) id: Option<String>,
    pub(crate) protein_id: Option<String>,
    pub(crate) locations: Vec<Location>,
}

impl SegmentRecord {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Only ever set on CDS records.
    pub fn protein_id(&self) -> Option<&str> {
        self.protein_id.as_deref()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// A segment with no valid location failed to materialize.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRecord {
    pub(crate) kind: TranscriptKind,
    pub(crate) gene_id: String,
    pub(crate) locations: Vec<Location>,
    pub(crate) product: Option<String>,
    pub(crate) cds: Option<SegmentRecord>,
    pub(crate) exon: Option<SegmentRecord>,
}

impl TranscriptRecord {
    fn new(kind: TranscriptKind, gene_id: &str) -> Self {
        Self {
            kind,
            gene_id: gene_id.to_string(),
            locations: Vec::new(),
            product: None,
            cds: None,
            exon: None,
        }
    }

    pub fn kind(&self) -> TranscriptKind {
        self.kind
    }

    pub fn gene_id(&self) -> &str {
        &self.gene_id
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn product(&self) -> Option<&str> {
        self.product.as_deref()
    }

    pub fn cds(&self) -> Option<&SegmentRecord> {
        self.cds.as_ref()
    }

    pub fn exon(&self) -> Option<&SegmentRecord> {
        self.exon.as_ref()
    }

    pub fn segment(&self, kind: SegmentKind) -> Option<&SegmentRecord> {
        match kind {
            SegmentKind::Cds => self.cds(),
            SegmentKind::Exon => self.exon(),
        }
    }

    pub(crate) fn segment_entry(&mut self, kind: SegmentKind) -> &mut SegmentRecord {
        match kind {
            SegmentKind::Cds => self.cds.get_or_insert_with(SegmentRecord::default),
            SegmentKind::Exon => self.exon.get_or_insert_with(SegmentRecord::default),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneRecord {
    pub(crate) class: GeneClass,
    pub(crate) locations: Vec<Location>,
    pub(crate) transcripts: HashMap<TranscriptKind, HashMap<String, TranscriptRecord>>,
}

impl GeneRecord {
    fn new(class: GeneClass) -> Self {
        Self {
            class,
            locations: Vec::new(),
            transcripts: HashMap::new(),
        }
    }

    pub fn class(&self) -> GeneClass {
        self.class
    }

    /// Empty when transcripts referenced this gene but no gene line was seen.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn transcripts(
        &self,
        kind: TranscriptKind,
    ) -> impl Iterator<Item = (&str, &TranscriptRecord)> + '_ {
        self.transcripts
            .get(&kind)
            .into_iter()
            .flat_map(|by_id| by_id.iter().map(|(id, tx)| (id.as_str(), tx)))
    }

    pub fn transcript(&self, kind: TranscriptKind, id: &str) -> Option<&TranscriptRecord> {
        self.transcripts.get(&kind).and_then(|by_id| by_id.get(id))
    }

    pub fn transcript_count(&self) -> usize {
        self.transcripts.values().map(HashMap::len).sum()
    }

    pub(crate) fn transcript_entry(
        &mut self,
        kind: TranscriptKind,
        id: &str,
        gene_id: &str,
    ) -> &mut TranscriptRecord {
        self.transcripts
            .entry(kind)
            .or_default()
            .entry(id.to_string())
            .or_insert_with(|| TranscriptRecord::new(kind, gene_id))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContigRecord {
    pub(crate) genes: HashMap<GeneClass, HashMap<String, GeneRecord>>,
}

impl ContigRecord {
    pub fn genes(&self, class: GeneClass) -> impl Iterator<Item = (&str, &GeneRecord)> + '_ {
        self.genes
            .get(&class)
            .into_iter()
            .flat_map(|by_id| by_id.iter().map(|(id, gene)| (id.as_str(), gene)))
    }

    pub fn gene(&self, class: GeneClass, id: &str) -> Option<&GeneRecord> {
        self.genes.get(&class).and_then(|by_id| by_id.get(id))
    }
}

/// Counts over a resolved hierarchy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyStats {
    pub contigs: usize,
    pub genes: usize,
    pub pseudogenes: usize,
    pub transcripts: usize,
    pub cds: usize,
    pub exons: usize,
}

impl std::fmt::Display for HierarchyStats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} contigs, {} genes, {} pseudogenes, {} transcripts, {} CDS, {} exon records",
            self.contigs, self.genes, self.pseudogenes, self.transcripts, self.cds, self.exons
        )
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FeatureHierarchy {
    contigs: HashMap<String, ContigRecord>,
}

impl FeatureHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.contigs.is_empty()
    }

    pub fn contigs(&self) -> impl Iterator<Item = (&str, &ContigRecord)> + '_ {
        self.contigs.iter().map(|(name, contig)| (name.as_str(), contig))
    }

    pub fn contig(&self, name: &str) -> Option<&ContigRecord> {
        self.contigs.get(name)
    }

    /// Finds a transcript on `contig` regardless of its gene class or kind.
    pub fn find_transcript(&self, contig: &str, id: &str) -> Option<&TranscriptRecord> {
        let contig = self.contigs.get(contig)?;
        contig
            .genes
            .values()
            .flat_map(HashMap::values)
            .flat_map(|gene| gene.transcripts.values())
            .find_map(|by_id| by_id.get(id))
    }

    pub(crate) fn gene_entry(
        &mut self,
        contig: &str,
        class: GeneClass,
        gene_id: &str,
    ) -> &mut GeneRecord {
        self.contigs
            .entry(contig.to_string())
            .or_default()
            .genes
            .entry(class)
            .or_default()
            .entry(gene_id.to_string())
            .or_insert_with(|| GeneRecord::new(class))
    }

    /// Orders every location list by coordinates.
    ///
    /// Never applied while building; callers that need sorted output for
    /// reverse-strand or shuffled inputs ask for it explicitly.
    pub fn sort_locations(&mut self) {
        for contig in self.contigs.values_mut() {
            for gene in contig.genes.values_mut().flat_map(HashMap::values_mut) {
                gene.locations.sort();
                for tx in gene.transcripts.values_mut().flat_map(HashMap::values_mut) {
                    tx.locations.sort();
                    if let Some(cds) = tx.cds.as_mut() {
                        cds.locations.sort();
                    }
                    if let Some(exon) = tx.exon.as_mut() {
                        exon.locations.sort();
                    }
                }
            }
        }
    }

    pub fn stats(&self) -> HierarchyStats {
        let mut stats = HierarchyStats {
            contigs: self.contigs.len(),
            ..Default::default()
        };

        for contig in self.contigs.values() {
            for (class, genes) in contig.genes.iter() {
                match class {
                    GeneClass::Gene => stats.genes += genes.len(),
                    GeneClass::Pseudogene => stats.pseudogenes += genes.len(),
                }

                for tx in genes
                    .values()
                    .flat_map(|gene| gene.transcripts.values())
                    .flat_map(HashMap::values)
                {
                    stats.transcripts += 1;
                    stats.cds += tx.cds.is_some() as usize;
                    stats.exons += tx.exon.is_some() as usize;
                }
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gxf::Strand;

    #[test]
    fn test_merge_scalar_keeps_existing() {
        let mut slot = None;
        merge_scalar(&mut slot, Some("P1"));
        merge_scalar(&mut slot, None);
        assert_eq!(slot.as_deref(), Some("P1"));
        merge_scalar(&mut slot, Some("P2"));
        assert_eq!(slot.as_deref(), Some("P2"));
    }

    #[test]
    fn test_entries_are_created_once() {
        let mut hierarchy = FeatureHierarchy::new();
        hierarchy
            .gene_entry("chr1", GeneClass::Gene, "g1")
            .locations
            .push(Location::stranded(1, 100, Strand::Forward));
        hierarchy
            .gene_entry("chr1", GeneClass::Gene, "g1")
            .transcript_entry(TranscriptKind::Mrna, "g1.t1", "g1")
            .segment_entry(SegmentKind::Cds)
            .locations
            .push(Location::new(10, 20));
        hierarchy
            .gene_entry("chr1", GeneClass::Gene, "g1")
            .transcript_entry(TranscriptKind::Mrna, "g1.t1", "g1")
            .segment_entry(SegmentKind::Cds)
            .locations
            .push(Location::new(30, 40));

        let gene = hierarchy.contig("chr1").unwrap().gene(GeneClass::Gene, "g1").unwrap();
        assert_eq!(gene.locations().len(), 1);
        assert_eq!(gene.transcript_count(), 1);

        let tx = gene.transcript(TranscriptKind::Mrna, "g1.t1").unwrap();
        assert_eq!(tx.gene_id(), "g1");
        assert_eq!(
            tx.cds().unwrap().locations(),
            &[Location::new(10, 20), Location::new(30, 40)]
        );
        assert!(tx.exon().is_none());
    }

    #[test]
    fn test_sort_locations_is_explicit() {
        let mut hierarchy = FeatureHierarchy::new();
        let exon = hierarchy
            .gene_entry("chr1", GeneClass::Gene, "g1")
            .transcript_entry(TranscriptKind::Mrna, "t1", "g1")
            .segment_entry(SegmentKind::Exon);
        exon.locations.push(Location::new(300, 400));
        exon.locations.push(Location::new(100, 200));

        let tx = hierarchy.find_transcript("chr1", "t1").unwrap();
        assert_eq!(tx.exon().unwrap().locations()[0].start, 300);

        hierarchy.sort_locations();
        let tx = hierarchy.find_transcript("chr1", "t1").unwrap();
        assert_eq!(
            tx.exon().unwrap().locations(),
            &[Location::new(100, 200), Location::new(300, 400)]
        );
    }

    #[test]
    fn test_stats() {
        let mut hierarchy = FeatureHierarchy::new();
        hierarchy.gene_entry("chr1", GeneClass::Gene, "g1");
        hierarchy
            .gene_entry("chr2", GeneClass::Pseudogene, "p1")
            .transcript_entry(TranscriptKind::Trna, "p1.t1", "p1")
            .segment_entry(SegmentKind::Exon);

        let stats = hierarchy.stats();
        assert_eq!(
            stats,
            HierarchyStats {
                contigs: 2,
                genes: 1,
                pseudogenes: 1,
                transcripts: 1,
                cds: 0,
                exons: 1,
            }
        );
    }
}
