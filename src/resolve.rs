use hashbrown::HashMap;

use crate::gxf::{contig_key, Attributes};
use crate::hierarchy::TranscriptKind;

/// Owning gene and kind of a registered transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub gene_id: String,
    pub kind: TranscriptKind,
}

/// `(contig, transcript id) → owning gene` table.
///
/// Filled by RNA and transcript lines; CDS and exon lines only carry
/// `Parent=<transcript id>` and find their gene through it.
#[derive(Debug, Default, Clone)]
pub struct TranscriptLookup {
    by_contig: HashMap<String, HashMap<String, TranscriptEntry>>,
}

impl TranscriptLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a transcript; a later line with the same id replaces it.
    pub fn register(
        &mut self,
        contig: &str,
        transcript_id: &str,
        gene_id: &str,
        kind: TranscriptKind,
    ) {
        self.by_contig.entry(contig.to_string()).or_default().insert(
            transcript_id.to_string(),
            TranscriptEntry {
                gene_id: gene_id.to_string(),
                kind,
            },
        );
    }

    pub fn get(&self, contig: &str, transcript_id: &str) -> Option<&TranscriptEntry> {
        self.by_contig
            .get(contig)
            .and_then(|by_id| by_id.get(transcript_id))
    }

    pub fn len(&self) -> usize {
        self.by_contig.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where a CDS/exon line belongs. Either id may be unresolved.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParentResolution {
    pub gene_id: Option<String>,
    pub parent_id: Option<String>,
    /// Kind the parent was registered with, if it was registered at all.
    pub kind: Option<TranscriptKind>,
}

impl ParentResolution {
    /// Both ids, or `None` when the line cannot be placed.
    pub fn placed(&self) -> Option<(&str, &str)> {
        Some((self.gene_id.as_deref()?, self.parent_id.as_deref()?))
    }
}

/// Resolves the gene and immediate parent of a child line.
///
/// GFF3 `Parent` wins over GTF `transcript_id`. A `Parent` is only tied to a
/// gene through `lookup`; a GTF line names its gene directly.
pub fn resolve_parent(
    attrs: &Attributes<'_>,
    lookup: &TranscriptLookup,
    seqid: &str,
) -> ParentResolution {
    let contig = contig_key(seqid);

    if let Some(parent) = attrs.get("parent") {
        let entry = lookup.get(contig, parent);
        ParentResolution {
            gene_id: entry.map(|e| e.gene_id.clone()),
            parent_id: Some(parent.to_string()),
            kind: entry.map(|e| e.kind),
        }
    } else if let Some(transcript_id) = attrs.get("transcript_id") {
        ParentResolution {
            gene_id: attrs.get("gene_id").map(str::to_string),
            parent_id: Some(transcript_id.to_string()),
            kind: lookup.get(contig, transcript_id).map(|e| e.kind),
        }
    } else {
        ParentResolution::default()
    }
}
