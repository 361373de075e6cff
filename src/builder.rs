use hashbrown::HashSet;
use std::io::BufRead;

use crate::classify::{classify, LineClass};
use crate::error::{GxfTreeError, Result};
use crate::gxf::{Attributes, GxfRecord, Location};
use crate::hierarchy::{merge_scalar, FeatureHierarchy, GeneClass, SegmentKind, TranscriptKind};
use crate::resolve::{resolve_parent, TranscriptLookup};

/// How the sticky pseudogene registry is keyed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum PseudogeneScope {
    /// By gene id alone: a pseudogene id is a pseudogene on every contig.
    #[default]
    Global,
    /// By (contig, gene id).
    Contig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuilderOptions {
    pub pseudogene_scope: PseudogeneScope,
}

/// A line the builder skipped or could only partly use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// 1-based line number.
    pub line: usize,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// CDS/exon line whose transcript or gene could not be found; dropped.
    UnresolvedParent { parent: Option<String> },
    /// RNA/transcript line without the ids needed to place it; skipped.
    MissingParentAttributes,
    /// Start/end are not integers; the feature is kept without this location.
    MalformedCoordinates,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.kind {
            WarningKind::UnresolvedParent { parent: Some(parent) } => write!(
                f,
                "line {}: parent {parent:?} is not a known transcript, feature dropped",
                self.line
            ),
            WarningKind::UnresolvedParent { parent: None } => {
                write!(f, "line {}: no Parent or transcript_id, feature dropped", self.line)
            }
            WarningKind::MissingParentAttributes => {
                write!(f, "line {}: transcript without ID/Parent, skipped", self.line)
            }
            WarningKind::MalformedCoordinates => {
                write!(f, "line {}: invalid coordinates, location skipped", self.line)
            }
        }
    }
}

/// Everything a finished run produced.
#[derive(Debug, Default)]
pub struct Resolved {
    pub hierarchy: FeatureHierarchy,
    pub warnings: Vec<Warning>,
    /// Lines consumed, comments and ignored lines included.
    pub lines: usize,
}

#[derive(Debug, Default)]
struct PseudogeneRegistry {
    scope: PseudogeneScope,
    ids: HashSet<(Option<String>, String)>,
}

impl PseudogeneRegistry {
    fn key(&self, contig: &str, gene_id: &str) -> (Option<String>, String) {
        let contig = match self.scope {
            PseudogeneScope::Global => None,
            PseudogeneScope::Contig => Some(contig.to_string()),
        };
        (contig, gene_id.to_string())
    }

    fn insert(&mut self, contig: &str, gene_id: &str) {
        let key = self.key(contig, gene_id);
        self.ids.insert(key);
    }

    fn class_of(&self, contig: &str, gene_id: &str) -> GeneClass {
        if self.ids.contains(&self.key(contig, gene_id)) {
            GeneClass::Pseudogene
        } else {
            GeneClass::Gene
        }
    }
}

/// Single-pass GFF3/GTF → [`FeatureHierarchy`] resolver.
///
/// Lines must be pushed in file order: a transcript has to be seen before
/// the CDS and exon lines that point at it. Lines are consumed until the
/// input ends or a `##FASTA` section starts.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    hierarchy: FeatureHierarchy,
    lookup: TranscriptLookup,
    pseudogenes: PseudogeneRegistry,
    warnings: Vec<Warning>,
    line: usize,
    done: bool,
}

impl HierarchyBuilder {
    pub fn new(options: BuilderOptions) -> Self {
        Self {
            pseudogenes: PseudogeneRegistry {
                scope: options.pseudogene_scope,
                ids: HashSet::new(),
            },
            ..Default::default()
        }
    }

    /// True once a `##FASTA` directive was seen; later lines are ignored.
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn lookup(&self) -> &TranscriptLookup {
        &self.lookup
    }

    /// Feeds the next line of the file.
    ///
    /// # Errors
    ///
    /// Fails with [`GxfTreeError::MissingGeneId`] when a gene line has no
    /// usable identifier. The builder should be discarded after that.
    pub fn push_line(&mut self, line: &str) -> Result<()> {
        self.line += 1;
        if self.done {
            return Ok(());
        }

        // only the terminator: an empty 9th column still counts as a column
        let line = line.trim_end_matches(['\r', '\n']);
        if line.starts_with("##FASTA") {
            log::debug!("line {}: FASTA section, stopping", self.line);
            self.done = true;
            return Ok(());
        }
        if line.trim().is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let record = match GxfRecord::parse(line) {
            Ok(record) => record,
            Err(e) => {
                log::debug!("line {}: ignored, {e}", self.line);
                return Ok(());
            }
        };

        match classify(record.feature) {
            LineClass::Gene(class) => self.gene_line(&record, class)?,
            LineClass::Rna(kind) => {
                let attrs = Attributes::parse(record.attributes);
                self.rna_line(&record, &attrs, kind)
            }
            LineClass::Transcript => self.transcript_line(&record),
            LineClass::Segment(kind) => self.segment_line(&record, kind),
            LineClass::Ignored => {
                log::debug!("line {}: feature {:?} ignored", self.line, record.feature)
            }
        }

        Ok(())
    }

    pub fn finish(self) -> Resolved {
        Resolved {
            hierarchy: self.hierarchy,
            warnings: self.warnings,
            lines: self.line,
        }
    }

    fn warn(&mut self, kind: WarningKind) {
        let warning = Warning {
            line: self.line,
            kind,
        };
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    fn location_of(&mut self, record: &GxfRecord<'_>, with_strand: bool) -> Option<Location> {
        match record.location(with_strand) {
            Ok(location) => Some(location),
            Err(_) => {
                self.warn(WarningKind::MalformedCoordinates);
                None
            }
        }
    }

    fn gene_line(&mut self, record: &GxfRecord<'_>, class: GeneClass) -> Result<()> {
        let attrs = Attributes::parse(record.attributes);
        let raw = record.attributes.trim().trim_end_matches(';');

        // id-less columns are only accepted when they hold nothing but the id
        let gene_id = match attrs.get("id") {
            Some(id) => id,
            None if !attrs.has_values() && !raw.is_empty() => raw,
            None => {
                return Err(GxfTreeError::MissingGeneId {
                    line: self.line,
                    attributes: record.attributes.to_string(),
                })
            }
        };

        let contig = record.contig();
        if class == GeneClass::Pseudogene {
            self.pseudogenes.insert(contig, gene_id);
        }

        let location = self.location_of(record, true);
        let gene = self.hierarchy.gene_entry(contig, class, gene_id);
        gene.locations.extend(location);

        Ok(())
    }

    fn rna_line(&mut self, record: &GxfRecord<'_>, attrs: &Attributes<'_>, kind: TranscriptKind) {
        let (Some(id), Some(gene_id)) = (attrs.get("id"), attrs.get("parent")) else {
            self.warn(WarningKind::MissingParentAttributes);
            return;
        };

        let location = self.location_of(record, true);
        let product = attrs.get("product");
        self.place_transcript(record.contig(), gene_id, id, kind, location, product);
    }

    fn transcript_line(&mut self, record: &GxfRecord<'_>) {
        let attrs = Attributes::parse(record.attributes);

        if record.attributes.contains('=') {
            self.rna_line(record, &attrs, TranscriptKind::Mrna);
        } else if let Some(transcript_id) = attrs.get("transcript_id") {
            let Some(gene_id) = attrs.get("gene_id") else {
                self.warn(WarningKind::MissingParentAttributes);
                return;
            };
            let location = self.location_of(record, true);
            self.place_transcript(
                record.contig(),
                gene_id,
                transcript_id,
                TranscriptKind::Mrna,
                location,
                None,
            );
        } else if !attrs.has_values() {
            // Augustus: the column is the bare transcript id, e.g. g1.t1
            let transcript_id = record.attributes.trim().trim_end_matches(';');
            if transcript_id.is_empty() {
                self.warn(WarningKind::MissingParentAttributes);
                return;
            }
            let gene_id = transcript_id.split('.').next().unwrap_or(transcript_id);
            let location = self.location_of(record, false);
            self.place_transcript(
                record.contig(),
                gene_id,
                transcript_id,
                TranscriptKind::Mrna,
                location,
                None,
            );
        } else {
            self.warn(WarningKind::MissingParentAttributes);
        }
    }

    fn place_transcript(
        &mut self,
        contig: &str,
        gene_id: &str,
        transcript_id: &str,
        kind: TranscriptKind,
        location: Option<Location>,
        product: Option<&str>,
    ) {
        self.lookup.register(contig, transcript_id, gene_id, kind);

        let class = self.pseudogenes.class_of(contig, gene_id);
        let tx = self
            .hierarchy
            .gene_entry(contig, class, gene_id)
            .transcript_entry(kind, transcript_id, gene_id);

        let Some(location) = location else {
            return;
        };
        let first = tx.locations.is_empty();
        tx.locations.push(location);
        if first && tx.product.is_none() {
            tx.product = product.map(str::to_string);
        }
    }

    fn segment_line(&mut self, record: &GxfRecord<'_>, kind: SegmentKind) {
        let attrs = Attributes::parse(record.attributes);
        let resolution = resolve_parent(&attrs, &self.lookup, record.seqid);

        let Some((gene_id, transcript_id)) = resolution.placed() else {
            self.warn(WarningKind::UnresolvedParent {
                parent: resolution.parent_id.clone(),
            });
            return;
        };

        let contig = record.contig();
        let tx_kind = resolution.kind.unwrap_or(TranscriptKind::Mrna);
        let class = self.pseudogenes.class_of(contig, gene_id);
        let location = self.location_of(record, false);

        let segment = self
            .hierarchy
            .gene_entry(contig, class, gene_id)
            .transcript_entry(tx_kind, transcript_id, gene_id)
            .segment_entry(kind);

        merge_scalar(&mut segment.id, attrs.get("id"));
        if kind == SegmentKind::Cds {
            merge_scalar(&mut segment.protein_id, attrs.get("protein_id"));
        }
        segment.locations.extend(location);
    }
}

/// Runs a whole reader through a fresh [`HierarchyBuilder`].
pub fn build_hierarchy<R: BufRead>(reader: R, options: BuilderOptions) -> Result<Resolved> {
    let mut builder = HierarchyBuilder::new(options);

    for line in reader.lines() {
        builder.push_line(&line?)?;
        if builder.is_done() {
            break;
        }
    }

    Ok(builder.finish())
}
